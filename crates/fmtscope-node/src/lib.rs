//! Printer for the structures held in a loaded pdfTeX format.
//!
//! Everything renders through a [`Printer`], which borrows a read-only
//! [`EngineState`](fmtscope_dump::EngineState) and writes whole lines to a
//! [`Host`](fmtscope_core::Host).
//!
//! | Module | Shows |
//! |--------|-------|
//! | [`node`] | decoded node and whatsit values |
//! | [`show`](Printer::show_node_list) | node lists in `[:KIND ... :]` block form |
//! | [`tokens`] | token lists, one token per line |
//! | [`inspect`] | the list heads at the top of main memory |
//! | [`eqtb`] | single eqtb slots and whole regions |
//! | [`names`] | parameter and command names |
//!
//! Node list walks stop at the first cycle, out-of-range address or
//! over-deep nesting and report it as a [`ShowError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod eqtb;
pub mod error;
pub mod inspect;
pub mod names;
pub mod node;
pub mod printer;
mod show;
pub mod tokens;

pub use error::ShowError;
pub use node::{BoxKind, Dims, Node, Whatsit};
pub use printer::Printer;
pub use tokens::TOKEN_LIMIT;
