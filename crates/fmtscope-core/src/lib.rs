//! Core definitions shared by every fmtscope crate.
//!
//! This is the leaf crate with zero internal dependencies. It pins down
//! the pdfTeX memory layout the format reader and the node printer agree
//! on, the sizing variables a host may tune, the output sink interface,
//! and the handful of TeX integer arithmetic routines the loader needs.
//!
//! # Modules
//!
//! ```text
//! layout   eqtb regions, node codes, memory heads, format signatures
//! config   TexConfig: sizing variables and their clamp windows
//! host     Host trait: log / hexdump / progress / alert sinks
//! arith    round, x_over_n, half
//! error    ArithError
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arith;
pub mod config;
pub mod error;
pub mod host;
pub mod layout;

pub use config::TexConfig;
pub use error::ArithError;
pub use host::{Host, NullHost};
