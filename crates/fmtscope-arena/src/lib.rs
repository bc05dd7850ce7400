//! Bounds-checked typed memory for the fmtscope format inspector.
//!
//! Every array of a reconstructed engine state lives in an [`Arena`]: a
//! labelled, fixed-size byte buffer. Typed access goes through a [`View`]
//! (a pointer analogue with a signed base) which yields [`Cell`]s bound to
//! one element's bytes. Nothing is ever dereferenced without a range check,
//! so a corrupt format surfaces as a [`MemoryError`] rather than a panic.
//!
//! # Architecture
//!
//! ```text
//! Table<T> (owning pairing used by the engine state)
//! ├── Arena (label + Vec<u8>, checked read/write)
//! └── origin (index of the first element; may be negative)
//!
//! View<A, T>  base + k / base - k, unchecked until accessed
//! └── Cell<A, T>  byte offset of one element
//!     ├── Scalar get/set (big-endian i8..u64, f32, f64)
//!     └── word sub-views (MemoryWord → TwoHalves → b0/b1, FourQuarters ...)
//! ```
//!
//! `A` is anything that borrows an arena: `&Arena` for reading,
//! `&mut Arena` for writing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod error;
pub mod scalar;
pub mod table;
pub mod view;
pub mod word;

pub use arena::Arena;
pub use error::MemoryError;
pub use scalar::{Element, Scalar};
pub use table::{Table, TableStats};
pub use view::{Cell, View};
pub use word::{FontWord, FourQuarters, MemoryWord, ObjEntry, TwoHalves};
