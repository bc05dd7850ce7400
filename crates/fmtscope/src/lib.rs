//! fmtscope: load a pdfTeX format file and look inside it.
//!
//! This is the facade crate that re-exports the public API of the fmtscope
//! sub-crates. A load rebuilds the engine state a pdfTeX run would start
//! from; a [`Printer`](node::Printer) then renders node lists, token lists,
//! memory heads and the table of equivalents from it.
//!
//! # Quick start
//!
//! ```rust
//! use fmtscope::prelude::*;
//!
//! let mut host = NullHost;
//! let bytes = b"not a format";
//! let state = load_format(
//!     &bytes[..],
//!     bytes.len() as u64,
//!     "junk.fmt",
//!     &TexConfig::new(),
//!     &mut host,
//! );
//! assert!(state.is_none());
//!
//! let err = read_format(&bytes[..], bytes.len() as u64, &TexConfig::new(), &mut host)
//!     .unwrap_err();
//! assert_eq!(err.kind(), LoadErrorKind::Format);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `fmtscope-core` | layout constants, `TexConfig`, `Host`, TeX arithmetic |
//! | [`arena`] | `fmtscope-arena` | checked typed memory: `Arena`, `Table`, `View`, `Cell` |
//! | [`dump`] | `fmtscope-dump` | the phased reader and `EngineState` |
//! | [`node`] | `fmtscope-node` | `Printer` and the decoded `Node` type |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Checked typed memory (`fmtscope-arena`).
///
/// Every array of an [`dump::EngineState`] is an [`arena::Table`].
pub use fmtscope_arena as arena;

/// Layout constants, configuration and the host interface (`fmtscope-core`).
pub use fmtscope_core as types;

/// Format reader and engine state (`fmtscope-dump`).
///
/// [`dump::load_format`] never fails; [`dump::read_format`] returns the
/// [`dump::LoadError`] instead of alerting.
pub use fmtscope_dump as dump;

/// Node, token and equivalents printer (`fmtscope-node`).
pub use fmtscope_node as node;

/// Common imports for loading a format and printing from it.
///
/// ```rust
/// use fmtscope::prelude::*;
/// ```
pub mod prelude {
    // Configuration and sinks
    pub use fmtscope_core::{Host, NullHost, TexConfig};

    // Memory
    pub use fmtscope_arena::MemoryError;

    // Loading
    pub use fmtscope_dump::{load_format, read_format, EngineState, LoadError, LoadErrorKind};

    // Printing
    pub use fmtscope_node::{Node, Printer, ShowError, Whatsit};
}
