//! Phased reader for pdfTeX `.fmt` files.
//!
//! A format is read front to back in ten phases. Each field is checked the
//! moment it arrives and mirrored to the [`Host`](fmtscope_core::Host); the
//! first failed check aborts the whole load with a [`LoadError`] that
//! records how far into the stream the reader got.
//!
//! # Phases
//!
//! ```text
//! constants    signature, engine name, xord/xchr/xprn, hash and mem sizes
//! mltex        MLTeX block
//! enctex       encTeX block and mubyte tables
//! strings      str_start, str_pool, reverse index
//! memory       lo_mem_max, rover, free ring chunks, hi region
//! eqtb         run-length eqtb, prim, sparse + dense hash
//! fonts        font_info and 23 per-font arrays
//! hyphenation  exceptions, trie, ops countdown
//! pdftex       images, pdf_mem, obj_tab, head_tab
//! trailer      interaction, format_ident, 69069
//! ```
//!
//! [`load_format`] is the host-facing entry point and never returns an
//! error; [`read_format`] returns it instead.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod fields;
pub mod loader;
mod phases;
pub mod state;
pub mod stream;
pub mod strings;

pub use error::{LoadError, LoadErrorKind};
pub use loader::{alert_text, load_format, read_format};
pub use state::{
    Encoding, EngineState, Equivalents, Fonts, Header, Hyphenation, ImageMeta, ListState,
    Memory, PdfData, PdfFont,
};
pub use stream::DumpReader;
pub use strings::{Duplicate, StringPool};
