//! Test utilities for fmtscope development.
//!
//! [`FmtBuilder`] writes small, structurally valid pdfTeX format streams
//! with knobs for the sections tests care about. [`RecordingHost`] keeps
//! every host call for later inspection.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod builder;
mod host;

pub use builder::{node_word, word_hh, word_int, FmtBuilder, ImageSpec};
pub use host::RecordingHost;
