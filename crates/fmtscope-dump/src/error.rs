//! Load failures.

use std::error::Error;
use std::fmt;

use fmtscope_arena::MemoryError;
use fmtscope_core::ArithError;

/// Category of a load failure.
///
/// Each category maps to the one-line reason shown in the host alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    /// Short read or stream failure.
    Io,
    /// Structural or semantic violation of the format.
    Format,
    /// A table ran out of configured capacity.
    Overflow,
    /// Division by zero in a derived computation.
    Arithmetic,
    /// A checked arena access failed.
    MemoryAccess,
}

impl LoadErrorKind {
    /// The reason line of the host alert.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Io => "Failed to perform I/O operation.",
            Self::Format => "pdfTeX format file is corrupted.",
            Self::Overflow => "Failed to store the data.",
            Self::Arithmetic => "Arithmetic error.",
            Self::MemoryAccess => "Failed to access the inaccessible place.",
        }
    }
}

/// A failed load, with the stream offset it failed near.
#[derive(Debug)]
pub struct LoadError {
    kind: LoadErrorKind,
    offset: u64,
    detail: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl LoadError {
    fn new(kind: LoadErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            offset: 0,
            detail: detail.into(),
            source: None,
        }
    }

    /// A format violation.
    pub fn format(detail: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::Format, detail)
    }

    /// A capacity overflow.
    pub fn overflow(detail: impl Into<String>) -> Self {
        Self::new(LoadErrorKind::Overflow, detail)
    }

    /// A short read, optionally caused by an underlying I/O error.
    pub fn io(detail: impl Into<String>, source: Option<std::io::Error>) -> Self {
        Self {
            source: source.map(|e| Box::new(e) as Box<dyn Error + Send + Sync>),
            ..Self::new(LoadErrorKind::Io, detail)
        }
    }

    /// Attach the stream offset the failure happened near.
    pub fn at(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Failure category.
    pub fn kind(&self) -> LoadErrorKind {
        self.kind
    }

    /// Stream offset at failure.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Expected-vs-actual description.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Alert reason line.
    pub fn reason(&self) -> &'static str {
        self.kind.reason()
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (near offset {:08X}): {}",
            self.reason(),
            self.offset,
            self.detail
        )
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

impl From<MemoryError> for LoadError {
    fn from(err: MemoryError) -> Self {
        Self {
            detail: err.to_string(),
            source: Some(Box::new(err)),
            ..Self::new(LoadErrorKind::MemoryAccess, String::new())
        }
    }
}

impl From<ArithError> for LoadError {
    fn from(err: ArithError) -> Self {
        Self {
            detail: err.to_string(),
            source: Some(Box::new(err)),
            ..Self::new(LoadErrorKind::Arithmetic, String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_errors_become_access_failures() {
        let err: LoadError = MemoryError::OutOfRange {
            label: "mem".into(),
            offset: 80,
            len: 8,
            size: 80,
        }
        .into();
        assert_eq!(err.kind(), LoadErrorKind::MemoryAccess);
        assert_eq!(err.detail(), "mem (80 B) [80, 8]");
        assert!(err.source().is_some());
    }

    #[test]
    fn display_carries_offset_and_reason() {
        let err = LoadError::format("Bad .fmt file signature.").at(4);
        assert_eq!(
            err.to_string(),
            "pdfTeX format file is corrupted. (near offset 00000004): Bad .fmt file signature."
        );
    }
}
