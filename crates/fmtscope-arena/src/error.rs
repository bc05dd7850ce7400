//! Arena access errors.

use std::error::Error;
use std::fmt;

/// A rejected arena access. The arena is left untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemoryError {
    /// A write supplied a byte run whose length differs from the declared one.
    WrongSize {
        /// Label of the arena.
        label: String,
        /// Declared length in bytes.
        expected: usize,
        /// Length of the supplied bytes.
        actual: usize,
    },
    /// The byte range `[offset, offset + len)` leaves the arena.
    OutOfRange {
        /// Label of the arena.
        label: String,
        /// First byte of the access.
        offset: i64,
        /// Length of the access in bytes.
        len: usize,
        /// Size of the arena in bytes.
        size: usize,
    },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongSize {
                label,
                expected,
                actual,
            } => write!(
                f,
                "{label}: write of {actual} B into a {expected} B slot"
            ),
            Self::OutOfRange {
                label,
                offset,
                len,
                size,
            } => write!(f, "{label} ({size} B) [{offset}, {len}]"),
        }
    }
}

impl Error for MemoryError {}
