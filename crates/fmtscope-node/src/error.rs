//! Traversal failures.

use std::error::Error;
use std::fmt;

use fmtscope_arena::MemoryError;
use fmtscope_core::ArithError;

/// Why a show call stopped early.
///
/// Soft anomalies (unknown node types, bad literal modes and the like)
/// never surface here; they print a placeholder and the walk goes on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShowError {
    /// A node address lies past the last word in use.
    BeyondMemEnd {
        /// The offending address.
        at: i32,
        /// Last word in use.
        mem_end: i32,
    },
    /// A node was reached a second time.
    Cycle {
        /// Address of the node seen twice.
        at: i32,
    },
    /// Sublists nest deeper than the configured limit.
    TooDeep {
        /// The configured limit.
        limit: u32,
    },
    /// A field read left an allocated table.
    Memory(MemoryError),
    /// A derived value could not be computed.
    Arith(ArithError),
}

impl fmt::Display for ShowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeyondMemEnd { at, mem_end } => {
                write!(f, "show_node_list: p ({at}) > mem_end ({mem_end}).")
            }
            Self::Cycle { at } => write!(f, "show_node_list: node {at} was already shown."),
            Self::TooDeep { limit } => {
                write!(f, "show_node_list: lists nest deeper than {limit} levels.")
            }
            Self::Memory(e) => write!(f, "Failed to access the inaccessible place: {e}"),
            Self::Arith(e) => write!(f, "Arithmetic error: {e}"),
        }
    }
}

impl Error for ShowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Memory(e) => Some(e),
            Self::Arith(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MemoryError> for ShowError {
    fn from(err: MemoryError) -> Self {
        Self::Memory(err)
    }
}

impl From<ArithError> for ShowError {
    fn from(err: ArithError) -> Self {
        Self::Arith(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_errors_keep_their_source() {
        let err: ShowError = MemoryError::OutOfRange {
            label: "mem".into(),
            offset: 800,
            len: 8,
            size: 80,
        }
        .into();
        assert!(err.source().is_some());
        assert!(err.to_string().contains("mem (80 B) [800, 8]"));
    }

    #[test]
    fn cycle_names_the_node() {
        let err = ShowError::Cycle { at: 120 };
        assert_eq!(err.to_string(), "show_node_list: node 120 was already shown.");
    }
}
