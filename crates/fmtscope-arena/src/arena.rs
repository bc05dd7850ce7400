//! Labelled byte buffers with checked access.

use crate::error::MemoryError;

/// A fixed-size, labelled byte buffer.
///
/// The size is settled at construction. Reads and writes name a byte offset
/// and a length and fail as a whole when any byte falls outside the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arena {
    label: String,
    bytes: Vec<u8>,
}

impl Arena {
    /// Wrap an existing byte sequence.
    pub fn from_bytes(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            bytes,
        }
    }

    /// Allocate `len` zero bytes.
    pub fn zeroed(label: impl Into<String>, len: usize) -> Self {
        Self::from_bytes(label, vec![0; len])
    }

    /// Diagnostic label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the arena holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The whole buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn span(&self, offset: i64, len: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        let start = usize::try_from(offset).ok();
        match start.and_then(|s| s.checked_add(len).map(|e| (s, e))) {
            Some((start, end)) if end <= self.bytes.len() => Ok(start..end),
            _ => Err(MemoryError::OutOfRange {
                label: self.label.clone(),
                offset,
                len,
                size: self.bytes.len(),
            }),
        }
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn read(&self, offset: i64, len: usize) -> Result<&[u8], MemoryError> {
        let span = self.span(offset, len)?;
        Ok(&self.bytes[span])
    }

    /// Overwrite `len` bytes starting at `offset` with `bytes`.
    ///
    /// `bytes.len()` must equal `len`.
    pub fn write(&mut self, offset: i64, len: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        if bytes.len() != len {
            return Err(MemoryError::WrongSize {
                label: self.label.clone(),
                expected: len,
                actual: bytes.len(),
            });
        }
        let span = self.span(offset, len)?;
        self.bytes[span].copy_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn read_inside_bounds() {
        let arena = Arena::from_bytes("t", vec![1, 2, 3, 4]);
        assert_eq!(arena.read(1, 2).unwrap(), &[2, 3]);
        assert_eq!(arena.read(4, 0).unwrap(), &[] as &[u8]);
    }

    #[test]
    fn negative_offset_is_rejected() {
        let arena = Arena::zeroed("t", 8);
        assert!(matches!(
            arena.read(-1, 1),
            Err(MemoryError::OutOfRange { offset: -1, .. })
        ));
    }

    #[test]
    fn write_with_mismatched_length_is_misuse() {
        let mut arena = Arena::zeroed("t", 8);
        let err = arena.write(0, 4, &[1, 2]).unwrap_err();
        assert_eq!(
            err,
            MemoryError::WrongSize {
                label: "t".into(),
                expected: 4,
                actual: 2
            }
        );
        assert_eq!(arena.as_bytes(), &[0; 8]);
    }

    proptest! {
        #[test]
        fn out_of_range_access_fails_and_mutates_nothing(
            size in 0usize..64,
            offset in -64i64..128,
            len in 0usize..64,
        ) {
            let mut arena = Arena::from_bytes("p", (0..size as u8).collect());
            let before = arena.clone();
            let inside = offset >= 0 && offset as usize + len <= size;
            prop_assert_eq!(arena.read(offset, len).is_ok(), inside);
            let payload = vec![0xAA; len];
            let written = arena.write(offset, len, &payload);
            prop_assert_eq!(written.is_ok(), inside);
            if !inside {
                prop_assert_eq!(arena, before);
            }
        }
    }
}
