//! The string pool: bytes, start offsets and a reverse content index.

use indexmap::IndexMap;

use fmtscope_arena::{MemoryError, Table};
use fmtscope_core::TexConfig;

use crate::error::LoadError;

/// A string seen twice while building the reverse index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Duplicate {
    /// Number of the later occurrence.
    pub id: i32,
    /// Pool offset of the later occurrence.
    pub offset: i32,
    /// The string's bytes.
    pub bytes: Vec<u8>,
}

/// Packed string storage.
///
/// String `s` occupies `pool[start[s] .. start[s + 1]]`. Strings past
/// `init_str_ptr` were interned after loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StringPool {
    pub(crate) pool: Table<u8>,
    pub(crate) start: Table<i32>,
    pub(crate) pool_ptr: i32,
    pub(crate) str_ptr: i32,
    pub(crate) init_pool_ptr: i32,
    pub(crate) init_str_ptr: i32,
    pub(crate) pool_size: i32,
    pub(crate) pool_free: i32,
    pub(crate) max_strings: i32,
    pub(crate) strings_free: i32,
    index: IndexMap<Vec<u8>, i32>,
}

impl StringPool {
    /// An empty pool sized by `config`.
    pub fn new(config: &TexConfig) -> Self {
        Self {
            pool: Table::empty("str_pool"),
            start: Table::empty("str_start"),
            pool_ptr: 0,
            str_ptr: 0,
            init_pool_ptr: 0,
            init_str_ptr: 0,
            pool_size: config.pool_size,
            pool_free: config.pool_free,
            max_strings: config.max_strings,
            strings_free: config.strings_free,
            index: IndexMap::new(),
        }
    }

    /// Allocate both tables at their final capacity.
    pub(crate) fn allocate(&mut self) {
        self.start = Table::alloc("str_start", self.max_strings.max(0) as usize);
        self.pool = Table::alloc("str_pool", self.pool_size.max(0) as usize);
    }

    /// Number of strings.
    pub fn str_ptr(&self) -> i32 {
        self.str_ptr
    }

    /// Bytes in use.
    pub fn pool_ptr(&self) -> i32 {
        self.pool_ptr
    }

    /// `str_ptr` right after loading.
    pub fn init_str_ptr(&self) -> i32 {
        self.init_str_ptr
    }

    /// `pool_ptr` right after loading.
    pub fn init_pool_ptr(&self) -> i32 {
        self.init_pool_ptr
    }

    /// Pool capacity in bytes.
    pub fn pool_size(&self) -> i32 {
        self.pool_size
    }

    /// String table capacity.
    pub fn max_strings(&self) -> i32 {
        self.max_strings
    }

    /// The pool bytes table.
    pub fn pool(&self) -> &Table<u8> {
        &self.pool
    }

    /// The start offsets table.
    pub fn starts(&self) -> &Table<i32> {
        &self.start
    }

    /// Length of string `s`.
    pub fn length(&self, s: i32) -> Result<i32, MemoryError> {
        let s = i64::from(s);
        Ok(self.start.get(s + 1)? - self.start.get(s)?)
    }

    /// Bytes of string `s`.
    pub fn bytes(&self, s: i32) -> Result<&[u8], MemoryError> {
        let from = self.start.get(i64::from(s))?;
        let len = self.length(s)?.max(0);
        self.pool.read_range(i64::from(from), len as usize)
    }

    /// Whether strings `s` and `t` hold the same bytes.
    pub fn str_eq_str(&self, s: i32, t: i32) -> Result<bool, MemoryError> {
        Ok(self.bytes(s)? == self.bytes(t)?)
    }

    /// Number of the string holding `bytes`, if any.
    pub fn lookup(&self, bytes: &[u8]) -> Option<i32> {
        self.index.get(bytes).copied()
    }

    /// Close the string under construction (`start[str_ptr] .. pool_ptr`).
    pub fn make_string(&mut self) -> Result<i32, LoadError> {
        if self.str_ptr == self.max_strings {
            return Err(LoadError::overflow(format!(
                "The maximal limit of free slots for strings ({}) was exhausted.",
                self.max_strings - self.init_str_ptr
            )));
        }
        self.str_ptr += 1;
        self.start.set(i64::from(self.str_ptr), self.pool_ptr)?;
        Ok(self.str_ptr - 1)
    }

    /// Number of the string holding `bytes`, appending it when missing.
    pub fn intern(&mut self, bytes: &[u8]) -> Result<i32, LoadError> {
        if let Some(s) = self.lookup(bytes) {
            return Ok(s);
        }
        let len = i32::try_from(bytes.len()).unwrap_or(i32::MAX);
        if self.pool_ptr.saturating_add(len) > self.pool_size {
            return Err(LoadError::overflow(format!(
                "No room for {:?} in 'str_pool' array.",
                String::from_utf8_lossy(bytes)
            )));
        }
        self.pool
            .write_range(i64::from(self.pool_ptr), bytes.len(), bytes)?;
        self.pool_ptr += len;
        let s = self.make_string()?;
        self.index.insert(bytes.to_vec(), s);
        Ok(s)
    }

    /// Rebuild the reverse index over every string.
    ///
    /// When two strings hold the same bytes the later one wins; every such
    /// collision is returned.
    pub(crate) fn build_index(&mut self) -> Result<Vec<Duplicate>, MemoryError> {
        self.index.clear();
        let mut duplicates = Vec::new();
        for s in 0..self.str_ptr {
            let bytes = self.bytes(s)?.to_vec();
            let offset = self.start.get(i64::from(s))?;
            if self.index.contains_key(&bytes) {
                duplicates.push(Duplicate {
                    id: s,
                    offset,
                    bytes: bytes.clone(),
                });
            }
            self.index.insert(bytes, s);
        }
        Ok(duplicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadErrorKind;

    fn pool_of(strings: &[&[u8]]) -> StringPool {
        let mut pool = StringPool::new(&TexConfig::new());
        pool.allocate();
        for s in strings {
            pool.intern(s).unwrap();
        }
        pool
    }

    #[test]
    fn lengths_follow_start_offsets() {
        let mut pool = StringPool::new(&TexConfig::new());
        pool.allocate();
        for (i, x) in [0, 3, 3, 7].into_iter().enumerate() {
            pool.start.set(i as i64, x).unwrap();
        }
        pool.str_ptr = 3;
        pool.pool_ptr = 7;
        assert_eq!(pool.length(0).unwrap(), 3);
        assert_eq!(pool.length(1).unwrap(), 0);
        assert_eq!(pool.length(2).unwrap(), 4);
    }

    #[test]
    fn intern_reuses_existing_strings() {
        let mut pool = pool_of(&[b"relax", b"par"]);
        assert_eq!(pool.intern(b"par").unwrap(), 1);
        assert_eq!(pool.intern(b"").unwrap(), 2);
        assert_eq!(pool.str_ptr(), 3);
        assert_eq!(pool.bytes(0).unwrap(), b"relax");
        assert!(pool.str_eq_str(1, 1).unwrap());
        assert!(!pool.str_eq_str(0, 1).unwrap());
    }

    #[test]
    fn duplicates_are_reported_and_the_later_wins() {
        let mut pool = pool_of(&[b"a", b"b"]);
        pool.pool.write_range(2, 1, b"a").unwrap();
        pool.pool_ptr = 3;
        pool.make_string().unwrap();
        let dups = pool.build_index().unwrap();
        assert_eq!(
            dups,
            vec![Duplicate {
                id: 2,
                offset: 2,
                bytes: b"a".to_vec()
            }]
        );
        assert_eq!(pool.lookup(b"a"), Some(2));
    }

    #[test]
    fn full_string_table_overflows() {
        let mut pool = pool_of(&[]);
        pool.max_strings = 1;
        pool.intern(b"x").unwrap();
        let err = pool.intern(b"y").unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Overflow);
    }

    #[test]
    fn full_pool_overflows() {
        let mut pool = pool_of(&[]);
        pool.pool_size = 2;
        let err = pool.intern(b"abc").unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Overflow);
        assert_eq!(pool.pool_ptr(), 0);
    }
}
