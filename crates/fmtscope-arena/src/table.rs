//! Owned, indexable engine arrays.

use std::fmt;

use crate::arena::Arena;
use crate::error::MemoryError;
use crate::scalar::{Element, Scalar};
use crate::view::{Cell, View};

/// An arena holding elements of one type, indexed from `origin`.
///
/// Allocation reserves one spare element past the requested count and
/// zero-fills everything. `origin` is the index that maps to the first
/// element; `mem` for instance is indexed from `mem_min`, `hash` from
/// `hash_offset`.
#[derive(Clone, PartialEq, Eq)]
pub struct Table<T> {
    arena: Arena,
    origin: i64,
    _element: std::marker::PhantomData<T>,
}

/// Allocation summary of a [`Table`], as printed by the loader.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableStats {
    /// Arena label.
    pub label: String,
    /// Element type name.
    pub cell_type: &'static str,
    /// Bytes per element.
    pub cell_size: usize,
    /// Allocated elements, including the spare one.
    pub cells: usize,
    /// Allocated bytes.
    pub bytes: usize,
    /// Pointer base in elements (the negated origin).
    pub base_cells: i64,
    /// Pointer base in bytes.
    pub base_bytes: i64,
}

impl<T: Element> Table<T> {
    /// Allocate `count + 1` zeroed elements indexed from 0.
    pub fn alloc(label: impl Into<String>, count: usize) -> Self {
        Self::alloc_based(label, count, 0)
    }

    /// Allocate `count + 1` zeroed elements indexed from `origin`.
    pub fn alloc_based(label: impl Into<String>, count: usize, origin: i64) -> Self {
        Self {
            arena: Arena::zeroed(label, (count + 1) * T::SIZE),
            origin,
            _element: std::marker::PhantomData,
        }
    }

    /// An empty table; every access fails.
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            arena: Arena::zeroed(label, 0),
            origin: 0,
            _element: std::marker::PhantomData,
        }
    }

    /// Index of the first element.
    pub fn origin(&self) -> i64 {
        self.origin
    }

    /// Number of allocated elements.
    pub fn len(&self) -> usize {
        self.arena.len() / T::SIZE
    }

    /// Whether nothing was allocated.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Whether `i` addresses an allocated element.
    pub fn contains(&self, i: i64) -> bool {
        i >= self.origin && i - self.origin < self.len() as i64
    }

    /// Diagnostic label.
    pub fn label(&self) -> &str {
        self.arena.label()
    }

    /// The underlying arena.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// A read-only pointer to the table.
    pub fn view(&self) -> View<&Arena, T> {
        View::new(&self.arena, -self.origin)
    }

    /// A writable pointer to the table.
    pub fn view_mut(&mut self) -> View<&mut Arena, T> {
        View::new(&mut self.arena, -self.origin)
    }

    /// Element `i`.
    pub fn at(&self, i: i64) -> Cell<&Arena, T> {
        let offset = (i - self.origin) * T::SIZE as i64;
        Cell::new(&self.arena, offset)
    }

    /// Element `i`, writable.
    pub fn at_mut(&mut self, i: i64) -> Cell<&mut Arena, T> {
        let offset = (i - self.origin) * T::SIZE as i64;
        Cell::new(&mut self.arena, offset)
    }

    /// Raw bytes of elements `i .. i + n`.
    pub fn read_range(&self, i: i64, n: usize) -> Result<&[u8], MemoryError> {
        self.arena
            .read((i - self.origin) * T::SIZE as i64, n * T::SIZE)
    }

    /// Overwrite elements `i .. i + n`.
    pub fn write_range(&mut self, i: i64, n: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        self.arena
            .write((i - self.origin) * T::SIZE as i64, n * T::SIZE, bytes)
    }

    /// Allocation summary.
    pub fn stats(&self) -> TableStats {
        let base = -self.origin;
        TableStats {
            label: self.arena.label().to_string(),
            cell_type: T::NAME,
            cell_size: T::SIZE,
            cells: self.len(),
            bytes: self.arena.len(),
            base_cells: base,
            base_bytes: base * T::SIZE as i64,
        }
    }
}

impl<T: Scalar> Table<T> {
    /// Allocate `count + 1` elements indexed from 0, each holding `value`.
    pub fn filled(label: impl Into<String>, count: usize, value: T) -> Self {
        Self {
            arena: Arena::from_bytes(label, value.encode().repeat(count + 1)),
            origin: 0,
            _element: std::marker::PhantomData,
        }
    }

    /// Value of element `i`.
    pub fn get(&self, i: i64) -> Result<T, MemoryError> {
        self.at(i).get()
    }

    /// Store `value` at element `i`.
    pub fn set(&mut self, i: i64, value: T) -> Result<(), MemoryError> {
        self.at_mut(i).set(value)
    }
}

impl<T: Element> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("label", &self.arena.label())
            .field("type", &T::NAME)
            .field("origin", &self.origin)
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::{MemoryWord, TwoHalves};
    use proptest::prelude::*;

    #[test]
    fn allocation_reserves_a_spare_element() {
        let table: Table<i32> = Table::alloc("str_start", 3);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(3).unwrap(), 0);
        assert!(table.get(4).is_err());
    }

    #[test]
    fn based_tables_index_from_origin() {
        let mut mem: Table<MemoryWord> = Table::alloc_based("mem", 9, -5);
        mem.at_mut(-5).hh().rh().set(11).unwrap();
        mem.at_mut(4).int().set(22).unwrap();
        assert_eq!(mem.view().at(-5).hh().rh().get().unwrap(), 11);
        assert_eq!(mem.at(4).int().get().unwrap(), 22);
        assert!(mem.at(-6).int().get().is_err());
        assert!(mem.contains(5));
        assert!(!mem.contains(6));
    }

    #[test]
    fn cells_outlive_the_call_that_made_them() {
        let mut eqtb: Table<MemoryWord> = Table::alloc_based("eqtb", 3, 1);
        eqtb.at_mut(2).hh().lh().set(-4).unwrap();
        let word = eqtb.at(2);
        let (lh, rh) = (word.hh().lh(), word.hh().rh());
        assert_eq!(lh.get().unwrap(), -4);
        assert_eq!(rh.get().unwrap(), 0);
        assert_eq!(word.int().get().unwrap(), 0);
    }

    #[test]
    fn filled_tables_hold_the_value_everywhere() {
        let list: Table<i32> = Table::filled("hyph_list", 4, -0xFFF_FFFF);
        assert_eq!(list.len(), 5);
        assert!((0..5).all(|i| list.get(i).unwrap() == -0xFFF_FFFF));
        assert!(list.get(5).is_err());
    }

    #[test]
    fn stats_report_the_negated_origin() {
        let hash: Table<TwoHalves> = Table::alloc_based("hash", 9, 514);
        let stats = hash.stats();
        assert_eq!(stats.cell_type, "two_halves");
        assert_eq!(stats.cells, 10);
        assert_eq!(stats.bytes, 80);
        assert_eq!(stats.base_cells, -514);
        assert_eq!(stats.base_bytes, -514 * 8);
    }

    #[test]
    fn range_writes_land_at_the_indexed_element() {
        let mut trc: Table<u8> = Table::alloc_based("trie_trc", 3, 1);
        trc.write_range(2, 2, &[7, 8]).unwrap();
        assert_eq!(trc.arena().as_bytes(), &[0, 7, 8, 0]);
        assert!(trc.write_range(4, 2, &[1, 2]).is_err());
    }

    proptest! {
        #[test]
        fn indexed_access_matches_bounds(count in 0usize..32, origin in -16i64..16, i in -48i64..48) {
            let mut table: Table<u16> = Table::alloc_based("t", count, origin);
            let inside = table.contains(i);
            prop_assert_eq!(table.set(i, 0xBEEF).is_ok(), inside);
            if inside {
                prop_assert_eq!(table.get(i).unwrap(), 0xBEEF);
            }
        }
    }
}
