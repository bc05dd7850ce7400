//! Pointer-style views and element cells.

use std::borrow::{Borrow, BorrowMut};
use std::marker::PhantomData;
use std::ops::{Add, Sub};

use crate::arena::Arena;
use crate::error::MemoryError;
use crate::scalar::{Element, Scalar};

/// A typed pointer into an arena.
///
/// Element `i` of a view lives at byte offset `(base + i) * T::SIZE`. The
/// base may be negative and is never checked on its own; only element
/// access is.
pub struct View<A, T> {
    arena: A,
    base: i64,
    _element: PhantomData<T>,
}

impl<A, T: Element> View<A, T> {
    /// A view whose element 0 is element `base` of the arena.
    pub fn new(arena: A, base: i64) -> Self {
        Self {
            arena,
            base,
            _element: PhantomData,
        }
    }

    /// The base element index.
    pub fn base(&self) -> i64 {
        self.base
    }

    fn byte_offset(&self, i: i64) -> i64 {
        (self.base + i) * T::SIZE as i64
    }
}

impl<A: Borrow<Arena>, T: Element> View<A, T> {
    /// Element `i`.
    pub fn at(&self, i: i64) -> Cell<&Arena, T> {
        Cell::new(self.arena.borrow(), self.byte_offset(i))
    }

    /// Raw bytes of elements `i .. i + n`.
    pub fn read_range(&self, i: i64, n: usize) -> Result<&[u8], MemoryError> {
        self.arena.borrow().read(self.byte_offset(i), n * T::SIZE)
    }
}

impl<A: BorrowMut<Arena>, T: Element> View<A, T> {
    /// Element `i`, writable.
    pub fn at_mut(&mut self, i: i64) -> Cell<&mut Arena, T> {
        let offset = self.byte_offset(i);
        Cell::new(self.arena.borrow_mut(), offset)
    }

    /// Overwrite elements `i .. i + n` with raw bytes.
    pub fn write_range(&mut self, i: i64, n: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        let offset = self.byte_offset(i);
        self.arena.borrow_mut().write(offset, n * T::SIZE, bytes)
    }
}

impl<A, T> Add<i64> for View<A, T> {
    type Output = Self;

    fn add(self, k: i64) -> Self {
        Self {
            base: self.base + k,
            ..self
        }
    }
}

impl<A, T> Sub<i64> for View<A, T> {
    type Output = Self;

    fn sub(self, k: i64) -> Self {
        Self {
            base: self.base - k,
            ..self
        }
    }
}

impl<A: Copy, T> Clone for View<A, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Copy, T> Copy for View<A, T> {}

/// One element of a view: an arena plus the element's first byte offset.
///
/// Word-shaped elements expose their interpretations as sub-cells (see
/// [`word`](crate::word)); scalar cells read and write values.
pub struct Cell<A, T> {
    arena: A,
    offset: i64,
    _element: PhantomData<T>,
}

impl<A, T: Element> Cell<A, T> {
    pub(crate) fn new(arena: A, offset: i64) -> Self {
        Self {
            arena,
            offset,
            _element: PhantomData,
        }
    }

    /// Byte offset of the element inside its arena.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Reinterpret the bytes at `delta` past this element as a `U`.
    pub(crate) fn field<U: Element>(self, delta: i64) -> Cell<A, U> {
        Cell::new(self.arena, self.offset + delta)
    }
}

impl<A: Copy, T> Clone for Cell<A, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Copy, T> Copy for Cell<A, T> {}

impl<A: Borrow<Arena>, T: Element> Cell<A, T> {
    /// The element's raw bytes.
    pub fn bytes(&self) -> Result<&[u8], MemoryError> {
        self.arena.borrow().read(self.offset, T::SIZE)
    }
}

impl<A: Borrow<Arena>, T: Scalar> Cell<A, T> {
    /// Decode the value.
    pub fn get(&self) -> Result<T, MemoryError> {
        self.bytes().map(T::decode)
    }
}

impl<A: BorrowMut<Arena>, T: Element> Cell<A, T> {
    /// Replace the element's raw bytes.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<(), MemoryError> {
        self.arena.borrow_mut().write(self.offset, T::SIZE, bytes)
    }
}

impl<A: BorrowMut<Arena>, T: Scalar> Cell<A, T> {
    /// Encode and store `value`.
    pub fn set(&mut self, value: T) -> Result<(), MemoryError> {
        self.put_bytes(&value.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn negative_base_addresses_from_the_origin() {
        let mut arena = Arena::zeroed("mem", 4 * 4);
        {
            let mut view: View<&mut Arena, i32> = View::new(&mut arena, 2);
            view.at_mut(-2).set(7).unwrap();
            view.at_mut(1).set(-9).unwrap();
        }
        let view: View<&Arena, i32> = View::new(&arena, 0);
        assert_eq!(view.at(0).get().unwrap(), 7);
        assert_eq!(view.at(3).get().unwrap(), -9);
        assert!(view.at(4).get().is_err());
        assert!((view - 1).at(0).get().is_err());
    }

    #[test]
    fn ranges_cover_whole_elements() {
        let arena = Arena::from_bytes("r", (0..12).collect());
        let view: View<&Arena, u16> = View::new(&arena, 1);
        assert_eq!(view.read_range(0, 2).unwrap(), &[2, 3, 4, 5]);
        assert!(view.read_range(4, 2).is_err());
    }

    #[test]
    fn read_cells_are_reusable() {
        let arena = Arena::from_bytes("c", vec![0, 0, 0, 5, 0, 0, 0, 6]);
        let view: View<&Arena, i32> = View::new(&arena, 0);
        let cell = view.at(1);
        let again = cell;
        assert_eq!(cell.get().unwrap(), 6);
        assert_eq!(again.offset(), 4);
    }

    proptest! {
        #[test]
        fn pointer_arithmetic_is_associative(base in -1000i64..1000, a in -500i64..500, b in -500i64..500) {
            let arena = Arena::zeroed("p", 64);
            let view: View<&Arena, u32> = View::new(&arena, base);
            let left = (view + a) + b;
            let right = view + (a + b);
            prop_assert_eq!(left.at(0).offset(), right.at(0).offset());
            let back = (view + a) - a;
            prop_assert_eq!(back.base(), view.base());
        }
    }
}
