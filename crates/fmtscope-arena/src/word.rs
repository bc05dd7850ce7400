//! Word-shaped elements and their overlapping interpretations.
//!
//! All interpretations of a word share its bytes; none is stored. Byte
//! offsets follow the big-endian web2c layout:
//!
//! ```text
//! MemoryWord (8)   int/sc @0  gr @0 (f64)  hh @0  qqqq @0
//! TwoHalves  (8)   rh @0 (i32)  lh @4 (i32)  b0 @5 (u8)  b1 @7 (u8)
//! FourQuarters (4) b0 @0  b1 @1  b2 @2  b3 @3
//! FontWord   (4)   int @0  qqqq @0
//! ObjEntry  (20)   int0 @0 .. int4 @16
//! ```

use crate::scalar::Element;
use crate::view::Cell;

/// An 8-byte main memory or eqtb word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryWord;

/// A pair of halfwords with two embedded quarterwords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TwoHalves;

/// Four quarterwords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FourQuarters;

/// A 4-byte font memory word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontWord;

/// One row of the PDF object table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjEntry;

impl Element for MemoryWord {
    const SIZE: usize = 8;
    const NAME: &'static str = "memory_word";
}

impl Element for TwoHalves {
    const SIZE: usize = 8;
    const NAME: &'static str = "two_halves";
}

impl Element for FourQuarters {
    const SIZE: usize = 4;
    const NAME: &'static str = "four_quarters";
}

impl Element for FontWord {
    const SIZE: usize = 4;
    const NAME: &'static str = "fmemory_word";
}

impl Element for ObjEntry {
    const SIZE: usize = 20;
    const NAME: &'static str = "obj_entry";
}

impl<A> Cell<A, MemoryWord> {
    /// Integer interpretation.
    pub fn int(self) -> Cell<A, i32> {
        self.field(0)
    }

    /// Scaled (16.16 fixed point) interpretation.
    pub fn sc(self) -> Cell<A, i32> {
        self.field(0)
    }

    /// Glue ratio interpretation.
    pub fn gr(self) -> Cell<A, f64> {
        self.field(0)
    }

    /// Two-halves interpretation.
    pub fn hh(self) -> Cell<A, TwoHalves> {
        self.field(0)
    }

    /// Four-quarters interpretation.
    pub fn qqqq(self) -> Cell<A, FourQuarters> {
        self.field(0)
    }
}

impl<A> Cell<A, TwoHalves> {
    /// Right halfword (`link`, `equiv`, `text`).
    pub fn rh(self) -> Cell<A, i32> {
        self.field(0)
    }

    /// Left halfword (`info`, `next`).
    pub fn lh(self) -> Cell<A, i32> {
        self.field(4)
    }

    /// First quarterword inside the left half (`type`, `eq_type`).
    pub fn b0(self) -> Cell<A, u8> {
        self.field(5)
    }

    /// Second quarterword inside the left half (`subtype`, `eq_level`).
    pub fn b1(self) -> Cell<A, u8> {
        self.field(7)
    }
}

impl<A> Cell<A, FourQuarters> {
    /// Quarter 0.
    pub fn b0(self) -> Cell<A, u8> {
        self.field(0)
    }

    /// Quarter 1.
    pub fn b1(self) -> Cell<A, u8> {
        self.field(1)
    }

    /// Quarter 2.
    pub fn b2(self) -> Cell<A, u8> {
        self.field(2)
    }

    /// Quarter 3.
    pub fn b3(self) -> Cell<A, u8> {
        self.field(3)
    }
}

impl<A> Cell<A, FontWord> {
    /// Integer interpretation.
    pub fn int(self) -> Cell<A, i32> {
        self.field(0)
    }

    /// Four-quarters interpretation.
    pub fn qqqq(self) -> Cell<A, FourQuarters> {
        self.field(0)
    }
}

impl<A> Cell<A, ObjEntry> {
    /// Column `k` (0..=4) of the row.
    pub fn int(self, k: u8) -> Cell<A, i32> {
        self.field(4 * i64::from(k.min(4)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Arena, Cell, MemoryWord, View};

    #[test]
    fn halves_and_quarters_overlap() {
        let mut arena = Arena::zeroed("mem", 16);
        {
            let mut view: View<&mut Arena, MemoryWord> = View::new(&mut arena, 0);
            view.at_mut(1).hh().rh().set(0x0102_0304).unwrap();
            view.at_mut(1).hh().lh().set(0x0A0B_0C0D).unwrap();
        }
        let view: View<&Arena, MemoryWord> = View::new(&arena, 0);
        let word: Cell<&Arena, MemoryWord> = view.at(1);
        assert_eq!(word.int().get().unwrap(), 0x0102_0304);
        assert_eq!(word.hh().b0().get().unwrap(), 0x0B);
        assert_eq!(word.hh().b1().get().unwrap(), 0x0D);
        assert_eq!(word.qqqq().b3().get().unwrap(), 0x04);
    }

    #[test]
    fn glue_ratio_shares_the_word() {
        let mut arena = Arena::zeroed("mem", 8);
        View::<&mut Arena, MemoryWord>::new(&mut arena, 0)
            .at_mut(0)
            .gr()
            .set(1.5)
            .unwrap();
        assert_eq!(arena.as_bytes(), &1.5f64.to_be_bytes());
    }
}
