//! Fixed-width element types.

use std::fmt::Debug;

/// Anything a [`View`](crate::View) can step over: it has a fixed byte size
/// and a name for statistics output.
pub trait Element {
    /// Bytes per element.
    const SIZE: usize;
    /// Type name shown in table statistics.
    const NAME: &'static str;
}

/// A big-endian number stored in exactly [`Element::SIZE`] bytes.
pub trait Scalar: Element + Copy + PartialEq + Debug {
    /// Smallest representable value.
    const MIN: Self;
    /// Largest representable value.
    const MAX: Self;

    /// Decode from the first `SIZE` bytes of `bytes`.
    fn decode(bytes: &[u8]) -> Self;

    /// Encode into a fresh byte vector of length `SIZE`.
    fn encode(self) -> Vec<u8>;
}

macro_rules! scalar {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl Element for $ty {
            const SIZE: usize = std::mem::size_of::<$ty>();
            const NAME: &'static str = $name;
        }

        impl Scalar for $ty {
            const MIN: Self = <$ty>::MIN;
            const MAX: Self = <$ty>::MAX;

            fn decode(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
                <$ty>::from_be_bytes(buf)
            }

            fn encode(self) -> Vec<u8> {
                self.to_be_bytes().to_vec()
            }
        }
    )*};
}

scalar! {
    i8 => "char",
    u8 => "unsigned char",
    i16 => "short",
    u16 => "unsigned short",
    i32 => "int",
    u32 => "unsigned int",
    i64 => "long long",
    u64 => "unsigned long long",
    f32 => "float",
    f64 => "double",
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn round_trips<T: Scalar>(value: T) -> bool {
        let bytes = value.encode();
        bytes.len() == T::SIZE && T::decode(&bytes) == value
    }

    #[test]
    fn widths_and_bounds() {
        assert_eq!(<i8 as Element>::SIZE, 1);
        assert_eq!(<u16 as Element>::SIZE, 2);
        assert_eq!(<f64 as Element>::SIZE, 8);
        assert_eq!(<i16 as Scalar>::MIN, -32_768);
        assert_eq!(<u32 as Scalar>::MAX, 4_294_967_295);
        assert!(round_trips(<i64 as Scalar>::MIN));
        assert!(round_trips(<u64 as Scalar>::MAX));
    }

    #[test]
    fn encoding_is_big_endian() {
        assert_eq!(0x0102_0304i32.encode(), vec![1, 2, 3, 4]);
        assert_eq!(i32::decode(&[0xFF, 0xFF, 0xFF, 0xFE]), -2);
    }

    proptest! {
        #[test]
        fn every_width_round_trips(
            a in any::<i8>(), b in any::<u8>(), c in any::<i16>(), d in any::<u16>(),
            e in any::<i32>(), f in any::<u32>(), g in any::<i64>(), h in any::<u64>(),
            x in -1.0e30f32..1.0e30, y in -1.0e300f64..1.0e300,
        ) {
            prop_assert!(round_trips(a));
            prop_assert!(round_trips(b));
            prop_assert!(round_trips(c));
            prop_assert!(round_trips(d));
            prop_assert!(round_trips(e));
            prop_assert!(round_trips(f));
            prop_assert!(round_trips(g));
            prop_assert!(round_trips(h));
            prop_assert!(round_trips(x));
            prop_assert!(round_trips(y));
        }
    }
}
