//! TeX's integer arithmetic helpers.

use crate::error::ArithError;

/// Round a real to the nearest integer, clamped to the 32-bit range TeX uses.
///
/// Halves round away from zero: `0.5` gives `1` and `-0.5` gives `-1`.
/// NaN rounds to zero.
pub fn round(r: f64) -> i32 {
    if r.is_nan() {
        0
    } else if r > 2_147_483_647.0 {
        2_147_483_647
    } else if r < -2_147_483_647.0 {
        -2_147_483_647
    } else if r >= 0.0 {
        (r + 0.5).floor() as i32
    } else {
        (r - 0.5).floor() as i32
    }
}

/// Divide `x` by `n`, truncating toward zero.
///
/// Returns `(quotient, remainder)`. The remainder takes the sign of `x`,
/// so `q * n + r == x`.
pub fn x_over_n(x: i32, n: i32) -> Result<(i32, i32), ArithError> {
    if n == 0 {
        return Err(ArithError::DivisionByZero);
    }
    let (mut x, mut n, mut sign) = (i64::from(x), i64::from(n), 1);
    if n < 0 {
        x = -x;
        n = -n;
        sign = -1;
    }
    let (q, r) = if x < 0 {
        (-((-x) / n), -((-x) % n) * sign)
    } else {
        (x / n, (x % n) * sign)
    };
    Ok((q as i32, r as i32))
}

/// Halve `x`, rounding odd values up.
pub fn half(x: i32) -> i32 {
    if x % 2 != 0 {
        x.div_euclid(2) + 1
    } else {
        x / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rounding_is_asymmetric_around_zero() {
        assert_eq!(round(1.2), 1);
        assert_eq!(round(1.5), 2);
        assert_eq!(round(-1.2), -2);
        assert_eq!(round(-0.5), -1);
        assert_eq!(round(0.0), 0);
    }

    #[test]
    fn rounding_clamps() {
        assert_eq!(round(1e12), 2_147_483_647);
        assert_eq!(round(-1e12), -2_147_483_647);
        assert_eq!(round(f64::NAN), 0);
    }

    #[test]
    fn x_over_n_rejects_zero() {
        assert_eq!(x_over_n(5, 0), Err(ArithError::DivisionByZero));
    }

    #[test]
    fn x_over_n_signs() {
        assert_eq!(x_over_n(7, 2), Ok((3, 1)));
        assert_eq!(x_over_n(-7, 2), Ok((-3, -1)));
        assert_eq!(x_over_n(7, -2), Ok((-3, 1)));
        assert_eq!(x_over_n(-7, -2), Ok((3, -1)));
        assert_eq!(x_over_n(i32::MIN, -1).map(|(q, _)| q), Ok(i32::MIN));
    }

    #[test]
    fn half_rounds_odd_up() {
        assert_eq!(half(4), 2);
        assert_eq!(half(5), 3);
        assert_eq!(half(-5), -2);
        assert_eq!(half(i32::MAX), 1 << 30);
        assert_eq!(half(i32::MIN + 1), -(1 << 30) + 1);
    }

    proptest! {
        #[test]
        fn quotient_and_remainder_recombine(
            x in -1_000_000i32..1_000_000,
            n in prop_oneof![1i32..10_000, -10_000i32..-1],
        ) {
            let (q, r) = x_over_n(x, n).unwrap();
            prop_assert_eq!(q * n + r, x);
        }

        #[test]
        fn half_matches_wide_arithmetic(x in any::<i32>()) {
            let wide = i64::from(x);
            let expected = if wide % 2 != 0 { (wide + 1) / 2 } else { wide / 2 };
            prop_assert_eq!(i64::from(half(x)), expected);
        }
    }
}
