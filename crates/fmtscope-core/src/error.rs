//! Errors raised by TeX integer arithmetic.

use std::error::Error;
use std::fmt;

/// Failure of a derived integer computation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArithError {
    /// The divisor of [`x_over_n`](crate::arith::x_over_n) or of a progress
    /// ratio was zero.
    DivisionByZero,
}

impl fmt::Display for ArithError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "Division by zero."),
        }
    }
}

impl Error for ArithError {}
