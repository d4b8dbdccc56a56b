use num_bigint::BigInt;
use thiserror::Error;

/// Errors raised while decoding shares or reconstructing the secret
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("fraction denominator is zero")]
    DivisionByZero,

    #[error("two selected shares have the same x = {x}")]
    DuplicateAbscissa { x: BigInt },

    #[error("invalid digit {digit:?} for base {base}")]
    InvalidDigit { digit: char, base: u32 },

    #[error("unsupported base {0}: expected 2..=36")]
    UnsupportedBase(u32),

    #[error("numeral has no digits")]
    EmptyNumeral,

    #[error("insufficient points: got {got}, need {need}")]
    InsufficientPoints { got: usize, need: usize },

    #[error("invalid threshold k={0}: need at least one point")]
    InvalidThreshold(usize),

    #[error("interpolated value {numerator}/{denominator} is not an integer")]
    NonIntegralResult {
        numerator: BigInt,
        denominator: BigInt,
    },
}
