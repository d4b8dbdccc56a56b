use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::ShareError;

// Share values are digit strings in radix 2..=36; digits above 9 are
// the letters a..z, case-insensitive
pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

fn check_base(base: u32) -> Result<(), ShareError> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(ShareError::UnsupportedBase(base))
    }
}

/// Decode `digits` written in `base` into an integer.
///
/// An optional leading `+` or `-` is applied after the magnitude is decoded.
pub fn decode(base: u32, digits: &str) -> Result<BigInt, ShareError> {
    check_base(base)?;

    let (negative, magnitude) = match digits.as_bytes().first() {
        Some(b'-') => (true, &digits[1..]),
        Some(b'+') => (false, &digits[1..]),
        _ => (false, digits),
    };
    if magnitude.is_empty() {
        return Err(ShareError::EmptyNumeral);
    }

    let radix = BigInt::from(base);
    let value = magnitude.chars().try_fold(BigInt::zero(), |acc, digit| -> Result<BigInt, ShareError> {
        let digit_value = digit
            .to_digit(base)
            .ok_or(ShareError::InvalidDigit { digit, base })?;
        Ok(acc * &radix + digit_value)
    })?;

    Ok(if negative { -value } else { value })
}

/// Write `value` in `base` using lowercase digits and a leading `-` when negative.
pub fn encode(value: &BigInt, base: u32) -> Result<String, ShareError> {
    check_base(base)?;
    Ok(value.to_str_radix(base))
}
