use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::ShareError;

// Exact rational number `numerator / denominator`, always in lowest terms
// with a positive denominator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt, // always > 0
}

impl Fraction {
    /// Build a fraction and normalize it.
    ///
    /// Fails with `DivisionByZero` when `denominator` is zero.
    pub fn new(numerator: BigInt, denominator: BigInt) -> Result<Self, ShareError> {
        if denominator.is_zero() {
            return Err(ShareError::DivisionByZero);
        }
        Ok(Self::reduced(numerator, denominator))
    }

    /// The whole number `value / 1`
    pub fn from_integer(value: BigInt) -> Self {
        Self {
            numerator: value,
            denominator: BigInt::one(),
        }
    }

    // denominator must be non-zero
    fn reduced(numerator: BigInt, denominator: BigInt) -> Self {
        let gcd = numerator.gcd(&denominator);
        let mut numerator = numerator / &gcd;
        let mut denominator = denominator / gcd;

        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        Self {
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// The numerator, provided the denominator is exactly 1.
    ///
    /// Never truncates: a proper fraction fails with `NonIntegralResult`.
    pub fn to_integer(&self) -> Result<BigInt, ShareError> {
        if self.is_integer() {
            Ok(self.numerator.clone())
        } else {
            Err(ShareError::NonIntegralResult {
                numerator: self.numerator.clone(),
                denominator: self.denominator.clone(),
            })
        }
    }

    /// `self / other`, failing with `DivisionByZero` when `other` is zero
    pub fn checked_div(&self, other: &Fraction) -> Result<Fraction, ShareError> {
        Fraction::new(
            &self.numerator * &other.denominator,
            &self.denominator * &other.numerator,
        )
    }
}

impl From<BigInt> for Fraction {
    fn from(value: BigInt) -> Self {
        Fraction::from_integer(value)
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from_integer(BigInt::from(value))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

// a/b + c/d = (ad + cb) / bd
impl Add for &Fraction {
    type Output = Fraction;

    fn add(self, other: &Fraction) -> Fraction {
        Fraction::reduced(
            &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, other: Fraction) -> Fraction {
        &self + &other
    }
}

impl Sub for &Fraction {
    type Output = Fraction;

    fn sub(self, other: &Fraction) -> Fraction {
        self + &(-other)
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, other: Fraction) -> Fraction {
        &self - &other
    }
}

// a/b * c/d = ac / bd
impl Mul for &Fraction {
    type Output = Fraction;

    fn mul(self, other: &Fraction) -> Fraction {
        Fraction::reduced(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, other: Fraction) -> Fraction {
        &self * &other
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        -&self
    }
}

impl Zero for Fraction {
    fn zero() -> Self {
        Fraction::from_integer(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for Fraction {
    fn one() -> Self {
        Fraction::from_integer(BigInt::one())
    }
}

impl Sum for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Self {
        iter.fold(Fraction::zero(), |acc, term| acc + term)
    }
}

impl<'a> Sum<&'a Fraction> for Fraction {
    fn sum<I: Iterator<Item = &'a Fraction>>(iter: I) -> Self {
        iter.fold(Fraction::zero(), |acc, term| &acc + term)
    }
}

impl Product for Fraction {
    fn product<I: Iterator<Item = Fraction>>(iter: I) -> Self {
        iter.fold(Fraction::one(), |acc, factor| acc * factor)
    }
}
