use num_bigint::BigInt;

use crate::error::ShareError;
use crate::lagrange::{inconsistent_points, interpolate_at_zero};
use crate::numeral;

/// A share: one point (x, y) on the secret polynomial
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePoint {
    pub x: BigInt,
    pub y: BigInt,
}

impl SamplePoint {
    pub fn new(x: impl Into<BigInt>, y: impl Into<BigInt>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// An undecoded share: its x, the radix of its value and the value's digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRecord {
    pub x: BigInt,
    pub base: u32,
    pub digits: String,
}

impl ShareRecord {
    pub fn new(x: impl Into<BigInt>, base: u32, digits: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            base,
            digits: digits.into(),
        }
    }

    pub fn decode(&self) -> Result<SamplePoint, ShareError> {
        Ok(SamplePoint {
            x: self.x.clone(),
            y: numeral::decode(self.base, &self.digits)?,
        })
    }
}

/// The k shares used for reconstruction, plus the ones left over.
///
/// Shares are ordered by ascending x and the first `threshold` of them are
/// selected. The sort is stable: shares with equal x keep their input order.
#[derive(Debug, Clone)]
pub struct PointSet {
    selected: Vec<SamplePoint>,
    extras: Vec<SamplePoint>,
}

impl PointSet {
    pub fn build(records: &[ShareRecord], threshold: usize) -> Result<Self, ShareError> {
        if threshold == 0 {
            return Err(ShareError::InvalidThreshold(threshold));
        }
        if records.len() < threshold {
            return Err(ShareError::InsufficientPoints {
                got: records.len(),
                need: threshold,
            });
        }

        let mut points = records
            .iter()
            .map(ShareRecord::decode)
            .collect::<Result<Vec<_>, _>>()?;
        points.sort_by(|a, b| a.x.cmp(&b.x));

        let extras = points.split_off(threshold);
        Ok(Self {
            selected: points,
            extras,
        })
    }

    pub fn threshold(&self) -> usize {
        self.selected.len()
    }

    pub fn selected(&self) -> &[SamplePoint] {
        &self.selected
    }

    pub fn extras(&self) -> &[SamplePoint] {
        &self.extras
    }

    /// The constant term of the polynomial through the selected shares
    pub fn reconstruct(&self) -> Result<BigInt, ShareError> {
        interpolate_at_zero(&self.selected)
    }

    /// Leftover shares that do not lie on the polynomial through the selected ones
    pub fn inconsistent_extras(&self) -> Result<Vec<SamplePoint>, ShareError> {
        inconsistent_points(&self.selected, &self.extras)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ShareRecord> {
        vec![
            ShareRecord::new(6, 4, "213"),
            ShareRecord::new(2, 2, "111"),
            ShareRecord::new(10, 10, "103"),
            ShareRecord::new(1, 10, "4"),
            ShareRecord::new(3, 10, "12"),
        ]
    }

    #[test]
    fn test_selects_smallest_x() {
        let set = PointSet::build(&records(), 3).unwrap();

        assert_eq!(set.threshold(), 3);
        assert_eq!(
            set.selected(),
            &[
                SamplePoint::new(1, 4),
                SamplePoint::new(2, 7),
                SamplePoint::new(3, 12)
            ]
        );
        // numeric, not lexical, order: 6 before 10
        assert_eq!(
            set.extras(),
            &[SamplePoint::new(6, 39), SamplePoint::new(10, 103)]
        );
    }

    #[test]
    fn test_reconstruct_and_check_extras() {
        let set = PointSet::build(&records(), 3).unwrap();
        assert_eq!(set.reconstruct().unwrap(), BigInt::from(3));
        assert!(set.inconsistent_extras().unwrap().is_empty());

        let mut tampered = records();
        tampered[2] = ShareRecord::new(10, 10, "104");
        let set = PointSet::build(&tampered, 3).unwrap();
        assert_eq!(set.reconstruct().unwrap(), BigInt::from(3));
        assert_eq!(
            set.inconsistent_extras().unwrap(),
            vec![SamplePoint::new(10, 104)]
        );
    }

    #[test]
    fn test_insufficient_points() {
        let result = PointSet::build(&records()[..2], 3);
        assert_eq!(
            result.unwrap_err(),
            ShareError::InsufficientPoints { got: 2, need: 3 }
        );
    }

    #[test]
    fn test_zero_threshold() {
        let result = PointSet::build(&records(), 0);
        assert_eq!(result.unwrap_err(), ShareError::InvalidThreshold(0));
    }

    #[test]
    fn test_invalid_digit_propagates() {
        let records = vec![ShareRecord::new(1, 8, "7"), ShareRecord::new(2, 8, "g1")];
        let result = PointSet::build(&records, 2);
        assert_eq!(
            result.unwrap_err(),
            ShareError::InvalidDigit { digit: 'g', base: 8 }
        );
    }

    #[test]
    fn test_duplicate_only_outside_selection() {
        let records = vec![
            ShareRecord::new(1, 10, "5"),
            ShareRecord::new(2, 10, "7"),
            ShareRecord::new(5, 10, "13"),
            ShareRecord::new(5, 10, "999"),
        ];

        // f(x) = 2x + 3; the duplicated x = 5 is never used
        let set = PointSet::build(&records, 2).unwrap();
        assert_eq!(set.reconstruct().unwrap(), BigInt::from(3));

        let set = PointSet::build(&records, 4).unwrap();
        assert_eq!(
            set.reconstruct().unwrap_err(),
            ShareError::DuplicateAbscissa { x: BigInt::from(5) }
        );
    }

    #[test]
    fn test_selection_is_deterministic() {
        let first = PointSet::build(&records(), 3).unwrap();
        let mut reversed = records();
        reversed.reverse();
        let second = PointSet::build(&reversed, 3).unwrap();

        assert_eq!(first.selected(), second.selected());
    }
}
