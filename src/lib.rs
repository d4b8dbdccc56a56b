use num_bigint::BigInt;

pub mod document;
pub mod error;
pub mod fraction;
pub mod lagrange;
pub mod numeral;
pub mod points;
pub mod shamir;
pub mod vandermonde;

pub use document::{DocumentError, ShareDocument};
pub use error::ShareError;
pub use fraction::Fraction;
pub use points::{PointSet, SamplePoint, ShareRecord};

// Reconstruct the secret (the polynomial's constant term) from at least k shares
// Only the k shares with the smallest x are used
pub fn reconstruct_secret(records: &[ShareRecord], threshold: usize) -> Result<BigInt, ShareError> {
    PointSet::build(records, threshold)?.reconstruct()
}
