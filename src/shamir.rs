use num_bigint::{BigInt, RandBigInt};
use num_traits::{One, Zero};
use rand::Rng;

use crate::error::ShareError;
use crate::points::SamplePoint;

// Generate shares of `secret` over the integers
// Returns (shares, polynomial_coefficients); any `threshold` shares recover the secret
pub fn generate_shares<R: Rng + ?Sized>(
    secret: &BigInt,
    threshold: usize,
    num_shares: usize,
    coefficient_bits: u64,
    rng: &mut R,
) -> Result<(Vec<SamplePoint>, Vec<BigInt>), ShareError> {
    if threshold == 0 {
        return Err(ShareError::InvalidThreshold(threshold));
    }
    if num_shares < threshold {
        return Err(ShareError::InsufficientPoints {
            got: num_shares,
            need: threshold,
        });
    }

    // Random polynomial of degree threshold - 1 with a_0 = secret
    let mut coefficients = vec![secret.clone()];
    for _ in 1..threshold {
        coefficients.push(rng.gen_bigint(coefficient_bits));
    }

    // Evaluate polynomial at points 1, 2, ..., n
    let shares = (1..=num_shares)
        .map(|i| {
            let x = BigInt::from(i);
            let y = evaluate_polynomial(&coefficients, &x);
            SamplePoint { x, y }
        })
        .collect();

    Ok((shares, coefficients))
}

// Evaluate polynomial f(x) = a_0 + a_1*x + a_2*x^2 + ... at point x
pub fn evaluate_polynomial(coefficients: &[BigInt], x: &BigInt) -> BigInt {
    let mut result = BigInt::zero();
    let mut x_power = BigInt::one();

    for coeff in coefficients {
        result += coeff * &x_power;
        x_power *= x;
    }

    result
}
