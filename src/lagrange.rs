use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::ShareError;
use crate::fraction::Fraction;
use crate::points::SamplePoint;

// Compute the Lagrange basis values L_j(at) for the given abscissas
// L_j(at) = ∏(m≠j) (at - x_m) / (x_j - x_m)
pub fn lagrange_coefficients(xs: &[BigInt], at: &BigInt) -> Result<Vec<Fraction>, ShareError> {
    xs.iter()
        .enumerate()
        .map(|(j, x_j)| {
            xs.iter()
                .enumerate()
                .filter(|(m, _)| *m != j)
                .try_fold(Fraction::one(), |basis, (_, x_m)| -> Result<Fraction, ShareError> {
                    // x_j - x_m is zero only when two shares share an x
                    let factor = Fraction::new(at - x_m, x_j - x_m)
                        .map_err(|_| ShareError::DuplicateAbscissa { x: x_j.clone() })?;
                    Ok(basis * factor)
                })
        })
        .collect()
}

/// Evaluate the unique polynomial of degree `points.len() - 1` through `points` at `at`.
pub fn evaluate_at(points: &[SamplePoint], at: &BigInt) -> Result<Fraction, ShareError> {
    let xs: Vec<BigInt> = points.iter().map(|p| p.x.clone()).collect();
    let coefficients = lagrange_coefficients(&xs, at)?;

    Ok(coefficients
        .iter()
        .zip(points)
        .map(|(basis, point)| basis * &Fraction::from_integer(point.y.clone()))
        .sum())
}

/// Recover the constant term P(0) of the polynomial through `points`.
///
/// Fails with `DuplicateAbscissa` if two points share an x, and with
/// `NonIntegralResult` if P(0) is not a whole number.
pub fn interpolate_at_zero(points: &[SamplePoint]) -> Result<BigInt, ShareError> {
    if points.is_empty() {
        return Err(ShareError::InsufficientPoints { got: 0, need: 1 });
    }
    evaluate_at(points, &BigInt::zero())?.to_integer()
}

// Shares from `candidates` whose y differs from the polynomial through `basis` at their x
pub fn inconsistent_points(
    basis: &[SamplePoint],
    candidates: &[SamplePoint],
) -> Result<Vec<SamplePoint>, ShareError> {
    let mut inconsistent = Vec::new();

    for candidate in candidates {
        let expected = evaluate_at(basis, &candidate.x)?;
        if expected != Fraction::from_integer(candidate.y.clone()) {
            inconsistent.push(candidate.clone());
        }
    }

    Ok(inconsistent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shamir::{evaluate_polynomial, generate_shares};
    use crate::vandermonde;
    use num_bigint::RandBigInt;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    fn points(pairs: &[(i64, i64)]) -> Vec<SamplePoint> {
        pairs.iter().map(|&(x, y)| SamplePoint::new(x, y)).collect()
    }

    #[test]
    fn test_lagrange_coefficients() {
        let xs: Vec<BigInt> = vec![1, 2, 3].into_iter().map(BigInt::from).collect();
        let coeffs = lagrange_coefficients(&xs, &BigInt::zero()).unwrap();

        // L_1(0) = 3, L_2(0) = -3, L_3(0) = 1
        assert_eq!(coeffs, vec![Fraction::from(3), Fraction::from(-3), Fraction::from(1)]);

        // the basis reproduces constants, so it sums to 1
        let sum: Fraction = coeffs.iter().sum();
        assert_eq!(sum, Fraction::one());
    }

    #[test]
    fn test_lagrange_non_sequential() {
        let xs: Vec<BigInt> = vec![1, 3, 5].into_iter().map(BigInt::from).collect();
        let coeffs = lagrange_coefficients(&xs, &BigInt::zero()).unwrap();

        let sum: Fraction = coeffs.iter().sum();
        assert_eq!(sum, Fraction::one());
        assert!(coeffs.iter().any(|c| !c.is_integer()));
    }

    #[test]
    fn test_worked_example() {
        // "10", "111", "1100" in base 2
        let shares = points(&[(1, 2), (2, 7), (3, 12)]);

        let secret = interpolate_at_zero(&shares).unwrap();
        let direct = vandermonde::constant_term(&shares).unwrap();

        assert_eq!(secret, BigInt::from(-3));
        assert_eq!(Fraction::from_integer(secret), direct);
    }

    #[test]
    fn test_single_point() {
        let shares = points(&[(4, 17)]);
        assert_eq!(interpolate_at_zero(&shares).unwrap(), BigInt::from(17));
    }

    #[test]
    fn test_duplicate_abscissa() {
        let shares = points(&[(1, 5), (2, 7), (2, 9)]);
        assert_eq!(
            interpolate_at_zero(&shares),
            Err(ShareError::DuplicateAbscissa { x: BigInt::from(2) })
        );
    }

    #[test]
    fn test_non_integral_result() {
        // the line through (1, 0) and (3, 1) crosses x = 0 at -1/2
        let shares = points(&[(1, 0), (3, 1)]);
        assert_eq!(
            interpolate_at_zero(&shares),
            Err(ShareError::NonIntegralResult {
                numerator: BigInt::from(-1),
                denominator: BigInt::from(2),
            })
        );
        assert_eq!(
            evaluate_at(&shares, &BigInt::zero()).unwrap(),
            Fraction::new(BigInt::from(-1), BigInt::from(2)).unwrap()
        );
    }

    #[test]
    fn test_empty_points() {
        assert_eq!(
            interpolate_at_zero(&[]),
            Err(ShareError::InsufficientPoints { got: 0, need: 1 })
        );
    }

    #[test]
    fn test_evaluate_at_other_points() {
        // f(x) = x^2 + 3
        let shares = points(&[(1, 4), (2, 7), (3, 12)]);
        assert_eq!(evaluate_at(&shares, &BigInt::from(6)).unwrap(), Fraction::from(39));
        assert_eq!(evaluate_at(&shares, &BigInt::from(2)).unwrap(), Fraction::from(7));

        let candidates = points(&[(6, 39), (7, 52), (8, 60)]);
        assert_eq!(
            inconsistent_points(&shares, &candidates).unwrap(),
            points(&[(8, 60)])
        );
    }

    #[test]
    fn test_exact_recovery_of_large_secrets() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..25 {
            let threshold = rng.gen_range(1..=8);
            let secret = rng.gen_bigint(1024);
            let (shares, _) = generate_shares(&secret, threshold, threshold, 512, &mut rng).unwrap();

            assert_eq!(interpolate_at_zero(&shares).unwrap(), secret);
        }
    }

    #[test]
    fn test_order_invariance() {
        let mut rng = StdRng::seed_from_u64(99);
        let secret = rng.gen_bigint(256);
        let (mut shares, _) = generate_shares(&secret, 6, 6, 256, &mut rng).unwrap();

        for _ in 0..10 {
            shares.shuffle(&mut rng);
            assert_eq!(interpolate_at_zero(&shares).unwrap(), secret);
        }
    }

    #[test]
    fn test_superset_stability() {
        let mut rng = StdRng::seed_from_u64(5);
        let secret = rng.gen_bigint(300);
        let (shares, coefficients) = generate_shares(&secret, 4, 9, 128, &mut rng).unwrap();

        // every window of four consecutive shares and a scattered subset agree
        for window in shares.windows(4) {
            assert_eq!(interpolate_at_zero(window).unwrap(), secret);
        }
        let scattered: Vec<SamplePoint> = [0, 3, 5, 8].iter().map(|&i| shares[i].clone()).collect();
        assert_eq!(interpolate_at_zero(&scattered).unwrap(), secret);

        // the extras all lie on the polynomial fixed by the first four
        assert!(inconsistent_points(&shares[..4], &shares[4..]).unwrap().is_empty());
        let x = BigInt::from(-17);
        assert_eq!(
            evaluate_at(&shares[..4], &x).unwrap(),
            Fraction::from_integer(evaluate_polynomial(&coefficients, &x))
        );
    }

    #[test]
    fn test_negative_and_zero_abscissas() {
        // f(x) = 2x^2 - x + 11
        let shares = points(&[(-3, 32), (0, 11), (4, 39)]);
        assert_eq!(interpolate_at_zero(&shares).unwrap(), BigInt::from(11));
    }
}
