use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::ShareError;
use crate::fraction::Fraction;
use crate::points::SamplePoint;

// Direct solution of the Vandermonde system V·c = y, independent of Lagrange
// interpolation: Cramer's rule for c_0, Gauss-Jordan for the whole vector
type Matrix = Vec<Vec<Fraction>>;

// Rows [1, x, x^2, ..., x^(k-1)] for each point
fn vandermonde_matrix(points: &[SamplePoint]) -> Matrix {
    let k = points.len();
    points
        .iter()
        .map(|point| {
            let x = Fraction::from_integer(point.x.clone());
            let mut row = Vec::with_capacity(k);
            let mut power = Fraction::one();
            for _ in 0..k {
                row.push(power.clone());
                power = &power * &x;
            }
            row
        })
        .collect()
}

fn check_distinct(points: &[SamplePoint]) -> Result<(), ShareError> {
    if points.is_empty() {
        return Err(ShareError::InsufficientPoints { got: 0, need: 1 });
    }

    let mut xs: Vec<&BigInt> = points.iter().map(|p| &p.x).collect();
    xs.sort();
    match xs.windows(2).find(|pair| pair[0] == pair[1]) {
        Some(pair) => Err(ShareError::DuplicateAbscissa { x: pair[0].clone() }),
        None => Ok(()),
    }
}

// Determinant by fraction Gaussian elimination
// rows must be square; callers only pass matrices built by vandermonde_matrix
fn determinant(mut rows: Matrix) -> Result<Fraction, ShareError> {
    let n = rows.len();
    let mut det = Fraction::one();

    for col in 0..n {
        let Some(pivot) = (col..n).find(|&r| !rows[r][col].is_zero()) else {
            return Ok(Fraction::zero());
        };
        if pivot != col {
            rows.swap(pivot, col);
            det = -det;
        }

        let pivot_row = rows[col].clone();
        det = &det * &pivot_row[col];

        for row in rows.iter_mut().skip(col + 1) {
            if row[col].is_zero() {
                continue;
            }
            let factor = row[col].checked_div(&pivot_row[col])?;
            for (cell, pivot_cell) in row.iter_mut().zip(&pivot_row).skip(col) {
                *cell = &*cell - &(&factor * pivot_cell);
            }
        }
    }

    Ok(det)
}

/// The constant term of the polynomial through `points`, by Cramer's rule:
/// c_0 = det(V with column 0 replaced by y) / det(V).
pub fn constant_term(points: &[SamplePoint]) -> Result<Fraction, ShareError> {
    check_distinct(points)?;

    let matrix = vandermonde_matrix(points);
    let mut replaced = matrix.clone();
    for (row, point) in replaced.iter_mut().zip(points) {
        row[0] = Fraction::from_integer(point.y.clone());
    }

    determinant(replaced)?.checked_div(&determinant(matrix)?)
}

/// All coefficients `[c_0, c_1, ..., c_(k-1)]` of the polynomial through `points`.
pub fn coefficients(points: &[SamplePoint]) -> Result<Vec<Fraction>, ShareError> {
    check_distinct(points)?;

    let k = points.len();
    let mut rows = vandermonde_matrix(points);
    for (row, point) in rows.iter_mut().zip(points) {
        row.push(Fraction::from_integer(point.y.clone()));
    }

    for col in 0..k {
        // distinct abscissas make V invertible, so a pivot always exists
        let pivot = (col..k)
            .find(|&r| !rows[r][col].is_zero())
            .ok_or(ShareError::DivisionByZero)?;
        rows.swap(pivot, col);

        let pivot_value = rows[col][col].clone();
        for cell in rows[col].iter_mut() {
            *cell = cell.checked_div(&pivot_value)?;
        }

        let pivot_row = rows[col].clone();
        for (r, row) in rows.iter_mut().enumerate() {
            if r == col || row[col].is_zero() {
                continue;
            }
            let factor = row[col].clone();
            for (cell, pivot_cell) in row.iter_mut().zip(&pivot_row) {
                *cell = &*cell - &(&factor * pivot_cell);
            }
        }
    }

    Ok(rows.into_iter().map(|mut row| row.swap_remove(k)).collect())
}
