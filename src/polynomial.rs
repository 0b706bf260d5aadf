//! Exact integer polynomial fitting
//!
//! A candidate of `k` shares is turned into the Vandermonde system
//! `A·c = b` with `A[i][j] = x_i^j` and `b[i] = y_i`, which is solved by
//! forward elimination and back-substitution over plain big integers.
//!
//! Each pivot row is divided by its pivot with truncating integer division.
//! When the points lie on an integer polynomial of degree `< k` every one of
//! those divisions is exact; otherwise the returned coefficients can be wrong,
//! so callers must check the result with [`crate::validate::fits_exactly`].

use num_bigint::BigInt;
use num_traits::{One, Zero};
use serde::Serialize;
use std::fmt;

use crate::error::{RecoverError, Result};
use crate::share::{Share, decimal};

/// Coefficients of a polynomial in ascending degree order
///
/// Index `i` holds the coefficient of `x^i`; index 0 is the secret. A
/// polynomial always holds at least one coefficient.
///
/// # Example
/// ```
/// use shamir_recover::{BigInt, Polynomial};
///
/// // 3 + 2x^2
/// let p: Polynomial = [3, 0, 2].into_iter().collect();
/// assert_eq!(p.secret(), &BigInt::from(3));
/// assert_eq!(p.evaluate(&BigInt::from(2)), BigInt::from(11));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Polynomial {
    #[serde(with = "decimal::seq")]
    coefficients: Vec<BigInt>,
}

impl Polynomial {
    /// Creates a polynomial; an empty vector is the zero polynomial
    pub fn new(mut coefficients: Vec<BigInt>) -> Self {
        if coefficients.is_empty() {
            coefficients.push(BigInt::zero());
        }
        Self { coefficients }
    }

    /// Coefficients, lowest degree first
    pub fn coefficients(&self) -> &[BigInt] {
        &self.coefficients
    }

    /// The constant term
    pub fn secret(&self) -> &BigInt {
        &self.coefficients[0]
    }

    /// Number of coefficients, i.e. the threshold this polynomial was fitted for
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    /// Always false: a polynomial holds at least one coefficient
    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Evaluates the polynomial at `x` by accumulating powers of `x`
    pub fn evaluate(&self, x: &BigInt) -> BigInt {
        let mut acc = BigInt::zero();
        let mut power = BigInt::one();
        for coeff in &self.coefficients {
            acc += coeff * &power;
            power *= x;
        }
        acc
    }

    pub fn into_coefficients(self) -> Vec<BigInt> {
        self.coefficients
    }
}

impl<T: Into<BigInt>> FromIterator<T> for Polynomial {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coeff) in self.coefficients.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            match i {
                0 => write!(f, "{coeff}")?,
                1 => write!(f, "{coeff}x")?,
                _ => write!(f, "{coeff}x^{i}")?,
            }
        }
        Ok(())
    }
}

/// Builds the `k×k` Vandermonde matrix for the given points
pub fn vandermonde(points: &[&Share]) -> Vec<Vec<BigInt>> {
    let k = points.len();
    points
        .iter()
        .map(|point| {
            let mut row = Vec::with_capacity(k);
            let mut power = BigInt::one();
            for _ in 0..k {
                let next = &power * point.x();
                row.push(power);
                power = next;
            }
            row
        })
        .collect()
}

/// Solves `a·c = b` in place by forward elimination and back-substitution
///
/// # Errors
/// - `RecoverError::InvalidInput` if `a` is not square or does not match `b`
/// - `RecoverError::SingularSystem` on a zero pivot
pub fn solve(a: &mut [Vec<BigInt>], b: &mut [BigInt]) -> Result<Vec<BigInt>> {
    let n = b.len();
    if a.len() != n || a.iter().any(|row| row.len() != n) {
        return Err(RecoverError::InvalidInput(format!(
            "system must be {n}x{n} to match its right-hand side"
        )));
    }

    for i in 0..n {
        let pivot = a[i][i].clone();
        if pivot.is_zero() {
            return Err(RecoverError::SingularSystem { pivot: i });
        }

        for cell in &mut a[i][i..] {
            *cell = &*cell / &pivot;
        }
        b[i] = &b[i] / &pivot;

        let (rows_upper, rows_lower) = a.split_at_mut(i + 1);
        let (rhs_upper, rhs_lower) = b.split_at_mut(i + 1);
        let pivot_row = &rows_upper[i];
        let pivot_rhs = &rhs_upper[i];

        for (row, rhs) in rows_lower.iter_mut().zip(rhs_lower.iter_mut()) {
            let factor = row[i].clone();
            for (cell, pivot_cell) in row[i..].iter_mut().zip(&pivot_row[i..]) {
                *cell -= &factor * pivot_cell;
            }
            *rhs -= &factor * pivot_rhs;
        }
    }

    let mut coefficients = vec![BigInt::zero(); n];
    for i in (0..n).rev() {
        let tail: BigInt = (i + 1..n).map(|j| &a[i][j] * &coefficients[j]).sum();
        coefficients[i] = &b[i] - tail;
    }

    Ok(coefficients)
}

/// Fits the degree-`(k-1)` polynomial through exactly `k` points
///
/// The points are only read; the system is built in a private workspace.
///
/// # Errors
/// - `RecoverError::InvalidInput` for an empty point list
/// - `RecoverError::SingularSystem` when elimination meets a zero pivot
pub fn fit(points: &[&Share]) -> Result<Polynomial> {
    if points.is_empty() {
        return Err(RecoverError::InvalidInput(
            "cannot fit a polynomial to zero points".into(),
        ));
    }

    let mut matrix = vandermonde(points);
    let mut rhs: Vec<BigInt> = points.iter().map(|point| point.y().clone()).collect();
    let coefficients = solve(&mut matrix, &mut rhs)?;

    Ok(Polynomial::new(coefficients))
}
