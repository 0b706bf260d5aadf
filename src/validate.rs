//! Independent exactness check for fitted polynomials
//!
//! The solver can return truncated coefficients for points that do not share
//! an integer polynomial, so acceptance never relies on the solver succeeding.

use crate::polynomial::Polynomial;
use crate::share::Share;

/// True if the polynomial reproduces this share's `y` exactly
pub fn passes_through(polynomial: &Polynomial, share: &Share) -> bool {
    polynomial.evaluate(share.x()) == *share.y()
}

/// Accepts a fit only if every point is reproduced exactly
pub fn fits_exactly(polynomial: &Polynomial, points: &[&Share]) -> bool {
    points.iter().all(|point| passes_through(polynomial, point))
}
