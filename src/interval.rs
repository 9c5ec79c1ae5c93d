//! Interval abstract domain.
//!
//! An [`Interval`] tracks a lower and an upper bound for a single neuron.
//! It is cheap but loses every correlation between neurons, which is what
//! makes it a useful baseline next to the [zonotope][crate::zonotope] domain.
//!
//! # Known limitation
//!
//! [`affine`] sums `weight * lower` and `weight * upper` without swapping the
//! bounds for negative weights. For a negative weight the result is therefore
//! *not* an over-approximation. This mirrors the simple interval baseline the
//! zonotope domain is compared against; the zonotope `affine` does not share
//! the problem.

use std::fmt;

use log::debug;

use crate::error::{DomainError, Result};

/// Closed interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Creates an interval from raw bounds.
    ///
    /// The bounds are not validated; `lower <= upper` is the caller's responsibility.
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Degenerate interval `[value, value]`.
    pub fn point(value: f64) -> Self {
        Self {
            lower: value,
            upper: value,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

impl From<(f64, f64)> for Interval {
    fn from((lower, upper): (f64, f64)) -> Self {
        Self::new(lower, upper)
    }
}

impl From<Interval> for (f64, f64) {
    fn from(interval: Interval) -> Self {
        (interval.lower, interval.upper)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// ReLU on an interval: clamps both bounds at zero.
pub fn relu(interval: Interval) -> Interval {
    Interval {
        lower: interval.lower.max(0.0),
        upper: interval.upper.max(0.0),
    }
}

/// Weighted sum of intervals.
///
/// Computes `Σ w[i] * lower[i]` and `Σ w[i] * upper[i]` independently.
/// Negative weights are not handled (see the module docs).
pub fn affine(weights: &[f64], intervals: &[Interval]) -> Result<Interval> {
    debug!("affine(weights = {:?}, intervals = {})", weights, intervals.len());

    if weights.len() != intervals.len() {
        return Err(DomainError::DimensionMismatch {
            expected: weights.len(),
            got: intervals.len(),
        });
    }

    let mut lower = 0.0;
    let mut upper = 0.0;
    for (w, i) in weights.iter().zip(intervals) {
        lower += w * i.lower;
        upper += w * i.upper;
    }
    Ok(Interval { lower, upper })
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_relu_straddling() {
        let r = relu(Interval::new(-2.0, 3.0));
        assert_eq!(r, Interval::new(0.0, 3.0));
    }

    #[test]
    fn test_relu_negative() {
        let r = relu(Interval::new(-5.0, -1.0));
        assert_eq!(r, Interval::new(0.0, 0.0));
    }

    #[test]
    fn test_relu_positive() {
        let i = Interval::new(1.5, 2.5);
        assert_eq!(relu(i), i);
    }

    #[test]
    fn test_affine() {
        let i1 = Interval::new(0.0, 2.0);
        let i2 = Interval::new(1.0, 3.0);
        let r = affine(&[1.0, 0.7], &[i1, i2]).unwrap();
        assert_close(r.lower, 0.7);
        assert_close(r.upper, 4.1);
    }

    #[test]
    fn test_affine_from_tuples() {
        let tuples: [(f64, f64); 2] = [(0.0, 2.0), (1.0, 3.0)];
        let inputs: Vec<Interval> = tuples.into_iter().map(Interval::from).collect();
        let (lower, upper): (f64, f64) = affine(&[1.0, 0.7], &inputs).unwrap().into();
        assert_close(lower, 0.7);
        assert_close(upper, 4.1);
    }

    #[test]
    fn test_affine_mismatch() {
        let i1 = Interval::new(0.0, 2.0);
        let err = affine(&[1.0, 0.7], &[i1]).unwrap_err();
        assert_eq!(err, DomainError::DimensionMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn test_affine_negative_weight_is_not_sound() {
        // -1 * [0, 2] is really [-2, 0], but the bounds come out flipped.
        let r = affine(&[-1.0], &[Interval::new(0.0, 2.0)]).unwrap();
        assert_eq!(r, Interval::new(0.0, -2.0));
        assert!(r.lower > r.upper);
    }

    #[test]
    fn test_display() {
        assert_eq!(Interval::new(0.5, 2.0).to_string(), "[0.5, 2]");
    }
}
