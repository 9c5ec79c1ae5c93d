//! Layer functions over the interval domain.

use crate::error::Result;
use crate::interval::{self, Interval};

/// Pre-activation interval of one neuron: `Σ weights[i] * inputs[i]`.
///
/// Inherits the negative-weight limitation of [`interval::affine`].
pub fn affine(weights: &[f64], inputs: &[Interval]) -> Result<Interval> {
    interval::affine(weights, inputs)
}

pub fn relu(input: Interval) -> Interval {
    interval::relu(input)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_affine_then_relu() {
        let inputs = [Interval::new(-1.0, 1.0), Interval::new(-2.0, 0.5)];
        let pre = affine(&[1.0, 1.0], &inputs).unwrap();
        assert_eq!(pre, Interval::new(-3.0, 1.5));
        assert_eq!(relu(pre), Interval::new(0.0, 1.5));
    }
}
