//! Layer functions over the zonotope domain.

use log::debug;

use crate::error::{DomainError, Result};
use crate::zonotope::Zonotope;

/// Weighted sum `Σ weights[i] * inputs[i]` using zonotope addition and scaling.
///
/// Unlike the interval version this is sound for negative weights, since
/// scaling flips the generators together with the center.
pub fn affine(weights: &[f64], inputs: &[Zonotope]) -> Result<Zonotope> {
    debug!("affine(weights = {:?}, inputs = {})", weights, inputs.len());

    if weights.len() != inputs.len() {
        return Err(DomainError::DimensionMismatch {
            expected: weights.len(),
            got: inputs.len(),
        });
    }
    let first = inputs.first().ok_or(DomainError::DimensionMismatch { expected: 1, got: 0 })?;

    let mut output = Zonotope::zeros(first.dimensions(), first.generators() + 1);
    for (w, z) in weights.iter().zip(inputs) {
        output = output.try_add(&(*w * z))?;
    }
    Ok(output)
}

/// ReLU relaxation of a one-dimensional zonotope.
pub fn relu(input: &Zonotope) -> Result<Zonotope> {
    input.relu()
}

#[cfg(test)]
mod tests {
    use ndarray::array;
    use test_log::test;

    use super::*;

    #[test]
    fn test_affine_shared_generators() {
        // x = 1 + e1, y = 1 - e1: x + y is exactly 2.
        let z = Zonotope::new(array![[1.0, 1.0], [1.0, -1.0]]);
        let rows = z.rows();
        let sum = affine(&[1.0, 1.0], &rows).unwrap();
        assert_eq!(sum.values(), &array![[2.0, 0.0]]);
    }

    #[test]
    fn test_affine_negative_weight() {
        let x = Zonotope::new(array![[1.0, 1.0]]);
        let r = affine(&[-1.0], &[x]).unwrap();
        assert_eq!(r.to_intervals()[0].lower, -2.0);
        assert_eq!(r.to_intervals()[0].upper, 0.0);
    }

    #[test]
    fn test_affine_mixed_generator_counts() {
        let a = Zonotope::new(array![[1.0, 1.0]]);
        let b = Zonotope::new(array![[0.0, 0.0, 2.0]]);
        let r = affine(&[2.0, 0.5], &[a, b]).unwrap();
        assert_eq!(r.values(), &array![[2.0, 2.0, 1.0]]);
    }

    #[test]
    fn test_affine_mismatch() {
        let a = Zonotope::zeros(1, 2);
        assert_eq!(
            affine(&[1.0, 2.0], &[a]),
            Err(DomainError::DimensionMismatch { expected: 2, got: 1 })
        );
        assert_eq!(affine(&[], &[]), Err(DomainError::DimensionMismatch { expected: 1, got: 0 }));
    }

    #[test]
    fn test_relu_dispatch() {
        let z = Zonotope::new(array![[1.0, 2.0]]);
        assert_eq!(relu(&z).unwrap(), z.relu().unwrap());
    }
}
