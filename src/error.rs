//! Error type shared by both abstract domains.

use std::fmt;

/// Precondition violations reported by domain and layer operations.
///
/// All of these indicate a wiring mistake in how layers are connected,
/// so nothing here is retried or recovered from internally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Two counts that must agree do not (weights vs. values, rows vs. rows).
    DimensionMismatch { expected: usize, got: usize },
    /// `split` was called on a zonotope with an odd number of dimensions.
    OddDimension(usize),
    /// Rendering was requested for more than two dimensions.
    UnsupportedDimension(usize),
    /// A 1-indexed dimension is outside `1..=dimensions`.
    DimensionOutOfRange { index: usize, dimensions: usize },
    /// A dense layer was built from a malformed weight matrix.
    InvalidLayer(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::DimensionMismatch { expected, got } => {
                write!(f, "Dimension mismatch: expected {}, got {}", expected, got)
            }
            DomainError::OddDimension(n) => write!(f, "Dimension must be even, got {}", n),
            DomainError::UnsupportedDimension(n) => write!(f, "Dimension must be <= 2, got {}", n),
            DomainError::DimensionOutOfRange { index, dimensions } => {
                write!(f, "Dimension {} out of range 1..={}", index, dimensions)
            }
            DomainError::InvalidLayer(msg) => write!(f, "Invalid layer: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

pub type Result<T> = std::result::Result<T, DomainError>;
