//! # zonotope-rs: Abstract Domains for Neural Network Reachability
//!
//! **`zonotope-rs`** computes sound over-approximations of the values a small feed-forward
//! ReLU network can produce for a whole *set* of inputs. It offers two abstract domains:
//!
//! - **Intervals**: independent `[lower, upper]` bounds per neuron. Cheap, but blind to
//!   correlations between neurons.
//! - **Zonotopes**: a center plus linear generators over shared perturbations `e_k ∈ [-1, 1]`.
//!   Affine layers are exact, and ReLU is handled with a linear relaxation that introduces a
//!   fresh error generator.
//!
//! ## Soundness
//!
//! The abstract output of a zonotope operation always contains every concrete output reachable
//! from a concrete input inside the abstract input. The interval `affine` deliberately ignores
//! the sign of its weights and is only sound for non-negative weights; see [`interval`].
//!
//! ## Basic Usage
//!
//! ```rust
//! use zonotope_rs::interval::Interval;
//! use zonotope_rs::layer::{DenseLayer, Network};
//! use zonotope_rs::zonotope::Zonotope;
//!
//! // 1. Describe the network: one hidden ReLU layer, one linear output.
//! let network = Network::new(vec![
//!     DenseLayer::relu(vec![vec![1.0, -1.0], vec![1.0, 1.0]]).unwrap(),
//!     DenseLayer::identity(vec![vec![1.0, 1.0]]).unwrap(),
//! ])
//! .unwrap();
//!
//! // 2. Embed the input box as a zonotope.
//! let input = [Interval::new(-1.0, 1.0), Interval::new(0.0, 2.0)];
//! let z = Zonotope::from_intervals(&input);
//!
//! // 3. Propagate and read off the bounds.
//! let output = network.propagate_zonotope(&z).unwrap();
//! let bounds = output.to_intervals();
//! assert_eq!(bounds.len(), 1);
//!
//! // 4. Every concrete output lies inside.
//! let y = network.evaluate(&[0.5, 1.5]).unwrap();
//! assert!(bounds[0].contains(y[0]));
//! ```
//!
//! ## Core Components
//!
//! - **[`zonotope`]**: The [`Zonotope`][crate::zonotope::Zonotope] type with addition, scaling,
//!   `combine`/`split`, bounds, sampling and the ReLU relaxation.
//! - **[`interval`]**: The [`Interval`][crate::interval::Interval] baseline domain.
//! - **[`layer`]**: Per-domain `affine`/`relu` and the [`Network`][crate::layer::Network] driver.
//! - **[`render`]**: Vertices, generator arrows and SVG output for planar values.

pub mod error;
pub mod interval;
pub mod layer;
pub mod render;
pub mod zonotope;

pub use error::{DomainError, Result};
pub use interval::Interval;
pub use layer::{Activation, DenseLayer, Network};
pub use zonotope::Zonotope;
