//! Layer-by-layer propagation of abstract values through a dense network.
//!
//! The two domains get parallel function families, [`interval`] and
//! [`zonotope`], with the same operation names but no shared trait: an
//! interval and a zonotope have genuinely different representations and
//! contracts.
//!
//! A [`Network`] drives them the same way for both domains: the input is cut
//! into one slice per neuron, every neuron of a layer applies `affine` with
//! its weight row followed by `relu`, and the per-neuron results are
//! `combine`d into the input of the next layer.

pub mod interval;
pub mod zonotope;

use log::debug;

use crate::error::{DomainError, Result};
use crate::interval::Interval;
use crate::zonotope::Zonotope;

/// Activation applied after a layer's affine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Relu,
    Identity,
}

/// Fully connected layer without bias: one weight row per output neuron.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    weights: Vec<Vec<f64>>,
    activation: Activation,
}

impl DenseLayer {
    /// Creates a layer from its weight rows.
    ///
    /// Fails if there are no neurons, no inputs, or the rows are ragged.
    pub fn new(weights: Vec<Vec<f64>>, activation: Activation) -> Result<Self> {
        let inputs = weights.first().map_or(0, |row| row.len());
        if inputs == 0 {
            return Err(DomainError::InvalidLayer("layer has no weights".to_string()));
        }
        if let Some(row) = weights.iter().position(|row| row.len() != inputs) {
            return Err(DomainError::InvalidLayer(format!(
                "row {} has {} weights, expected {}",
                row,
                weights[row].len(),
                inputs
            )));
        }
        Ok(Self { weights, activation })
    }

    pub fn relu(weights: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(weights, Activation::Relu)
    }

    pub fn identity(weights: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(weights, Activation::Identity)
    }

    /// Fan-in.
    pub fn inputs(&self) -> usize {
        self.weights[0].len()
    }

    /// Fan-out.
    pub fn outputs(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn propagate_intervals(&self, input: &[Interval]) -> Result<Vec<Interval>> {
        self.check_inputs(input.len())?;
        self.weights
            .iter()
            .map(|w| {
                let pre = interval::affine(w, input)?;
                Ok(match self.activation {
                    Activation::Relu => interval::relu(pre),
                    Activation::Identity => pre,
                })
            })
            .collect()
    }

    /// Propagates a zonotope through the layer, one neuron at a time.
    ///
    /// Every relaxed neuron gets its own fresh generator column, placed after
    /// the generators of `input`, so that the relaxation errors of different
    /// neurons stay independent once the neurons are combined.
    pub fn propagate_zonotope(&self, input: &Zonotope) -> Result<Zonotope> {
        self.check_inputs(input.dimensions())?;
        let rows = input.rows();
        let base = input.generators();
        let mut fresh = 0;

        let mut output: Option<Zonotope> = None;
        for w in &self.weights {
            let pre = zonotope::affine(w, &rows)?;
            let mut post = match self.activation {
                Activation::Relu => zonotope::relu(&pre)?,
                Activation::Identity => pre,
            };
            if post.generators() > base {
                fresh += 1;
                post = post.move_generator(base + 1, base + fresh);
            }
            output = Some(match output {
                None => post,
                Some(acc) => acc.combine(&post),
            });
        }
        debug!("layer: {} fresh generators", fresh);

        output.ok_or_else(|| DomainError::InvalidLayer("layer has no neurons".to_string()))
    }

    /// Concrete forward pass.
    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_inputs(input.len())?;
        Ok(self
            .weights
            .iter()
            .map(|w| {
                let pre: f64 = w.iter().zip(input).map(|(a, b)| a * b).sum();
                match self.activation {
                    Activation::Relu => pre.max(0.0),
                    Activation::Identity => pre,
                }
            })
            .collect())
    }

    fn check_inputs(&self, got: usize) -> Result<()> {
        if got != self.inputs() {
            return Err(DomainError::DimensionMismatch {
                expected: self.inputs(),
                got,
            });
        }
        Ok(())
    }
}

/// Feed-forward stack of dense layers.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    layers: Vec<DenseLayer>,
}

impl Network {
    /// Chains layers, checking that every fan-in matches the previous fan-out.
    pub fn new(layers: Vec<DenseLayer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(DomainError::InvalidLayer("network has no layers".to_string()));
        }
        for pair in layers.windows(2) {
            if pair[1].inputs() != pair[0].outputs() {
                return Err(DomainError::DimensionMismatch {
                    expected: pair[0].outputs(),
                    got: pair[1].inputs(),
                });
            }
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[DenseLayer] {
        &self.layers
    }

    pub fn inputs(&self) -> usize {
        self.layers[0].inputs()
    }

    pub fn outputs(&self) -> usize {
        self.layers[self.layers.len() - 1].outputs()
    }

    pub fn propagate_intervals(&self, input: &[Interval]) -> Result<Vec<Interval>> {
        let mut current = input.to_vec();
        for (i, layer) in self.layers.iter().enumerate() {
            current = layer.propagate_intervals(&current)?;
            debug!("interval layer {}: {:?}", i, current);
        }
        Ok(current)
    }

    pub fn propagate_zonotope(&self, input: &Zonotope) -> Result<Zonotope> {
        let mut current = input.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            current = layer.propagate_zonotope(&current)?;
            debug!(
                "zonotope layer {}: {} dimensions, {} generators",
                i,
                current.dimensions(),
                current.generators()
            );
        }
        Ok(current)
    }

    pub fn evaluate(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.evaluate(&current)?;
        }
        Ok(current)
    }
}
