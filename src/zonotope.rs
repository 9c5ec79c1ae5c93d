//! Zonotope abstract domain.
//!
//! A zonotope over `n` dimensions with `m` generators is stored as an
//! `n × (m + 1)` matrix. Column 0 holds the center, columns `1..=m` hold the
//! generators. Generator `k` is one symbolic perturbation `e_k ∈ [-1, 1]`
//! shared by every row of the same zonotope, so the represented set is
//!
//! ```text
//! { center + Σ_k g_k · e_k  :  e_k ∈ [-1, 1] }
//! ```
//!
//! # Generator alignment
//!
//! Operands with different generator counts are zero-padded on the right
//! before they are added or stacked (see [`equalize_generators`]). Padding
//! never changes the represented set. However, [`Zonotope::combine`] then
//! treats generator `k` of both operands as the *same* perturbation. This is
//! exactly what per-neuron layer composition needs (all neurons of a layer are
//! computed from the same input generators), but it is not a general union of
//! two zonotopes with unrelated generators.
//!
//! # Examples
//!
//! ```
//! use zonotope_rs::zonotope::Zonotope;
//!
//! let z = Zonotope::from_rows(&[vec![1.4, 0.2, 0.7]]);
//! assert!((z.upper_bound(1).unwrap() - 2.3).abs() < 1e-9);
//! assert!((z.lower_bound(1).unwrap() - 0.5).abs() < 1e-9);
//! ```

use std::fmt;
use std::ops::{Mul, Neg};

use log::debug;
use ndarray::{s, Array2, ArrayView1};
use rand::Rng;

use crate::error::{DomainError, Result};
use crate::interval::Interval;

/// Center plus generators, stored row-per-dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Zonotope {
    values: Array2<f64>,
    dimensions: usize,
    generators: usize,
}

impl Zonotope {
    /// Wraps an explicit `(dimensions, generators + 1)` matrix.
    ///
    /// # Panics
    ///
    /// Panics if the matrix has no columns (there is no center).
    pub fn new(values: Array2<f64>) -> Self {
        let (dimensions, columns) = values.dim();
        assert!(columns >= 1, "Zonotope needs at least a center column");
        Self {
            values,
            dimensions,
            generators: columns - 1,
        }
    }

    /// All-zero zonotope with `dimension` rows and `columns` columns.
    ///
    /// Note that `columns` includes the center, so the resulting zonotope has
    /// `columns - 1` generators.
    ///
    /// # Panics
    ///
    /// Panics if `columns == 0`.
    pub fn zeros(dimension: usize, columns: usize) -> Self {
        Self::new(Array2::zeros((dimension, columns)))
    }

    /// Builds a zonotope from row vectors `[center, g_1, ..., g_m]`.
    ///
    /// # Panics
    ///
    /// Panics if rows have different lengths or are empty.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let columns = rows.first().map_or(1, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == columns),
            "All zonotope rows must have the same number of columns"
        );
        let values = Array2::from_shape_fn((rows.len(), columns), |(i, j)| rows[i][j]);
        Self::new(values)
    }

    /// Box zonotope enclosing exactly the given intervals.
    ///
    /// Dimension `i` gets its own generator `i + 1` with the half-width of the interval.
    pub fn from_intervals(intervals: &[Interval]) -> Self {
        let n = intervals.len();
        let mut values = Array2::zeros((n, n + 1));
        for (i, interval) in intervals.iter().enumerate() {
            values[[i, 0]] = interval.midpoint();
            values[[i, i + 1]] = interval.width() / 2.0;
        }
        Self::new(values)
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn generators(&self) -> usize {
        self.generators
    }

    /// Raw `(dimensions, generators + 1)` matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn into_values(self) -> Array2<f64> {
        self.values
    }

    /// Center vector (column 0).
    pub fn center(&self) -> Vec<f64> {
        self.values.column(0).to_vec()
    }

    /// Generator `k` (1-indexed) as a column vector over all dimensions.
    pub fn generator(&self, k: usize) -> Option<Vec<f64>> {
        if k == 0 || k > self.generators {
            return None;
        }
        Some(self.values.column(k).to_vec())
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    /// Zero-pads the generator columns on the right up to `generators` generators.
    ///
    /// Returns an unchanged copy if the zonotope already has at least that many.
    pub fn pad_generators(&self, generators: usize) -> Zonotope {
        if generators <= self.generators {
            return self.clone();
        }
        let mut values = Array2::zeros((self.dimensions, generators + 1));
        values.slice_mut(s![.., ..=self.generators]).assign(&self.values);
        Zonotope::new(values)
    }

    /// Sum of two zonotopes of the same dimension.
    ///
    /// The operand with fewer generators is zero-padded first.
    pub fn try_add(&self, other: &Zonotope) -> Result<Zonotope> {
        if self.dimensions != other.dimensions {
            return Err(DomainError::DimensionMismatch {
                expected: self.dimensions,
                got: other.dimensions,
            });
        }
        let (a, b) = equalize_generators(self, other);
        Ok(Zonotope::new(a.values + &b.values))
    }

    /// Stacks the rows of `self` on top of the rows of `other`.
    ///
    /// Generator columns are aligned by index after padding: generator `k`
    /// of `self` and generator `k` of `other` become one shared perturbation.
    pub fn combine(&self, other: &Zonotope) -> Zonotope {
        debug!(
            "combine({}x{}, {}x{})",
            self.dimensions, self.generators, other.dimensions, other.generators
        );
        let (a, b) = equalize_generators(self, other);
        let rows = a.dimensions + b.dimensions;
        let mut values = Array2::zeros((rows, a.generators + 1));
        values.slice_mut(s![..a.dimensions, ..]).assign(&a.values);
        values.slice_mut(s![a.dimensions.., ..]).assign(&b.values);
        Zonotope::new(values)
    }

    /// Splits the rows into two halves, each keeping all generators.
    pub fn split(&self) -> Result<(Zonotope, Zonotope)> {
        if self.dimensions % 2 != 0 {
            return Err(DomainError::OddDimension(self.dimensions));
        }
        let half = self.dimensions / 2;
        let first = self.values.slice(s![..half, ..]).to_owned();
        let second = self.values.slice(s![half.., ..]).to_owned();
        Ok((Zonotope::new(first), Zonotope::new(second)))
    }

    /// Single-row zonotope for dimension `dim` (1-indexed), keeping all generators.
    pub fn row(&self, dim: usize) -> Result<Zonotope> {
        let i = self.index(dim)?;
        Ok(Zonotope::new(self.values.slice(s![i..=i, ..]).to_owned()))
    }

    /// All single-row slices, in dimension order.
    pub fn rows(&self) -> Vec<Zonotope> {
        self.values
            .rows()
            .into_iter()
            .map(|r| Zonotope::new(r.insert_axis(ndarray::Axis(0)).to_owned()))
            .collect()
    }

    /// Upper bound of dimension `dim` (1-indexed): `center + Σ |g_k|`.
    pub fn upper_bound(&self, dim: usize) -> Result<f64> {
        let row = self.values.row(self.index(dim)?);
        Ok(row[0] + radius(row))
    }

    /// Lower bound of dimension `dim` (1-indexed): `center - Σ |g_k|`.
    pub fn lower_bound(&self, dim: usize) -> Result<f64> {
        let row = self.values.row(self.index(dim)?);
        Ok(row[0] - radius(row))
    }

    /// Per-dimension bounds as intervals.
    pub fn to_intervals(&self) -> Vec<Interval> {
        self.values
            .rows()
            .into_iter()
            .map(|row| {
                let r = radius(row);
                Interval::new(row[0] - r, row[0] + r)
            })
            .collect()
    }

    /// Samples a point using independent perturbations for every dimension.
    ///
    /// Each coordinate lies within that dimension's bounds, but since the
    /// perturbations are not shared across rows the point as a whole may fall
    /// outside the zonotope. Use [`Zonotope::random_member_with`] for that.
    pub fn random_point_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        self.values
            .rows()
            .into_iter()
            .map(|row| {
                let mut value = row[0];
                for g in row.iter().skip(1) {
                    let e: f64 = rng.random_range(-1.0..=1.0);
                    value += g * e;
                }
                value
            })
            .collect()
    }

    /// [`Zonotope::random_point_with`] using the thread-local generator.
    pub fn random_point(&self) -> Vec<f64> {
        self.random_point_with(&mut rand::rng())
    }

    /// Samples a point of the zonotope: one perturbation per generator, shared by all rows.
    pub fn random_member_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let eps: Vec<f64> = (0..self.generators).map(|_| rng.random_range(-1.0..=1.0)).collect();
        self.evaluate(&eps)
    }

    /// Concrete point for the perturbation vector `eps` (one entry per generator).
    ///
    /// Missing entries are treated as zero.
    pub fn evaluate(&self, eps: &[f64]) -> Vec<f64> {
        self.values
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .skip(1)
                    .zip(eps)
                    .fold(row[0], |acc, (g, e)| acc + g * e)
            })
            .collect()
    }

    /// Moves generator column `from` to column `to` (both 1-indexed), padding as needed.
    ///
    /// The old column is zeroed. Used to give each neuron's fresh ReLU error
    /// term its own perturbation before the neurons are combined.
    pub fn move_generator(&self, from: usize, to: usize) -> Zonotope {
        if from == to || from == 0 || from > self.generators {
            return self.clone();
        }
        let mut z = self.pad_generators(to);
        let column = z.values.column(from).to_owned();
        z.values.column_mut(to).assign(&column);
        z.values.column_mut(from).fill(0.0);
        z
    }

    /// Linear relaxation of ReLU for a one-dimensional zonotope.
    ///
    /// - `upper <= 0`: the zero zonotope of the same shape.
    /// - `lower >= 0`: the input unchanged.
    /// - otherwise, with `λ = u / (u - l)` and `ε = |u (1 - λ)| / 2`, the input
    ///   is scaled by `λ`, and a fresh generator of magnitude `ε` is appended
    ///   while the center is shifted by `ε`. The result encloses the ReLU graph
    ///   over `[l, u]` and has one more generator than the input.
    ///
    /// Multi-dimensional inputs are rejected; apply it per [`Zonotope::row`]
    /// and [`Zonotope::combine`] the results.
    pub fn relu(&self) -> Result<Zonotope> {
        if self.dimensions != 1 {
            return Err(DomainError::DimensionMismatch {
                expected: 1,
                got: self.dimensions,
            });
        }

        let upper = self.upper_bound(1)?;
        let lower = self.lower_bound(1)?;
        debug!("relu(lower = {}, upper = {})", lower, upper);

        if upper <= 0.0 {
            debug!("relu: fully inactive");
            return Ok(Zonotope::zeros(self.dimensions, self.generators + 1));
        }
        if lower >= 0.0 {
            debug!("relu: fully active");
            return Ok(self.clone());
        }

        let lambda = upper / (upper - lower);
        let epsilon = (upper * (1.0 - lambda)).abs() / 2.0;
        debug!("relu: lambda = {}, epsilon = {}", lambda, epsilon);

        let scaled = lambda * self.pad_generators(self.generators + 1);
        let mut shift = Zonotope::zeros(scaled.dimensions, scaled.generators + 1);
        shift.values[[0, 0]] = epsilon;
        shift.values[[0, scaled.generators]] = epsilon;
        scaled.try_add(&shift)
    }

    fn index(&self, dim: usize) -> Result<usize> {
        if dim == 0 || dim > self.dimensions {
            return Err(DomainError::DimensionOutOfRange {
                index: dim,
                dimensions: self.dimensions,
            });
        }
        Ok(dim - 1)
    }
}

/// Sum of absolute generator magnitudes of one row.
fn radius(row: ArrayView1<f64>) -> f64 {
    row.iter().skip(1).map(|g| g.abs()).sum()
}

/// Pads the narrower operand so both have the same number of generators.
pub fn equalize_generators(a: &Zonotope, b: &Zonotope) -> (Zonotope, Zonotope) {
    let generators = a.generators.max(b.generators);
    if a.generators != b.generators {
        debug!("equalize_generators: {} vs {} -> {}", a.generators, b.generators, generators);
    }
    (a.pad_generators(generators), b.pad_generators(generators))
}

impl Mul<f64> for Zonotope {
    type Output = Zonotope;

    fn mul(self, k: f64) -> Self::Output {
        Zonotope::new(self.values * k)
    }
}

impl Mul<f64> for &Zonotope {
    type Output = Zonotope;

    fn mul(self, k: f64) -> Self::Output {
        Zonotope::new(&self.values * k)
    }
}

impl Mul<Zonotope> for f64 {
    type Output = Zonotope;

    fn mul(self, z: Zonotope) -> Self::Output {
        z * self
    }
}

impl Mul<&Zonotope> for f64 {
    type Output = Zonotope;

    fn mul(self, z: &Zonotope) -> Self::Output {
        z * self
    }
}

impl Neg for Zonotope {
    type Output = Zonotope;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl fmt::Display for Zonotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.values.rows().into_iter().enumerate() {
            if i > 0 {
                write!(f, ",\n ")?;
            }
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
