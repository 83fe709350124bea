use serde::{Deserialize, Serialize};

use super::Matrix;
use crate::errors::{CoteachResult, InferenceError};
use crate::numeric;

/// Shape of a `(hypothesis, query, outcome)` tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims3 {
    pub hypotheses: usize,
    pub queries: usize,
    pub outcomes: usize,
}

impl Dims3 {
    pub fn new(hypotheses: usize, queries: usize, outcomes: usize) -> Self {
        Self {
            hypotheses,
            queries,
            outcomes,
        }
    }

    pub fn len(&self) -> usize {
        self.hypotheses * self.queries * self.outcomes
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Dims3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.hypotheses, self.queries, self.outcomes)
    }
}

/// Dense tensor indexed by `(hypothesis, query, outcome)`, outcome fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor3 {
    dims: Dims3,
    data: Vec<f64>,
}

impl Tensor3 {
    pub fn filled(dims: Dims3, value: f64) -> Self {
        Self {
            dims,
            data: vec![value; dims.len()],
        }
    }

    pub fn zeros(dims: Dims3) -> Self {
        Self::filled(dims, 0.0)
    }

    pub fn from_fn(dims: Dims3, mut f: impl FnMut(usize, usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(dims.len());
        for h in 0..dims.hypotheses {
            for q in 0..dims.queries {
                for o in 0..dims.outcomes {
                    data.push(f(h, q, o));
                }
            }
        }
        Self { dims, data }
    }

    /// Broadcast a vector over hypotheses to every `(query, outcome)` cell.
    pub fn broadcast_hypotheses(values: &[f64], queries: usize, outcomes: usize) -> Self {
        let dims = Dims3::new(values.len(), queries, outcomes);
        Self::from_fn(dims, |h, _, _| values[h])
    }

    /// Broadcast a `(hypothesis, query)` matrix along the outcome axis.
    pub fn broadcast_outcomes(matrix: &Matrix, outcomes: usize) -> Self {
        let dims = Dims3::new(matrix.rows(), matrix.cols(), outcomes);
        Self::from_fn(dims, |h, q, _| matrix.get(h, q))
    }

    pub fn dims(&self) -> Dims3 {
        self.dims
    }

    fn offset(&self, h: usize, q: usize, o: usize) -> usize {
        debug_assert!(h < self.dims.hypotheses && q < self.dims.queries && o < self.dims.outcomes);
        (h * self.dims.queries + q) * self.dims.outcomes + o
    }

    pub fn get(&self, h: usize, q: usize, o: usize) -> f64 {
        self.data[self.offset(h, q, o)]
    }

    pub fn set(&mut self, h: usize, q: usize, o: usize, value: f64) {
        let i = self.offset(h, q, o);
        self.data[i] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Outcome probabilities for one `(hypothesis, query)` cell.
    pub fn outcome_row(&self, h: usize, q: usize) -> &[f64] {
        let start = self.offset(h, q, 0);
        &self.data[start..start + self.dims.outcomes]
    }

    /// Values over hypotheses at a fixed `(query, outcome)`.
    pub fn hypothesis_slice(&self, q: usize, o: usize) -> Vec<f64> {
        (0..self.dims.hypotheses).map(|h| self.get(h, q, o)).collect()
    }

    /// Elementwise product. Shapes must match exactly.
    pub fn hadamard(&self, other: &Tensor3) -> CoteachResult<Tensor3> {
        self.ensure_same_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| a * b)
            .collect();
        Ok(Self {
            dims: self.dims,
            data,
        })
    }

    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    pub fn map_in_place(&mut self, f: impl Fn(f64) -> f64) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Normalise every `(query, outcome)` slice over hypotheses.
    /// Slices with zero mass become exactly zero.
    pub fn normalize_over_hypotheses(&mut self) {
        let Dims3 {
            hypotheses,
            queries,
            outcomes,
        } = self.dims;
        for q in 0..queries {
            for o in 0..outcomes {
                let mass: f64 = (0..hypotheses).map(|h| self.get(h, q, o)).sum();
                for h in 0..hypotheses {
                    let v = numeric::zero_mass_ratio(self.get(h, q, o), mass);
                    self.set(h, q, o, v);
                }
            }
        }
    }

    /// Marginalise the outcome axis: `m[h, q] = Σ_o t[h, q, o]`.
    pub fn sum_over_outcomes(&self) -> Matrix {
        let mut out = Matrix::zeros(self.dims.hypotheses, self.dims.queries);
        for h in 0..self.dims.hypotheses {
            for q in 0..self.dims.queries {
                out.set(h, q, self.outcome_row(h, q).iter().sum());
            }
        }
        out
    }

    fn ensure_same_shape(&self, other: &Tensor3) -> CoteachResult<()> {
        if self.dims != other.dims {
            return Err(InferenceError::ShapeMismatch {
                expected: self.dims.to_string(),
                actual: other.dims.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
