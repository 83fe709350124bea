use serde::{Deserialize, Serialize};

use crate::errors::{CoteachResult, InferenceError};
use crate::numeric;

/// Row-major dense matrix. Rows are hypotheses wherever it appears in a
/// teaching posterior or a transition matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    /// Build from nested rows. Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> CoteachResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(InferenceError::ShapeMismatch {
                    expected: format!("row of length {n_cols}"),
                    actual: format!("row of length {}", row.len()),
                }
                .into());
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Normalise each row to sum to 1. Zero rows stay zero.
    pub fn normalize_rows(&mut self) {
        for r in 0..self.rows {
            numeric::normalize_or_zero(self.row_mut(r));
        }
    }

    /// `Σ_r weights[r] · row_r`, i.e. the vector-matrix product `wᵀ M`.
    pub fn weighted_row_sum(&self, weights: &[f64]) -> CoteachResult<Vec<f64>> {
        if weights.len() != self.rows {
            return Err(InferenceError::ShapeMismatch {
                expected: format!("{} row weights", self.rows),
                actual: format!("{} row weights", weights.len()),
            }
            .into());
        }
        let mut out = vec![0.0; self.cols];
        for (r, &w) in weights.iter().enumerate() {
            if w == 0.0 {
                continue;
            }
            for (acc, &v) in out.iter_mut().zip(self.row(r)) {
                *acc += w * v;
            }
        }
        Ok(out)
    }

    /// Matrix product `self · other`.
    pub fn matmul(&self, other: &Matrix) -> CoteachResult<Matrix> {
        if self.cols != other.rows {
            return Err(InferenceError::ShapeMismatch {
                expected: format!("{} rows", self.cols),
                actual: format!("{} rows", other.rows),
            }
            .into());
        }
        let mut out = Matrix::zeros(self.rows, other.cols);
        for r in 0..self.rows {
            let product = other.weighted_row_sum(self.row(r))?;
            out.row_mut(r).copy_from_slice(&product);
        }
        Ok(out)
    }
}
