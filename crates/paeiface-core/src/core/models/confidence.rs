use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfidenceMatrixError {
    #[error("Confidence matrix is empty")]
    Empty,
    #[error("Confidence matrix must be square, found {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("Row {row} has {found} values, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Chain label vector has {labels} entries but the matrix has {tokens} tokens")]
    LabelLengthMismatch { tokens: usize, labels: usize },
    #[error("Invalid error value {value} at ({row}, {col}): must be finite and non-negative")]
    InvalidValue { row: usize, col: usize, value: f64 },
}

/// Predicted aligned error over the ordered tokens of one prediction, plus the
/// chain label of every token.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceMatrix {
    pae: DMatrix<f64>,
    token_chain_ids: Vec<String>,
}

impl ConfidenceMatrix {
    /// Creates a matrix after checking shape, label count and value domain.
    pub fn new(
        pae: DMatrix<f64>,
        token_chain_ids: Vec<String>,
    ) -> Result<Self, ConfidenceMatrixError> {
        let (rows, cols) = pae.shape();
        if rows == 0 {
            return Err(ConfidenceMatrixError::Empty);
        }
        if rows != cols {
            return Err(ConfidenceMatrixError::NotSquare { rows, cols });
        }
        if token_chain_ids.len() != rows {
            return Err(ConfidenceMatrixError::LabelLengthMismatch {
                tokens: rows,
                labels: token_chain_ids.len(),
            });
        }
        for row in 0..rows {
            for col in 0..cols {
                let value = pae[(row, col)];
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfidenceMatrixError::InvalidValue { row, col, value });
                }
            }
        }
        Ok(Self {
            pae,
            token_chain_ids,
        })
    }

    /// Builds a matrix from row-major nested vectors, as found in JSON documents.
    pub fn from_rows(
        rows: &[Vec<f64>],
        token_chain_ids: Vec<String>,
    ) -> Result<Self, ConfidenceMatrixError> {
        let n = rows.len();
        if n == 0 {
            return Err(ConfidenceMatrixError::Empty);
        }
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(ConfidenceMatrixError::RaggedRow {
                row,
                expected: n,
                found: values.len(),
            });
        }
        let pae = DMatrix::from_fn(n, n, |i, j| rows[i][j]);
        Self::new(pae, token_chain_ids)
    }

    /// Number of tokens (rows = columns).
    pub fn token_count(&self) -> usize {
        self.pae.nrows()
    }

    /// Error value at `(row, col)`, or `None` when out of bounds.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        self.pae.get((row, col)).copied()
    }

    /// Chain label of every token, in token order.
    pub fn token_chain_ids(&self) -> &[String] {
        &self.token_chain_ids
    }
}
