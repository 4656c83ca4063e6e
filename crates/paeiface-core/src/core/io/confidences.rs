use crate::core::io::traits::ConfidenceFile;
use crate::core::models::confidence::{ConfidenceMatrix, ConfidenceMatrixError};
use serde::Deserialize;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfidencesError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed confidences document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Confidences document has no 'pae' matrix")]
    MissingPae,
    #[error("Confidences document has no 'token_chain_ids' vector")]
    MissingChainIds,
    #[error("Invalid error matrix: {0}")]
    Matrix(#[from] ConfidenceMatrixError),
}

/// The subset of an AlphaFold3 `*_confidences.json` document the engine reads.
#[derive(Debug, Deserialize)]
struct ConfidencesDocument {
    #[serde(default)]
    pae: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    token_chain_ids: Option<Vec<String>>,
}

/// Loader for AlphaFold3 full-confidence JSON documents.
pub struct Af3ConfidencesFile;

impl ConfidenceFile for Af3ConfidencesFile {
    type Error = ConfidencesError;

    fn read_from(reader: &mut impl BufRead) -> Result<ConfidenceMatrix, Self::Error> {
        let document: ConfidencesDocument = serde_json::from_reader(reader)?;

        let pae = document
            .pae
            .filter(|rows| !rows.is_empty())
            .ok_or(ConfidencesError::MissingPae)?;
        let labels = document
            .token_chain_ids
            .filter(|labels| !labels.is_empty())
            .ok_or(ConfidencesError::MissingChainIds)?;

        Ok(ConfidenceMatrix::from_rows(&pae, labels)?)
    }
}
