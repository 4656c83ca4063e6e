//! Persistence of extraction results as one JSON artifact per interaction.

use crate::core::models::contact::{Contact, ContactSummary, ExtractionResult};
use crate::core::models::tier::ConfidenceTier;
use crate::core::utils::geometry::round_to;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Decimal places kept for `pae` and `distance` in artifacts.
pub const REPORTED_DECIMALS: i32 = 2;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to serialize artifact for interaction {interaction_id}: {source}")]
    Serialize {
        interaction_id: u64,
        source: serde_json::Error,
    },
    #[error("Failed to move artifact into place at '{path}': {source}")]
    Persist {
        path: String,
        source: tempfile::PersistError,
    },
}

/// A keyed sink for extraction results.
///
/// Implementations must never expose a partially written artifact.
pub trait ResultStore: Send + Sync {
    /// Stores the result under `interaction_id` and returns where it landed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the artifact cannot be serialized or written.
    fn persist(&self, interaction_id: u64, result: &ExtractionResult) -> Result<PathBuf, StoreError>;
}

/// Writes `<dir>/<interaction_id>.json` files, pretty-printed.
#[derive(Debug, Clone)]
pub struct JsonDirectoryStore {
    dir: PathBuf,
}

impl JsonDirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_path(&self, interaction_id: u64) -> PathBuf {
        self.dir.join(format!("{interaction_id}.json"))
    }
}

impl ResultStore for JsonDirectoryStore {
    fn persist(&self, interaction_id: u64, result: &ExtractionResult) -> Result<PathBuf, StoreError> {
        let io_error = |path: &Path| {
            let path = path.to_string_lossy().to_string();
            move |source| StoreError::Io { path, source }
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error(self.dir.as_path()))?;

        let artifact = Artifact::new(interaction_id, result);
        let bytes = serde_json::to_vec_pretty(&artifact).map_err(|source| StoreError::Serialize {
            interaction_id,
            source,
        })?;

        let target = self.artifact_path(interaction_id);
        let mut staging = NamedTempFile::new_in(&self.dir).map_err(io_error(self.dir.as_path()))?;
        staging.write_all(&bytes).map_err(io_error(staging.path()))?;
        staging.flush().map_err(io_error(staging.path()))?;
        staging.persist(&target).map_err(|source| StoreError::Persist {
            path: target.to_string_lossy().to_string(),
            source,
        })?;

        debug!(interaction_id, path = %target.display(), "Persisted contact artifact.");
        Ok(target)
    }
}

#[derive(Serialize)]
struct Artifact<'a> {
    interaction_id: u64,
    generated_at: String,
    data: ArtifactData<'a>,
}

#[derive(Serialize)]
struct ArtifactData<'a> {
    chains: &'a [String],
    chain_lengths: ChainLengths<'a>,
    contacts: Vec<ContactRecord<'a>>,
    summary: &'a ContactSummary,
}

#[derive(Serialize)]
struct ContactRecord<'a> {
    chain1: &'a str,
    resi1: usize,
    aa1: char,
    chain2: &'a str,
    resi2: usize,
    aa2: char,
    pae: f64,
    distance: f64,
    confidence: ConfidenceTier,
}

/// Serializes chain lengths as a JSON object whose keys follow chain order.
struct ChainLengths<'a> {
    chains: &'a [String],
    lengths: &'a HashMap<String, usize>,
}

impl Serialize for ChainLengths<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.chains.len()))?;
        for chain in self.chains {
            map.serialize_entry(chain, &self.lengths.get(chain).copied().unwrap_or(0))?;
        }
        map.end()
    }
}

impl<'a> Artifact<'a> {
    fn new(interaction_id: u64, result: &'a ExtractionResult) -> Self {
        Self {
            interaction_id,
            generated_at: chrono::Utc::now().to_rfc3339(),
            data: ArtifactData {
                chains: &result.chains,
                chain_lengths: ChainLengths {
                    chains: &result.chains,
                    lengths: &result.chain_lengths,
                },
                contacts: result.contacts.iter().map(ContactRecord::from).collect(),
                summary: &result.summary,
            },
        }
    }
}

impl<'a> From<&'a Contact> for ContactRecord<'a> {
    fn from(contact: &'a Contact) -> Self {
        Self {
            chain1: &contact.chain_a,
            resi1: contact.residue_a,
            aa1: contact.amino_acid_a,
            chain2: &contact.chain_b,
            resi2: contact.residue_b,
            aa2: contact.amino_acid_b,
            pae: round_to(contact.pae, REPORTED_DECIMALS),
            distance: round_to(contact.distance, REPORTED_DECIMALS),
            confidence: contact.tier,
        }
    }
}
