//! Sources of interaction records for batch runs.

use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One unit of batch work: an interaction identifier and the two input files
/// needed to analyse it. Either path may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRecord {
    pub id: u64,
    pub structure_path: Option<PathBuf>,
    pub confidence_path: Option<PathBuf>,
}

impl InteractionRecord {
    pub fn new(
        id: u64,
        structure_path: Option<PathBuf>,
        confidence_path: Option<PathBuf>,
    ) -> Self {
        Self {
            id,
            structure_path,
            confidence_path,
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parsing error for '{path}': {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid interaction identifier '{value}' in '{path}'")]
    InvalidId { path: String, value: String },
    #[error("Duplicate interaction identifier {id} in '{path}'")]
    DuplicateId { path: String, id: u64 },
}

/// Enumerates the interactions a batch run should process.
pub trait InteractionCatalog {
    /// Returns every record, sorted by interaction identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the catalog cannot be read. This aborts the
    /// run before any interaction is attempted.
    fn records(&self) -> Result<Vec<InteractionRecord>, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct MappingDocument {
    #[serde(default)]
    mappings: BTreeMap<String, MappingEntry>,
}

#[derive(Debug, Deserialize)]
struct MappingEntry {
    #[serde(default)]
    cif_path: Option<String>,
    #[serde(default)]
    confidences_path: Option<String>,
}

/// Catalog backed by a JSON mapping document of the form
/// `{"mappings": {"<id>": {"cif_path": ..., "confidences_path": ...}}}`.
///
/// Relative paths are resolved against the directory holding the document.
#[derive(Debug, Clone)]
pub struct MappingCatalog {
    path: PathBuf,
}

impl MappingCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InteractionCatalog for MappingCatalog {
    fn records(&self) -> Result<Vec<InteractionRecord>, CatalogError> {
        let display = self.path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(&self.path).map_err(|e| CatalogError::Io {
            path: display.clone(),
            source: e,
        })?;
        let document: MappingDocument =
            serde_json::from_str(&content).map_err(|e| CatalogError::Json {
                path: display.clone(),
                source: e,
            })?;

        let base = self.path.parent();
        let rows = document.mappings.into_iter().map(|(key, entry)| {
            (key, entry.cif_path, entry.confidences_path)
        });
        collect_records(&display, base, rows)
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    interaction_id: String,
    structure_path: Option<String>,
    confidence_path: Option<String>,
}

/// Catalog backed by a CSV file with the header
/// `interaction_id,structure_path,confidence_path`. Empty cells mean absent.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InteractionCatalog for CsvCatalog {
    fn records(&self) -> Result<Vec<InteractionRecord>, CatalogError> {
        let display = self.path.to_string_lossy().to_string();
        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| CatalogError::Csv {
            path: display.clone(),
            source: e,
        })?;

        let mut rows = Vec::new();
        for result in reader.deserialize::<CsvRow>() {
            let row = result.map_err(|e| CatalogError::Csv {
                path: display.clone(),
                source: e,
            })?;
            rows.push((row.interaction_id, row.structure_path, row.confidence_path));
        }
        collect_records(&display, self.path.parent(), rows)
    }
}

/// Picks a catalog implementation from the file extension: `.csv` files are
/// read as [`CsvCatalog`], everything else as [`MappingCatalog`].
pub fn open_catalog(path: &Path) -> Box<dyn InteractionCatalog + Send + Sync> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Box::new(CsvCatalog::new(path))
    } else {
        Box::new(MappingCatalog::new(path))
    }
}

fn collect_records(
    display: &str,
    base: Option<&Path>,
    rows: impl IntoIterator<Item = (String, Option<String>, Option<String>)>,
) -> Result<Vec<InteractionRecord>, CatalogError> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (raw_id, structure, confidence) in rows {
        let id: u64 = raw_id.trim().parse().map_err(|_| CatalogError::InvalidId {
            path: display.to_string(),
            value: raw_id.clone(),
        })?;
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                path: display.to_string(),
                id,
            });
        }
        records.push(InteractionRecord::new(
            id,
            resolve_path(base, structure),
            resolve_path(base, confidence),
        ));
    }

    records.sort_by_key(|record| record.id);
    Ok(records)
}

fn resolve_path(base: Option<&Path>, value: Option<String>) -> Option<PathBuf> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let path = PathBuf::from(trimmed);
    match base {
        Some(base) if path.is_relative() => Some(base.join(path)),
        _ => Some(path),
    }
}
