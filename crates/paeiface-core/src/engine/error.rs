use thiserror::Error;

use super::config::ConfigError;
use super::state::InteractionState;
use crate::core::io::store::StoreError;
use std::path::PathBuf;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which of the two per-interaction inputs is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Structure,
    Confidences,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Structure => f.write_str("structure file"),
            InputKind::Confidences => f.write_str("confidences file"),
        }
    }
}

/// Ways in which a structure model and its confidence matrix can disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaMismatch {
    #[error("structure has {residues} residues but the matrix has {tokens} tokens")]
    ResidueCount { residues: usize, tokens: usize },
    #[error("tokens of chain '{chain}' are not contiguous")]
    NonContiguousChain { chain: String },
    #[error("chain '{chain}' is labelled in the matrix but absent from the structure")]
    UnknownChain { chain: String },
    #[error("chain '{chain}' has {residues} residues but {tokens} tokens")]
    ChainLength {
        chain: String,
        residues: usize,
        tokens: usize,
    },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Missing {kind}{}", describe_path(.path.as_deref()))]
    InputMissing {
        kind: InputKind,
        path: Option<PathBuf>,
    },

    #[error("Failed to parse structure '{path}': {source}")]
    StructureParse { path: PathBuf, source: BoxedSource },

    #[error("Failed to load confidence matrix '{path}': {source}")]
    MatrixLoad { path: PathBuf, source: BoxedSource },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(#[from] SchemaMismatch),

    #[error("Only {found} chain(s) present; at least two are required for interface contacts")]
    InsufficientChains { found: usize },

    #[error("Range [{start}, {end}) of chain '{chain}' exceeds the {tokens}-token matrix")]
    IndexOutOfRange {
        chain: String,
        start: usize,
        end: usize,
        tokens: usize,
    },

    #[error("Failed to persist result: {0}")]
    Persist(#[from] StoreError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid interaction state transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: InteractionState,
        to: InteractionState,
    },
}

fn describe_path(path: Option<&std::path::Path>) -> String {
    path.map(|p| format!(" at '{}'", p.display()))
        .unwrap_or_else(|| " reference".to_string())
}

impl EngineError {
    /// Whether the failure marks an interaction the engine does not apply to,
    /// rather than a data or I/O problem.
    pub fn is_non_applicable(&self) -> bool {
        matches!(self, EngineError::InsufficientChains { .. })
    }

    /// Short stable label for grouping failures in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InputMissing { .. } => "input_missing",
            EngineError::StructureParse { .. } => "structure_parse",
            EngineError::MatrixLoad { .. } => "matrix_load",
            EngineError::SchemaMismatch(_) => "schema_mismatch",
            EngineError::InsufficientChains { .. } => "insufficient_chains",
            EngineError::IndexOutOfRange { .. } => "index_out_of_range",
            EngineError::Persist(_) => "persist",
            EngineError::Config(_) => "config",
            EngineError::InvalidTransition { .. } => "internal",
        }
    }
}
