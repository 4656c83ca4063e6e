//! # paeiface
//!
//! Extraction and classification of interface contacts from predicted
//! multi-chain protein structures and their predicted aligned error matrices.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`StructureModel`,
//!   `ConfidenceMatrix`, `Contact`), file collaborators (mmCIF reader, AlphaFold3
//!   confidences loader, interaction catalogs, JSON result store) and geometry helpers.
//!
//! - **[`engine`]: The Logic Core.** Validated configuration, the error taxonomy,
//!   progress reporting and the per-interaction tasks: chain boundary resolution,
//!   contact analysis and summary aggregation.
//!
//! - **[`workflows`]: The Public API.** Single-interaction extraction and the batch
//!   orchestrator that drives many interactions on a worker pool while recording
//!   every failure without aborting the run.

pub mod core;
pub mod engine;
pub mod workflows;
