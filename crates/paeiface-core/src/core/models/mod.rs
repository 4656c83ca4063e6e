//! # Core Models Module
//!
//! Data structures handed to the contact engine by the file readers.
//!
//! - [`structure`] - The predicted structure: chains own residues, residues own atoms
//! - [`builder`] - Incremental construction of a structure from atom records
//! - [`confidence`] - The token-level predicted aligned error matrix and chain labels
//! - [`tier`] - Ordered confidence buckets
//! - [`contact`] - Validated contacts, tier summaries and per-interaction results
//! - [`ids`] - Stable handles into the structure arenas

pub mod atom;
pub mod builder;
pub mod chain;
pub mod confidence;
pub mod contact;
pub mod ids;
pub mod residue;
pub mod structure;
pub mod tier;
