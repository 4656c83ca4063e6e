//! # Core Module
//!
//! Data models, file collaborators and helpers shared by the engine and workflows.
//!
//! - **Models** ([`models`]) - structure arenas, confidence matrix, tiers and contacts
//! - **File I/O** ([`io`]) - structure and confidence readers, catalogs, result store
//! - **Utilities** ([`utils`]) - geometry and residue-code helpers

pub mod io;
pub mod models;
pub mod utils;
