//! # Workflows Module
//!
//! Public entry points of the library.
//!
//! - **Extraction** ([`extract`]) - resolve chains, analyze contacts and summarize
//!   one interaction, either from loaded models or straight from files.
//! - **Batch** ([`batch`]) - drive extraction over a catalog of interactions on a
//!   bounded worker pool, persisting one artifact per success and recording every
//!   failure with its cause.

pub mod batch;
pub mod extract;
