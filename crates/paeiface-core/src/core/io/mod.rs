//! Provides the file collaborators around the contact engine.
//!
//! Readers turn structure and confidence files into in-memory models through the
//! [`traits::StructureFile`] and [`traits::ConfidenceFile`] capability traits, the
//! catalog enumerates the interactions of a batch, and the store persists one
//! JSON artifact per analysed interaction.

pub mod catalog;
pub mod confidences;
pub mod mmcif;
pub mod store;
pub mod traits;
