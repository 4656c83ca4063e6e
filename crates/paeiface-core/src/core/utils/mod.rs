//! Pure helpers shared by the models and the engine: residue-name lookups and
//! coordinate geometry.

pub mod geometry;
pub mod identifiers;
