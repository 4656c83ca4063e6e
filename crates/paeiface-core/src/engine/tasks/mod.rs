//! Computational steps applied to one interaction.
//!
//! The chain boundary resolver aligns the structure with the confidence matrix,
//! the contact analyzer evaluates every cross-chain residue pair, and the
//! summary aggregator tallies the accepted contacts per tier.

pub mod chain_boundaries;
pub mod contact_analysis;
pub mod summary;
