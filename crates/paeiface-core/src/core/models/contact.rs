use super::tier::ConfidenceTier;
use serde::Serialize;
use std::collections::HashMap;

/// A validated cross-chain residue contact.
///
/// Residues are referenced by chain identifier and 1-based position, by value,
/// so a contact never borrows from the structure it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub chain_a: String,
    pub residue_a: usize,
    pub amino_acid_a: char,
    pub chain_b: String,
    pub residue_b: usize,
    pub amino_acid_b: char,
    /// Predicted aligned error for the token pair, unrounded.
    pub pae: f64,
    /// Minimum atom-atom distance between the residues in Angstroms, unrounded.
    pub distance: f64,
    pub tier: ConfidenceTier,
}

/// Per-tier contact tallies for one interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactSummary {
    pub total_contacts: usize,
    pub very_high_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
}

impl ContactSummary {
    pub fn count_for(&self, tier: ConfidenceTier) -> usize {
        match tier {
            ConfidenceTier::VeryHigh => self.very_high_count,
            ConfidenceTier::High => self.high_count,
            ConfidenceTier::Medium => self.medium_count,
            ConfidenceTier::Low => self.low_count,
        }
    }

    pub(crate) fn record(&mut self, tier: ConfidenceTier) {
        let slot = match tier {
            ConfidenceTier::VeryHigh => &mut self.very_high_count,
            ConfidenceTier::High => &mut self.high_count,
            ConfidenceTier::Medium => &mut self.medium_count,
            ConfidenceTier::Low => &mut self.low_count,
        };
        *slot += 1;
        self.total_contacts += 1;
    }
}

impl std::ops::AddAssign for ContactSummary {
    fn add_assign(&mut self, rhs: Self) {
        self.total_contacts += rhs.total_contacts;
        self.very_high_count += rhs.very_high_count;
        self.high_count += rhs.high_count;
        self.medium_count += rhs.medium_count;
        self.low_count += rhs.low_count;
    }
}

/// The complete, immutable outcome of analysing one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    /// Chain identifiers in token order.
    pub chains: Vec<String>,
    /// Residue (token) count per chain.
    pub chain_lengths: HashMap<String, usize>,
    pub contacts: Vec<Contact>,
    pub summary: ContactSummary,
}
