use super::config::ContactConfig;
use super::progress::ProgressReporter;
use crate::core::models::confidence::ConfidenceMatrix;
use crate::core::models::structure::StructureModel;
use crate::core::utils::geometry::min_pairwise_distance;

/// Residue-level geometry queries needed by the chain boundary resolver and
/// the contact analyzer.
///
/// Residues are addressed by chain identifier and 1-based position along the chain.
pub trait ProvidesResidueGeometry: Sync {
    /// Chain identifiers with their atom-bearing residue counts, in chain order.
    fn chain_lengths(&self) -> Vec<(String, usize)>;

    /// Minimum atom-to-atom distance between two residues, or `None` if either
    /// residue does not exist.
    fn min_residue_distance(
        &self,
        chain_a: &str,
        residue_a: usize,
        chain_b: &str,
        residue_b: usize,
    ) -> Option<f64>;

    /// Single-letter amino-acid code of a residue.
    fn amino_acid(&self, chain: &str, residue: usize) -> Option<char>;
}

impl ProvidesResidueGeometry for StructureModel {
    fn chain_lengths(&self) -> Vec<(String, usize)> {
        self.chains_iter()
            .map(|(_, chain)| {
                let atom_bearing = chain
                    .residues()
                    .iter()
                    .filter(|&&id| self.residue(id).is_some_and(|r| !r.atoms().is_empty()))
                    .count();
                (chain.id.clone(), atom_bearing)
            })
            .collect()
    }

    fn min_residue_distance(
        &self,
        chain_a: &str,
        residue_a: usize,
        chain_b: &str,
        residue_b: usize,
    ) -> Option<f64> {
        let first = self.residue_positions(self.residue_at(chain_a, residue_a)?);
        let second = self.residue_positions(self.residue_at(chain_b, residue_b)?);
        min_pairwise_distance(&first, &second)
    }

    fn amino_acid(&self, chain: &str, residue: usize) -> Option<char> {
        self.residue_at(chain, residue).map(|r| r.one_letter_code())
    }
}

/// Read-only inputs shared by the tasks of one interaction.
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a, G>
where
    G: ProvidesResidueGeometry,
{
    pub geometry: &'a G,
    pub matrix: &'a ConfidenceMatrix,
    pub config: &'a ContactConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a, G> AnalysisContext<'a, G>
where
    G: ProvidesResidueGeometry,
{
    pub fn new(
        geometry: &'a G,
        matrix: &'a ConfidenceMatrix,
        config: &'a ContactConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            geometry,
            matrix,
            config,
            reporter,
        }
    }
}
