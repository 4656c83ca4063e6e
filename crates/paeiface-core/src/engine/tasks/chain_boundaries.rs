use crate::core::models::confidence::ConfidenceMatrix;
use crate::engine::context::ProvidesResidueGeometry;
use crate::engine::error::{EngineError, SchemaMismatch};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Contiguous half-open token range `[start, end)` occupied by one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRange {
    pub chain_id: String,
    pub start: usize,
    pub end: usize,
}

impl ChainRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Token index of the residue at 1-based `position` within this chain.
    pub fn token_of(&self, position: usize) -> usize {
        self.start + position - 1
    }
}

/// Chain ranges in token order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRanges {
    ranges: Vec<ChainRange>,
}

impl ChainRanges {
    #[cfg(test)]
    pub(crate) fn from_ranges(ranges: Vec<ChainRange>) -> Self {
        Self { ranges }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChainRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn get(&self, chain_id: &str) -> Option<&ChainRange> {
        self.ranges.iter().find(|r| r.chain_id == chain_id)
    }

    pub fn chain_ids(&self) -> Vec<String> {
        self.ranges.iter().map(|r| r.chain_id.clone()).collect()
    }

    pub fn chain_lengths(&self) -> HashMap<String, usize> {
        self.ranges
            .iter()
            .map(|r| (r.chain_id.clone(), r.len()))
            .collect()
    }
}

/// Reconciles a structure model with its confidence matrix.
///
/// Chains are taken from the matrix labels in order of first appearance. Every
/// chain's tokens must form one contiguous run whose length equals the chain's
/// residue count in the structure.
#[instrument(skip_all, name = "chain_boundary_task")]
pub fn run<G: ProvidesResidueGeometry>(
    geometry: &G,
    matrix: &ConfidenceMatrix,
) -> Result<ChainRanges, EngineError> {
    let structure_chains = geometry.chain_lengths();
    let residues: usize = structure_chains.iter().map(|(_, len)| len).sum();
    let tokens = matrix.token_count();
    if residues != tokens {
        return Err(SchemaMismatch::ResidueCount { residues, tokens }.into());
    }

    let ranges = label_runs(matrix.token_chain_ids())?;

    let residue_counts: HashMap<&str, usize> = structure_chains
        .iter()
        .map(|(id, len)| (id.as_str(), *len))
        .collect();
    for range in &ranges {
        let residues = *residue_counts
            .get(range.chain_id.as_str())
            .ok_or_else(|| SchemaMismatch::UnknownChain {
                chain: range.chain_id.clone(),
            })?;
        if residues != range.len() {
            return Err(SchemaMismatch::ChainLength {
                chain: range.chain_id.clone(),
                residues,
                tokens: range.len(),
            }
            .into());
        }
    }

    if ranges.len() < 2 {
        return Err(EngineError::InsufficientChains {
            found: ranges.len(),
        });
    }

    debug!(chains = ranges.len(), tokens, "Resolved chain boundaries.");
    Ok(ChainRanges { ranges })
}

fn label_runs(labels: &[String]) -> Result<Vec<ChainRange>, EngineError> {
    let mut ranges: Vec<ChainRange> = Vec::new();
    for (index, label) in labels.iter().enumerate() {
        match ranges.last_mut() {
            Some(current) if current.chain_id == *label => current.end = index + 1,
            _ => {
                if ranges.iter().any(|r| r.chain_id == *label) {
                    return Err(SchemaMismatch::NonContiguousChain {
                        chain: label.clone(),
                    }
                    .into());
                }
                ranges.push(ChainRange {
                    chain_id: label.clone(),
                    start: index,
                    end: index + 1,
                });
            }
        }
    }
    Ok(ranges)
}
