use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Chain handle does not belong to this structure")]
    UnknownChain,
    #[error("Residue handle does not belong to this structure")]
    UnknownResidue,
    #[error("Cannot start a residue before a chain has been started")]
    NoCurrentChain,
    #[error("Cannot add an atom before a residue has been started")]
    NoCurrentResidue,
    #[error("Residue {name} {seq_id} in chain '{chain}' has no atoms")]
    EmptyResidue {
        chain: String,
        seq_id: isize,
        name: String,
    },
}

/// A predicted multi-chain structure: chains own residues, residues own atoms.
///
/// All entities live in slot-map arenas owned by the model and are addressed
/// through stable IDs. Chain iteration follows insertion order, which for
/// parsed files is the order in which chains first appear.
#[derive(Debug, Clone, Default)]
pub struct StructureModel {
    atoms: SlotMap<AtomId, Atom>,
    residues: SlotMap<ResidueId, Residue>,
    chains: SlotMap<ChainId, Chain>,
    /// Chains in insertion order.
    chain_order: Vec<ChainId>,
    /// Lookup from chain identifier string to its handle.
    chain_id_map: HashMap<String, ChainId>,
}

impl StructureModel {
    /// Creates a new, empty structure model.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in insertion order.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Finds a chain handle by its identifier string.
    pub fn find_chain_by_id(&self, id: &str) -> Option<ChainId> {
        self.chain_id_map.get(id).copied()
    }

    /// Looks up a residue by chain identifier and 1-based position along that chain.
    pub fn residue_at(&self, chain_id: &str, position: usize) -> Option<&Residue> {
        let chain = self.chains.get(self.find_chain_by_id(chain_id)?)?;
        self.residues.get(chain.residue_at(position)?)
    }

    /// Collects the coordinates of all atoms of a residue.
    pub fn residue_positions(&self, residue: &Residue) -> Vec<Point3<f64>> {
        residue
            .atoms()
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| atom.position))
            .collect()
    }

    /// Number of chains in the model.
    pub fn chain_count(&self) -> usize {
        self.chain_order.len()
    }

    /// Total number of atom-bearing residues across all chains.
    pub fn residue_count(&self) -> usize {
        self.residues
            .values()
            .filter(|residue| !residue.atoms.is_empty())
            .count()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Adds a new chain, or returns the existing handle if the identifier is known.
    pub fn add_chain(&mut self, id: &str) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_order.push(chain_id);
        self.chain_id_map.insert(id.to_string(), chain_id);
        chain_id
    }

    /// Appends a residue to the end of a chain.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        seq_id: isize,
        name: &str,
    ) -> Result<ResidueId, ModelError> {
        if !self.chains.contains_key(chain_id) {
            return Err(ModelError::UnknownChain);
        }
        let residue_id = self.residues.insert(Residue::new(seq_id, name, chain_id));
        self.chains[chain_id].residues.push(residue_id);
        Ok(residue_id)
    }

    /// Adds an atom to a residue. The atom's `residue_id` is overwritten to match.
    pub fn add_atom(&mut self, residue_id: ResidueId, mut atom: Atom) -> Result<AtomId, ModelError> {
        if !self.residues.contains_key(residue_id) {
            return Err(ModelError::UnknownResidue);
        }
        atom.residue_id = residue_id;
        let atom_id = self.atoms.insert(atom);
        self.residues[residue_id].add_atom(atom_id);
        Ok(atom_id)
    }

    /// Verifies that every residue owns at least one atom.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (_, chain) in self.chains_iter() {
            for &residue_id in chain.residues() {
                let residue = self.residues.get(residue_id).ok_or(ModelError::UnknownResidue)?;
                if residue.atoms.is_empty() {
                    return Err(ModelError::EmptyResidue {
                        chain: chain.id.clone(),
                        seq_id: residue.seq_id,
                        name: residue.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
