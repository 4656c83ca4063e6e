use super::ids::ResidueId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: String,                      // Chain identifier as written in the file (e.g., "A", "B")
    pub(crate) residues: Vec<ResidueId>, // Residues in file order
}

impl Chain {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Returns the residue at a 1-based position along the chain.
    pub fn residue_at(&self, position: usize) -> Option<ResidueId> {
        position
            .checked_sub(1)
            .and_then(|idx| self.residues.get(idx))
            .copied()
    }
}
