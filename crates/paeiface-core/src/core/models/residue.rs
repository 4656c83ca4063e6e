use super::ids::{AtomId, ChainId};
use crate::core::utils::identifiers::one_letter_code;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub seq_id: isize,             // Residue sequence number from source file
    pub name: String,              // Three-letter residue name (e.g., "ALA", "GLY")
    pub chain_id: ChainId,         // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>, // Atoms belonging to this residue, in file order
}

impl Residue {
    pub(crate) fn new(seq_id: isize, name: &str, chain_id: ChainId) -> Self {
        Self {
            seq_id,
            name: name.to_string(),
            chain_id,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        self.atoms.push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    /// Single-letter amino-acid code, `'X'` for anything unrecognised.
    pub fn one_letter_code(&self) -> char {
        one_letter_code(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn dummy_chain_id(n: u64) -> ChainId {
        ChainId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let chain_id = dummy_chain_id(1);
        let residue = Residue::new(10, "GLY", chain_id);
        assert_eq!(residue.seq_id, 10);
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.chain_id, chain_id);
        assert!(residue.atoms().is_empty());
    }

    #[test]
    fn add_atom_preserves_insertion_order() {
        let mut residue = Residue::new(7, "SER", dummy_chain_id(3));
        let first = dummy_atom_id(1);
        let second = dummy_atom_id(2);
        residue.add_atom(first);
        residue.add_atom(second);
        assert_eq!(residue.atoms(), &[first, second]);
    }

    #[test]
    fn one_letter_code_maps_standard_and_unknown_names() {
        assert_eq!(Residue::new(1, "TRP", dummy_chain_id(1)).one_letter_code(), 'W');
        assert_eq!(Residue::new(2, "UNK", dummy_chain_id(1)).one_letter_code(), 'X');
    }
}
