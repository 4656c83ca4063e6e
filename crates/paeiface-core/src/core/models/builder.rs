use super::atom::Atom;
use super::ids::{ChainId, ResidueId};
use super::structure::{ModelError, StructureModel};
use nalgebra::Point3;

/// Incrementally assembles a [`StructureModel`] from a stream of atom records.
///
/// Readers call [`start_chain`](Self::start_chain) and
/// [`start_residue`](Self::start_residue) whenever the chain or residue changes,
/// then [`add_atom`](Self::add_atom) for each coordinate record.
pub struct StructureModelBuilder {
    model: StructureModel,

    // --- Builder-specific cursor state ---
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
}

impl Default for StructureModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureModelBuilder {
    pub fn new() -> Self {
        Self {
            model: StructureModel::new(),
            current_chain: None,
            current_residue: None,
        }
    }

    pub fn start_chain(&mut self, id: &str) -> &mut Self {
        self.current_chain = Some(self.model.add_chain(id));
        self.current_residue = None;
        self
    }

    pub fn start_residue(&mut self, seq_id: isize, name: &str) -> Result<&mut Self, ModelError> {
        let chain_id = self.current_chain.ok_or(ModelError::NoCurrentChain)?;
        self.current_residue = Some(self.model.add_residue(chain_id, seq_id, name)?);
        Ok(self)
    }

    pub fn add_atom(
        &mut self,
        name: &str,
        element: &str,
        position: Point3<f64>,
    ) -> Result<&mut Self, ModelError> {
        let residue_id = self.current_residue.ok_or(ModelError::NoCurrentResidue)?;
        let atom = Atom::new(name, residue_id, position).with_element(element);
        self.model.add_atom(residue_id, atom)?;
        Ok(self)
    }

    /// Finishes construction, verifying that no residue was left without atoms.
    pub fn build(self) -> Result<StructureModel, ModelError> {
        self.model.validate()?;
        Ok(self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assembles_chains_residues_and_atoms() {
        let mut builder = StructureModelBuilder::new();
        builder.start_chain("A");
        builder.start_residue(1, "ALA").unwrap();
        builder.add_atom("N", "N", Point3::new(0.0, 0.0, 0.0)).unwrap();
        builder.add_atom("CA", "C", Point3::new(1.5, 0.0, 0.0)).unwrap();
        builder.start_chain("B");
        builder.start_residue(1, "GLY").unwrap();
        builder.add_atom("CA", "C", Point3::new(5.0, 0.0, 0.0)).unwrap();

        let model = builder.build().unwrap();
        assert_eq!(model.chain_count(), 2);
        assert_eq!(model.residue_count(), 2);
        assert_eq!(model.atom_count(), 3);
        assert_eq!(model.residue_at("A", 1).unwrap().atoms().len(), 2);
    }

    #[test]
    fn start_residue_without_chain_fails() {
        let mut builder = StructureModelBuilder::new();
        assert_eq!(
            builder.start_residue(1, "ALA").err(),
            Some(ModelError::NoCurrentChain)
        );
    }

    #[test]
    fn add_atom_without_residue_fails() {
        let mut builder = StructureModelBuilder::new();
        builder.start_chain("A");
        assert_eq!(
            builder.add_atom("CA", "C", Point3::origin()).err(),
            Some(ModelError::NoCurrentResidue)
        );
    }

    #[test]
    fn build_rejects_empty_residue() {
        let mut builder = StructureModelBuilder::new();
        builder.start_chain("A");
        builder.start_residue(3, "SER").unwrap();
        assert!(matches!(
            builder.build(),
            Err(ModelError::EmptyResidue { seq_id: 3, .. })
        ));
    }

    #[test]
    fn returning_to_a_chain_appends_residues() {
        let mut builder = StructureModelBuilder::new();
        builder.start_chain("A");
        builder.start_residue(1, "ALA").unwrap();
        builder.add_atom("CA", "C", Point3::origin()).unwrap();
        builder.start_chain("B");
        builder.start_residue(1, "GLY").unwrap();
        builder.add_atom("CA", "C", Point3::origin()).unwrap();
        builder.start_chain("A");
        builder.start_residue(2, "LYS").unwrap();
        builder.add_atom("CA", "C", Point3::origin()).unwrap();

        let model = builder.build().unwrap();
        assert_eq!(model.chain_count(), 2);
        assert_eq!(model.residue_at("A", 2).unwrap().name, "LYS");
    }
}
