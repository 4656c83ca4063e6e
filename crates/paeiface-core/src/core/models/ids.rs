use slotmap::new_key_type;

new_key_type! {
    /// Stable handle of an atom inside a [`StructureModel`](super::structure::StructureModel).
    pub struct AtomId;
    /// Stable handle of a residue inside a [`StructureModel`](super::structure::StructureModel).
    pub struct ResidueId;
    /// Stable handle of a chain inside a [`StructureModel`](super::structure::StructureModel).
    pub struct ChainId;
}
