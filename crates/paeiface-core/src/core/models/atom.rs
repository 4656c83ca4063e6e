use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents a single atom of a predicted structure.
///
/// Only the data needed for interface geometry is kept: the atom name, its
/// element symbol, the owning residue and the Cartesian position in Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "NZ", "OG1").
    pub name: String,
    /// The element symbol as written in the source file (e.g., "C", "N").
    pub element: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` with an empty element symbol.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element: String::new(),
            residue_id,
            position,
        }
    }

    /// Sets the element symbol, returning the updated atom.
    pub fn with_element(mut self, element: &str) -> Self {
        self.element = element.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert!(atom.element.is_empty());
    }

    #[test]
    fn with_element_sets_symbol() {
        let atom = Atom::new("NZ", ResidueId::default(), Point3::origin()).with_element("N");
        assert_eq!(atom.element, "N");
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("N", ResidueId::default(), Point3::new(0.0, 0.0, 0.0)).with_element("N");
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
