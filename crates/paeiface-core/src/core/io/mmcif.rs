use super::traits::StructureFile;
use crate::core::models::builder::StructureModelBuilder;
use crate::core::models::structure::{ModelError, StructureModel};
use nalgebra::Point3;
use pdbtbx::{Format, PDBError, ReadOptions, Residue, StrictnessLevel};
use std::io::{self, BufRead, BufReader, Read};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MmcifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse mmCIF: {}", describe_errors(.0))]
    Read(Vec<PDBError>),
    #[error("No polymer ATOM records found in the first model")]
    NoAtoms,
    #[error("Structure assembly error: {0}")]
    Model(#[from] ModelError),
}

fn describe_errors(errors: &[PDBError]) -> String {
    match errors {
        [] => "unknown error".to_string(),
        [only] => only.short_description().to_string(),
        [first, rest @ ..] => format!(
            "{} (and {} more)",
            first.short_description(),
            rest.len()
        ),
    }
}

/// PDBx/mmCIF reader for predicted structures.
///
/// Only the first model is used. Within it, HETATM records are dropped and
/// each residue keeps atoms without an alternate location plus those of its
/// first alternate location.
pub struct MmcifFile;

impl StructureFile for MmcifFile {
    type Error = MmcifError;

    fn read_from(reader: &mut impl BufRead) -> Result<StructureModel, Self::Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let (pdb, warnings) = ReadOptions::default()
            .set_format(Format::Mmcif)
            .set_level(StrictnessLevel::Medium)
            .read_raw(BufReader::new(text.as_bytes()))
            .map_err(MmcifError::Read)?;
        for warning in &warnings {
            debug!(warning = warning.short_description(), "mmCIF reader warning.");
        }

        let model = pdb.models().next().ok_or(MmcifError::NoAtoms)?;
        let mut builder = StructureModelBuilder::new();
        let mut atoms_added = 0;

        for chain in model.chains() {
            let mut chain_started = false;
            for residue in chain.residues() {
                let atoms = polymer_atoms(residue);
                if atoms.is_empty() {
                    continue;
                }
                if !chain_started {
                    builder.start_chain(chain.id());
                    chain_started = true;
                }
                builder.start_residue(residue.serial_number(), residue.name().unwrap_or("UNK"))?;
                for atom in atoms {
                    let (x, y, z) = atom.pos();
                    let element = atom.element().map_or("", |e| e.symbol());
                    builder.add_atom(atom.name(), element, Point3::new(x, y, z))?;
                    atoms_added += 1;
                }
            }
        }

        if atoms_added == 0 {
            return Err(MmcifError::NoAtoms);
        }
        debug!(atoms = atoms_added, "Finished reading mmCIF atom records.");
        Ok(builder.build()?)
    }
}

fn polymer_atoms(residue: &Residue) -> Vec<&pdbtbx::Atom> {
    let first_alt = residue
        .conformers()
        .find_map(|conformer| conformer.alternative_location());
    residue
        .conformers()
        .filter(|conformer| {
            let alt = conformer.alternative_location();
            alt.is_none() || alt == first_alt
        })
        .flat_map(|conformer| conformer.atoms())
        .filter(|atom| !atom.hetero())
        .collect()
}
