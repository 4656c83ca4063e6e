use crate::core::models::confidence::ConfidenceMatrix;
use crate::core::models::structure::StructureModel;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Defines the interface for reading a predicted structure from a file format.
///
/// Implementors handle format-specific parsing; the contact engine only sees
/// the resulting [`StructureModel`].
pub trait StructureFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error> + Send + Sync + 'static;

    /// Reads a structure model from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<StructureModel, Self::Error>;

    /// Reads a structure model from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<StructureModel, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Defines the interface for loading a token-level confidence matrix.
pub trait ConfidenceFile {
    /// The error type for read operations.
    type Error: Error + From<io::Error> + Send + Sync + 'static;

    /// Reads a confidence matrix from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or I/O fails.
    fn read_from(reader: &mut impl BufRead) -> Result<ConfidenceMatrix, Self::Error>;

    /// Reads a confidence matrix from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<ConfidenceMatrix, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
