use crate::core::io::traits::{ConfidenceFile, StructureFile};
use crate::core::models::confidence::ConfidenceMatrix;
use crate::core::models::contact::ExtractionResult;
use crate::core::models::structure::StructureModel;
use crate::engine::config::ContactConfig;
use crate::engine::context::{AnalysisContext, ProvidesResidueGeometry};
use crate::engine::error::{EngineError, InputKind};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use std::path::Path;
use tracing::{info, instrument};

/// Runs the chain boundary resolver, contact analyzer and summary aggregator
/// over one already-loaded interaction.
#[instrument(skip_all, name = "extraction_workflow")]
pub fn run<G: ProvidesResidueGeometry>(
    geometry: &G,
    matrix: &ConfidenceMatrix,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<ExtractionResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Resolving Chains",
    });
    let ranges = tasks::chain_boundaries::run(geometry, matrix)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Analyzing Contacts",
    });
    let context = AnalysisContext::new(geometry, matrix, config, reporter);
    let contacts = tasks::contact_analysis::run(&context, &ranges)?;
    reporter.report(Progress::PhaseFinish);

    let summary = tasks::summary::run(&contacts);
    info!(
        total = summary.total_contacts,
        very_high = summary.very_high_count,
        high = summary.high_count,
        medium = summary.medium_count,
        low = summary.low_count,
        "Extraction complete."
    );

    Ok(ExtractionResult {
        chains: ranges.chain_ids(),
        chain_lengths: ranges.chain_lengths(),
        contacts,
        summary,
    })
}

/// Reads the structure and confidence files of one interaction.
///
/// Paths that do not exist are reported as missing inputs; files that exist
/// but cannot be read are parse or load failures.
pub fn load_inputs<S: StructureFile, C: ConfidenceFile>(
    structure_path: &Path,
    confidence_path: &Path,
) -> Result<(StructureModel, ConfidenceMatrix), EngineError> {
    ensure_present(structure_path, InputKind::Structure)?;
    ensure_present(confidence_path, InputKind::Confidences)?;

    let model = S::read_from_path(structure_path).map_err(|e| EngineError::StructureParse {
        path: structure_path.to_path_buf(),
        source: Box::new(e),
    })?;
    let matrix = C::read_from_path(confidence_path).map_err(|e| EngineError::MatrixLoad {
        path: confidence_path.to_path_buf(),
        source: Box::new(e),
    })?;
    Ok((model, matrix))
}

/// Loads both inputs from disk and extracts the contacts of one interaction.
pub fn run_from_files<S: StructureFile, C: ConfidenceFile>(
    structure_path: &Path,
    confidence_path: &Path,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<ExtractionResult, EngineError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading Inputs",
    });
    let (model, matrix) = load_inputs::<S, C>(structure_path, confidence_path)?;
    reporter.report(Progress::PhaseFinish);
    run(&model, &matrix, config, reporter)
}

fn ensure_present(path: &Path, kind: InputKind) -> Result<(), EngineError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EngineError::InputMissing {
            kind,
            path: Some(path.to_path_buf()),
        })
    }
}
