use crate::core::io::catalog::InteractionRecord;
use crate::core::io::store::ResultStore;
use crate::core::io::traits::{ConfidenceFile, StructureFile};
use crate::core::models::contact::ContactSummary;
use crate::engine::config::BatchConfig;
use crate::engine::error::{EngineError, InputKind};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{InteractionState, InteractionTracker, Outcome};
use crate::workflows::extract;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// An interaction whose artifact was persisted.
#[derive(Debug, Clone)]
pub struct BatchSuccess {
    pub interaction_id: u64,
    pub artifact: PathBuf,
    pub summary: ContactSummary,
}

/// An interaction that ended in `Terminal(Failure)`, with its cause.
#[derive(Debug)]
pub struct BatchFailure {
    pub interaction_id: u64,
    pub cause: EngineError,
}

impl BatchFailure {
    pub fn is_non_applicable(&self) -> bool {
        self.cause.is_non_applicable()
    }
}

/// End-of-run accounting for a batch.
///
/// `attempted` counts interactions that were started; interactions left
/// untouched after cancellation are counted in `skipped` only.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Per-tier contact totals over all successful interactions.
    pub totals: ContactSummary,
    pub successes: Vec<BatchSuccess>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn success_rate(&self) -> f64 {
        percentage(self.succeeded, self.attempted)
    }

    pub fn failure_rate(&self) -> f64 {
        percentage(self.failed, self.attempted)
    }

    pub fn non_applicable_count(&self) -> usize {
        self.failures.iter().filter(|f| f.is_non_applicable()).count()
    }

    pub fn was_cancelled(&self) -> bool {
        self.skipped > 0
    }

    fn record(&mut self, outcome: Processed) {
        match outcome {
            Processed::Skipped => self.skipped += 1,
            Processed::Succeeded(success) => {
                self.attempted += 1;
                self.succeeded += 1;
                self.totals += success.summary;
                self.successes.push(success);
            }
            Processed::Failed(failure) => {
                self.attempted += 1;
                self.failed += 1;
                self.failures.push(failure);
            }
        }
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

enum Processed {
    Succeeded(BatchSuccess),
    Failed(BatchFailure),
    Skipped,
}

/// Processes every record independently and persists one artifact per success.
///
/// Per-interaction failures are recorded in the report and never abort the run.
/// Once `cancel` is set no further interaction is started; those already in
/// flight complete normally.
#[instrument(skip_all, name = "batch_workflow", fields(interactions = records.len()))]
pub fn run<S, C, R>(
    records: &[InteractionRecord],
    store: &R,
    config: &BatchConfig,
    cancel: &AtomicBool,
    reporter: &ProgressReporter,
) -> BatchReport
where
    S: StructureFile,
    C: ConfidenceFile,
    R: ResultStore + ?Sized,
{
    reporter.report(Progress::PhaseStart {
        name: "Extracting Contacts",
    });
    reporter.report(Progress::TaskStart {
        total_steps: records.len() as u64,
    });
    info!(
        interactions = records.len(),
        workers = ?config.workers,
        "Starting batch contact extraction."
    );

    let process = |record: &InteractionRecord| {
        if cancel.load(Ordering::Relaxed) {
            return Processed::Skipped;
        }
        let processed = process_record::<S, C, R>(record, store, config);
        reporter.report(Progress::TaskIncrement);
        processed
    };

    let outcomes = dispatch(records, config.workers, process);

    let report = outcomes
        .into_iter()
        .fold(BatchReport::default(), |mut report, outcome| {
            report.record(outcome);
            report
        });

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);
    info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed = report.failed,
        skipped = report.skipped,
        "Batch complete."
    );
    report
}

#[cfg(feature = "parallel")]
fn dispatch<F>(records: &[InteractionRecord], workers: Option<usize>, process: F) -> Vec<Processed>
where
    F: Fn(&InteractionRecord) -> Processed + Sync + Send,
{
    let collect = || records.par_iter().map(&process).collect::<Vec<_>>();
    match workers {
        Some(workers) => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(collect),
            Err(e) => {
                warn!(error = %e, "Failed to build dedicated worker pool; using the global pool.");
                collect()
            }
        },
        None => collect(),
    }
}

#[cfg(not(feature = "parallel"))]
fn dispatch<F>(records: &[InteractionRecord], _workers: Option<usize>, process: F) -> Vec<Processed>
where
    F: Fn(&InteractionRecord) -> Processed,
{
    records.iter().map(process).collect()
}

fn process_record<S, C, R>(
    record: &InteractionRecord,
    store: &R,
    config: &BatchConfig,
) -> Processed
where
    S: StructureFile,
    C: ConfidenceFile,
    R: ResultStore + ?Sized,
{
    let mut tracker = InteractionTracker::new(record.id);
    match drive::<S, C, R>(record, store, config, &mut tracker) {
        Ok(success) => {
            info!(
                interaction_id = record.id,
                contacts = success.summary.total_contacts,
                very_high = success.summary.very_high_count,
                high = success.summary.high_count,
                medium = success.summary.medium_count,
                low = success.summary.low_count,
                "Interaction processed."
            );
            Processed::Succeeded(success)
        }
        Err(cause) => {
            tracker.fail();
            if cause.is_non_applicable() {
                info!(interaction_id = record.id, reason = %cause, "Interaction skipped as non-applicable.");
            } else {
                warn!(interaction_id = record.id, error = %cause, "Interaction failed.");
            }
            Processed::Failed(BatchFailure {
                interaction_id: record.id,
                cause,
            })
        }
    }
}

fn drive<S, C, R>(
    record: &InteractionRecord,
    store: &R,
    config: &BatchConfig,
    tracker: &mut InteractionTracker,
) -> Result<BatchSuccess, EngineError>
where
    S: StructureFile,
    C: ConfidenceFile,
    R: ResultStore + ?Sized,
{
    let (structure_path, confidence_path) =
        match (&record.structure_path, &record.confidence_path) {
            (Some(structure), Some(confidence)) => (structure, confidence),
            (structure, _) => {
                tracker.advance(InteractionState::InputsMissing)?;
                let kind = if structure.is_none() {
                    InputKind::Structure
                } else {
                    InputKind::Confidences
                };
                return Err(EngineError::InputMissing { kind, path: None });
            }
        };

    tracker.advance(InteractionState::Building)?;
    let silent = ProgressReporter::new();
    let result = {
        let (model, matrix) = extract::load_inputs::<S, C>(structure_path, confidence_path)?;
        extract::run(&model, &matrix, &config.contact, &silent)?
    };
    tracker.advance(InteractionState::Analyzed)?;

    let artifact = store.persist(record.id, &result)?;
    tracker.advance(InteractionState::Persisted)?;
    tracker.advance(InteractionState::Terminal(Outcome::Success))?;

    Ok(BatchSuccess {
        interaction_id: record.id,
        artifact,
        summary: result.summary,
    })
}
