use super::tier_breakdown;
use crate::cli::BatchArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use paeiface::core::io::catalog::open_catalog;
use paeiface::core::io::confidences::Af3ConfidencesFile;
use paeiface::core::io::mmcif::MmcifFile;
use paeiface::core::io::store::JsonDirectoryStore;
use paeiface::engine::progress::ProgressReporter;
use paeiface::workflows::batch::{self, BatchReport};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub async fn run(args: BatchArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    execute(args, ui_sender, &mut std::io::stdout()).await
}

async fn execute<W: Write>(
    args: BatchArgs,
    ui_sender: mpsc::Sender<UiEvent>,
    out: &mut W,
) -> Result<()> {
    let config = build_config(&args.config, args.workers)?;

    info!("Loading interaction catalog from {:?}", &args.catalog);
    let records = open_catalog(&args.catalog).records()?;
    let store = JsonDirectoryStore::new(&config.output_dir);

    let cancel = Arc::new(AtomicBool::new(false));
    let signal_task = {
        let cancel = Arc::clone(&cancel);
        let sender = ui_sender.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; no further interactions will be started.");
                cancel.store(true, Ordering::Relaxed);
                sender
                    .send(UiEvent::Log(
                        "Cancelling: waiting for in-flight interactions...".to_string(),
                    ))
                    .await
                    .ok();
            }
        })
    };

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let report = tokio::task::block_in_place(|| {
        batch::run::<MmcifFile, Af3ConfidencesFile, _>(
            &records,
            &store,
            &config.batch,
            &cancel,
            &reporter,
        )
    });
    signal_task.abort();

    for line in render_report(&report, store.dir()) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn render_report(report: &BatchReport, output_dir: &Path) -> Vec<String> {
    let mut lines: Vec<String> = report
        .successes
        .iter()
        .map(|s| {
            format!(
                "Interaction {}: Contacts: {}",
                s.interaction_id,
                tier_breakdown(&s.summary)
            )
        })
        .collect();

    lines.push(String::new());
    lines.push("Batch summary".to_string());
    lines.push(format!(
        "  Total:     {}",
        report.attempted + report.skipped
    ));
    lines.push(format!(
        "  Succeeded: {} ({:.1}%)",
        report.succeeded,
        report.success_rate()
    ));
    lines.push(format!(
        "  Failed:    {} ({:.1}%)",
        report.failed,
        report.failure_rate()
    ));
    lines.push(format!("  Skipped:   {}", report.skipped));
    lines.push(format!("  Contacts:  {}", tier_breakdown(&report.totals)));
    lines.push(format!("  Artifacts: {}", output_dir.display()));

    if report.was_cancelled() {
        lines.push("Run was cancelled before every interaction started.".to_string());
    }

    if !report.failures.is_empty() {
        lines.push("Failed interactions:".to_string());
        for failure in &report.failures {
            let flag = if failure.is_non_applicable() {
                " [non-applicable]"
            } else {
                ""
            };
            lines.push(format!(
                "  - {}: {}{}",
                failure.interaction_id, failure.cause, flag
            ));
        }
    }
    lines
}
