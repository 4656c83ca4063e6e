use super::tier_breakdown;
use crate::cli::ExtractArgs;
use crate::config::build_config;
use crate::error::Result;
use crate::ui::{CliProgressHandler, UiEvent};
use paeiface::core::io::confidences::Af3ConfidencesFile;
use paeiface::core::io::mmcif::MmcifFile;
use paeiface::core::io::store::{JsonDirectoryStore, ResultStore};
use paeiface::engine::error::EngineError;
use paeiface::engine::progress::ProgressReporter;
use paeiface::workflows;
use std::io::Write;
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(args: ExtractArgs, ui_sender: mpsc::Sender<UiEvent>) -> Result<()> {
    execute(args, ui_sender, &mut std::io::stdout()).await
}

async fn execute<W: Write>(
    args: ExtractArgs,
    ui_sender: mpsc::Sender<UiEvent>,
    out: &mut W,
) -> Result<()> {
    let config = build_config(&args.config, None)?;
    let store = JsonDirectoryStore::new(&config.output_dir);

    let progress_handler = CliProgressHandler::new(ui_sender);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!(
        interaction_id = args.interaction_id,
        structure = ?args.structure,
        confidences = ?args.confidences,
        "Extracting contacts for a single interaction."
    );

    let (path, summary) = tokio::task::block_in_place(|| -> Result<_> {
        let result = workflows::extract::run_from_files::<MmcifFile, Af3ConfidencesFile>(
            &args.structure,
            &args.confidences,
            &config.batch.contact,
            &reporter,
        )?;
        let path = store
            .persist(args.interaction_id, &result)
            .map_err(EngineError::from)?;
        Ok((path, result.summary))
    })?;

    writeln!(
        out,
        "Interaction {}: Contacts: {}",
        args.interaction_id,
        tier_breakdown(&summary)
    )?;
    writeln!(out, "Artifact written to {}", path.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConfigArgs;
    use crate::commands::fixtures::write_interaction;
    use crate::error::CliError;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn args(dir: &Path, structure: PathBuf, confidences: PathBuf) -> ExtractArgs {
        ExtractArgs {
            structure,
            confidences,
            interaction_id: 42,
            config: ConfigArgs {
                output: Some(dir.join("out")),
                ..Default::default()
            },
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn extract_persists_artifact_and_reports_summary() {
        let dir = tempdir().unwrap();
        let (structure, confidences) = write_interaction(dir.path(), "pair");
        let (sender, _receiver) = mpsc::channel(64);
        let mut stdout = Vec::new();

        execute(args(dir.path(), structure, confidences), sender, &mut stdout)
            .await
            .unwrap();

        let artifact = dir.path().join("out").join("42.json");
        let text = std::fs::read_to_string(&artifact).unwrap();
        assert!(text.contains("\"interaction_id\": 42"));

        let printed = String::from_utf8(stdout).unwrap();
        let mut lines = printed.lines();
        assert_eq!(
            lines.next(),
            Some("Interaction 42: Contacts: 1 (VH:1, H:0, M:0, L:0)")
        );
        assert!(lines.next().unwrap().starts_with("Artifact written to "));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn extract_fails_for_missing_confidences() {
        let dir = tempdir().unwrap();
        let (structure, _) = write_interaction(dir.path(), "pair");
        let (sender, _receiver) = mpsc::channel(64);

        let mut stdout = Vec::new();

        let result = execute(
            args(dir.path(), structure, dir.path().join("absent.json")),
            sender,
            &mut stdout,
        )
        .await;

        assert!(matches!(
            result,
            Err(CliError::Engine(EngineError::InputMissing { .. }))
        ));
        assert!(!dir.path().join("out").join("42.json").exists());
        assert!(stdout.is_empty());
    }
}
