use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileThresholds};
use super::models::AppConfig;
use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use paeiface::core::models::tier::ConfidenceTier;
use paeiface::engine::config::{BatchConfigBuilder, ContactConfigBuilder};
use tracing::debug;

/// Resolves the effective configuration for a command.
///
/// `workers` is the command's dedicated flag, if any; it wins over the file.
pub fn build_config(args: &ConfigArgs, workers: Option<usize>) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let file_config = apply_set_values(file_config, &args.set_values)?;

    let contacts_file = file_config.contacts.unwrap_or_default();
    let thresholds = contacts_file.thresholds.unwrap_or_default();
    let batch_file = file_config.batch.unwrap_or_default();

    let spatial_cutoff = args
        .spatial_cutoff
        .or(contacts_file.spatial_cutoff)
        .unwrap_or(defaults.spatial_cutoff);

    let contact = defaults
        .tier_ceilings
        .iter()
        .fold(
            ContactConfigBuilder::new().spatial_cutoff(spatial_cutoff),
            |builder, &(tier, default)| {
                let ceiling = threshold_for(&thresholds, tier).unwrap_or(default);
                builder.tier_ceiling(tier, ceiling)
            },
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let mut batch_builder = BatchConfigBuilder::new().contact(contact);
    if let Some(workers) = workers.or(batch_file.workers) {
        batch_builder = batch_builder.workers(workers);
    }
    let batch = batch_builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let output_dir = args
        .output
        .clone()
        .or(batch_file.output_dir)
        .unwrap_or(defaults.output_dir);

    debug!(?batch, ?output_dir, "Resolved configuration.");
    Ok(AppConfig { batch, output_dir })
}

fn threshold_for(thresholds: &FileThresholds, tier: ConfidenceTier) -> Option<f64> {
    match tier {
        ConfidenceTier::VeryHigh => thresholds.very_high,
        ConfidenceTier::High => thresholds.high,
        ConfidenceTier::Medium => thresholds.medium,
        ConfidenceTier::Low => thresholds.low,
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let float = || {
            parser::parse_value::<f64>(key, value, "float")
                .map_err(|e| CliError::Config(e.to_string()))
        };

        match key {
            "contacts.spatial-cutoff" => {
                config
                    .contacts
                    .get_or_insert_with(Default::default)
                    .spatial_cutoff = Some(float()?);
            }
            "contacts.thresholds.very-high"
            | "contacts.thresholds.high"
            | "contacts.thresholds.medium"
            | "contacts.thresholds.low" => {
                let thresholds = config
                    .contacts
                    .get_or_insert_with(Default::default)
                    .thresholds
                    .get_or_insert_with(Default::default);
                let slot = match key {
                    "contacts.thresholds.very-high" => &mut thresholds.very_high,
                    "contacts.thresholds.high" => &mut thresholds.high,
                    "contacts.thresholds.medium" => &mut thresholds.medium,
                    _ => &mut thresholds.low,
                };
                *slot = Some(float()?);
            }
            "batch.workers" => {
                config.batch.get_or_insert_with(Default::default).workers = Some(
                    parser::parse_value(key, value, "integer")
                        .map_err(|e| CliError::Config(e.to_string()))?,
                );
            }
            "batch.output-dir" => {
                config.batch.get_or_insert_with(Default::default).output_dir =
                    Some(value.into());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::DEFAULT_OUTPUT_DIR;
    use paeiface::engine::config::{ContactConfig, DEFAULT_SPATIAL_CUTOFF};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
        let path = dir.join("paeiface.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn no_file_and_no_overrides_yields_defaults() {
        let config = build_config(&ConfigArgs::default(), None).unwrap();
        assert_eq!(config.batch.contact, ContactConfig::default());
        assert_eq!(config.batch.workers, None);
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[contacts]\nspatial-cutoff = 4.0\n[contacts.thresholds]\nlow = 10.0\n[batch]\nworkers = 2\noutput-dir = \"web/data\"\n",
        );
        let args = ConfigArgs {
            config: Some(path),
            ..Default::default()
        };

        let config = build_config(&args, None).unwrap();
        let contact = &config.batch.contact;
        assert_eq!(contact.spatial_cutoff(), 4.0);
        assert_eq!(contact.ceiling_for(ConfidenceTier::Low), Some(10.0));
        assert_eq!(contact.ceiling_for(ConfidenceTier::High), Some(5.0));
        assert_eq!(config.batch.workers, Some(2));
        assert_eq!(config.output_dir, PathBuf::from("web/data"));
    }

    #[test]
    fn set_values_override_file_and_flags_override_both() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[contacts]\nspatial-cutoff = 4.0\n[batch]\nworkers = 2\n");
        let args = ConfigArgs {
            config: Some(path),
            spatial_cutoff: Some(6.0),
            output: Some(PathBuf::from("cli/out")),
            set_values: vec![
                "contacts.spatial-cutoff=4.5".to_string(),
                "contacts.thresholds.medium=9.0".to_string(),
                "batch.workers=5".to_string(),
                "batch.output-dir=set/out".to_string(),
            ],
        };

        let config = build_config(&args, Some(7)).unwrap();
        assert_eq!(config.batch.contact.spatial_cutoff(), 6.0);
        assert_eq!(
            config.batch.contact.ceiling_for(ConfidenceTier::Medium),
            Some(9.0)
        );
        assert_eq!(config.batch.workers, Some(7));
        assert_eq!(config.output_dir, PathBuf::from("cli/out"));
    }

    #[test]
    fn set_values_apply_without_a_file() {
        let args = ConfigArgs {
            set_values: vec!["batch.output-dir=set/out".to_string()],
            ..Default::default()
        };
        let config = build_config(&args, None).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("set/out"));
        assert_eq!(config.batch.contact.spatial_cutoff(), DEFAULT_SPATIAL_CUTOFF);
    }

    #[test]
    fn unsupported_or_malformed_set_values_are_rejected() {
        for bad in ["optimization.num-solutions=3", "contacts.spatial-cutoff", "batch.workers=many"] {
            let args = ConfigArgs {
                set_values: vec![bad.to_string()],
                ..Default::default()
            };
            assert!(
                matches!(build_config(&args, None), Err(CliError::Config(_))),
                "expected rejection of {bad}"
            );
        }
    }

    #[test]
    fn inconsistent_thresholds_are_rejected() {
        let args = ConfigArgs {
            set_values: vec!["contacts.thresholds.high=2.0".to_string()],
            ..Default::default()
        };
        assert!(matches!(build_config(&args, None), Err(CliError::Config(_))));
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(
            build_config(&ConfigArgs::default(), Some(0)),
            Err(CliError::Config(_))
        ));
    }
}
