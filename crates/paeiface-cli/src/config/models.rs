use paeiface::engine::config::BatchConfig;
use std::path::PathBuf;

/// Fully resolved settings for one command invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub batch: BatchConfig,
    pub output_dir: PathBuf,
}
