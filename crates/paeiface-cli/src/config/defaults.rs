use paeiface::engine::config::{DEFAULT_SPATIAL_CUTOFF, DEFAULT_TIER_CEILINGS};
use paeiface::core::models::tier::ConfidenceTier;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "public/contacts_data";

pub struct DefaultsConfig {
    pub spatial_cutoff: f64,
    pub tier_ceilings: [(ConfidenceTier, f64); 4],
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            spatial_cutoff: DEFAULT_SPATIAL_CUTOFF,
            tier_ceilings: DEFAULT_TIER_CEILINGS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
