use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "IFT Interactors maintainers",
    version,
    about = "paeiface - Extract and classify interface contacts from predicted multi-chain structures using their predicted aligned error.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract the interface contacts of a single interaction.
    Extract(ExtractArgs),
    /// Extract interface contacts for every interaction listed in a catalog.
    Batch(BatchArgs),
}

/// Options shared by every command that runs the contact engine.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the spatial cutoff in Angstroms.
    #[arg(long, value_name = "FLOAT")]
    pub spatial_cutoff: Option<f64>,

    /// Directory receiving one `<interaction_id>.json` artifact per interaction.
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S contacts.thresholds.low=10.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `extract` subcommand.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Path to the predicted structure in PDBx/mmCIF format (e.g., *_model.cif).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub structure: PathBuf,

    /// Path to the AlphaFold3 confidences JSON (e.g., *_confidences.json).
    #[arg(short = 'p', long, required = true, value_name = "PATH")]
    pub confidences: PathBuf,

    /// Identifier under which the artifact is stored.
    #[arg(short, long, required = true, value_name = "INT")]
    pub interaction_id: u64,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `batch` subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Interaction catalog: a mapping JSON (`{"mappings": {...}}`) or a CSV with
    /// `interaction_id,structure_path,confidence_path` columns.
    #[arg(long, required = true, value_name = "PATH")]
    pub catalog: PathBuf,

    /// Number of interactions processed concurrently.
    #[arg(short, long, value_name = "NUM")]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub config: ConfigArgs,
}
