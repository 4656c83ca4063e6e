//! Layered configuration: built-in defaults, a TOML file, `--set` overrides and
//! dedicated command-line flags, in increasing order of precedence.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
pub use models::AppConfig;
