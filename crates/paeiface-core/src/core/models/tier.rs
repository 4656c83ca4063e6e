use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Confidence bucket assigned to a token pair from its predicted aligned error.
///
/// Variants are declared from tightest to loosest, so the derived ordering
/// places `VeryHigh` first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    VeryHigh,
    High,
    Medium,
    Low,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid confidence tier: '{0}'")]
pub struct ParseTierError(pub String);

impl ConfidenceTier {
    /// Every tier, tightest first.
    pub const ALL: [ConfidenceTier; 4] = [
        ConfidenceTier::VeryHigh,
        ConfidenceTier::High,
        ConfidenceTier::Medium,
        ConfidenceTier::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::VeryHigh => "very_high",
            ConfidenceTier::High => "high",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfidenceTier {
    type Err = ParseTierError;

    /// Accepts the snake_case names used in output artifacts as well as
    /// the kebab-case spelling used in configuration files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "very_high" => Ok(ConfidenceTier::VeryHigh),
            "high" => Ok(ConfidenceTier::High),
            "medium" => Ok(ConfidenceTier::Medium),
            "low" => Ok(ConfidenceTier::Low),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}
