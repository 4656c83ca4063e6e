use crate::core::models::tier::ConfidenceTier;
use thiserror::Error;

/// Maximum minimum-atom distance, in Angstroms, for a residue pair to count as a contact.
pub const DEFAULT_SPATIAL_CUTOFF: f64 = 5.0;

/// Exclusive upper bounds on the predicted aligned error for each tier, tightest first.
pub const DEFAULT_TIER_CEILINGS: [(ConfidenceTier, f64); 4] = [
    (ConfidenceTier::VeryHigh, 3.0),
    (ConfidenceTier::High, 5.0),
    (ConfidenceTier::Medium, 8.0),
    (ConfidenceTier::Low, 12.0),
];

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Spatial cutoff must be a positive finite distance, got {0}")]
    InvalidCutoff(f64),
    #[error("Ceiling for tier '{tier}' must be a positive finite value, got {value}")]
    InvalidCeiling { tier: ConfidenceTier, value: f64 },
    #[error("Expected {expected} tier ceilings, got {found}")]
    TierCount { expected: usize, found: usize },
    #[error("Tier '{found}' listed where '{expected}' was expected")]
    TierOrder {
        expected: ConfidenceTier,
        found: ConfidenceTier,
    },
    #[error("Ceiling {ceiling} for tier '{tier}' must exceed the previous ceiling {previous}")]
    NonIncreasingCeiling {
        tier: ConfidenceTier,
        ceiling: f64,
        previous: f64,
    },
    #[error("Worker count must be at least 1")]
    InvalidWorkers,
}

/// Classification parameters for the contact analyzer.
///
/// Tier ceilings are held as an ordered list and evaluated tightest first, so a
/// pair's tier is always the first ceiling its error value falls below.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    tier_ceilings: Vec<(ConfidenceTier, f64)>,
    spatial_cutoff: f64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            tier_ceilings: DEFAULT_TIER_CEILINGS.to_vec(),
            spatial_cutoff: DEFAULT_SPATIAL_CUTOFF,
        }
    }
}

impl ContactConfig {
    /// Creates a configuration from an explicit ceiling list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] unless every tier appears exactly once in tier
    /// order with strictly increasing positive finite ceilings, and the cutoff
    /// is positive and finite.
    pub fn new(
        tier_ceilings: Vec<(ConfidenceTier, f64)>,
        spatial_cutoff: f64,
    ) -> Result<Self, ConfigError> {
        if !spatial_cutoff.is_finite() || spatial_cutoff <= 0.0 {
            return Err(ConfigError::InvalidCutoff(spatial_cutoff));
        }
        if tier_ceilings.len() != ConfidenceTier::ALL.len() {
            return Err(ConfigError::TierCount {
                expected: ConfidenceTier::ALL.len(),
                found: tier_ceilings.len(),
            });
        }

        let mut previous: Option<f64> = None;
        for (&expected, &(tier, ceiling)) in ConfidenceTier::ALL.iter().zip(&tier_ceilings) {
            if tier != expected {
                return Err(ConfigError::TierOrder {
                    expected,
                    found: tier,
                });
            }
            if !ceiling.is_finite() || ceiling <= 0.0 {
                return Err(ConfigError::InvalidCeiling {
                    tier,
                    value: ceiling,
                });
            }
            if let Some(previous) = previous.filter(|&p| ceiling <= p) {
                return Err(ConfigError::NonIncreasingCeiling {
                    tier,
                    ceiling,
                    previous,
                });
            }
            previous = Some(ceiling);
        }

        Ok(Self {
            tier_ceilings,
            spatial_cutoff,
        })
    }

    pub fn tier_ceilings(&self) -> &[(ConfidenceTier, f64)] {
        &self.tier_ceilings
    }

    pub fn spatial_cutoff(&self) -> f64 {
        self.spatial_cutoff
    }

    pub fn ceiling_for(&self, tier: ConfidenceTier) -> Option<f64> {
        self.tier_ceilings
            .iter()
            .find(|(t, _)| *t == tier)
            .map(|&(_, ceiling)| ceiling)
    }

    /// Returns the tightest tier whose ceiling exceeds `pae`, or `None` when the
    /// value reaches the loosest ceiling.
    pub fn classify(&self, pae: f64) -> Option<ConfidenceTier> {
        self.tier_ceilings
            .iter()
            .find(|&&(_, ceiling)| pae < ceiling)
            .map(|&(tier, _)| tier)
    }
}

#[derive(Default)]
pub struct ContactConfigBuilder {
    spatial_cutoff: Option<f64>,
    ceilings: [Option<f64>; 4],
}

impl ContactConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spatial_cutoff(mut self, cutoff: f64) -> Self {
        self.spatial_cutoff = Some(cutoff);
        self
    }
    pub fn tier_ceiling(mut self, tier: ConfidenceTier, ceiling: f64) -> Self {
        self.ceilings[tier_slot(tier)] = Some(ceiling);
        self
    }

    /// Fills unset values from the defaults and validates the result.
    pub fn build(self) -> Result<ContactConfig, ConfigError> {
        let tier_ceilings = DEFAULT_TIER_CEILINGS
            .iter()
            .map(|&(tier, default)| (tier, self.ceilings[tier_slot(tier)].unwrap_or(default)))
            .collect();
        ContactConfig::new(
            tier_ceilings,
            self.spatial_cutoff.unwrap_or(DEFAULT_SPATIAL_CUTOFF),
        )
    }
}

fn tier_slot(tier: ConfidenceTier) -> usize {
    match tier {
        ConfidenceTier::VeryHigh => 0,
        ConfidenceTier::High => 1,
        ConfidenceTier::Medium => 2,
        ConfidenceTier::Low => 3,
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchConfig {
    pub contact: ContactConfig,
    /// Size of the worker pool; `None` uses the available cores.
    pub workers: Option<usize>,
}

#[derive(Default)]
pub struct BatchConfigBuilder {
    contact: Option<ContactConfig>,
    workers: Option<usize>,
}

impl BatchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contact(mut self, config: ContactConfig) -> Self {
        self.contact = Some(config);
        self
    }
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn build(self) -> Result<BatchConfig, ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkers);
        }
        Ok(BatchConfig {
            contact: self.contact.unwrap_or_default(),
            workers: self.workers,
        })
    }
}
