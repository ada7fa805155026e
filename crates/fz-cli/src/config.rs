// SPDX-License-Identifier: MIT OR Apache-2.0
//! TOML configuration loading and semantic validation: parse, then check
//! invariants the type system alone can't express.

use fz_orchestrator::FuzzConfig;
use std::fmt;
use std::path::Path;

/// A semantic problem found in an otherwise well-formed [`FuzzConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `budget.max_requests_per_endpoint` or `max_total_requests` is zero.
    ZeroBudget { field: &'static str },
    /// `generation.intensity_level` or `mutation_intensity` is outside `[0, 1]`.
    IntensityOutOfRange { field: &'static str, value: f64 },
    /// `validation.false_positive_threshold` or `confidence_threshold` is outside `[0, 1]`.
    ThresholdOutOfRange { field: &'static str, value: f64 },
    /// `max_concurrent` is zero.
    ZeroConcurrency,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBudget { field } => write!(f, "budget.{field} must be greater than zero"),
            Self::IntensityOutOfRange { field, value } => {
                write!(f, "generation.{field} = {value} is outside [0, 1]")
            }
            Self::ThresholdOutOfRange { field, value } => {
                write!(f, "validation.{field} = {value} is outside [0, 1]")
            }
            Self::ZeroConcurrency => write!(f, "max_concurrent must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and parse a TOML configuration file into a [`FuzzConfig`].
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse as valid
/// TOML matching [`FuzzConfig`]'s shape.
pub fn load_config(path: &Path) -> anyhow::Result<FuzzConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file '{}': {e}", path.display()))?;
    let config: FuzzConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("failed to parse config file '{}': {e}", path.display()))?;
    Ok(config)
}

/// Validate a parsed [`FuzzConfig`], returning every semantic problem found.
pub fn validate_config(config: &FuzzConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.budget.max_requests_per_endpoint == 0 {
        errors.push(ConfigError::ZeroBudget {
            field: "max_requests_per_endpoint",
        });
    }
    if config.budget.max_total_requests == 0 {
        errors.push(ConfigError::ZeroBudget {
            field: "max_total_requests",
        });
    }

    for (field, value) in [
        ("intensity_level", config.generation.intensity_level),
        ("mutation_intensity", config.generation.mutation_intensity),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::IntensityOutOfRange { field, value });
        }
    }

    for (field, value) in [
        ("false_positive_threshold", config.validation.false_positive_threshold),
        ("confidence_threshold", config.validation.confidence_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ConfigError::ThresholdOutOfRange { field, value });
        }
    }

    if config.max_concurrent == 0 {
        errors.push(ConfigError::ZeroConcurrency);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
