// SPDX-License-Identifier: MIT OR Apache-2.0
//! The fuzzer's full configuration surface.

use fz_budget::BudgetConfig;
use fz_contract::Endpoint;
use serde::{Deserialize, Serialize};

/// Tuning for payload generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GenerationConfig {
    /// Overall aggressiveness, `0.0..=1.0`. Reserved for future use by
    /// generation strategies that scale coverage with intensity; the
    /// per-type-tag coverage in `fz-generator` is otherwise exhaustive
    /// regardless of this value.
    pub intensity_level: f64,
    /// Include a `valid` baseline payload alongside boundary/injection ones.
    pub include_baseline: bool,
    /// Include constraint-boundary payloads.
    pub include_boundaries: bool,
    /// Include mutation-ladder payloads derived from a type-specific seed.
    pub include_mutations: bool,
    /// Intensity passed to `fz_generator::mutate` when `include_mutations`.
    pub mutation_intensity: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            intensity_level: 0.5,
            include_baseline: true,
            include_boundaries: true,
            include_mutations: true,
            mutation_intensity: 0.5,
        }
    }
}

/// Tuning for response validation and finding promotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ValidationConfig {
    /// Whether to run schema conformance checks at all.
    pub enable_schema_validation: bool,
    /// Whether to run anomaly detection (intrinsic + baseline deviation).
    pub enable_anomaly_detection: bool,
    /// Session false-positive rate above which the session is flagged.
    pub false_positive_threshold: f64,
    /// Minimum confidence a candidate must carry to become a finding.
    pub confidence_threshold: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enable_schema_validation: true,
            enable_anomaly_detection: true,
            false_positive_threshold: 0.10,
            confidence_threshold: 0.0,
        }
    }
}

/// The complete configuration for one fuzzing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FuzzConfig {
    /// Request/time budget tuning.
    #[serde(default)]
    pub budget: BudgetConfig,
    /// Payload generation tuning.
    #[serde(default)]
    pub generation: GenerationConfig,
    /// Validation and finding-promotion tuning.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// The endpoints to fuzz, in schedule order.
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    /// Upper bound on concurrently in-flight probes across all endpoints.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            budget: BudgetConfig::default(),
            generation: GenerationConfig::default(),
            validation: ValidationConfig::default(),
            endpoints: Vec::new(),
            max_concurrent: default_max_concurrent(),
        }
    }
}

fn default_max_concurrent() -> usize {
    10
}
