// SPDX-License-Identifier: MIT OR Apache-2.0
//! Budget configuration, mirroring the `[budget]` section of the fuzzer
//! config surface.

use serde::{Deserialize, Serialize};

/// Per-endpoint and global budget caps, plus backoff tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BudgetConfig {
    /// Maximum requests a single endpoint may use.
    pub max_requests_per_endpoint: u32,
    /// Maximum requests across all endpoints in a session.
    pub max_total_requests: u32,
    /// Maximum session wall-clock duration.
    pub max_duration_ms: u64,
    /// Starting delay between requests to the same endpoint.
    pub initial_delay_ms: u64,
    /// Ceiling the backoff delay is capped at.
    pub max_delay_ms: u64,
    /// Multiplier applied to the current delay on rate-limit responses.
    pub backoff_multiplier: f64,
    /// Honor a `Retry-After` header's value verbatim instead of the
    /// multiplicative backoff when one is present.
    pub respect_retry_after: bool,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            max_requests_per_endpoint: 50,
            max_total_requests: 500,
            max_duration_ms: 5 * 60 * 1000,
            initial_delay_ms: 100,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
            respect_retry_after: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backoff_multiplier_is_at_least_one() {
        assert!(BudgetConfig::default().backoff_multiplier >= 1.0);
    }
}
