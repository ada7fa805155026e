// SPDX-License-Identifier: MIT OR Apache-2.0
//! Session-level results: per-endpoint outcomes and aggregate statistics.

use crate::state::EndpointState;
use chrono::{DateTime, Utc};
use fz_contract::Vulnerability;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Why an endpoint's run ended without reaching `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The endpoint declared an `auth_role` no adapter could resolve.
    AuthUnavailable,
}

/// The outcome of fuzzing a single endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzingResult {
    /// The endpoint this result is for.
    pub endpoint_id: String,
    /// The state the endpoint's run ended in.
    pub final_state: EndpointState,
    /// Total probes dispatched against this endpoint.
    pub total_probes: u32,
    /// Findings promoted for this endpoint.
    pub vulnerabilities: Vec<Vulnerability>,
    /// Count of anomalies observed across every probe (not just findings).
    pub anomaly_count: u32,
    /// This endpoint's false-positive rate among its own findings.
    pub fp_rate: f64,
    /// Wall-clock time spent fuzzing this endpoint.
    pub elapsed_ms: u64,
    /// Requests this endpoint used against its own budget.
    pub budget_used: u32,
    /// Set when the endpoint was skipped entirely rather than tested.
    pub skipped: Option<SkipReason>,
}

impl FuzzingResult {
    /// `true` if this endpoint's run reached `Completed`.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.final_state == EndpointState::Completed
    }
}

/// Aggregate statistics across every endpoint in a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Total probes dispatched across every endpoint.
    pub total_requests: u32,
    /// Total findings across every endpoint.
    pub total_vulnerabilities: u32,
    /// Mean of each endpoint's `fp_rate` (endpoints with zero findings
    /// contribute `0.0`, per the session-level `fp_rate` convention).
    pub avg_fp_rate: f64,
    /// `total_requests / max_total_requests`, the budget's overall utilization.
    pub budget_utilization: f64,
    /// `true` when the session-wide `fp_rate` exceeds `false_positive_threshold`.
    pub fp_threshold_exceeded: bool,
}

/// The complete record of one fuzzing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique id for this session.
    pub id: Uuid,
    /// When the session began.
    pub started_at: DateTime<Utc>,
    /// When the session ended, once `fuzz_all` returns.
    pub ended_at: Option<DateTime<Utc>>,
    /// Per-endpoint results, in the order endpoints were scheduled.
    pub results: Vec<FuzzingResult>,
    /// Aggregate statistics over `results`.
    pub stats: SessionStats,
}

/// Compute the session-wide false-positive rate: low-confidence findings
/// over all findings, `0.0` when there are none.
#[must_use]
pub fn session_fp_rate(vulnerabilities: &[Vulnerability]) -> f64 {
    if vulnerabilities.is_empty() {
        return 0.0;
    }
    let low_confidence = vulnerabilities.iter().filter(|v| v.is_low_confidence()).count();
    low_confidence as f64 / vulnerabilities.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fp_rate_is_zero_with_no_findings() {
        assert_eq!(session_fp_rate(&[]), 0.0);
    }
}
