// SPDX-License-Identifier: MIT OR Apache-2.0
//! Public snapshots of budget state, per the `BudgetState` data model.

use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of one endpoint's budget record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointBudgetState {
    /// Requests already dispatched to this endpoint.
    pub requests_used: u32,
    /// The endpoint's request cap.
    pub max_requests: u32,
    /// Milliseconds since session start that the last request was sent.
    pub last_request_at_ms: Option<u64>,
    /// Current inter-request delay, in milliseconds.
    pub current_delay_ms: u64,
    /// Count of 2xx/3xx responses recorded.
    pub successes: u32,
    /// Count of non-2xx/3xx responses recorded (excluding 429/503, which
    /// set `rate_limited` instead).
    pub failures: u32,
    /// Whether the endpoint is currently under an active rate-limit backoff.
    pub rate_limited: bool,
    /// Whether the endpoint is permanently banned for this session.
    pub banned: bool,
}

/// A point-in-time snapshot of the session-wide budget record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalBudgetState {
    /// Requests dispatched across every endpoint.
    pub requests_used: u32,
    /// The session-wide request cap.
    pub max_total: u32,
    /// Milliseconds elapsed since the session started.
    pub elapsed_ms: u64,
    /// The session-wide wall-clock cap.
    pub max_duration_ms: u64,
    /// Current global inter-request delay, in milliseconds.
    pub global_delay_ms: u64,
    /// Whether the session is currently under an active global rate-limit.
    pub global_rate_limited: bool,
}
