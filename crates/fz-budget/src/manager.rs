// SPDX-License-Identifier: MIT OR Apache-2.0
//! The budget manager: a single mutable store guarded by one mutex, so that
//! every `check`/`record` pair observes and mutates a consistent snapshot.
//! Per-endpoint serialization (§5) means lock contention here is never the
//! bottleneck; a finer-grained scheme would add complexity for no benefit.

use crate::config::BudgetConfig;
use crate::ratelimit_headers::{self, RateLimitSignals};
use crate::state::{EndpointBudgetState, GlobalBudgetState};
use fz_contract::HeaderMultiMap;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Requests counted as failures (not rate-limited) before an endpoint with
/// zero successes is permanently banned.
const BAN_FAILURE_THRESHOLD: u32 = 10;

/// Why a [`CheckOutcome`] was not an unconditional go-ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckReason {
    /// The session's wall-clock deadline has passed.
    GlobalDeadlineExceeded,
    /// The session-wide request cap has been reached.
    GlobalRequestsExhausted,
    /// The session is in a global rate-limit backoff.
    GlobalRateLimited,
    /// The endpoint is permanently banned.
    EndpointBanned,
    /// The endpoint's per-endpoint request cap has been reached.
    EndpointRequestsExhausted,
    /// Minimum inter-request spacing for this endpoint has not elapsed.
    EndpointSpacing,
}

/// The result of a [`BudgetManager::check`] call.
#[derive(Debug, Clone, Copy)]
pub struct CheckOutcome {
    /// `false` means the probe must not be dispatched at all this session.
    pub allowed: bool,
    /// Milliseconds the caller must wait before retrying, when `allowed`
    /// is `true` but spacing/backoff has not yet elapsed.
    pub delay_ms: u64,
    /// Present whenever `delay_ms > 0` or `allowed == false`.
    pub reason: Option<CheckReason>,
    /// Requests remaining against this endpoint's own cap.
    pub remaining: u32,
}

struct GlobalInternal {
    requests_used: u32,
    max_total: u32,
    start: Instant,
    start_unix_secs: u64,
    max_duration: Duration,
    delay: Duration,
    rate_limited: bool,
    rate_limit_set_at: Option<Instant>,
}

struct EndpointInternal {
    requests_used: u32,
    max_requests: u32,
    last_request_at: Option<Instant>,
    current_delay: Duration,
    successes: u32,
    failures: u32,
    rate_limited: bool,
    banned: bool,
}

impl EndpointInternal {
    fn new(max_requests: u32, initial_delay: Duration) -> Self {
        Self {
            requests_used: 0,
            max_requests,
            last_request_at: None,
            current_delay: initial_delay,
            successes: 0,
            failures: 0,
            rate_limited: false,
            banned: false,
        }
    }
}

struct Inner {
    config: BudgetConfig,
    global: GlobalInternal,
    endpoints: HashMap<String, EndpointInternal>,
}

/// Gates request dispatch against per-endpoint and session-wide budgets,
/// absorbing server rate-limit signals and backing off on failure.
pub struct BudgetManager {
    inner: Mutex<Inner>,
}

impl BudgetManager {
    /// Start a new budget manager with the session clock beginning now.
    #[must_use]
    pub fn new(config: BudgetConfig) -> Self {
        let start_unix_secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let global = GlobalInternal {
            requests_used: 0,
            max_total: config.max_total_requests,
            start: Instant::now(),
            start_unix_secs,
            max_duration: Duration::from_millis(config.max_duration_ms),
            delay: Duration::ZERO,
            rate_limited: false,
            rate_limit_set_at: None,
        };
        Self {
            inner: Mutex::new(Inner {
                config,
                global,
                endpoints: HashMap::new(),
            }),
        }
    }

    /// Evaluate whether a probe against `endpoint_id` may be dispatched now,
    /// per the fixed check order (first failure wins).
    #[must_use]
    pub fn check(&self, endpoint_id: &str) -> CheckOutcome {
        let mut inner = self.inner.lock().expect("budget mutex poisoned");
        let config_max_requests = inner.config.max_requests_per_endpoint;
        let initial_delay = Duration::from_millis(inner.config.initial_delay_ms);

        // 1. Global deadline.
        if inner.global.start.elapsed() >= inner.global.max_duration {
            return deny(CheckReason::GlobalDeadlineExceeded, 0);
        }

        // 2. Global requests.
        if inner.global.requests_used >= inner.global.max_total {
            return deny(CheckReason::GlobalRequestsExhausted, 0);
        }

        // 3. Global rate-limit.
        maybe_clear_global_rate_limit(&mut inner.global);
        if inner.global.rate_limited && !inner.global.delay.is_zero() {
            return delay(CheckReason::GlobalRateLimited, inner.global.delay.as_millis() as u64, 0);
        }

        let endpoint = inner
            .endpoints
            .entry(endpoint_id.to_string())
            .or_insert_with(|| EndpointInternal::new(config_max_requests, initial_delay));
        let remaining = endpoint.max_requests.saturating_sub(endpoint.requests_used);

        // 4. Per-endpoint banned.
        if endpoint.banned {
            return deny(CheckReason::EndpointBanned, remaining);
        }

        // 5. Per-endpoint requests.
        if endpoint.requests_used >= endpoint.max_requests {
            return deny(CheckReason::EndpointRequestsExhausted, remaining);
        }

        // 6 & 7. Spacing: current_delay is always >= initial_delay (the
        // backoff floor), so "per-endpoint rate-limited" and "minimum
        // spacing" collapse into the same comparison against current_delay.
        if let Some(last) = endpoint.last_request_at {
            let required = endpoint.current_delay.max(initial_delay);
            let elapsed = last.elapsed();
            if elapsed < required {
                let wait = required - elapsed;
                return delay(CheckReason::EndpointSpacing, wait.as_millis() as u64, remaining);
            }
        }

        CheckOutcome {
            allowed: true,
            delay_ms: 0,
            reason: None,
            remaining,
        }
    }

    /// Record the outcome of a dispatched request against `endpoint_id`.
    pub fn record(&self, endpoint_id: &str, status: u16, headers: &HeaderMultiMap, _elapsed_ms: u64) {
        let mut inner = self.inner.lock().expect("budget mutex poisoned");
        let backoff_multiplier = inner.config.backoff_multiplier;
        let max_delay = Duration::from_millis(inner.config.max_delay_ms);
        let initial_delay = Duration::from_millis(inner.config.initial_delay_ms);
        let respect_retry_after = inner.config.respect_retry_after;
        let now_unix = inner.global.start_unix_secs + inner.global.start.elapsed().as_secs();

        inner.global.requests_used += 1;

        let max_requests = inner.config.max_requests_per_endpoint;
        let endpoint = inner
            .endpoints
            .entry(endpoint_id.to_string())
            .or_insert_with(|| EndpointInternal::new(max_requests, initial_delay));
        endpoint.requests_used += 1;
        endpoint.last_request_at = Some(Instant::now());

        if status == 429 || status == 503 {
            let signals = ratelimit_headers::parse(headers, now_unix);
            let new_delay = next_backoff_delay(
                endpoint.current_delay,
                &signals,
                respect_retry_after,
                backoff_multiplier,
                max_delay,
            );
            endpoint.current_delay = new_delay;
            endpoint.rate_limited = true;

            inner.global.delay = new_delay;
            inner.global.rate_limited = true;
            inner.global.rate_limit_set_at = Some(Instant::now());
        } else if (200..400).contains(&status) {
            endpoint.successes += 1;
            endpoint.rate_limited = false;
            let shrunk = Duration::from_secs_f64(endpoint.current_delay.as_secs_f64() / backoff_multiplier.max(1.0));
            endpoint.current_delay = shrunk.max(initial_delay);
        } else {
            endpoint.failures += 1;
        }

        if endpoint.failures >= BAN_FAILURE_THRESHOLD && endpoint.successes == 0 {
            endpoint.banned = true;
            tracing::warn!(endpoint_id, failures = endpoint.failures, "endpoint banned for this session");
        }
    }

    /// `false` when banned endpoints exceed 50% of seen endpoints,
    /// rate-limited endpoints exceed 80%, or average success rate falls
    /// below 50%.
    #[must_use]
    pub fn healthy(&self) -> bool {
        let inner = self.inner.lock().expect("budget mutex poisoned");
        if inner.endpoints.is_empty() {
            return true;
        }
        let total = inner.endpoints.len() as f64;
        let banned = inner.endpoints.values().filter(|e| e.banned).count() as f64;
        let rate_limited = inner.endpoints.values().filter(|e| e.rate_limited).count() as f64;
        let (successes, attempts): (u32, u32) = inner
            .endpoints
            .values()
            .map(|e| (e.successes, e.successes + e.failures))
            .fold((0, 0), |acc, x| (acc.0 + x.0, acc.1 + x.1));
        let success_rate = if attempts == 0 {
            1.0
        } else {
            successes as f64 / attempts as f64
        };

        banned / total <= 0.5 && rate_limited / total <= 0.8 && success_rate >= 0.5
    }

    /// Snapshot one endpoint's budget record, if it has been seen.
    #[must_use]
    pub fn snapshot_endpoint(&self, endpoint_id: &str) -> Option<EndpointBudgetState> {
        let inner = self.inner.lock().expect("budget mutex poisoned");
        let session_start = inner.global.start;
        inner.endpoints.get(endpoint_id).map(|e| EndpointBudgetState {
            requests_used: e.requests_used,
            max_requests: e.max_requests,
            last_request_at_ms: e
                .last_request_at
                .map(|t| t.saturating_duration_since(session_start).as_millis() as u64),
            current_delay_ms: e.current_delay.as_millis() as u64,
            successes: e.successes,
            failures: e.failures,
            rate_limited: e.rate_limited,
            banned: e.banned,
        })
    }

    /// Snapshot the session-wide budget record.
    #[must_use]
    pub fn snapshot_global(&self) -> GlobalBudgetState {
        let inner = self.inner.lock().expect("budget mutex poisoned");
        GlobalBudgetState {
            requests_used: inner.global.requests_used,
            max_total: inner.global.max_total,
            elapsed_ms: inner.global.start.elapsed().as_millis() as u64,
            max_duration_ms: inner.global.max_duration.as_millis() as u64,
            global_delay_ms: inner.global.delay.as_millis() as u64,
            global_rate_limited: inner.global.rate_limited,
        }
    }
}

fn maybe_clear_global_rate_limit(global: &mut GlobalInternal) {
    let expired = match global.rate_limit_set_at {
        Some(set_at) => set_at.elapsed() >= global.delay,
        None => false,
    };
    if expired {
        global.rate_limited = false;
        global.delay = Duration::ZERO;
        global.rate_limit_set_at = None;
    }
}

fn next_backoff_delay(
    current: Duration,
    signals: &RateLimitSignals,
    respect_retry_after: bool,
    multiplier: f64,
    max_delay: Duration,
) -> Duration {
    if respect_retry_after {
        if let Some(secs) = signals.retry_after_secs {
            return Duration::from_secs(secs);
        }
    }
    let scaled = Duration::from_secs_f64(current.as_secs_f64() * multiplier.max(1.0));
    scaled.min(max_delay).max(current)
}

fn deny(reason: CheckReason, remaining: u32) -> CheckOutcome {
    CheckOutcome {
        allowed: false,
        delay_ms: 0,
        reason: Some(reason),
        remaining,
    }
}

fn delay(reason: CheckReason, delay_ms: u64, remaining: u32) -> CheckOutcome {
    CheckOutcome {
        allowed: true,
        delay_ms,
        reason: Some(reason),
        remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BudgetConfig {
        BudgetConfig {
            max_requests_per_endpoint: 5,
            max_total_requests: 100,
            max_duration_ms: 60_000,
            initial_delay_ms: 10,
            max_delay_ms: 5_000,
            backoff_multiplier: 2.0,
            respect_retry_after: true,
        }
    }

    fn headers_with(pairs: &[(&str, &str)]) -> HeaderMultiMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn first_check_is_allowed() {
        let manager = BudgetManager::new(config());
        let outcome = manager.check("ep-1");
        assert!(outcome.allowed);
        assert_eq!(outcome.remaining, 5);
    }

    #[test]
    fn per_endpoint_cap_denies_after_max_requests() {
        let manager = BudgetManager::new(config());
        for _ in 0..5 {
            manager.check("ep-1");
            manager.record("ep-1", 200, &HeaderMultiMap::new(), 5);
            std::thread::sleep(Duration::from_millis(12));
        }
        let outcome = manager.check("ep-1");
        assert!(!outcome.allowed);
        assert_eq!(outcome.reason, Some(CheckReason::EndpointRequestsExhausted));
    }

    #[test]
    fn ban_rule_fires_at_ten_failures_with_no_successes() {
        let manager = BudgetManager::new(BudgetConfig {
            max_requests_per_endpoint: 100,
            ..config()
        });
        for _ in 0..10 {
            manager.record("ep-1", 400, &HeaderMultiMap::new(), 5);
        }
        let snapshot = manager.snapshot_endpoint("ep-1").unwrap();
        assert!(snapshot.banned);
        let outcome = manager.check("ep-1");
        assert!(!outcome.allowed);
        assert_eq!(outcome.reason, Some(CheckReason::EndpointBanned));
    }

    #[test]
    fn retry_after_sets_current_delay_verbatim() {
        let manager = BudgetManager::new(config());
        manager.record("ep-1", 429, &headers_with(&[("Retry-After", "5")]), 5);
        let snapshot = manager.snapshot_endpoint("ep-1").unwrap();
        assert_eq!(snapshot.current_delay_ms, 5_000);
    }

    #[test]
    fn backoff_without_retry_after_multiplies_and_caps() {
        let manager = BudgetManager::new(config());
        manager.record("ep-1", 429, &HeaderMultiMap::new(), 5);
        let after_one = manager.snapshot_endpoint("ep-1").unwrap().current_delay_ms;
        assert!(after_one >= 10);
        manager.record("ep-1", 429, &HeaderMultiMap::new(), 5);
        let after_two = manager.snapshot_endpoint("ep-1").unwrap().current_delay_ms;
        assert!(after_two >= after_one);
    }

    #[test]
    fn success_shrinks_delay_back_toward_initial_never_below() {
        let manager = BudgetManager::new(config());
        manager.record("ep-1", 429, &headers_with(&[("Retry-After", "5")]), 5);
        for _ in 0..20 {
            manager.record("ep-1", 200, &HeaderMultiMap::new(), 5);
        }
        let snapshot = manager.snapshot_endpoint("ep-1").unwrap();
        assert!(snapshot.current_delay_ms >= 10);
    }

    #[test]
    fn zero_max_total_requests_denies_everything() {
        let manager = BudgetManager::new(BudgetConfig {
            max_total_requests: 0,
            ..config()
        });
        let outcome = manager.check("ep-1");
        assert!(!outcome.allowed);
        assert_eq!(outcome.reason, Some(CheckReason::GlobalRequestsExhausted));
    }

    #[test]
    fn healthy_with_no_endpoints_seen() {
        let manager = BudgetManager::new(config());
        assert!(manager.healthy());
    }

    #[test]
    fn unhealthy_when_majority_banned() {
        let manager = BudgetManager::new(config());
        for ep in ["a", "b", "c"] {
            for _ in 0..10 {
                manager.record(ep, 500, &HeaderMultiMap::new(), 5);
            }
        }
        assert!(!manager.healthy());
    }
}
