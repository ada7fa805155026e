// SPDX-License-Identifier: MIT OR Apache-2.0
//! Intrinsic and baseline-deviation anomaly detection.

use fz_contract::{Anomaly, AnomalyKind, Baseline, ResponseData, Severity};

const SLOW_RESPONSE_MS: u64 = 10_000;
const LARGE_RESPONSE_BYTES: usize = 10 * 1024 * 1024;
const SECURITY_HEADERS: &[&str] = &[
    "x-frame-options",
    "x-xss-protection",
    "x-content-type-options",
    "content-security-policy",
    "strict-transport-security",
];
const TIMING_RATIO_THRESHOLD: f64 = 2.0;
const SIZE_RATIO_THRESHOLD: f64 = 1.5;

/// Confidence assigned to an anomaly purely from its severity. Anomaly
/// detection here is threshold-based rather than learned, so confidence
/// tracks severity directly rather than being independently estimated.
fn confidence_for(severity: Severity) -> f64 {
    match severity {
        Severity::Low => 0.4,
        Severity::Medium => 0.6,
        Severity::High => 0.8,
        Severity::Critical => 0.95,
    }
}

/// Detect anomalies intrinsic to `response` alone.
#[must_use]
pub fn intrinsic(response: &ResponseData) -> Vec<Anomaly> {
    let mut out = Vec::new();

    if response.elapsed_ms > SLOW_RESPONSE_MS {
        out.push(Anomaly {
            kind: AnomalyKind::SlowResponse,
            severity: Severity::Medium,
            confidence: confidence_for(Severity::Medium),
            evidence: format!("elapsed {}ms > {SLOW_RESPONSE_MS}ms threshold", response.elapsed_ms),
        });
    }

    if response.size_bytes > LARGE_RESPONSE_BYTES {
        out.push(Anomaly {
            kind: AnomalyKind::LargeResponse,
            severity: Severity::Low,
            confidence: confidence_for(Severity::Low),
            evidence: format!(
                "body {} bytes > {LARGE_RESPONSE_BYTES} byte threshold",
                response.size_bytes
            ),
        });
    }

    if SECURITY_HEADERS.iter().all(|h| !response.headers.contains(h)) {
        out.push(Anomaly {
            kind: AnomalyKind::MissingSecurityHeaders,
            severity: Severity::Medium,
            confidence: confidence_for(Severity::Medium),
            evidence: "none of the expected security headers were present".to_string(),
        });
    }

    if response.status == 500 {
        out.push(Anomaly {
            kind: AnomalyKind::ServerError,
            severity: Severity::High,
            confidence: confidence_for(Severity::High),
            evidence: "status 500".to_string(),
        });
    }

    out
}

/// Detect anomalies relative to a captured `baseline`.
#[must_use]
pub fn against_baseline(response: &ResponseData, baseline: &Baseline) -> Vec<Anomaly> {
    let mut out = Vec::new();

    if baseline.elapsed_ms > 0 {
        let ratio = response.elapsed_ms as f64 / baseline.elapsed_ms as f64;
        if ratio > TIMING_RATIO_THRESHOLD {
            out.push(Anomaly {
                kind: AnomalyKind::TimingAnomaly,
                severity: Severity::Medium,
                confidence: confidence_for(Severity::Medium),
                evidence: format!(
                    "elapsed {}ms is {ratio:.2}x baseline {}ms",
                    response.elapsed_ms, baseline.elapsed_ms
                ),
            });
        }
    }

    if baseline.size_bytes > 0 {
        let ratio = response.size_bytes as f64 / baseline.size_bytes as f64;
        if ratio > SIZE_RATIO_THRESHOLD {
            out.push(Anomaly {
                kind: AnomalyKind::SizeAnomaly,
                severity: Severity::Low,
                confidence: confidence_for(Severity::Low),
                evidence: format!(
                    "body {} bytes is {ratio:.2}x baseline {} bytes",
                    response.size_bytes, baseline.size_bytes
                ),
            });
        }
    }

    if response.status != baseline.status {
        out.push(Anomaly {
            kind: AnomalyKind::StatusAnomaly,
            severity: Severity::High,
            confidence: confidence_for(Severity::High),
            evidence: format!("status {} differs from baseline {}", response.status, baseline.status),
        });
    }

    out
}
