// SPDX-License-Identifier: MIT OR Apache-2.0
//! The confidence formula and validity rule that fuse status class, schema
//! conformance, signatures, and anomalies into one verdict.

use fz_contract::{Anomaly, ErrorSignature, Severity, StatusClass};

const BASE: f64 = 0.5;
const EXPECTED_STATUS_BONUS: f64 = 0.2;
const SCHEMA_COMPLIANT_BONUS: f64 = 0.2;
const UNEXPECTED_STATUS_PENALTY: f64 = 0.1;
const NONCOMPLIANT_SCHEMA_PENALTY: f64 = 0.3;
const CRITICAL_SIGNATURE_PENALTY: f64 = 0.3;
const HIGH_SIGNATURE_PENALTY: f64 = 0.2;
const CRITICAL_ANOMALY_PENALTY: f64 = 0.2;
const HIGH_ANOMALY_PENALTY: f64 = 0.1;

/// Compute the aggregate confidence score, clamped to `[0, 1]`.
///
/// Adding a matched critical signature or a non-compliant schema never
/// increases the result — see the monotonicity law in the seed tests.
#[must_use]
pub fn score(
    status_class: &StatusClass,
    schema_compliant: bool,
    signatures: &[ErrorSignature],
    anomalies: &[Anomaly],
) -> f64 {
    let mut confidence = BASE;

    if status_class.expected {
        confidence += EXPECTED_STATUS_BONUS;
    } else {
        confidence -= UNEXPECTED_STATUS_PENALTY;
    }

    if schema_compliant {
        confidence += SCHEMA_COMPLIANT_BONUS;
    } else {
        confidence -= NONCOMPLIANT_SCHEMA_PENALTY;
    }

    for sig in signatures.iter().filter(|s| s.matched) {
        match sig.severity {
            Severity::Critical => confidence -= CRITICAL_SIGNATURE_PENALTY,
            Severity::High => confidence -= HIGH_SIGNATURE_PENALTY,
            Severity::Medium | Severity::Low => {}
        }
    }

    for anomaly in anomalies {
        match anomaly.severity {
            Severity::Critical => confidence -= CRITICAL_ANOMALY_PENALTY,
            Severity::High => confidence -= HIGH_ANOMALY_PENALTY,
            Severity::Medium | Severity::Low => {}
        }
    }

    confidence.clamp(0.0, 1.0)
}

/// Apply the validity rule: `false` whenever a critical signature matched,
/// a critical anomaly is present, an unexpected status coincides with any
/// `>= high` issue, or schema non-compliance coincides with any issue.
#[must_use]
pub fn is_valid(
    status_class: &StatusClass,
    schema_compliant: bool,
    signatures: &[ErrorSignature],
    anomalies: &[Anomaly],
) -> bool {
    let matched_critical_signature = signatures.iter().any(|s| s.matched && s.severity == Severity::Critical);
    let critical_anomaly = anomalies.iter().any(|a| a.severity == Severity::Critical);
    let has_high_or_above = anomalies.iter().any(|a| a.severity >= Severity::High)
        || signatures.iter().any(|s| s.matched && s.severity >= Severity::High);
    let has_any_issue = !anomalies.is_empty() || signatures.iter().any(|s| s.matched);

    if matched_critical_signature || critical_anomaly {
        return false;
    }
    if !status_class.expected && has_high_or_above {
        return false;
    }
    if !schema_compliant && has_any_issue {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use fz_contract::{SignatureKind, StatusClassKind};

    fn expected_status() -> StatusClass {
        StatusClass {
            kind: StatusClassKind::Success,
            expected: true,
        }
    }

    fn unexpected_status() -> StatusClass {
        StatusClass {
            kind: StatusClassKind::ServerError,
            expected: false,
        }
    }

    fn signature(severity: Severity, matched: bool) -> ErrorSignature {
        ErrorSignature {
            kind: SignatureKind::SqlInjection,
            pattern: "x".into(),
            severity,
            matched,
        }
    }

    #[test]
    fn clean_response_scores_maximally() {
        // BASE + both bonuses is the ceiling this formula can reach; nothing
        // pushes a response above it.
        let score = score(&expected_status(), true, &[], &[]);
        assert!((score - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn matched_critical_signature_lowers_confidence_and_invalidates() {
        let clean = score(&expected_status(), true, &[], &[]);
        let sigs = vec![signature(Severity::Critical, true)];
        let with_sig = score(&expected_status(), true, &sigs, &[]);
        assert!(with_sig < clean);
        assert!(!is_valid(&expected_status(), true, &sigs, &[]));
    }

    #[test]
    fn unmatched_signature_does_not_affect_score() {
        let sigs = vec![signature(Severity::Critical, false)];
        let with_unmatched = score(&expected_status(), true, &sigs, &[]);
        let clean = score(&expected_status(), true, &[], &[]);
        assert_eq!(with_unmatched, clean);
    }

    #[test]
    fn nonconformant_schema_with_issue_invalidates() {
        let sigs = vec![signature(Severity::Medium, true)];
        assert!(!is_valid(&expected_status(), false, &sigs, &[]));
    }

    #[test]
    fn unexpected_status_alone_stays_valid_without_high_issue() {
        assert!(is_valid(&unexpected_status(), true, &[], &[]));
    }

    #[test]
    fn score_never_goes_below_zero() {
        let sigs: Vec<_> = (0..10).map(|_| signature(Severity::Critical, true)).collect();
        let score = score(&unexpected_status(), false, &sigs, &[]);
        assert_eq!(score, 0.0);
    }
}
