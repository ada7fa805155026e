// SPDX-License-Identifier: MIT OR Apache-2.0
//! Vulnerability classification: turns a validated probe into a
//! `(kind, severity)` pair, or `None` when nothing rises to a finding.

use fz_contract::{Anomaly, AnomalyKind, ErrorSignature, Payload, PayloadCategory, Severity, ValidationResult, VulnerabilityKind};

/// Classify one validated probe.
///
/// Returns `None` only when the caller should not even consider promoting
/// this probe (kept separate from the confidence-threshold discard, which
/// the orchestrator applies afterward).
#[must_use]
pub fn classify(payload: &Payload, validation: &ValidationResult) -> (VulnerabilityKind, Severity) {
    let kind = classify_kind(payload, validation);
    let severity = classify_severity(payload, validation);
    (kind, severity)
}

fn classify_kind(payload: &Payload, validation: &ValidationResult) -> VulnerabilityKind {
    if let Some(sig) = first_critical_signature(&validation.error_signatures) {
        return VulnerabilityKind::Signature(sig.kind);
    }
    if payload.category == PayloadCategory::Injection {
        return VulnerabilityKind::InjectionVulnerability;
    }
    if first_critical_anomaly(&validation.anomalies).is_some() {
        return VulnerabilityKind::AnomalousBehavior;
    }
    VulnerabilityKind::Unknown
}

fn classify_severity(payload: &Payload, validation: &ValidationResult) -> Severity {
    if validation
        .error_signatures
        .iter()
        .any(|s| s.matched && s.severity == Severity::Critical)
    {
        return Severity::Critical;
    }

    let has_high_anomaly = validation.anomalies.iter().any(|a| a.severity == Severity::High);
    let server_error_on_malicious = validation.status_class.kind == fz_contract::StatusClassKind::ServerError && payload.malicious;
    if has_high_anomaly || server_error_on_malicious {
        return Severity::High;
    }

    let has_medium_anomaly = validation.anomalies.iter().any(|a| a.severity == Severity::Medium);
    let has_error_level_signature = validation
        .error_signatures
        .iter()
        .any(|s| s.matched && s.severity == Severity::High);
    if has_medium_anomaly || has_error_level_signature {
        return Severity::Medium;
    }

    Severity::Low
}

fn first_critical_signature(signatures: &[ErrorSignature]) -> Option<&ErrorSignature> {
    signatures.iter().find(|s| s.matched && s.severity == Severity::Critical)
}

fn first_critical_anomaly(anomalies: &[Anomaly]) -> Option<&Anomaly> {
    anomalies.iter().find(|a| a.severity == Severity::Critical)
}

/// The anomaly kind driving an `AnomalousBehavior` classification, if any,
/// surfaced for callers that want it in a finding's description.
#[must_use]
pub fn driving_anomaly_kind(validation: &ValidationResult) -> Option<AnomalyKind> {
    first_critical_anomaly(&validation.anomalies).map(|a| a.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fz_contract::{PayloadValue, SignatureKind, StatusClass, TypeTag};

    fn payload(category: PayloadCategory, malicious: bool) -> Payload {
        let mut p = Payload::new(PayloadValue::text("x"), TypeTag::String, category, "t");
        if malicious {
            p = p.malicious();
        }
        p
    }

    fn validation_with(error_signatures: Vec<ErrorSignature>, anomalies: Vec<Anomaly>, status: u16) -> ValidationResult {
        ValidationResult {
            is_valid: false,
            confidence: 0.9,
            status_class: StatusClass::classify(status),
            schema_compliant: true,
            anomalies,
            error_signatures,
        }
    }

    #[test]
    fn critical_signature_wins_over_injection_category() {
        let p = payload(PayloadCategory::Injection, true);
        let sig = ErrorSignature {
            kind: SignatureKind::SqlInjection,
            pattern: "x".into(),
            severity: Severity::Critical,
            matched: true,
        };
        let v = validation_with(vec![sig], vec![], 500);
        let (kind, severity) = classify(&p, &v);
        assert_eq!(kind, VulnerabilityKind::Signature(SignatureKind::SqlInjection));
        assert_eq!(severity, Severity::Critical);
    }

    #[test]
    fn injection_category_without_signature_match() {
        let p = payload(PayloadCategory::Injection, true);
        let v = validation_with(vec![], vec![], 200);
        let (kind, _) = classify(&p, &v);
        assert_eq!(kind, VulnerabilityKind::InjectionVulnerability);
    }

    #[test]
    fn server_error_with_malicious_payload_is_high() {
        let p = payload(PayloadCategory::Boundary, true);
        let v = validation_with(vec![], vec![], 500);
        let (_, severity) = classify(&p, &v);
        assert_eq!(severity, Severity::High);
    }

    #[test]
    fn clean_response_is_low_severity_unknown_kind() {
        let p = payload(PayloadCategory::Valid, false);
        let v = validation_with(vec![], vec![], 200);
        let (kind, severity) = classify(&p, &v);
        assert_eq!(kind, VulnerabilityKind::Unknown);
        assert_eq!(severity, Severity::Low);
    }

    #[test]
    fn critical_anomaly_drives_anomalous_behavior_kind() {
        let p = payload(PayloadCategory::Boundary, false);
        let anomaly = Anomaly {
            kind: AnomalyKind::ServerError,
            severity: Severity::Critical,
            confidence: 0.9,
            evidence: "500".into(),
        };
        let v = validation_with(vec![], vec![anomaly], 500);
        let (kind, severity) = classify(&p, &v);
        assert_eq!(kind, VulnerabilityKind::AnomalousBehavior);
        assert_eq!(severity, Severity::Critical);
    }
}
