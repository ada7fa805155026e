// SPDX-License-Identifier: MIT OR Apache-2.0
//! Response classification output: status class, anomalies, signatures,
//! and the aggregated [`ValidationResult`].

use serde::{Deserialize, Serialize};

/// How severe an [`Anomaly`] or [`ErrorSignature`] match is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Worth noting, unlikely to be exploitable on its own.
    Low,
    /// Worth investigating.
    Medium,
    /// Likely exploitable or leaks sensitive information.
    High,
    /// Confirmed or near-confirmed vulnerability class.
    Critical,
}

/// The HTTP status class bucket a response falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClassKind {
    /// 1xx informational.
    Informational,
    /// 2xx success.
    Success,
    /// 3xx redirection.
    Redirection,
    /// 4xx client error.
    ClientError,
    /// 5xx server error.
    ServerError,
    /// Outside the 100..=599 range.
    Unknown,
}

/// The bucketed status class of a response, plus whether that class is
/// expected for a well-behaved API (2xx/3xx/4xx are; 1xx/5xx/unknown are not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusClass {
    /// The bucket this status code falls into.
    pub kind: StatusClassKind,
    /// `true` for 2xx/3xx/4xx, `false` for 1xx/5xx/unknown.
    pub expected: bool,
}

impl StatusClass {
    /// Classify a raw HTTP status code.
    #[must_use]
    pub fn classify(status: u16) -> Self {
        let kind = match status {
            100..=199 => StatusClassKind::Informational,
            200..=299 => StatusClassKind::Success,
            300..=399 => StatusClassKind::Redirection,
            400..=499 => StatusClassKind::ClientError,
            500..=599 => StatusClassKind::ServerError,
            _ => StatusClassKind::Unknown,
        };
        let expected = matches!(
            kind,
            StatusClassKind::Success | StatusClassKind::Redirection | StatusClassKind::ClientError
        );
        Self { kind, expected }
    }
}

/// The named class of vulnerability a body-scanning regex signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    /// A SQL error message leaked into the response.
    SqlInjection,
    /// A reflected/stored script payload.
    Xss,
    /// Evidence of a path-traversal read.
    PathTraversal,
    /// Stack traces, framework banners, `phpinfo()` output, etc.
    InformationDisclosure,
    /// Evidence that an auth check was bypassed.
    AuthBypass,
    /// Evidence of a CSRF protection failure.
    CsrfVulnerability,
    /// Evidence of a JWT handling flaw (e.g. `alg: none` accepted).
    JwtVulnerability,
    /// Evidence that rate limiting can be bypassed.
    RateLimitBypass,
    /// A business-logic inconsistency (e.g. negative price accepted).
    BusinessLogic,
    /// Evidence of unsafe deserialization.
    Deserialization,
}

impl SignatureKind {
    /// The CWE identifier most associated with this signature, when one
    /// applies cleanly.
    #[must_use]
    pub fn cwe(&self) -> Option<&'static str> {
        match self {
            Self::SqlInjection => Some("CWE-89"),
            Self::Xss => Some("CWE-79"),
            Self::PathTraversal => Some("CWE-22"),
            Self::InformationDisclosure => Some("CWE-209"),
            Self::AuthBypass => Some("CWE-287"),
            Self::CsrfVulnerability => Some("CWE-352"),
            Self::JwtVulnerability => Some("CWE-347"),
            Self::RateLimitBypass => Some("CWE-799"),
            Self::BusinessLogic => None,
            Self::Deserialization => Some("CWE-502"),
        }
    }

    /// The OWASP Top 10 (2021) category most associated with this
    /// signature, when one applies cleanly.
    #[must_use]
    pub fn owasp(&self) -> Option<&'static str> {
        match self {
            Self::SqlInjection | Self::Xss => Some("A03:2021"),
            Self::PathTraversal => Some("A01:2021"),
            Self::InformationDisclosure => Some("A09:2021"),
            Self::AuthBypass => Some("A07:2021"),
            Self::CsrfVulnerability => Some("A01:2021"),
            Self::JwtVulnerability => Some("A02:2021"),
            Self::RateLimitBypass => Some("A04:2021"),
            Self::BusinessLogic => Some("A04:2021"),
            Self::Deserialization => Some("A08:2021"),
        }
    }
}

/// A single matched (or unmatched) body signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorSignature {
    /// Which vulnerability class this signature detects.
    pub kind: SignatureKind,
    /// The regex source that was matched against the body.
    pub pattern: String,
    /// How severe a match of this signature is.
    pub severity: Severity,
    /// Whether this signature matched the response body.
    pub matched: bool,
}

/// The kind of deviation an [`Anomaly`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Response took longer than the slow-response threshold.
    SlowResponse,
    /// Response body exceeded the large-response threshold.
    LargeResponse,
    /// None of the expected security headers were present.
    MissingSecurityHeaders,
    /// The response status was 500.
    ServerError,
    /// Elapsed time deviated from the baseline beyond the timing ratio.
    TimingAnomaly,
    /// Body size deviated from the baseline beyond the size ratio.
    SizeAnomaly,
    /// Status code differs from the baseline's.
    StatusAnomaly,
}

/// A single detected deviation, either intrinsic to the response or
/// relative to a captured baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    /// Which kind of deviation this is.
    pub kind: AnomalyKind,
    /// How severe this anomaly is.
    pub severity: Severity,
    /// Confidence that this anomaly is meaningful, in `[0, 1]`.
    pub confidence: f64,
    /// Human-readable evidence (the measured value, the threshold crossed).
    pub evidence: String,
}

/// The aggregated verdict produced by the response validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `false` if any critical issue was found; see the validity rule.
    pub is_valid: bool,
    /// Aggregate confidence in `[0, 1]`. Never increases when a critical
    /// signature matches or the schema is non-compliant.
    pub confidence: f64,
    /// The bucketed status class.
    pub status_class: StatusClass,
    /// Whether the body conforms to the endpoint's expected schema.
    /// `true` when no schema was supplied.
    pub schema_compliant: bool,
    /// Every detected anomaly.
    pub anomalies: Vec<Anomaly>,
    /// Every signature that matched the body.
    pub error_signatures: Vec<ErrorSignature>,
}

impl ValidationResult {
    /// Every matched signature with [`Severity::Critical`].
    #[must_use]
    pub fn critical_signatures(&self) -> impl Iterator<Item = &ErrorSignature> {
        self.error_signatures
            .iter()
            .filter(|s| s.matched && s.severity == Severity::Critical)
    }

    /// Every anomaly with [`Severity::Critical`].
    #[must_use]
    pub fn critical_anomalies(&self) -> impl Iterator<Item = &Anomaly> {
        self.anomalies.iter().filter(|a| a.severity == Severity::Critical)
    }

    /// `true` if any anomaly or matched signature has severity `>= high`.
    #[must_use]
    pub fn has_high_or_above(&self) -> bool {
        self.anomalies.iter().any(|a| a.severity >= Severity::High)
            || self
                .error_signatures
                .iter()
                .any(|s| s.matched && s.severity >= Severity::High)
    }
}
