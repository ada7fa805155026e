// SPDX-License-Identifier: MIT OR Apache-2.0
//! A confirmed or candidate finding, as reported to the caller.

use crate::payload::Payload;
use crate::request::RequestSpec;
use crate::response::ResponseData;
use crate::validation::{Severity, SignatureKind, ValidationResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of weakness a [`Vulnerability`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VulnerabilityKind {
    /// Maps directly to a matched [`SignatureKind`].
    Signature(SignatureKind),
    /// The probing payload's category was `injection` but no specific
    /// signature matched the body.
    InjectionVulnerability,
    /// A critical anomaly drove classification, with no signature match.
    AnomalousBehavior,
    /// Nothing more specific could be attributed.
    Unknown,
}

/// The probe and verdict that justify a [`Vulnerability`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    /// The payload that provoked this finding.
    pub payload: Payload,
    /// The request actually sent on the wire.
    pub request: RequestSpec,
    /// The response the target returned.
    pub response: ResponseData,
    /// The validator's verdict on that response.
    pub validation: ValidationResult,
}

/// A single security finding surfaced to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Unique id for this finding.
    pub id: Uuid,
    /// The endpoint this finding was observed on.
    pub endpoint: String,
    /// The parameter name the offending payload was substituted into.
    pub parameter: String,
    /// The kind of weakness this finding represents.
    pub kind: VulnerabilityKind,
    /// How severe this finding is.
    pub severity: Severity,
    /// Confidence this finding is a true positive, in `[0, 1]`.
    pub confidence: f64,
    /// The probe and verdict backing this finding.
    pub evidence: Evidence,
    /// `true` once the finding has been re-executed and reproduced.
    pub reproducible: bool,
}

impl Vulnerability {
    /// Construct a finding with a fresh id, defaulting `reproducible` to
    /// `false` until the orchestrator's re-execution step confirms it.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        parameter: impl Into<String>,
        kind: VulnerabilityKind,
        severity: Severity,
        confidence: f64,
        evidence: Evidence,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            endpoint: endpoint.into(),
            parameter: parameter.into(),
            kind,
            severity,
            confidence,
            evidence,
            reproducible: false,
        }
    }

    /// `true` if this finding falls below the false-positive confidence
    /// threshold used by [`fp_rate`](crate::Vulnerability) aggregation.
    #[must_use]
    pub fn is_low_confidence(&self) -> bool {
        self.confidence < 0.7
    }
}
