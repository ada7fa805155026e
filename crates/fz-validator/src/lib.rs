// SPDX-License-Identifier: MIT OR Apache-2.0
//! Response classification: fuses status class, schema conformance,
//! error-signature matching, and baseline-deviation anomaly detection into
//! a single [`ValidationResult`] with a monotone confidence score.

mod anomalies;
mod confidence;
mod schema;
mod signatures;

pub use signatures::scan as scan_signatures;

use fz_contract::{Baseline, ExpectedSchema, ResponseData, StatusClass, ValidationResult};

/// Classify `response` against an optional `expected_schema` and `baseline`.
#[must_use]
pub fn validate(
    response: &ResponseData,
    expected_schema: Option<&ExpectedSchema>,
    baseline: Option<&Baseline>,
) -> ValidationResult {
    let status_class = StatusClass::classify(response.status);

    let schema_compliant = match expected_schema {
        Some(schema) => schema::conforms(response.body.as_json(), schema),
        None => true,
    };

    let error_signatures = signatures::scan(&response.body.as_text());

    let mut anomalies = anomalies::intrinsic(response);
    if let Some(baseline) = baseline {
        anomalies.extend(anomalies::against_baseline(response, baseline));
    }

    let confidence_score = confidence::score(&status_class, schema_compliant, &error_signatures, &anomalies);
    let is_valid = confidence::is_valid(&status_class, schema_compliant, &error_signatures, &anomalies);

    ValidationResult {
        is_valid,
        confidence: confidence_score,
        status_class,
        schema_compliant,
        anomalies,
        error_signatures,
    }
}
