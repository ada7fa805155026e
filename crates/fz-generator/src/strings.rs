// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = string` coverage.

use crate::patterns::{contains_injection_pattern, INJECTION_PATTERNS, UNICODE_STRESS};
use fz_contract::{Constraints, Payload, PayloadCategory, PayloadValue, TypeTag};

fn filler(len: usize) -> String {
    "a".repeat(len)
}

/// Build the full `string` coverage set for `constraints`.
pub fn generate(constraints: &Constraints) -> Vec<Payload> {
    let min_len = constraints.effective_min_length();
    let max_len = constraints.effective_max_length();
    let mut out = Vec::new();

    out.push(Payload::new(
        PayloadValue::text(""),
        TypeTag::String,
        PayloadCategory::Boundary,
        "empty string",
    ).boundary());

    out.push(
        Payload::new(
            PayloadValue::text(filler(min_len)),
            TypeTag::String,
            PayloadCategory::Boundary,
            "minimum-length string",
        )
        .boundary(),
    );

    out.push(
        Payload::new(
            PayloadValue::text(filler(max_len)),
            TypeTag::String,
            PayloadCategory::Boundary,
            "maximum-length string",
        )
        .boundary(),
    );

    out.push(
        Payload::new(
            PayloadValue::text(filler(max_len + 1)),
            TypeTag::String,
            PayloadCategory::Boundary,
            "over-limit string (max_length + 1)",
        )
        .boundary()
        .malicious(),
    );

    for pattern in INJECTION_PATTERNS {
        out.push(
            Payload::new(
                PayloadValue::text(*pattern),
                TypeTag::String,
                PayloadCategory::Injection,
                format!("injection pattern: {pattern:?}"),
            )
            .malicious(),
        );
    }

    for sample in UNICODE_STRESS {
        out.push(Payload::new(
            PayloadValue::text(*sample),
            TypeTag::String,
            PayloadCategory::Unicode,
            format!("unicode stress: {sample}"),
        ));
    }

    for custom in &constraints.custom_boundaries {
        out.push(
            Payload::new(
                custom.clone(),
                TypeTag::String,
                PayloadCategory::CustomBoundary,
                "user-declared custom boundary",
            )
            .boundary(),
        );
    }

    out
}

/// `true` if `value` should be marked malicious per the global marking rule,
/// independent of its generation category (used by the mutation ladder).
#[must_use]
pub fn is_malicious_text(value: &str) -> bool {
    contains_injection_pattern(value)
}
