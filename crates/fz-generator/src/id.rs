// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = id` coverage.

use crate::patterns::INJECTION_PATTERNS;
use fz_contract::{Payload, PayloadCategory, PayloadValue, TypeTag};

/// Build the full `id` coverage set.
pub fn generate() -> Vec<Payload> {
    let mut out = Vec::new();

    out.push(Payload::new(
        PayloadValue::Int(1),
        TypeTag::Id,
        PayloadCategory::Valid,
        "ordinary numeric id",
    ));

    out.push(
        Payload::new(PayloadValue::Int(0), TypeTag::Id, PayloadCategory::Boundary, "zero id")
            .boundary(),
    );

    out.push(
        Payload::new(
            PayloadValue::Int(-1),
            TypeTag::Id,
            PayloadCategory::Boundary,
            "negative id",
        )
        .boundary()
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::Int(i64::MAX),
            TypeTag::Id,
            PayloadCategory::Boundary,
            "oversized id",
        )
        .boundary()
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::text("not-a-number"),
            TypeTag::Id,
            PayloadCategory::Boundary,
            "non-numeric id",
        )
        .boundary()
        .malicious(),
    );

    for pattern in INJECTION_PATTERNS {
        out.push(
            Payload::new(
                PayloadValue::text(*pattern),
                TypeTag::Id,
                PayloadCategory::Injection,
                format!("injection-laced id: {pattern:?}"),
            )
            .malicious(),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_injection_laced_variants() {
        let payloads = generate();
        assert!(payloads
            .iter()
            .filter(|p| p.category == PayloadCategory::Injection)
            .count()
            >= INJECTION_PATTERNS.len());
    }
}
