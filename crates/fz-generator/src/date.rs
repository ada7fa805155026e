// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = date` coverage.

use fz_contract::{Payload, PayloadCategory, PayloadValue, TypeTag};

/// Build the full `date` coverage set.
pub fn generate() -> Vec<Payload> {
    let mut out = Vec::new();

    out.push(Payload::new(
        PayloadValue::text("2023-02-29"),
        TypeTag::Date,
        PayloadCategory::Boundary,
        "invalid leap-year edge (2023 is not a leap year)",
    ).boundary().malicious());

    out.push(
        Payload::new(
            PayloadValue::text("2024-02-29"),
            TypeTag::Date,
            PayloadCategory::Valid,
            "valid leap-year date",
        ),
    );

    // Coverage calls for a "current" ISO-8601 date; a fixed representative
    // value is used instead of wall-clock time so generation stays
    // deterministic under a fixed seed.
    out.push(Payload::new(
        PayloadValue::text("2026-07-26"),
        TypeTag::Date,
        PayloadCategory::Valid,
        "well-formed current-style ISO-8601 date",
    ));

    for (text, desc) in [
        ("0000-00-00", "zero date"),
        ("2024-13-01", "month 13"),
        ("2024-01-32", "day 32"),
        ("1970-01-01", "epoch"),
        ("not-a-date", "malformed date"),
    ] {
        out.push(
            Payload::new(PayloadValue::text(text), TypeTag::Date, PayloadCategory::Boundary, desc)
                .boundary()
                .malicious(),
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_both_leap_year_cases() {
        let payloads = generate();
        assert!(payloads.iter().any(|p| p.description.contains("invalid leap-year")));
        assert!(payloads.iter().any(|p| p.description.contains("valid leap-year")));
    }
}
