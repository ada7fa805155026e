// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = csrf` coverage.

use fz_contract::{Payload, PayloadCategory, PayloadValue, TypeTag};

/// A fixed, non-random 32-byte hex sample. Determinism forbids drawing this
/// from an RNG; the value only needs to *look* like a real CSRF token.
const SAMPLE_TOKEN_HEX: &str = "3f2a9c7e1b4d6085a9c2e7f1b3d4a6c80f1e2d3c4b5a69788796a5b4c3d2e1f0";

/// Build the full `csrf` coverage set.
pub fn generate() -> Vec<Payload> {
    let mut out = Vec::new();

    out.push(Payload::new(
        PayloadValue::text(SAMPLE_TOKEN_HEX),
        TypeTag::Csrf,
        PayloadCategory::Valid,
        "well-formed 32-byte hex token",
    ));

    out.push(
        Payload::new(
            PayloadValue::text(""),
            TypeTag::Csrf,
            PayloadCategory::Boundary,
            "empty CSRF token",
        )
        .boundary()
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::text("not-a-token"),
            TypeTag::Csrf,
            PayloadCategory::Attack,
            "invalid literal token",
        )
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::text(SAMPLE_TOKEN_HEX.repeat(10)),
            TypeTag::Csrf,
            PayloadCategory::Boundary,
            "oversized CSRF token",
        )
        .boundary()
        .malicious(),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_sample_is_64_hex_chars() {
        let payloads = generate();
        let valid = payloads
            .iter()
            .find(|p| p.category == PayloadCategory::Valid)
            .unwrap();
        assert_eq!(valid.value.effective_length(), 64);
        assert!(!valid.malicious);
    }
}
