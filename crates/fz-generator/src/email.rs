// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = email` coverage.

use fz_contract::{Payload, PayloadCategory, PayloadValue, TypeTag};

const VALID: &[&str] = &[
    "user@example.com",
    "first.last+tag@example.com",
    "user@mail.subdomain.example.com",
    "üñîçødé@example.com",
];

const INVALID: &[&str] = &[
    "@x.com",
    "x@",
    "user..name@example.com",
    "not-an-email",
];

/// Build the full `email` coverage set.
pub fn generate() -> Vec<Payload> {
    let mut out = Vec::new();

    for addr in VALID {
        out.push(Payload::new(
            PayloadValue::text(*addr),
            TypeTag::Email,
            PayloadCategory::Valid,
            format!("valid email shape: {addr}"),
        ));
    }

    for addr in INVALID {
        out.push(
            Payload::new(
                PayloadValue::text(*addr),
                TypeTag::Email,
                PayloadCategory::Boundary,
                format!("invalid email shape: {addr}"),
            )
            .boundary()
            .malicious(),
        );
    }

    let over_rfc_length = format!("{}@example.com", "a".repeat(250));
    out.push(
        Payload::new(
            PayloadValue::text(over_rfc_length),
            TypeTag::Email,
            PayloadCategory::Boundary,
            "over-RFC-length email",
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
    fn valid_shapes_are_not_malicious() {
        let payloads = generate();
        assert!(payloads
            .iter()
            .filter(|p| p.category == PayloadCategory::Valid)
            .all(|p| !p.malicious));
    }

    #[test]
    fn invalid_shapes_are_boundary_and_malicious() {
        let payloads = generate();
        let at_x = payloads.iter().find(|p| p.description.contains("@x.com")).unwrap();
        assert!(at_x.boundary);
        assert!(at_x.malicious);
    }
}
