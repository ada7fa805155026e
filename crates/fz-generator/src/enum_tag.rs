// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = enum` coverage.

use fz_contract::{Constraints, Payload, PayloadCategory, PayloadValue, TypeTag};

/// Build the full `enum` coverage set for `constraints.enum_members`.
pub fn generate(constraints: &Constraints) -> Vec<Payload> {
    let mut out = Vec::new();

    for member in &constraints.enum_members {
        out.push(Payload::new(
            PayloadValue::text(member.clone()),
            TypeTag::Enum,
            PayloadCategory::Valid,
            format!("declared enum member: {member}"),
        ));
    }

    for (text, desc) in [
        ("<script>alert(1)</script>", "out-of-enum script literal"),
        ("", "out-of-enum empty string"),
        ("null", "out-of-enum null literal"),
        ("__proto__", "out-of-enum prototype-pollution-shaped member"),
    ] {
        out.push(
            Payload::new(PayloadValue::text(text), TypeTag::Enum, PayloadCategory::Boundary, desc)
                .boundary()
                .malicious(),
        );
    }

    out
}
