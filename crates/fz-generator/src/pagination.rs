// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = pagination` coverage.

use fz_contract::{Payload, PayloadCategory, PayloadValue, TypeTag};

/// Build the full `pagination` coverage set.
pub fn generate() -> Vec<Payload> {
    let mut out = Vec::new();

    out.push(Payload::new(
        PayloadValue::Int(1),
        TypeTag::Pagination,
        PayloadCategory::Valid,
        "first page",
    ));

    out.push(
        Payload::new(
            PayloadValue::Int(-1),
            TypeTag::Pagination,
            PayloadCategory::Navigation,
            "negative page/limit",
        )
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::Int(0),
            TypeTag::Pagination,
            PayloadCategory::Navigation,
            "zero limit",
        )
        .boundary()
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::Int(i64::MAX),
            TypeTag::Pagination,
            PayloadCategory::Navigation,
            "huge page number",
        )
        .boundary()
        .malicious(),
    );

    out.push(
        Payload::new(
            PayloadValue::text("not-a-number"),
            TypeTag::Pagination,
            PayloadCategory::Navigation,
            "non-numeric page",
        )
        .malicious(),
    );

    out
}
