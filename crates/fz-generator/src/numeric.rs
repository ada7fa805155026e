// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = integer` and `type_tag = number` coverage.

use fz_contract::{Constraints, Payload, PayloadCategory, PayloadValue, TypeTag};

/// Build the full `integer` coverage set for `constraints`.
pub fn generate_integer(constraints: &Constraints) -> Vec<Payload> {
    let mut out = Vec::new();

    for (value, desc) in [
        (0i64, "zero"),
        (1, "positive one"),
        (-1, "negative one"),
        (i32::MIN as i64, "i32::MIN"),
        (i32::MAX as i64, "i32::MAX"),
        (i64::MIN + 1, "i64 safe min"),
        (i64::MAX - 1, "i64 safe max"),
    ] {
        out.push(Payload::new(
            PayloadValue::Int(value),
            TypeTag::Integer,
            PayloadCategory::Boundary,
            desc,
        ).boundary());
    }

    out.extend(constraint_boundaries(constraints, TypeTag::Integer));

    for custom in &constraints.custom_boundaries {
        out.push(
            Payload::new(
                custom.clone(),
                TypeTag::Integer,
                PayloadCategory::CustomBoundary,
                "user-declared custom boundary",
            )
            .boundary(),
        );
    }

    out
}

/// Build the full `number` coverage set for `constraints`.
pub fn generate_number(constraints: &Constraints) -> Vec<Payload> {
    let mut out = Vec::new();

    for (value, desc) in [
        (0.0f64, "zero"),
        (1.0, "positive one"),
        (-1.0, "negative one"),
        (f64::INFINITY, "positive infinity"),
        (f64::NEG_INFINITY, "negative infinity"),
        (f64::NAN, "NaN"),
    ] {
        out.push(
            Payload::new(PayloadValue::Float(value), TypeTag::Number, PayloadCategory::Boundary, desc)
                .boundary(),
        );
    }

    out.extend(constraint_boundaries(constraints, TypeTag::Number));

    for custom in &constraints.custom_boundaries {
        out.push(
            Payload::new(
                custom.clone(),
                TypeTag::Number,
                PayloadCategory::CustomBoundary,
                "user-declared custom boundary",
            )
            .boundary(),
        );
    }

    out
}

/// `min-1, min, max, max+1` derived from declared `min_value`/`max_value`,
/// when present.
fn constraint_boundaries(constraints: &Constraints, type_tag: TypeTag) -> Vec<Payload> {
    let mut out = Vec::new();
    if let Some(min) = constraints.min_value {
        out.push(
            Payload::new(
                float_or_int(min - 1.0, type_tag),
                type_tag,
                PayloadCategory::Boundary,
                "min - 1 (out of range)",
            )
            .boundary()
            .malicious(),
        );
        out.push(
            Payload::new(
                float_or_int(min, type_tag),
                type_tag,
                PayloadCategory::Boundary,
                "declared minimum",
            )
            .boundary(),
        );
    }
    if let Some(max) = constraints.max_value {
        out.push(
            Payload::new(
                float_or_int(max, type_tag),
                type_tag,
                PayloadCategory::Boundary,
                "declared maximum",
            )
            .boundary(),
        );
        out.push(
            Payload::new(
                float_or_int(max + 1.0, type_tag),
                type_tag,
                PayloadCategory::Boundary,
                "max + 1 (out of range)",
            )
            .boundary()
            .malicious(),
        );
    }
    out
}

fn float_or_int(value: f64, type_tag: TypeTag) -> PayloadValue {
    if type_tag == TypeTag::Integer {
        PayloadValue::Int(value as i64)
    } else {
        PayloadValue::Float(value)
    }
}
