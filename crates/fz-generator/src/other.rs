// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = other` coverage — anything with no more specific generator.

use fz_contract::{Payload, PayloadCategory, PayloadValue, TypeTag};

/// Build the full `other` coverage set.
pub fn generate() -> Vec<Payload> {
    vec![
        Payload::new(PayloadValue::Null, TypeTag::Other, PayloadCategory::Null, "explicit null"),
        Payload::new(
            PayloadValue::text("undefined"),
            TypeTag::Other,
            PayloadCategory::Null,
            "undefined-shaped literal",
        ),
    ]
}
