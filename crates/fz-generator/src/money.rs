// SPDX-License-Identifier: MIT OR Apache-2.0
//! `type_tag = money` coverage.

use fz_contract::{Constraints, Payload, PayloadCategory, PayloadValue, TypeTag};

/// Build the full `money` coverage set.
pub fn generate(constraints: &Constraints) -> Vec<Payload> {
    let mut out = Vec::new();

    out.push(Payload::new(
        PayloadValue::text("0.01"),
        TypeTag::Money,
        PayloadCategory::Boundary,
        "minimum unit",
    ).boundary());

    let max_value = constraints.max_value.unwrap_or(1_000_000_000.0);
    out.push(
        Payload::new(
            PayloadValue::text(format!("{max_value:.2}")),
            TypeTag::Money,
            PayloadCategory::Boundary,
            "maximum declared value",
        )
        .boundary(),
    );

    for (text, desc) in [
        ("-100.00", "negative amount"),
        ("0.001", "fractional-micro amount"),
        ("NaN", "NaN literal"),
        ("Infinity", "Infinity literal"),
        ("1e10", "scientific notation"),
        ("$100.00", "currency-prefixed string"),
    ] {
        out.push(
            Payload::new(
                PayloadValue::text(text),
                TypeTag::Money,
                PayloadCategory::Boundary,
                desc,
            )
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
    fn negative_amount_is_malicious() {
        let payloads = generate(&Constraints::default());
        let neg = payloads
            .iter()
            .find(|p| p.description.contains("negative"))
            .unwrap();
        assert!(neg.malicious);
    }
}
