// SPDX-License-Identifier: MIT OR Apache-2.0
//! Mutation ladder: derive new payloads from a seed value at increasing
//! intensity.

use crate::patterns::INJECTION_PATTERNS;
use fz_contract::{Payload, PayloadCategory, PayloadValue, TypeTag};

const MID_THRESHOLD: f64 = 0.34;
const HIGH_THRESHOLD: f64 = 0.67;

/// Derive mutations of `seed` at the given `intensity`. Lower tiers are
/// always included once their threshold is crossed — `intensity = 0.8`
/// yields low, mid, *and* high mutations, not high alone.
pub fn mutate(seed: &PayloadValue, type_tag: TypeTag, intensity: f64) -> Vec<Payload> {
    let intensity = intensity.clamp(0.0, 1.0);
    let mut out = Vec::new();

    if intensity <= 0.0 {
        return out;
    }

    low_tier(seed, type_tag, &mut out);

    if intensity >= MID_THRESHOLD {
        mid_tier(seed, type_tag, &mut out);
    }

    if intensity >= HIGH_THRESHOLD {
        high_tier(seed, type_tag, &mut out);
    }

    out
}

fn low_tier(seed: &PayloadValue, type_tag: TypeTag, out: &mut Vec<Payload>) {
    match seed {
        PayloadValue::Text(s) => {
            out.push(mutation(flip_case(s), type_tag, "case-flip mutation", false));
            out.push(mutation(s.repeat(2), type_tag, "string-doubling mutation", false));
        }
        PayloadValue::Int(i) => {
            out.push(mutation(i.wrapping_add(1), type_tag, "increment mutation", false));
        }
        PayloadValue::Float(f) => {
            out.push(mutation(f + 1.0, type_tag, "increment mutation", false));
        }
        _ => {}
    }
}

fn mid_tier(seed: &PayloadValue, type_tag: TypeTag, out: &mut Vec<Payload>) {
    match seed {
        PayloadValue::Int(i) => {
            out.push(mutation(-i, type_tag, "sign-flip mutation", true));
            out.push(mutation(i.saturating_mul(1000), type_tag, "scale-up mutation", true));
        }
        PayloadValue::Float(f) => {
            out.push(mutation(-f, type_tag, "sign-flip mutation", true));
            out.push(mutation(f * 1000.0, type_tag, "scale-up mutation", true));
        }
        PayloadValue::Text(s) if type_tag == TypeTag::Email && s.contains('@') => {
            if let Some((local, domain)) = s.split_once('@') {
                let duplicated = format!("{local}{local}@{domain}");
                out.push(mutation(duplicated, type_tag, "local-part duplication mutation", true));
            }
        }
        _ => {}
    }
}

fn high_tier(seed: &PayloadValue, type_tag: TypeTag, out: &mut Vec<Payload>) {
    if let PayloadValue::Text(s) = seed {
        for pattern in INJECTION_PATTERNS.iter().take(3) {
            out.push(mutation(
                format!("{s}{pattern}"),
                type_tag,
                format!("injection-suffix mutation: {pattern:?}"),
                true,
            ));
        }
        out.push(mutation(
            format!("{s}../../../../etc/passwd"),
            type_tag,
            "path-traversal-suffix mutation",
            true,
        ));
    }
}

fn flip_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                c.to_uppercase().next().unwrap_or(c)
            }
        })
        .collect()
}

fn mutation(
    value: impl Into<PayloadValue>,
    type_tag: TypeTag,
    description: impl Into<String>,
    malicious: bool,
) -> Payload {
    let payload = Payload::new(value.into(), type_tag, PayloadCategory::Mutation, description);
    if malicious {
        payload.malicious()
    } else {
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_intensity_only_yields_low_tier() {
        let seed = PayloadValue::text("hello");
        let muts = mutate(&seed, TypeTag::String, 0.1);
        assert_eq!(muts.len(), 2);
        assert!(muts.iter().all(|p| !p.malicious));
    }

    #[test]
    fn high_intensity_is_cumulative() {
        let seed = PayloadValue::text("hello");
        let muts = mutate(&seed, TypeTag::String, 0.9);
        assert!(muts.len() > 2);
        assert!(muts.iter().any(|p| p.description.contains("case-flip")));
        assert!(muts.iter().any(|p| p.description.contains("injection-suffix")));
    }

    #[test]
    fn zero_intensity_yields_nothing() {
        let seed = PayloadValue::Int(5);
        assert!(mutate(&seed, TypeTag::Integer, 0.0).is_empty());
    }

    #[test]
    fn email_local_part_duplication_at_mid_tier() {
        let seed = PayloadValue::text("user@example.com");
        let muts = mutate(&seed, TypeTag::Email, 0.5);
        assert!(muts.iter().any(|p| p.description.contains("local-part duplication")));
    }
}
