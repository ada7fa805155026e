// SPDX-License-Identifier: MIT OR Apache-2.0
//! Generated payload values and their classification metadata.

use crate::types::TypeTag;
use crate::value::PayloadValue;
use serde::{Deserialize, Serialize};

/// The generation strategy that produced a [`Payload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadCategory {
    /// A well-formed value respecting its declared `type_tag`.
    Valid,
    /// A value sitting on a declared constraint's edge.
    Boundary,
    /// A known injection pattern (SQL, script, template, path traversal, ...).
    Injection,
    /// Unicode/emoji/non-Latin stress input.
    Unicode,
    /// Derived from a seed value by the mutation ladder.
    Mutation,
    /// An explicit `null` / absent value.
    Null,
    /// A user-supplied custom boundary value from the contract.
    CustomBoundary,
    /// A deliberately hostile value not covered by `Injection`
    /// (e.g. the JWT none-algorithm variant, oversized CSRF tokens).
    Attack,
    /// A file-upload-shaped value (path traversal filename, disguised MIME).
    Upload,
    /// A pagination/navigation-shaped value (huge page number, negative limit).
    Navigation,
}

impl PayloadCategory {
    /// `true` for categories that, by definition, deliberately violate
    /// their declared `type_tag`.
    #[must_use]
    pub fn may_violate_type(&self) -> bool {
        !matches!(self, Self::Valid)
    }
}

/// A single generated test input plus the metadata needed to classify the
/// response it provokes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    /// The value to send.
    pub value: PayloadValue,
    /// The semantic type this payload targets.
    pub type_tag: TypeTag,
    /// How this payload was produced.
    pub category: PayloadCategory,
    /// `true` if the value sits on the inclusive or exclusive edge of a
    /// declared constraint.
    pub boundary: bool,
    /// `true` if this value is expected to provoke unsafe handling — see
    /// the marking rule in `fz-generator`.
    pub malicious: bool,
    /// A short human-readable description, surfaced in findings.
    pub description: String,
}

impl Payload {
    /// Construct a payload, defaulting `boundary`/`malicious` to `false`.
    #[must_use]
    pub fn new(
        value: PayloadValue,
        type_tag: TypeTag,
        category: PayloadCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            value,
            type_tag,
            category,
            boundary: false,
            malicious: false,
            description: description.into(),
        }
    }

    /// Builder: mark this payload as sitting on a constraint boundary.
    #[must_use]
    pub fn boundary(mut self) -> Self {
        self.boundary = true;
        self
    }

    /// Builder: mark this payload as malicious.
    #[must_use]
    pub fn malicious(mut self) -> Self {
        self.malicious = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_category_cannot_violate_type() {
        assert!(!PayloadCategory::Valid.may_violate_type());
        assert!(PayloadCategory::Injection.may_violate_type());
    }

    #[test]
    fn builders_set_flags() {
        let p = Payload::new(
            PayloadValue::text("x"),
            TypeTag::String,
            PayloadCategory::Boundary,
            "max length",
        )
        .boundary()
        .malicious();
        assert!(p.boundary);
        assert!(p.malicious);
    }
}
