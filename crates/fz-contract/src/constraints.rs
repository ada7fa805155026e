// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-parameter constraints consulted by the semantic generator.

use crate::value::PayloadValue;
use serde::{Deserialize, Serialize};

/// Boundary and format constraints declared for a [`crate::Parameter`].
///
/// Every field is optional: the generator falls back to sensible defaults
/// for any constraint the contract omits (e.g. a default max string length).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Constraints {
    /// Minimum string length, inclusive.
    #[serde(default)]
    pub min_length: Option<usize>,
    /// Maximum string length, inclusive.
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Minimum numeric value, inclusive.
    #[serde(default)]
    pub min_value: Option<f64>,
    /// Maximum numeric value, inclusive.
    #[serde(default)]
    pub max_value: Option<f64>,
    /// Allowed members for `type_tag = enum`.
    #[serde(default)]
    pub enum_members: Vec<String>,
    /// Extra boundary values the contract author wants tested explicitly,
    /// beyond the generator's built-in boundary ladder.
    #[serde(default)]
    pub custom_boundaries: Vec<PayloadValue>,
    /// A format hint, e.g. `"uuid"`, passed through to validation/generation
    /// where it narrows which shape a `string` is expected to take.
    #[serde(default)]
    pub format_hint: Option<String>,
}

impl Constraints {
    /// Effective maximum string length, defaulting to 255 when unset.
    #[must_use]
    pub fn effective_max_length(&self) -> usize {
        self.max_length.unwrap_or(255)
    }

    /// Effective minimum string length, defaulting to 0 when unset.
    #[must_use]
    pub fn effective_min_length(&self) -> usize {
        self.min_length.unwrap_or(0)
    }
}
