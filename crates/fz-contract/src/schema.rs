// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recursive expected-response schema, consulted by the response validator.

use serde::{Deserialize, Serialize};

/// A recognized string format for schema conformance checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaFormat {
    /// An email address.
    Email,
    /// A UUID.
    Uuid,
    /// An ISO-8601 date.
    Date,
    /// A URI.
    Uri,
    /// An IPv4 address.
    Ipv4,
}

/// The primitive (or compound) type a schema node expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPrimitive {
    /// JSON `null`.
    Null,
    /// A boolean.
    Boolean,
    /// An integer or floating-point number.
    Number,
    /// A string.
    String,
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
}

/// A small recursive description of an expected JSON response shape.
///
/// Mirrors a tiny subset of JSON Schema: a primitive type plus optional
/// format/pattern (for strings), required properties + nested schemas (for
/// objects), and an item schema (for arrays).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedSchema {
    /// The primitive type this node expects.
    pub primitive: SchemaPrimitive,
    /// Optional named format, meaningful only when `primitive = String`.
    #[serde(default)]
    pub format: Option<SchemaFormat>,
    /// Optional regex pattern, meaningful only when `primitive = String`.
    #[serde(default)]
    pub pattern: Option<String>,
    /// Property schemas, meaningful only when `primitive = Object`.
    #[serde(default)]
    pub properties: Vec<(String, ExpectedSchema)>,
    /// Names that must be present, meaningful only when `primitive = Object`.
    #[serde(default)]
    pub required: Vec<String>,
    /// Item schema, meaningful only when `primitive = Array`.
    #[serde(default)]
    pub items: Option<Box<ExpectedSchema>>,
}

impl ExpectedSchema {
    /// Construct a bare schema node with no format/pattern/children.
    #[must_use]
    pub fn new(primitive: SchemaPrimitive) -> Self {
        Self {
            primitive,
            format: None,
            pattern: None,
            properties: Vec::new(),
            required: Vec::new(),
            items: None,
        }
    }

    /// Builder: set the string format.
    #[must_use]
    pub fn with_format(mut self, format: SchemaFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Builder: add an object property schema.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, schema: ExpectedSchema) -> Self {
        self.properties.push((name.into(), schema));
        self
    }

    /// Builder: mark property names as required.
    #[must_use]
    pub fn with_required(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set the array item schema.
    #[must_use]
    pub fn with_items(mut self, items: ExpectedSchema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Look up a declared property schema by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ExpectedSchema> {
        self.properties.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }
}
