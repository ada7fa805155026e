// SPDX-License-Identifier: MIT OR Apache-2.0
//! Recursive schema conformance checking.

use fz_contract::{ExpectedSchema, SchemaFormat, SchemaPrimitive};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));
static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .case_insensitive(true)
        .build()
        .expect("valid regex")
});
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("valid regex"));
static URI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("valid regex"));
static IPV4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("valid regex"));

/// `true` if `body` conforms to `schema`. A parse failure (body isn't valid
/// JSON when a schema is supplied) counts as non-conformant.
#[must_use]
pub fn conforms(body: Option<&Value>, schema: &ExpectedSchema) -> bool {
    match body {
        Some(value) => check_node(value, schema),
        None => false,
    }
}

fn check_node(value: &Value, schema: &ExpectedSchema) -> bool {
    match schema.primitive {
        SchemaPrimitive::Null => value.is_null(),
        SchemaPrimitive::Boolean => value.is_boolean(),
        SchemaPrimitive::Number => value.is_number(),
        SchemaPrimitive::String => check_string(value, schema),
        SchemaPrimitive::Object => check_object(value, schema),
        SchemaPrimitive::Array => check_array(value, schema),
    }
}

fn check_string(value: &Value, schema: &ExpectedSchema) -> bool {
    let Some(text) = value.as_str() else {
        return false;
    };
    if let Some(format) = schema.format
        && !matches_format(text, format)
    {
        return false;
    }
    if let Some(pattern) = &schema.pattern {
        match Regex::new(pattern) {
            Ok(re) => {
                if !re.is_match(text) {
                    return false;
                }
            }
            Err(e) => {
                tracing::warn!(pattern, error = %e, "contract-declared schema pattern failed to compile");
                return false;
            }
        }
    }
    true
}

fn matches_format(text: &str, format: SchemaFormat) -> bool {
    match format {
        SchemaFormat::Email => EMAIL_RE.is_match(text),
        SchemaFormat::Uuid => UUID_RE.is_match(text),
        SchemaFormat::Date => DATE_RE.is_match(text),
        SchemaFormat::Uri => URI_RE.is_match(text),
        SchemaFormat::Ipv4 => IPV4_RE.is_match(text),
    }
}

fn check_object(value: &Value, schema: &ExpectedSchema) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    if schema.required.iter().any(|name| !obj.contains_key(name)) {
        return false;
    }
    for (name, prop_schema) in &schema.properties {
        if let Some(prop_value) = obj.get(name)
            && !check_node(prop_value, prop_schema)
        {
            return false;
        }
    }
    true
}

fn check_array(value: &Value, schema: &ExpectedSchema) -> bool {
    let Some(items) = value.as_array() else {
        return false;
    };
    match &schema.items {
        Some(item_schema) => items.iter().all(|item| check_node(item, item_schema)),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fz_contract::SchemaPrimitive;
    use serde_json::json;

    #[test]
    fn missing_required_field_fails() {
        let schema = ExpectedSchema::new(SchemaPrimitive::Object).with_required(["id"]);
        assert!(!conforms(Some(&json!({"name": "x"})), &schema));
    }

    #[test]
    fn present_required_field_passes() {
        let schema = ExpectedSchema::new(SchemaPrimitive::Object).with_required(["id"]);
        assert!(conforms(Some(&json!({"id": 1})), &schema));
    }

    #[test]
    fn email_format_rejects_malformed_address() {
        let schema = ExpectedSchema::new(SchemaPrimitive::String).with_format(SchemaFormat::Email);
        assert!(!conforms(Some(&json!("not-an-email")), &schema));
        assert!(conforms(Some(&json!("a@b.com")), &schema));
    }

    #[test]
    fn array_items_are_recursively_checked() {
        let item = ExpectedSchema::new(SchemaPrimitive::Object).with_required(["status"]);
        let schema = ExpectedSchema::new(SchemaPrimitive::Array).with_items(item);
        assert!(conforms(Some(&json!([{"status": "ok"}, {"status": "ok"}])), &schema));
        assert!(!conforms(Some(&json!([{"status": "ok"}, {}])), &schema));
    }

    #[test]
    fn missing_body_is_nonconformant() {
        let schema = ExpectedSchema::new(SchemaPrimitive::Object);
        assert!(!conforms(None, &schema));
    }
}
