// SPDX-License-Identifier: MIT OR Apache-2.0
//! Semantic parameter types recognized by the generator and validator.

use serde::{Deserialize, Serialize};

/// The semantic meaning of a parameter, used to select payload coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTag {
    /// Free-form text.
    String,
    /// A whole number.
    Integer,
    /// A floating point number.
    Number,
    /// An email address.
    Email,
    /// A JSON Web Token.
    Jwt,
    /// A resource identifier (numeric or opaque).
    Id,
    /// A CSRF token.
    Csrf,
    /// A monetary amount.
    Money,
    /// A date or timestamp.
    Date,
    /// An uploaded file.
    File,
    /// A pagination cursor (page number or limit).
    Pagination,
    /// One of a fixed set of string members.
    Enum,
    /// Anything not covered above.
    Other,
}

impl TypeTag {
    /// Short lowercase name, matching the serde representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Email => "email",
            Self::Jwt => "jwt",
            Self::Id => "id",
            Self::Csrf => "csrf",
            Self::Money => "money",
            Self::Date => "date",
            Self::File => "file",
            Self::Pagination => "pagination",
            Self::Enum => "enum",
            Self::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serde_name() {
        assert_eq!(TypeTag::Jwt.as_str(), "jwt");
        let json = serde_json::to_string(&TypeTag::Jwt).unwrap();
        assert_eq!(json, "\"jwt\"");
    }
}
