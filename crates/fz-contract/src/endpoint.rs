// SPDX-License-Identifier: MIT OR Apache-2.0
//! Endpoints, parameters, and the contract that groups them.

use crate::constraints::Constraints;
use crate::response::Baseline;
use crate::schema::ExpectedSchema;
use crate::types::TypeTag;
use serde::{Deserialize, Serialize};

/// An authentication role name, resolved to credentials by an
/// `AuthAdapter` implementation (see the `fz-auth` crate).
pub type Role = String;

/// Where a parameter is placed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// A query string parameter.
    Query,
    /// A `{name}` path-template substitution.
    Path,
    /// An HTTP header.
    Header,
    /// A field in a JSON request body.
    Body,
}

/// A single parameter accepted by an [`Endpoint`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name (query key, path placeholder, header name, or body field).
    pub name: String,
    /// Where this parameter is placed on the wire.
    pub location: Location,
    /// The semantic type of this parameter's value.
    pub type_tag: TypeTag,
    /// Whether the target rejects requests omitting this parameter.
    pub required: bool,
    /// Boundary/format constraints used by the generator.
    #[serde(default)]
    pub constraints: Constraints,
}

/// The HTTP method an [`Endpoint`] is reached with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
    /// `HEAD`
    Head,
    /// `OPTIONS`
    Options,
}

impl HttpMethod {
    /// The canonical uppercase method name, as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

/// A single API endpoint, as described by the contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Stable identifier, unique within a [`Contract`].
    pub id: String,
    /// The path template, e.g. `/api/users/{id}`.
    pub path: String,
    /// The HTTP method this endpoint is reached with.
    pub method: HttpMethod,
    /// The parameters this endpoint accepts.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// The response shape expected on success.
    #[serde(default)]
    pub expected_schema: Option<ExpectedSchema>,
    /// The role required to call this endpoint, if any.
    #[serde(default)]
    pub auth_role: Option<Role>,
    /// A captured reference response for deviation anomaly detection.
    #[serde(default)]
    pub baseline: Option<Baseline>,
}

/// An immutable description of every endpoint a fuzz session will probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contract {
    /// The endpoints to fuzz, in the order they should be scheduled.
    pub endpoints: Vec<Endpoint>,
}

impl Contract {
    /// Look up an endpoint by id.
    #[must_use]
    pub fn endpoint(&self, id: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_endpoint() -> Endpoint {
        Endpoint {
            id: "ep-1".into(),
            path: "/api/users/{id}".into(),
            method: HttpMethod::Get,
            parameters: vec![Parameter {
                name: "id".into(),
                location: Location::Path,
                type_tag: TypeTag::Id,
                required: true,
                constraints: Constraints::default(),
            }],
            expected_schema: None,
            auth_role: None,
            baseline: None,
        }
    }

    #[test]
    fn contract_looks_up_by_id() {
        let contract = Contract {
            endpoints: vec![sample_endpoint()],
        };
        assert!(contract.endpoint("ep-1").is_some());
        assert!(contract.endpoint("missing").is_none());
    }

    #[test]
    fn method_as_str_is_uppercase() {
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    }

    #[test]
    fn empty_parameter_list_is_a_valid_endpoint() {
        let mut ep = sample_endpoint();
        ep.parameters.clear();
        assert!(ep.parameters.is_empty());
    }
}
