// SPDX-License-Identifier: MIT OR Apache-2.0
//! The normalized request a transport implementation sends on the wire.

use crate::endpoint::HttpMethod;
use crate::headers::HeaderMultiMap;
use serde::{Deserialize, Serialize};

/// A fully-substituted request, ready to hand to a `Transport`.
///
/// The orchestrator builds one of these per probe by substituting a
/// [`crate::Payload`] at a parameter's declared
/// [`crate::Location`](crate::Location) into the endpoint's path template,
/// query string, headers, or JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestSpec {
    /// The HTTP method to use.
    pub method: HttpMethod,
    /// Fully-substituted URL, including query string.
    pub url: String,
    /// Request headers, including any auth decoration.
    pub headers: HeaderMultiMap,
    /// JSON request body, when the probed parameter's location is `body`.
    #[serde(default)]
    pub body: Option<serde_json::Value>,
}

impl RequestSpec {
    /// Construct a request with no headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMultiMap::new(),
            body: None,
        }
    }

    /// Builder: attach a JSON body.
    #[must_use]
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Builder: attach headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMultiMap) -> Self {
        self.headers = headers;
        self
    }
}
