// SPDX-License-Identifier: MIT OR Apache-2.0
//! Normalized transport response and captured baselines.

use crate::headers::HeaderMultiMap;
use serde::{Deserialize, Serialize};

/// A response body, either raw bytes or already-decoded JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum Body {
    /// Raw, possibly non-UTF8 bytes.
    Bytes(Vec<u8>),
    /// Successfully decoded JSON.
    Json(serde_json::Value),
}

impl Body {
    /// Byte length of this body, regardless of encoding.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::Bytes(b) => b.len(),
            Self::Json(v) => serde_json::to_vec(v).map(|b| b.len()).unwrap_or(0),
        }
    }

    /// Render as text for regex/signature scanning. Non-UTF8 bytes are
    /// lossily decoded rather than failing the scan outright.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Self::Json(v) => v.to_string(),
        }
    }

    /// Return the decoded JSON value, if this body is JSON.
    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            Self::Bytes(_) => None,
        }
    }
}

/// A normalized HTTP response, as returned by a [transport](crate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseData {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, lowercase names, duplicates preserved.
    pub headers: HeaderMultiMap,
    /// The response body.
    pub body: Body,
    /// Body size in bytes (redundant with `body.size_bytes()`, cached here
    /// since callers check it frequently during anomaly detection).
    pub size_bytes: usize,
    /// Wall-clock time the request took to complete.
    pub elapsed_ms: u64,
}

impl ResponseData {
    /// Construct a response, computing `size_bytes` from the body.
    #[must_use]
    pub fn new(status: u16, headers: HeaderMultiMap, body: Body, elapsed_ms: u64) -> Self {
        let size_bytes = body.size_bytes();
        Self {
            status,
            headers,
            body,
            size_bytes,
            elapsed_ms,
        }
    }
}

/// A captured reference response used for deviation anomaly detection.
///
/// Per design decision, a [`Baseline`] is a single captured sample supplied
/// by the caller before a session starts; the orchestrator never recaptures
/// or medians it mid-session.
pub type Baseline = ResponseData;
