// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Error taxonomy for the contract-aware HTTP fuzzer.
//!
//! The taxonomy is deliberately small and maps 1:1 onto the propagation
//! policy described in the design: `ConfigInvalid` and explicit cancellation
//! are the only kinds that ever abort a session. Everything else is
//! recorded against an endpoint (a failure count or a skip) and the session
//! continues.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Category of error a fuzzer operation can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The contract or budget configuration is malformed. Fatal at session start.
    ConfigInvalid,
    /// A connection or timeout failure talking to the target. Never aborts a session.
    TransportFailure,
    /// The auth resolver could not produce a context for a required role.
    AuthUnavailable,
    /// The response body could not be used for validation (e.g. undecodable).
    ValidationError,
    /// Not really an error: a terminal budget-exhausted state.
    BudgetExhausted,
    /// Not really an error: the session was judged unhealthy and halted new work.
    Unhealthy,
    /// An I/O operation failed (reading a contract or config file).
    Io,
    /// JSON or TOML (de)serialization failed.
    Serialization,
    /// An unexpected internal invariant was violated.
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code, e.g. `"FZ-CONFIG-INVALID"`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigInvalid => "FZ-CONFIG-INVALID",
            Self::TransportFailure => "FZ-TRANSPORT-FAILURE",
            Self::AuthUnavailable => "FZ-AUTH-UNAVAILABLE",
            Self::ValidationError => "FZ-VALIDATION-ERROR",
            Self::BudgetExhausted => "FZ-BUDGET-EXHAUSTED",
            Self::Unhealthy => "FZ-UNHEALTHY",
            Self::Io => "FZ-IO",
            Self::Serialization => "FZ-SERIALIZATION",
            Self::Internal => "FZ-INTERNAL",
        }
    }

    /// `true` for the only two kinds that abort an entire session rather
    /// than being recorded against a single endpoint.
    #[must_use]
    pub fn aborts_session(&self) -> bool {
        matches!(self, Self::ConfigInvalid)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A rich error value: a catalog [`ErrorKind`], a human message, optional
/// structured context, and an optional source error.
pub struct FuzzError {
    /// The taxonomy kind.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Arbitrary key-value context (deterministic ordering for reproducibility).
    pub context: BTreeMap<String, String>,
    /// Optional underlying cause.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl FuzzError {
    /// Start building a [`FuzzError`] of the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: BTreeMap::new(),
            source: None,
        }
    }

    /// Add a key-value context entry.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attach an underlying source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convenience constructor for [`ErrorKind::TransportFailure`].
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TransportFailure, message)
    }

    /// Convenience constructor for [`ErrorKind::ConfigInvalid`].
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }
}

impl fmt::Display for FuzzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.code(), self.message)?;
        if !self.context.is_empty() {
            write!(f, " (")?;
            let mut first = true;
            for (k, v) in &self.context {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{k}={v}")?;
                first = false;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FuzzError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("context", &self.context)
            .field("source", &self.source.as_ref().map(|e| e.to_string()))
            .finish()
    }
}

impl std::error::Error for FuzzError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Convenience result type for fuzzer operations.
pub type FuzzResult<T> = Result<T, FuzzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorKind::ConfigInvalid.code(), "FZ-CONFIG-INVALID");
        assert_eq!(ErrorKind::BudgetExhausted.code(), "FZ-BUDGET-EXHAUSTED");
    }

    #[test]
    fn only_config_invalid_aborts_session() {
        assert!(ErrorKind::ConfigInvalid.aborts_session());
        for kind in [
            ErrorKind::TransportFailure,
            ErrorKind::AuthUnavailable,
            ErrorKind::ValidationError,
            ErrorKind::BudgetExhausted,
            ErrorKind::Unhealthy,
            ErrorKind::Io,
            ErrorKind::Serialization,
            ErrorKind::Internal,
        ] {
            assert!(!kind.aborts_session(), "{kind:?} should not abort a session");
        }
    }

    #[test]
    fn display_includes_context() {
        let e = FuzzError::transport("connection refused").with_context("endpoint", "ep-1");
        let s = e.to_string();
        assert!(s.contains("FZ-TRANSPORT-FAILURE"));
        assert!(s.contains("endpoint=ep-1"));
    }

    #[test]
    fn debug_redacts_source_to_string() {
        let inner = std::io::Error::other("boom");
        let e = FuzzError::new(ErrorKind::Io, "read failed").with_source(inner);
        let dbg = format!("{e:?}");
        assert!(dbg.contains("boom"));
    }
}
