// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Role-to-credential resolution.
//!
//! One primary async operation (`with_role`) plus an identity/capability
//! query (`supports_role`). A missing role is not fatal — the orchestrator
//! skips the affected endpoint and records `skipped: auth_unavailable`
//! rather than aborting the session.

use async_trait::async_trait;
use fz_contract::{HeaderMultiMap, Role};
use fz_error::FuzzError;

/// Credentials to attach to an outgoing probe for a resolved role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    /// `Authorization: Bearer <token>`, when the role uses bearer auth.
    pub bearer_token: Option<String>,
    /// Cookie headers to attach, when the role uses session cookies.
    pub cookies: Vec<(String, String)>,
    /// A CSRF token to attach as a header or body field, when required.
    pub csrf_token: Option<String>,
}

impl AuthContext {
    /// Decorate `headers` with this context's bearer token and cookies.
    pub fn apply_to_headers(&self, headers: &mut HeaderMultiMap) {
        if let Some(token) = &self.bearer_token {
            headers.push("authorization", format!("Bearer {token}"));
        }
        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("; ");
            headers.push("cookie", cookie_header);
        }
        if let Some(csrf) = &self.csrf_token {
            headers.push("x-csrf-token", csrf.clone());
        }
    }
}

/// Resolves a [`Role`] to an [`AuthContext`] carrying the credentials to
/// attach to the outgoing request.
///
/// Implementations are expected to refresh expired tokens transparently
/// before returning — callers never see a stale credential.
#[async_trait]
pub trait AuthAdapter: Send + Sync {
    /// Resolve `role` to a usable [`AuthContext`].
    ///
    /// # Errors
    ///
    /// Returns [`fz_error::ErrorKind::AuthUnavailable`] when `role` has no
    /// known credentials or a refresh failed.
    async fn with_role(&self, role: &Role) -> Result<AuthContext, FuzzError>;

    /// `true` if this adapter can resolve `role` without attempting it.
    /// A cheap capability check the orchestrator can use before scheduling
    /// work against an endpoint that declares an `auth_role`.
    fn supports_role(&self, role: &Role) -> bool;
}

/// A fixed role → [`AuthContext`] table, with no refresh logic.
///
/// The reference implementation: useful for tests and for static
/// credentials (service tokens, long-lived API keys) that never expire
/// mid-session.
#[derive(Debug, Clone, Default)]
pub struct StaticRoleAuth {
    table: std::collections::HashMap<Role, AuthContext>,
}

impl StaticRoleAuth {
    /// Build an empty table. No role will resolve until one is inserted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register credentials for `role`, replacing any existing entry.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<Role>, context: AuthContext) -> Self {
        self.table.insert(role.into(), context);
        self
    }
}

#[async_trait]
impl AuthAdapter for StaticRoleAuth {
    async fn with_role(&self, role: &Role) -> Result<AuthContext, FuzzError> {
        self.table.get(role).cloned().ok_or_else(|| {
            fz_error::FuzzError::new(
                fz_error::ErrorKind::AuthUnavailable,
                format!("no credentials registered for role {role:?}"),
            )
            .with_context("role", role.clone())
        })
    }

    fn supports_role(&self, role: &Role) -> bool {
        self.table.contains_key(role)
    }
}
