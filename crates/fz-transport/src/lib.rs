// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! The transport boundary: sends a [`RequestSpec`] on the wire and returns
//! a normalized [`ResponseData`], with a real `reqwest`-backed
//! implementation and a programmable in-memory mock for tests.

mod mock;
mod reqwest_transport;

pub use mock::MockTransport;
pub use reqwest_transport::ReqwestTransport;

use async_trait::async_trait;
use fz_contract::{RequestSpec, ResponseData};
use fz_error::FuzzError;

/// Sends a fully-substituted request and returns a normalized response.
///
/// A single-operation async trait: one entry point, `Send + Sync` so it
/// can be shared across concurrent probes.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch `request` and return the normalized response.
    ///
    /// Connection failures, timeouts, and DNS errors are reported as
    /// [`fz_error::ErrorKind::TransportFailure`] — never a panic, and never
    /// an aborted session; the caller records the failure against the
    /// endpoint's budget and continues.
    async fn send(&self, request: &RequestSpec) -> Result<ResponseData, FuzzError>;
}
