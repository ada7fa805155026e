// SPDX-License-Identifier: MIT OR Apache-2.0
//! A programmable in-memory [`Transport`](crate::Transport) for tests.

use crate::Transport;
use async_trait::async_trait;
use fz_contract::{RequestSpec, ResponseData};
use fz_error::FuzzError;
use std::sync::Arc;

type Responder = dyn Fn(&RequestSpec) -> Result<ResponseData, FuzzError> + Send + Sync;

/// A transport driven entirely by a closure, for unit and integration
/// tests. It only ever describes bytes-on-the-wire — it never classifies
/// a response as a finding; that is 4.B's job alone, exercised downstream
/// of whatever this mock returns.
#[derive(Clone)]
pub struct MockTransport {
    responder: Arc<Responder>,
}

impl MockTransport {
    /// Build a mock transport from a closure invoked on every `send`.
    pub fn new(responder: impl Fn(&RequestSpec) -> Result<ResponseData, FuzzError> + Send + Sync + 'static) -> Self {
        Self {
            responder: Arc::new(responder),
        }
    }

    /// Build a mock transport that always returns the same response,
    /// regardless of the request it is sent.
    #[must_use]
    pub fn fixed(response: ResponseData) -> Self {
        Self::new(move |_request| Ok(response.clone()))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseData, FuzzError> {
        (self.responder)(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fz_contract::{Body, HeaderMultiMap, HttpMethod};

    #[tokio::test]
    async fn fixed_transport_ignores_the_request() {
        let response = ResponseData::new(200, HeaderMultiMap::new(), Body::Bytes(b"ok".to_vec()), 1);
        let transport = MockTransport::fixed(response);
        let request = RequestSpec::new(HttpMethod::Get, "https://example.test/a");
        let got = transport.send(&request).await.unwrap();
        assert_eq!(got.status, 200);
    }

    #[tokio::test]
    async fn closure_transport_can_branch_on_the_request() {
        let transport = MockTransport::new(|request| {
            let status = if request.url.contains("admin") { 403 } else { 200 };
            Ok(ResponseData::new(status, HeaderMultiMap::new(), Body::Bytes(vec![]), 1))
        });
        let admin = RequestSpec::new(HttpMethod::Get, "https://example.test/admin");
        let public = RequestSpec::new(HttpMethod::Get, "https://example.test/public");
        assert_eq!(transport.send(&admin).await.unwrap().status, 403);
        assert_eq!(transport.send(&public).await.unwrap().status, 200);
    }

    #[tokio::test]
    async fn closure_transport_can_return_a_transport_error() {
        let transport = MockTransport::new(|_request| Err(FuzzError::transport("connection reset")));
        let request = RequestSpec::new(HttpMethod::Get, "https://example.test/a");
        assert!(transport.send(&request).await.is_err());
    }
}
