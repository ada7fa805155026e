// SPDX-License-Identifier: MIT OR Apache-2.0
//! A real [`Transport`](crate::Transport) backed by `reqwest::Client`.

use crate::Transport;
use async_trait::async_trait;
use fz_contract::{Body, HeaderMultiMap, HttpMethod, RequestSpec, ResponseData};
use fz_error::FuzzError;
use reqwest::redirect::Policy;
use std::time::{Duration, Instant};

/// HTTP client transport.
///
/// Redirects are never followed by default: a 3xx response is itself
/// meaningful to the validator (an unexpected redirect on a probe that
/// should have been rejected is a finding in its own right), and silently
/// following one would discard that signal and probe the wrong endpoint.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `reqwest::Client` fails to build
    /// (e.g. a TLS backend could not be initialized).
    pub fn new(timeout: Duration) -> Result<Self, FuzzError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| FuzzError::transport("failed to build HTTP client").with_source(e))?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(30)).expect("default reqwest client configuration is valid")
    }
}

fn method_to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestSpec) -> Result<ResponseData, FuzzError> {
        let mut builder = self
            .client
            .request(method_to_reqwest(request.method), &request.url);

        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            FuzzError::transport(format!("request to {} failed", request.url))
                .with_context("url", &request.url)
                .with_source(e)
        })?;

        let status = response.status().as_u16();
        let mut headers = HeaderMultiMap::new();
        for (name, value) in response.headers().iter() {
            let value_str = value.to_str().unwrap_or("").to_string();
            headers.push(name.as_str(), value_str);
        }

        let content_type = headers.get("content-type").map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FuzzError::transport("failed to read response body").with_source(e))?;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let looks_json = content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("json"));
        let body = if looks_json || serde_json::from_slice::<serde_json::Value>(&bytes).is_ok() {
            serde_json::from_slice::<serde_json::Value>(&bytes)
                .map(Body::Json)
                .unwrap_or_else(|_| Body::Bytes(bytes.to_vec()))
        } else {
            Body::Bytes(bytes.to_vec())
        };

        Ok(ResponseData::new(status, headers, body, elapsed_ms))
    }
}
