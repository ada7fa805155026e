// SPDX-License-Identifier: MIT OR Apache-2.0
//! Data model shared by every fuzzer crate: contracts, endpoints, payload
//! values, normalized responses, and validation/finding output.
//!
//! If you only take one dependency into a downstream crate, take this one —
//! every other `fz-*` crate is built on these types and nothing else.

mod constraints;
mod endpoint;
mod headers;
mod payload;
mod request;
mod response;
mod schema;
mod types;
mod validation;
mod vulnerability;

pub use constraints::Constraints;
pub use endpoint::{Contract, Endpoint, HttpMethod, Location, Parameter, Role};
pub use headers::HeaderMultiMap;
pub use payload::{Payload, PayloadCategory};
pub use request::RequestSpec;
pub use response::{Baseline, Body, ResponseData};
pub use schema::{ExpectedSchema, SchemaFormat, SchemaPrimitive};
pub use types::TypeTag;
pub use validation::{
    Anomaly, AnomalyKind, ErrorSignature, Severity, SignatureKind, StatusClass, StatusClassKind,
    ValidationResult,
};
pub use vulnerability::{Evidence, Vulnerability, VulnerabilityKind};

mod value;
pub use value::PayloadValue;
