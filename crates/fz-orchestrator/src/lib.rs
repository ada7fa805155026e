// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Drives a fuzzing session: per-endpoint payload generation, dispatch,
//! validation, and classification, bounded by a shared request budget and
//! aggregated into a [`Session`].

mod cancel;
mod classify;
mod config;
mod orchestrator;
mod session;
mod state;
mod wire;

pub use cancel::CancellationToken;
pub use classify::{classify, driving_anomaly_kind};
pub use config::{FuzzConfig, GenerationConfig, ValidationConfig};
pub use orchestrator::FuzzOrchestrator;
pub use session::{FuzzingResult, Session, SessionStats, SkipReason, session_fp_rate};
pub use state::EndpointState;
pub use wire::{ParamValue, build_request};
