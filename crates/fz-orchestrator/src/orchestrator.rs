// SPDX-License-Identifier: MIT OR Apache-2.0
//! The fuzz orchestrator: drives generation, transport, and validation per
//! endpoint and aggregates the results into a [`Session`].

use crate::cancel::CancellationToken;
use crate::classify::classify;
use crate::config::FuzzConfig;
use crate::session::{FuzzingResult, Session, SessionStats, SkipReason, session_fp_rate};
use crate::state::EndpointState;
use crate::wire::{ParamValue, build_request};
use chrono::Utc;
use fz_auth::AuthAdapter;
use fz_budget::BudgetManager;
use fz_contract::{Contract, Endpoint, Parameter, Payload, PayloadCategory, PayloadValue, Vulnerability};
use fz_error::FuzzError;
use fz_transport::Transport;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

/// Drives one fuzzing session against a [`Contract`].
pub struct FuzzOrchestrator {
    config: FuzzConfig,
    base_url: String,
    budget: Arc<BudgetManager>,
    auth: Arc<dyn AuthAdapter>,
    transport: Arc<dyn Transport>,
    cancellation: CancellationToken,
}

impl FuzzOrchestrator {
    /// Build an orchestrator for `contract`'s endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`fz_error::ErrorKind::ConfigInvalid`] if the config's endpoint list
    /// is empty while `contract.endpoints` is also empty — there is
    /// nothing to fuzz, which is the one configuration-time condition
    /// that aborts a session outright per the error taxonomy.
    pub fn new(
        mut config: FuzzConfig,
        contract: Contract,
        base_url: impl Into<String>,
        auth: Arc<dyn AuthAdapter>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, FuzzError> {
        if config.endpoints.is_empty() {
            config.endpoints = contract.endpoints;
        }
        if config.endpoints.is_empty() {
            return Err(FuzzError::config_invalid("no endpoints to fuzz"));
        }
        let budget = Arc::new(BudgetManager::new(config.budget.clone()));
        Ok(Self {
            config,
            base_url: base_url.into(),
            budget,
            auth,
            transport,
            cancellation: CancellationToken::new(),
        })
    }

    /// Signal cancellation: in-flight probes finish their current response,
    /// no new `check` calls succeed, and findings flush as-is.
    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// Start a session, returning its id. Each call mints a fresh id; the
    /// budget manager and endpoint list carry over from construction.
    #[must_use]
    pub fn start_session(&self) -> Uuid {
        Uuid::new_v4()
    }

    /// Fuzz every configured endpoint and return the aggregated [`Session`].
    pub async fn fuzz_all(&self) -> Session {
        let session_id = self.start_session();
        let started_at = Utc::now();

        let mut join_set = JoinSet::new();
        let permits = Arc::new(tokio::sync::Semaphore::new(self.config.max_concurrent.max(1)));

        for endpoint in self.config.endpoints.clone() {
            let permits = Arc::clone(&permits);
            let budget = Arc::clone(&self.budget);
            let auth = Arc::clone(&self.auth);
            let transport = Arc::clone(&self.transport);
            let cancellation = self.cancellation.clone();
            let base_url = self.base_url.clone();
            let generation = self.config.generation.clone();
            let validation = self.config.validation.clone();

            join_set.spawn(async move {
                let _permit = permits.acquire_owned().await.expect("semaphore never closed");
                fuzz_endpoint_inner(&endpoint, &base_url, &budget, &*auth, &*transport, &cancellation, &generation, &validation).await
            });
        }

        let mut results = Vec::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => warn!(error = %e, "endpoint fuzzing task panicked"),
            }
        }

        let all_vulnerabilities: Vec<&Vulnerability> = results.iter().flat_map(|r| r.vulnerabilities.iter()).collect();
        let total_vulnerabilities = all_vulnerabilities.len() as u32;
        let total_requests: u32 = results.iter().map(|r| r.total_probes).sum();
        let avg_fp_rate = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.fp_rate).sum::<f64>() / results.len() as f64
        };
        let budget_utilization = if self.config.budget.max_total_requests == 0 {
            0.0
        } else {
            f64::from(total_requests) / f64::from(self.config.budget.max_total_requests)
        };
        let owned_vulns: Vec<Vulnerability> = all_vulnerabilities.into_iter().cloned().collect();
        let session_rate = session_fp_rate(&owned_vulns);

        info!(session_id = %session_id, total_requests, total_vulnerabilities, "fuzzing session complete");

        Session {
            id: session_id,
            started_at,
            ended_at: Some(Utc::now()),
            results,
            stats: SessionStats {
                total_requests,
                total_vulnerabilities,
                avg_fp_rate,
                budget_utilization,
                fp_threshold_exceeded: session_rate > self.config.validation.false_positive_threshold,
            },
        }
    }

    /// Fuzz a single endpoint in isolation, outside the `fuzz_all` pool.
    pub async fn fuzz_endpoint(&self, endpoint: &Endpoint) -> FuzzingResult {
        fuzz_endpoint_inner(
            endpoint,
            &self.base_url,
            &self.budget,
            &*self.auth,
            &*self.transport,
            &self.cancellation,
            &self.config.generation,
            &self.config.validation,
        )
        .await
    }
}

#[allow(clippy::too_many_arguments)]
async fn fuzz_endpoint_inner(
    endpoint: &Endpoint,
    base_url: &str,
    budget: &BudgetManager,
    auth: &dyn AuthAdapter,
    transport: &dyn Transport,
    cancellation: &CancellationToken,
    generation: &crate::config::GenerationConfig,
    validation_config: &crate::config::ValidationConfig,
) -> FuzzingResult {
    let start = std::time::Instant::now();
    let mut vulnerabilities = Vec::new();
    let mut total_probes = 0u32;
    let mut anomaly_count = 0u32;
    let mut state = EndpointState::Ready;

    if let Some(role) = &endpoint.auth_role {
        if !auth.supports_role(role) {
            return FuzzingResult {
                endpoint_id: endpoint.id.clone(),
                final_state: EndpointState::Ready,
                total_probes: 0,
                vulnerabilities,
                anomaly_count,
                fp_rate: 0.0,
                elapsed_ms: start.elapsed().as_millis() as u64,
                budget_used: 0,
                skipped: Some(SkipReason::AuthUnavailable),
            };
        }
    }

    if endpoint.parameters.is_empty() {
        return FuzzingResult {
            endpoint_id: endpoint.id.clone(),
            final_state: EndpointState::Completed,
            total_probes: 0,
            vulnerabilities,
            anomaly_count,
            fp_rate: 0.0,
            elapsed_ms: start.elapsed().as_millis() as u64,
            budget_used: 0,
            skipped: None,
        };
    }

    'endpoint: for focus in &endpoint.parameters {
        state = EndpointState::Testing;
        let payloads = payloads_for(focus, generation);
        let defaults = default_values(endpoint, focus);

        for payload in &payloads {
            if cancellation.is_cancelled() {
                break 'endpoint;
            }

            loop {
                if !budget.healthy() {
                    state = EndpointState::Unhealthy;
                    break 'endpoint;
                }

                let outcome = budget.check(&endpoint.id);
                if !outcome.allowed {
                    state = match outcome.reason {
                        Some(fz_budget::CheckReason::EndpointBanned) => EndpointState::Banned,
                        _ => EndpointState::BudgetExhausted,
                    };
                    break 'endpoint;
                }
                if outcome.delay_ms > 0 {
                    state = EndpointState::Waiting;
                    tokio::time::sleep(std::time::Duration::from_millis(outcome.delay_ms)).await;
                    continue;
                }
                break;
            }

            let auth_context = match &endpoint.auth_role {
                Some(role) => match auth.with_role(role).await {
                    Ok(ctx) => Some(ctx),
                    Err(_) => {
                        state = EndpointState::Completed;
                        break 'endpoint;
                    }
                },
                None => None,
            };

            let (outcome, vuln, anomalies_seen) = dispatch_and_validate(
                endpoint,
                base_url,
                focus,
                payload,
                &defaults,
                auth_context.as_ref(),
                transport,
                validation_config,
            )
            .await;

            total_probes += 1;
            anomaly_count += anomalies_seen;

            if let Some((status, headers, elapsed_ms)) = outcome {
                budget.record(&endpoint.id, status, &headers, elapsed_ms);
            }

            if let Some(mut candidate) = vuln {
                if candidate.confidence >= validation_config.confidence_threshold {
                    candidate.reproducible = reproduce(
                        endpoint,
                        base_url,
                        focus,
                        payload,
                        &defaults,
                        auth_context.as_ref(),
                        transport,
                        validation_config,
                    )
                    .await;
                    vulnerabilities.push(candidate);
                }
            }
        }
    }

    if state == EndpointState::Testing {
        state = EndpointState::Completed;
    }

    let snapshot = budget.snapshot_endpoint(&endpoint.id);
    let fp_rate = session_fp_rate(&vulnerabilities);

    FuzzingResult {
        endpoint_id: endpoint.id.clone(),
        final_state: state,
        total_probes,
        vulnerabilities,
        anomaly_count,
        fp_rate,
        elapsed_ms: start.elapsed().as_millis() as u64,
        budget_used: snapshot.map(|s| s.requests_used).unwrap_or(0),
        skipped: None,
    }
}

fn payloads_for(parameter: &Parameter, generation: &crate::config::GenerationConfig) -> Vec<Payload> {
    let mut payloads = fz_generator::generate(parameter.type_tag, &parameter.constraints);
    if !generation.include_boundaries {
        payloads.retain(|p| p.category != PayloadCategory::Boundary);
    }
    if !generation.include_baseline {
        payloads.retain(|p| p.category != PayloadCategory::Valid);
    }
    if generation.include_mutations {
        if let Some(seed) = payloads.iter().find(|p| p.category == PayloadCategory::Valid) {
            let mutations = fz_generator::mutate(&seed.value, parameter.type_tag, generation.mutation_intensity);
            payloads.extend(mutations);
        }
    }
    payloads
}

/// A representative valid value for every parameter other than the one
/// currently under test, so only the focus parameter can provoke a finding.
fn default_values<'a>(endpoint: &'a Endpoint, focus: &'a Parameter) -> Vec<(&'a Parameter, PayloadValue)> {
    endpoint
        .parameters
        .iter()
        .filter(|p| p.name != focus.name || p.location != focus.location)
        .map(|p| {
            let candidates = fz_generator::generate(p.type_tag, &p.constraints);
            let value = candidates
                .into_iter()
                .find(|c| c.category == PayloadCategory::Valid)
                .map(|c| c.value)
                .unwrap_or(PayloadValue::Text(String::new()));
            (p, value)
        })
        .collect()
}

fn build_probe_request(
    endpoint: &Endpoint,
    base_url: &str,
    focus: &Parameter,
    payload: &Payload,
    defaults: &[(&Parameter, PayloadValue)],
) -> fz_contract::RequestSpec {
    let mut values: Vec<ParamValue<'_>> = defaults
        .iter()
        .map(|(param, value)| ParamValue { parameter: *param, value })
        .collect();
    values.push(ParamValue {
        parameter: focus,
        value: &payload.value,
    });
    build_request(base_url, endpoint, &values)
}

#[allow(clippy::too_many_arguments)]
async fn dispatch_and_validate(
    endpoint: &Endpoint,
    base_url: &str,
    focus: &Parameter,
    payload: &Payload,
    defaults: &[(&Parameter, PayloadValue)],
    auth_context: Option<&fz_auth::AuthContext>,
    transport: &dyn Transport,
    validation_config: &crate::config::ValidationConfig,
) -> (Option<(u16, fz_contract::HeaderMultiMap, u64)>, Option<Vulnerability>, u32) {
    let mut request = build_probe_request(endpoint, base_url, focus, payload, defaults);
    if let Some(ctx) = auth_context {
        ctx.apply_to_headers(&mut request.headers);
    }

    let response = match transport.send(&request).await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(endpoint = %endpoint.id, error = %e, "transport failure recorded against budget");
            return (None, None, 0);
        }
    };

    let schema = if validation_config.enable_schema_validation {
        endpoint.expected_schema.as_ref()
    } else {
        None
    };
    let baseline = if validation_config.enable_anomaly_detection {
        endpoint.baseline.as_ref()
    } else {
        None
    };
    let validation = fz_validator::validate(&response, schema, baseline);
    let anomalies_seen = validation.anomalies.len() as u32;

    // Classification rests on the validator's verdict alone; a payload being
    // drawn from a malicious-intent category is not itself evidence that the
    // target mishandled it.
    let vuln = if !validation.is_valid {
        let (kind, severity) = classify(payload, &validation);
        let evidence = fz_contract::Evidence {
            payload: payload.clone(),
            request: request.clone(),
            response: response.clone(),
            validation: validation.clone(),
        };
        // ValidationResult.confidence tracks confidence that the response is
        // *valid*, decreasing as evidence of a problem accumulates. A
        // vulnerability's confidence is the complement: how sure we are that
        // this candidate is real, which rises with that same evidence.
        let vuln_confidence = 1.0 - validation.confidence;
        Some(Vulnerability::new(endpoint.id.clone(), focus.name.clone(), kind, severity, vuln_confidence, evidence))
    } else {
        None
    };

    (Some((response.status, response.headers.clone(), response.elapsed_ms)), vuln, anomalies_seen)
}

#[allow(clippy::too_many_arguments)]
async fn reproduce(
    endpoint: &Endpoint,
    base_url: &str,
    focus: &Parameter,
    payload: &Payload,
    defaults: &[(&Parameter, PayloadValue)],
    auth_context: Option<&fz_auth::AuthContext>,
    transport: &dyn Transport,
    validation_config: &crate::config::ValidationConfig,
) -> bool {
    let (_, vuln, _) = dispatch_and_validate(endpoint, base_url, focus, payload, defaults, auth_context, transport, validation_config).await;
    vuln.is_some()
}
