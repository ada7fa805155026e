// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end seed scenarios from the testable-properties section: one
//! vulnerable endpoint per class, one clean endpoint, and the aggregate
//! false-positive ceiling across all of them.

use fz_budget::BudgetConfig;
use fz_contract::{
    Body, Constraints, Contract, Endpoint, ExpectedSchema, HeaderMultiMap, HttpMethod, Location,
    Parameter, ResponseData, SchemaPrimitive, TypeTag, VulnerabilityKind,
};
use fz_orchestrator::{FuzzConfig, FuzzOrchestrator};
use fz_transport::MockTransport;
use std::sync::Arc;

fn no_auth() -> Arc<dyn fz_auth::AuthAdapter> {
    Arc::new(fz_auth::StaticRoleAuth::new())
}

fn query_param(name: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        location: Location::Query,
        type_tag: TypeTag::String,
        required: true,
        constraints: Constraints::default(),
    }
}

fn body_param(name: &str) -> Parameter {
    Parameter {
        name: name.to_string(),
        location: Location::Body,
        type_tag: TypeTag::String,
        required: true,
        constraints: Constraints::default(),
    }
}

fn path_id_param() -> Parameter {
    Parameter {
        name: "id".to_string(),
        location: Location::Path,
        type_tag: TypeTag::Id,
        required: true,
        constraints: Constraints::default(),
    }
}

fn fast_config() -> FuzzConfig {
    FuzzConfig {
        budget: BudgetConfig {
            initial_delay_ms: 0,
            ..BudgetConfig::default()
        },
        ..FuzzConfig::default()
    }
}

#[tokio::test]
async fn sql_injection_positive() {
    let endpoint = Endpoint {
        id: "vulnerable-sql".to_string(),
        path: "/api/vulnerable/sql".to_string(),
        method: HttpMethod::Get,
        parameters: vec![query_param("query")],
        expected_schema: None,
        auth_role: None,
        baseline: None,
    };

    let transport = MockTransport::new(|request| {
        let probe = request.url.to_lowercase();
        if probe.contains("drop") || probe.contains("'1'%3d'1") {
            Ok(ResponseData::new(
                500,
                HeaderMultiMap::new(),
                Body::Bytes(b"SQL syntax error near DROP TABLE users".to_vec()),
                8,
            ))
        } else {
            Ok(ResponseData::new(
                200,
                HeaderMultiMap::new(),
                Body::Json(serde_json::json!({"results": []})),
                8,
            ))
        }
    });

    let orchestrator = FuzzOrchestrator::new(
        fast_config(),
        Contract { endpoints: vec![endpoint.clone()] },
        "https://target.test",
        no_auth(),
        Arc::new(transport),
    )
    .unwrap();

    let result = orchestrator.fuzz_endpoint(&endpoint).await;
    let finding = result
        .vulnerabilities
        .iter()
        .find(|v| matches!(v.kind, VulnerabilityKind::Signature(fz_contract::SignatureKind::SqlInjection)))
        .expect("expected at least one SQL injection finding");

    assert_eq!(finding.severity, fz_contract::Severity::Critical);
    assert!(finding.confidence >= 0.7, "confidence {} below 0.7", finding.confidence);
    assert!(finding.reproducible);
    let VulnerabilityKind::Signature(kind) = finding.kind else {
        unreachable!()
    };
    assert_eq!(kind.cwe(), Some("CWE-89"));
}

/// A declared contract for the echo endpoint: the `echoed` field is
/// documented as plain text, never markup. Reflecting a script-bearing
/// payload verbatim violates that contract as well as tripping the
/// signature scan, which is what actually pushes a genuine finding's
/// confidence above the reporting threshold.
fn no_markup_echo_schema() -> ExpectedSchema {
    ExpectedSchema::new(SchemaPrimitive::Object)
        .with_required(["echoed"])
        .with_property(
            "echoed",
            ExpectedSchema {
                pattern: Some(r"^[^<>]*$".to_string()),
                ..ExpectedSchema::new(SchemaPrimitive::String)
            },
        )
}

#[tokio::test]
async fn xss_reflection() {
    let endpoint = Endpoint {
        id: "vulnerable-xss".to_string(),
        path: "/api/vulnerable/xss".to_string(),
        method: HttpMethod::Post,
        parameters: vec![body_param("content")],
        expected_schema: Some(no_markup_echo_schema()),
        auth_role: None,
        baseline: None,
    };

    // Echoes the submitted value back unescaped, the way a genuinely
    // vulnerable reflection endpoint would; a clean baseline payload stays
    // harmless, an injected `<script>` literal reflects straight through.
    let transport = MockTransport::new(|request| {
        let content = request
            .body
            .as_ref()
            .and_then(|b| b.get("content"))
            .and_then(|v| v.as_str())
            .unwrap_or("");
        Ok(ResponseData::new(
            200,
            HeaderMultiMap::new(),
            Body::Json(serde_json::json!({"echoed": content})),
            5,
        ))
    });

    let orchestrator = FuzzOrchestrator::new(
        fast_config(),
        Contract { endpoints: vec![endpoint.clone()] },
        "https://target.test",
        no_auth(),
        Arc::new(transport),
    )
    .unwrap();

    let result = orchestrator.fuzz_endpoint(&endpoint).await;
    let finding = result
        .vulnerabilities
        .iter()
        .find(|v| matches!(v.kind, VulnerabilityKind::Signature(fz_contract::SignatureKind::Xss)))
        .expect("expected at least one XSS finding");
    assert_eq!(finding.severity, fz_contract::Severity::Critical);
    assert!(finding.confidence >= 0.7, "confidence {} below 0.7", finding.confidence);
}

#[tokio::test]
async fn clean_endpoint_has_no_findings() {
    let schema = ExpectedSchema::new(SchemaPrimitive::Object)
        .with_required(["id", "status"])
        .with_property("id", ExpectedSchema::new(SchemaPrimitive::Number))
        .with_property("status", ExpectedSchema::new(SchemaPrimitive::String));

    let endpoint = Endpoint {
        id: "secure-endpoint".to_string(),
        path: "/api/secure/endpoint/{id}".to_string(),
        method: HttpMethod::Get,
        parameters: vec![path_id_param()],
        expected_schema: Some(schema),
        auth_role: None,
        baseline: None,
    };

    let transport = MockTransport::fixed(ResponseData::new(
        200,
        HeaderMultiMap::new(),
        Body::Json(serde_json::json!({"id": 1, "status": "ok"})),
        5,
    ));

    let orchestrator = FuzzOrchestrator::new(
        fast_config(),
        Contract { endpoints: vec![endpoint.clone()] },
        "https://target.test",
        no_auth(),
        Arc::new(transport),
    )
    .unwrap();

    let result = orchestrator.fuzz_endpoint(&endpoint).await;
    assert!(result.vulnerabilities.is_empty(), "expected zero findings, got {:?}", result.vulnerabilities);
    assert_eq!(result.fp_rate, 0.0);
}

#[tokio::test]
async fn rate_limit_backoff_honors_retry_after() {
    use fz_budget::BudgetManager;

    let manager = BudgetManager::new(BudgetConfig {
        initial_delay_ms: 0,
        ..BudgetConfig::default()
    });

    manager.check("ep-1");
    manager.record("ep-1", 200, &HeaderMultiMap::new(), 5);

    manager.check("ep-1");
    manager.record("ep-1", 429, &headers_with_retry_after(5), 5);

    let snapshot = manager.snapshot_endpoint("ep-1").unwrap();
    assert!(snapshot.current_delay_ms >= 5_000);

    let outcome = manager.check("ep-1");
    assert!(outcome.allowed);
    assert!(outcome.delay_ms >= 4_900, "expected a near-5s wait, got {}ms", outcome.delay_ms);
}

fn headers_with_retry_after(secs: u64) -> HeaderMultiMap {
    let mut headers = HeaderMultiMap::new();
    headers.push("Retry-After", secs.to_string());
    headers
}

#[tokio::test]
async fn per_endpoint_budget_is_respected() {
    let endpoint_a = Endpoint {
        id: "ep-a".to_string(),
        path: "/api/a".to_string(),
        method: HttpMethod::Get,
        parameters: vec![query_param("q")],
        expected_schema: None,
        auth_role: None,
        baseline: None,
    };
    let endpoint_b = Endpoint {
        id: "ep-b".to_string(),
        path: "/api/b".to_string(),
        method: HttpMethod::Get,
        parameters: vec![query_param("q")],
        expected_schema: None,
        auth_role: None,
        baseline: None,
    };

    let config = FuzzConfig {
        budget: BudgetConfig {
            max_requests_per_endpoint: 15,
            max_total_requests: 100,
            initial_delay_ms: 0,
            ..BudgetConfig::default()
        },
        ..FuzzConfig::default()
    };

    let transport = MockTransport::fixed(ResponseData::new(
        200,
        HeaderMultiMap::new(),
        Body::Json(serde_json::json!({"ok": true})),
        1,
    ));

    let orchestrator = FuzzOrchestrator::new(
        config,
        Contract { endpoints: vec![endpoint_a, endpoint_b] },
        "https://target.test",
        no_auth(),
        Arc::new(transport),
    )
    .unwrap();

    let session = orchestrator.fuzz_all().await;
    for result in &session.results {
        assert!(result.total_probes <= 15, "{} used {} probes", result.endpoint_id, result.total_probes);
    }
    assert!(session.stats.total_requests <= 100);
}

#[tokio::test]
async fn aggregate_false_positive_rate_stays_under_ceiling() {
    let sql_endpoint = Endpoint {
        id: "vulnerable-sql".to_string(),
        path: "/api/vulnerable/sql".to_string(),
        method: HttpMethod::Get,
        parameters: vec![query_param("query")],
        expected_schema: None,
        auth_role: None,
        baseline: None,
    };
    let xss_endpoint = Endpoint {
        id: "vulnerable-xss".to_string(),
        path: "/api/vulnerable/xss".to_string(),
        method: HttpMethod::Post,
        parameters: vec![body_param("content")],
        expected_schema: Some(no_markup_echo_schema()),
        auth_role: None,
        baseline: None,
    };
    let secure_endpoint = Endpoint {
        id: "secure-endpoint".to_string(),
        path: "/api/secure/endpoint/{id}".to_string(),
        method: HttpMethod::Get,
        parameters: vec![path_id_param()],
        expected_schema: Some(
            ExpectedSchema::new(SchemaPrimitive::Object).with_required(["id", "status"]),
        ),
        auth_role: None,
        baseline: None,
    };

    let transport = MockTransport::new(|request| {
        let probe = request.url.to_lowercase();
        let body_text = request
            .body
            .as_ref()
            .and_then(|b| b.get("content"))
            .and_then(|v| v.as_str())
            .unwrap_or("");

        if probe.contains("/api/vulnerable/sql") && (probe.contains("drop") || probe.contains("'1'%3d'1")) {
            return Ok(ResponseData::new(
                500,
                HeaderMultiMap::new(),
                Body::Bytes(b"SQL syntax error near DROP TABLE users".to_vec()),
                8,
            ));
        }
        if probe.contains("/api/vulnerable/xss") {
            // Unescaped reflection: harmless payloads stay harmless and
            // schema-compliant, a script-literal payload reflects straight
            // through, tripping both the signature scan and the no-markup
            // schema constraint.
            return Ok(ResponseData::new(
                200,
                HeaderMultiMap::new(),
                Body::Json(serde_json::json!({"echoed": body_text})),
                5,
            ));
        }
        if probe.contains("/api/secure/endpoint") {
            return Ok(ResponseData::new(
                200,
                HeaderMultiMap::new(),
                Body::Json(serde_json::json!({"id": 1, "status": "ok"})),
                5,
            ));
        }
        Ok(ResponseData::new(200, HeaderMultiMap::new(), Body::Json(serde_json::json!({})), 5))
    });

    let orchestrator = FuzzOrchestrator::new(
        fast_config(),
        Contract {
            endpoints: vec![sql_endpoint, xss_endpoint, secure_endpoint],
        },
        "https://target.test",
        no_auth(),
        Arc::new(transport),
    )
    .unwrap();

    let session = orchestrator.fuzz_all().await;
    let all: Vec<_> = session.results.iter().flat_map(|r| r.vulnerabilities.iter()).collect();
    assert!(!all.is_empty(), "expected at least the seeded sql/xss findings");
    let low_confidence = all.iter().filter(|v| v.is_low_confidence()).count();
    let fp_rate = low_confidence as f64 / all.len() as f64;
    assert!(fp_rate <= 0.10, "aggregate false-positive rate {fp_rate} exceeds the 0.10 ceiling");
}
