// SPDX-License-Identifier: MIT OR Apache-2.0
//! The fixed, compiled-once table of body-scanning error signatures.

use fz_contract::{ErrorSignature, Severity, SignatureKind};
use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

struct SignatureDef {
    kind: SignatureKind,
    pattern: &'static str,
    severity: Severity,
}

const DEFS: &[SignatureDef] = &[
    SignatureDef {
        kind: SignatureKind::SqlInjection,
        pattern: r"sql syntax|mysql_fetch|ora-\d{5}|you have an error in your sql syntax|pg_query\(\)|sqlstate\[",
        severity: Severity::Critical,
    },
    SignatureDef {
        kind: SignatureKind::Xss,
        pattern: r"<script[^>]*>[^<]*</script>|onerror\s*=\s*['\x22]?alert",
        severity: Severity::Critical,
    },
    SignatureDef {
        kind: SignatureKind::PathTraversal,
        pattern: r"root:.*:0:0:|etc/passwd|boot\.ini",
        severity: Severity::High,
    },
    SignatureDef {
        kind: SignatureKind::InformationDisclosure,
        pattern: r"stack trace|traceback \(most recent call last\)|phpinfo\(\)|whitelabel error page|at .+\.\w+\(.+:\d+\)",
        severity: Severity::Medium,
    },
    SignatureDef {
        kind: SignatureKind::AuthBypass,
        pattern: r"authentication bypassed|unauthorized access granted|auth[_-]?check (disabled|skipped)",
        severity: Severity::Critical,
    },
    SignatureDef {
        kind: SignatureKind::CsrfVulnerability,
        pattern: r"csrf token (invalid|missing) but (request )?allowed|csrf (check|protection) disabled",
        severity: Severity::High,
    },
    SignatureDef {
        kind: SignatureKind::JwtVulnerability,
        pattern: r#""alg"\s*:\s*"none"|jwt signature verification (disabled|skipped|bypassed)"#,
        severity: Severity::Critical,
    },
    SignatureDef {
        kind: SignatureKind::RateLimitBypass,
        pattern: r"rate limit bypassed|rate[_-]?limit (disabled|skipped)",
        severity: Severity::Medium,
    },
    SignatureDef {
        kind: SignatureKind::BusinessLogic,
        pattern: r"negative (price|quantity|amount) accepted|balance (below zero|went negative)",
        severity: Severity::Medium,
    },
    SignatureDef {
        kind: SignatureKind::Deserialization,
        pattern: r"unsafe deserialization|__reduce__|objectinputstream|pickle\.loads|yaml\.load\(",
        severity: Severity::Critical,
    },
];

struct CompiledSignature {
    kind: SignatureKind,
    pattern: &'static str,
    severity: Severity,
    regex: Regex,
}

static COMPILED: LazyLock<Vec<CompiledSignature>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|def| CompiledSignature {
            kind: def.kind,
            pattern: def.pattern,
            severity: def.severity,
            regex: RegexBuilder::new(def.pattern)
                .case_insensitive(true)
                .build()
                .unwrap_or_else(|e| panic!("invalid built-in signature regex {:?}: {e}", def.pattern)),
        })
        .collect()
});

/// Scan `body_text` against every compiled signature, returning one
/// [`ErrorSignature`] per table entry (matched or not).
#[must_use]
pub fn scan(body_text: &str) -> Vec<ErrorSignature> {
    COMPILED
        .iter()
        .map(|sig| ErrorSignature {
            kind: sig.kind,
            pattern: sig.pattern.to_string(),
            severity: sig.severity,
            matched: sig.regex.is_match(body_text),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_syntax_error_matches() {
        let results = scan("You have an error in your SQL syntax near 'DROP TABLE'");
        let sql = results.iter().find(|s| s.kind == SignatureKind::SqlInjection).unwrap();
        assert!(sql.matched);
        assert_eq!(sql.severity, Severity::Critical);
    }

    #[test]
    fn clean_body_matches_nothing() {
        let results = scan("{\"status\":\"ok\"}");
        assert!(results.iter().all(|s| !s.matched));
    }

    #[test]
    fn xss_reflection_matches() {
        let results = scan("<script>alert(document.cookie)</script>");
        assert!(results
            .iter()
            .any(|s| s.kind == SignatureKind::Xss && s.matched));
    }

    #[test]
    fn every_def_compiles_exactly_once() {
        let a = scan("x");
        let b = scan("y");
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), DEFS.len());
    }
}
