// SPDX-License-Identifier: MIT OR Apache-2.0
//! The fixed table of injection-pattern literals used both to seed string
//! coverage and to decide whether a mutated value counts as malicious.

/// Every literal pattern the generator injects, grouped loosely by family.
/// Order is not meaningful; callers iterate the full table.
pub const INJECTION_PATTERNS: &[&str] = &[
    // SQL
    "'",
    "';--",
    "' OR '1'='1",
    "' UNION SELECT NULL--",
    "1; DROP TABLE users;",
    // scripting
    "<script>alert(1)</script>",
    "javascript:alert(1)",
    "<img src=x onerror=alert(1)>",
    // template injection
    "{{7*7}}",
    "${7*7}",
    // path traversal
    "../../../etc/passwd",
    "..\\..\\..\\windows\\win.ini",
    // raw control bytes
    "\u{0}",
];

/// Unicode stress literals: emoji and non-Latin scripts.
pub const UNICODE_STRESS: &[&str] = &["😀🔥💀", "日本語テスト", "Кириллица", "ﷺ𝕌𝕟𝕚𝕔𝕠𝕕𝕖"];

/// `true` if `text` contains any literal from [`INJECTION_PATTERNS`].
#[must_use]
pub fn contains_injection_pattern(text: &str) -> bool {
    INJECTION_PATTERNS.iter().any(|p| text.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_sql_pattern() {
        assert!(contains_injection_pattern("abc' OR '1'='1 --"));
    }

    #[test]
    fn clean_text_has_no_pattern() {
        assert!(!contains_injection_pattern("hello world"));
    }
}
