// SPDX-License-Identifier: MIT OR Apache-2.0
//! Parsing of rate-limit signal headers from a response.

use fz_contract::HeaderMultiMap;

const UNIX_SECONDS_THRESHOLD: u64 = 1_000_000_000;

/// Rate-limit signals parsed from a response's headers. Every field is
/// best-effort: a present-but-unparseable header is treated as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateLimitSignals {
    /// `Retry-After`, in seconds.
    pub retry_after_secs: Option<u64>,
    /// `X-RateLimit-Remaining`.
    pub remaining: Option<u64>,
    /// `X-RateLimit-Reset`, normalized to seconds relative to now.
    pub reset_in_secs: Option<u64>,
    /// `X-RateLimit-Window`, in seconds.
    pub window_secs: Option<u64>,
}

/// Parse every recognized rate-limit header from `headers`.
#[must_use]
pub fn parse(headers: &HeaderMultiMap, now_unix_secs: u64) -> RateLimitSignals {
    RateLimitSignals {
        retry_after_secs: headers.get("retry-after").and_then(|v| v.trim().parse().ok()),
        remaining: headers.get("x-ratelimit-remaining").and_then(|v| v.trim().parse().ok()),
        reset_in_secs: headers
            .get("x-ratelimit-reset")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|raw| normalize_reset(raw, now_unix_secs)),
        window_secs: headers.get("x-ratelimit-window").and_then(|v| v.trim().parse().ok()),
    }
}

fn normalize_reset(raw: u64, now_unix_secs: u64) -> u64 {
    if raw > UNIX_SECONDS_THRESHOLD {
        raw.saturating_sub(now_unix_secs)
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(pairs: &[(&str, &str)]) -> HeaderMultiMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn parses_retry_after_seconds() {
        let headers = headers_with(&[("Retry-After", "5")]);
        let signals = parse(&headers, 1_000);
        assert_eq!(signals.retry_after_secs, Some(5));
    }

    #[test]
    fn case_insensitive_lookup() {
        let headers = headers_with(&[("RETRY-AFTER", "3")]);
        let signals = parse(&headers, 1_000);
        assert_eq!(signals.retry_after_secs, Some(3));
    }

    #[test]
    fn reset_below_threshold_is_relative() {
        let headers = headers_with(&[("X-RateLimit-Reset", "30")]);
        let signals = parse(&headers, 1_000);
        assert_eq!(signals.reset_in_secs, Some(30));
    }

    #[test]
    fn reset_above_threshold_is_unix_and_normalized() {
        let now = 1_700_000_000;
        let headers = headers_with(&[("X-RateLimit-Reset", "1700000060")]);
        let signals = parse(&headers, now);
        assert_eq!(signals.reset_in_secs, Some(60));
    }

    #[test]
    fn unparseable_value_is_treated_as_absent() {
        let headers = headers_with(&[("Retry-After", "soon")]);
        let signals = parse(&headers, 1_000);
        assert_eq!(signals.retry_after_secs, None);
    }
}
