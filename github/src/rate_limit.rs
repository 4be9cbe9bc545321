//! Rate-limit hints carried in GitHub response headers.

use std::time::Duration;
use std::time::SystemTime;

use http::HeaderMap;

/// Headers whose presence marks a 403 as a rate-limit rejection rather than
/// a permission failure.
const RATE_LIMIT_HEADERS: &[&str] = &["x-ratelimit-remaining", "x-ratelimit-reset", "retry-after"];

pub(crate) fn has_rate_limit_headers(headers: &HeaderMap) -> bool {
    RATE_LIMIT_HEADERS
        .iter()
        .any(|name| headers.contains_key(*name))
}

/// Server-suggested wait derived from rate-limit headers.
///
/// `Retry-After` carries a relative wait in seconds and wins when it parses.
/// `X-RateLimit-Reset` carries an absolute Unix timestamp in seconds; the
/// wait is its saturating distance from `now`, so a reset in the past means
/// no wait at all. Returns `None` when neither header yields a usable value;
/// a reset beyond the representable time range counts as unusable.
pub fn delay_from_headers(headers: &HeaderMap, now: SystemTime) -> Option<Duration> {
    if let Some(seconds) = header_u64(headers, "retry-after") {
        return Some(Duration::from_secs(seconds));
    }
    let reset = header_u64(headers, "x-ratelimit-reset")?;
    let reset = SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(reset))?;
    Some(reset.duration_since(now).unwrap_or(Duration::ZERO))
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use http::HeaderName;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    use super::*;

    const NOW_EPOCH_SECS: u64 = 1_700_000_000;

    fn now() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(NOW_EPOCH_SECS)
    }

    fn headers(entries: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            let name: HeaderName = name.parse().unwrap();
            map.insert(name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn retry_after_is_relative_seconds() {
        let map = headers(&[("retry-after", "120")]);
        assert_eq!(
            delay_from_headers(&map, now()),
            Some(Duration::from_secs(120))
        );
    }

    #[test]
    fn reset_is_absolute_epoch_seconds() {
        let reset = (NOW_EPOCH_SECS + 60).to_string();
        let map = headers(&[("x-ratelimit-reset", &reset)]);
        assert_eq!(
            delay_from_headers(&map, now()),
            Some(Duration::from_secs(60))
        );
    }

    #[test]
    fn reset_in_the_past_means_no_wait() {
        let reset = (NOW_EPOCH_SECS - 30).to_string();
        let map = headers(&[("x-ratelimit-reset", &reset)]);
        assert_eq!(delay_from_headers(&map, now()), Some(Duration::ZERO));
    }

    #[test]
    fn retry_after_wins_over_reset() {
        let reset = (NOW_EPOCH_SECS + 600).to_string();
        let map = headers(&[("retry-after", "5"), ("x-ratelimit-reset", &reset)]);
        assert_eq!(
            delay_from_headers(&map, now()),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn unparsable_retry_after_falls_back_to_reset() {
        let reset = (NOW_EPOCH_SECS + 10).to_string();
        let map = headers(&[("retry-after", "soon"), ("x-ratelimit-reset", &reset)]);
        assert_eq!(
            delay_from_headers(&map, now()),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn missing_or_garbage_headers_yield_none() {
        assert_eq!(delay_from_headers(&HeaderMap::new(), now()), None);

        let map = headers(&[("x-ratelimit-reset", "tomorrow")]);
        assert_eq!(delay_from_headers(&map, now()), None);
    }

    #[test]
    fn reset_beyond_the_representable_range_yields_none() {
        // u64::MAX seconds parses fine but cannot be added to the epoch.
        let map = headers(&[("x-ratelimit-reset", "18446744073709551615")]);
        assert_eq!(delay_from_headers(&map, now()), None);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut map = HeaderMap::new();
        map.insert("Retry-After", HeaderValue::from_static("7"));
        assert!(has_rate_limit_headers(&map));
        assert_eq!(
            delay_from_headers(&map, now()),
            Some(Duration::from_secs(7))
        );
    }
}
