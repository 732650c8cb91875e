use chrono::{
    DateTime,
    NaiveDateTime,
    Utc,
};
use reqwest::{
    StatusCode,
    header::{
        HeaderMap,
        RETRY_AFTER,
    },
};
use std::time::Duration;

pub(crate) const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(1000);
pub(crate) const MAX_RETRY_DELAY: Duration = Duration::from_secs(60);
const JITTER_FACTOR: f64 = 0.2;
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";
/// Obsolete HTTP date forms recipients must still accept (RFC 9110 §5.6.7)
const RFC_850_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Request timeout, rate limiting and server errors are worth another attempt
pub(crate) fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::REQUEST_TIMEOUT
        || status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
}

/// Delay before retry number `attempt` (0-based).
///
/// `jitter` is a uniform sample from `[0, 1)`.
pub(crate) fn retry_delay(
    headers: &HeaderMap,
    attempt: u32,
    now: DateTime<Utc>,
    jitter: f64,
) -> Duration {
    if let Some(delay) = retry_after(headers, now) {
        return add_positive_jitter(delay, jitter);
    }

    if let Some(delay) = rate_limit_reset(headers, now) {
        return add_positive_jitter(delay, jitter);
    }

    let exponential = INITIAL_RETRY_DELAY
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(MAX_RETRY_DELAY);
    add_symmetric_jitter(exponential, jitter)
}

fn header_str<'a>(
    headers: &'a HeaderMap,
    name: impl reqwest::header::AsHeaderName,
) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok()).map(str::trim)
}

/// `Retry-After` as delta seconds or an HTTP date
fn retry_after(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    let value = header_str(headers, RETRY_AFTER)?;
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let at = parse_http_date(value)?;
    (at - now).to_std().ok()
}

/// IMF-fixdate (via RFC 2822), RFC 850 or asctime
fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc2822(value) {
        return Some(at.with_timezone(&Utc));
    }

    let normalized = value.split_whitespace().collect::<Vec<_>>().join(" ");
    [RFC_850_FORMAT, ASCTIME_FORMAT]
        .into_iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
        .map(|at| at.and_utc())
}

/// `X-RateLimit-Reset` as a unix timestamp in seconds
fn rate_limit_reset(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    let reset = header_str(headers, RATE_LIMIT_RESET)?.parse::<i64>().ok()?;
    let at = DateTime::from_timestamp(reset, 0)?;
    (at - now).to_std().ok().filter(|delay| !delay.is_zero())
}

fn add_positive_jitter(delay: Duration, jitter: f64) -> Duration {
    scale(delay, 1.0 + jitter * JITTER_FACTOR)
}

fn add_symmetric_jitter(delay: Duration, jitter: f64) -> Duration {
    scale(delay, 1.0 + (jitter - 0.5) * JITTER_FACTOR)
}

/// Delays are capped before scaling so server supplied values cannot overflow
fn scale(delay: Duration, multiplier: f64) -> Duration {
    let delay = delay.min(MAX_RETRY_DELAY);
    Duration::try_from_secs_f64(delay.as_secs_f64() * multiplier)
        .map_or(MAX_RETRY_DELAY, |scaled| scaled.min(MAX_RETRY_DELAY))
}
