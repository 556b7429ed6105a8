use chrono::{DateTime, Utc};
use http::{HeaderMap, Response, StatusCode};
use serde_json::Value;
use url::Url;

use crate::error::TransportError;

/// Resolves an API path against `base`, or parses `endpoint` as-is when it is
/// already absolute (e.g. a `repos_url` link taken from a user payload).
pub fn resolve_endpoint(base: &Url, endpoint: &str) -> Result<Url, TransportError> {
    let parsed = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)
    } else {
        base.join(endpoint.trim_start_matches('/'))
    };
    parsed.map_err(|err| TransportError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: err.to_string(),
    })
}

/// Turns a raw response into JSON, or a categorized error for non-2xx.
pub fn classify_response(
    endpoint: &str,
    response: Response<Vec<u8>>,
) -> Result<Value, TransportError> {
    let status = response.status();
    let body = response.into_body();

    if status.is_success() {
        if body.is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_slice(&body).map_err(|err| TransportError::Body {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        });
    }

    let message = upstream_message(&body).unwrap_or_else(|| default_message(status));
    Err(TransportError::status(status, endpoint, message))
}

fn upstream_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("unexpected status {}", status.as_u16()))
}

#[derive(Debug, Clone)]
pub struct RateLimitUpdate {
    pub limit: i64,
    pub remaining: i64,
    pub reset: DateTime<Utc>,
}

pub fn parse_rate_limit(headers: &HeaderMap) -> Option<RateLimitUpdate> {
    let limit = headers
        .get("x-ratelimit-limit")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())?;
    let remaining = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())?;
    let reset_ts = headers
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())?;
    let reset = DateTime::from_timestamp(reset_ts, 0)?;
    Some(RateLimitUpdate {
        limit,
        remaining,
        reset,
    })
}
