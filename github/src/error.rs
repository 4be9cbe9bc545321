//! Error model for GitHub API calls.
//!
//! Every failed attempt is folded into a single [`ApiError`] that carries
//! enough of the exchange (status, response headers, GraphQL errors) for the
//! retry engine to classify it without reaching back into the client.

use std::time::Duration;
use std::time::SystemTime;

use http::HeaderMap;
use http::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::rate_limit;

/// Substrings that mark an otherwise opaque error message as a network
/// failure. Matched case-insensitively.
const NETWORK_FAILURE_MARKERS: &[&str] = &[
    "connection refused",
    "connection reset",
    "connection aborted",
    "timed out",
    "broken pipe",
    "dns error",
    "socket hang up",
    "network error",
];

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    /// Machine-readable error type, e.g. `RATE_LIMITED`.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Human-readable message.
    pub message: String,
}

/// A failed GitHub API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure raised by the HTTP client before or while
    /// exchanging the request. Covers DNS failures, which reqwest reports
    /// as connect errors.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Socket-level failure surfaced by layers below the HTTP client.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The server answered with a non-success status.
    #[error("github responded with {status}: {message}")]
    Http {
        status: StatusCode,
        headers: HeaderMap,
        message: String,
    },

    /// A 200-level GraphQL response that carried an `errors` array.
    #[error("graphql request failed: {}", join_messages(.0))]
    GraphQl(Vec<GraphQlError>),

    /// An error known only by its text, e.g. one wrapped by a foreign layer.
    #[error("{0}")]
    Message(String),
}

impl ApiError {
    /// Build an error from a non-success HTTP response. The headers are kept
    /// so rate-limit hints survive into classification.
    pub fn from_response(
        status: StatusCode,
        headers: HeaderMap,
        message: impl Into<String>,
    ) -> Self {
        Self::Http {
            status,
            headers,
            message: message.into(),
        }
    }

    /// Build an error from a GraphQL `errors` array.
    pub fn from_graphql(errors: Vec<GraphQlError>) -> Self {
        Self::GraphQl(errors)
    }

    /// Whether this failure is expected to resolve on retry.
    ///
    /// True for network-level failures, HTTP 429 and 5xx, 403 accompanied by
    /// rate-limit headers, GraphQL `RATE_LIMITED` errors, and opaque
    /// messages that read like a network failure. Everything else (other
    /// 4xx, validation errors) is terminal and must surface immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(err) => err.is_timeout() || err.is_connect(),
            Self::Io(err) => matches!(
                err.kind(),
                std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::TimedOut
                    | std::io::ErrorKind::BrokenPipe
                    | std::io::ErrorKind::UnexpectedEof
            ),
            Self::Http {
                status, headers, ..
            } => {
                *status == StatusCode::TOO_MANY_REQUESTS
                    || status.is_server_error()
                    || (*status == StatusCode::FORBIDDEN
                        && rate_limit::has_rate_limit_headers(headers))
            }
            Self::GraphQl(errors) => errors.iter().any(|err| {
                err.error_type.as_deref() == Some("RATE_LIMITED")
                    || err.message.to_lowercase().contains("rate limit")
            }),
            Self::Message(text) => {
                let text = text.to_lowercase();
                NETWORK_FAILURE_MARKERS
                    .iter()
                    .any(|marker| text.contains(marker))
            }
        }
    }

    /// Server-suggested wait before the next attempt, if the response
    /// carried one (`Retry-After` or `X-RateLimit-Reset`).
    pub fn retry_delay(&self) -> Option<Duration> {
        match self {
            Self::Http { headers, .. } => {
                rate_limit::delay_from_headers(headers, SystemTime::now())
            }
            _ => None,
        }
    }

    /// HTTP status of the failed response, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }
}

fn join_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
