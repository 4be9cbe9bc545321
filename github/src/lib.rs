//! Resilience layer for GitHub API calls.
//!
//! This crate decides what happens after a GitHub request fails: whether the
//! failure is worth retrying at all, how long to wait before the next
//! attempt, and when to give up and hand the original error back to the
//! caller untouched.
//!
//! ## Pieces
//!
//! - [`ApiError`] - the single error currency; carries enough of the failed
//!   exchange (status, headers, GraphQL errors) to classify itself.
//! - [`ApiError::is_transient`] - is this failure expected to resolve on its
//!   own (network blip, rate limit, server overload)?
//! - [`ApiError::retry_delay`] - did the server tell us how long to wait
//!   (`Retry-After`, `X-RateLimit-Reset`)?
//! - [`with_retry`] - drives an async operation through bounded retries with
//!   jittered exponential backoff, honoring server-provided delays.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bosun_github::RetryConfig;
//! use bosun_github::with_retry;
//!
//! let issue = with_retry(&RetryConfig::default(), || client.fetch_issue(42)).await?;
//! ```
//!
//! Request construction itself lives in the CLI's client layer; this crate
//! only sees the outcome of each attempt.

mod error;
mod rate_limit;
mod retry;

pub use error::*;
pub use rate_limit::delay_from_headers;
pub use retry::*;
