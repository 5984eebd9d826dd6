//! Upstream-specific error types
//!
//! `UpstreamError` classifies failures from the CoinMarketCap API before
//! they travel upward. Conversion into `cmc_foundation::Error` happens at
//! the crate boundary so callers outside the gateway deal with one taxonomy.

use cmc_foundation::Error as FoundationError;
use thiserror::Error;

/// Errors raised by the gateway's HTTP call
#[derive(Error, Debug, Clone)]
pub enum UpstreamError {
    /// Upstream HTTP 401/403
    #[error("API key missing or invalid")]
    Auth,

    /// Upstream HTTP 429
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Upstream HTTP >= 500
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Connection refused, timeout, or generic network failure
    #[error("{0}")]
    Transport(String),

    /// Anything else
    #[error("{0}")]
    Unknown(String),
}

impl UpstreamError {
    /// Classify a non-2xx HTTP response.
    ///
    /// The body is the CoinMarketCap envelope when the API produced the
    /// failure; its `status.error_message` is surfaced when present.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => UpstreamError::Auth,
            429 => UpstreamError::RateLimited,
            500..=599 => UpstreamError::Server {
                status,
                message: envelope_error_message(body)
                    .unwrap_or_else(|| "upstream server error".to_string()),
            },
            _ => UpstreamError::Unknown(format!(
                "API Error ({}): {}",
                status,
                envelope_error_message(body).unwrap_or_else(|| body.to_string())
            )),
        }
    }
}

/// Extract `status.error_message` from a CoinMarketCap response envelope
fn envelope_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("status")
        .and_then(|s| s.get("error_message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Transport("Request timed out".to_string())
        } else if err.is_connect() {
            UpstreamError::Transport(format!("Connection failed: {}", err))
        } else {
            UpstreamError::Transport(format!("Network error: {}", err))
        }
    }
}

impl From<UpstreamError> for FoundationError {
    fn from(err: UpstreamError) -> Self {
        FoundationError::Upstream(err.to_string())
    }
}
