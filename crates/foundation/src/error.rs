//! Error types for cmc-server
//!
//! Every crate funnels failures into this enum. The gateway keeps its own
//! `UpstreamError` for HTTP classification and converts into `Error` at the
//! crate boundary.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// cmc-server error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Validation
    // ========================================================================
    // Displays the bare message: validation failures cross the tool boundary
    // as "Error: <message>" and the message already names field + constraint.
    #[error("{0}")]
    Validation(String),

    // ========================================================================
    // Tools
    // ========================================================================
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool error: {0}")]
    Tool(String),

    // ========================================================================
    // Upstream API
    // ========================================================================
    // Carries the already-classified message from the gateway.
    #[error("{0}")]
    Upstream(String),

    // ========================================================================
    // External conversions
    // ========================================================================
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Other
    // ========================================================================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Validation error helper
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Whether the failure was detected locally, before any network call
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Validation(_) | Error::Config(_) | Error::ToolNotFound(_)
        )
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Internal(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Internal(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_bare_message() {
        let err = Error::validation("Limit must be an integer between 1 and 100");
        assert_eq!(err.to_string(), "Limit must be an integer between 1 and 100");
    }

    #[test]
    fn test_is_local() {
        assert!(Error::validation("bad").is_local());
        assert!(Error::Config("missing key".into()).is_local());
        assert!(!Error::Upstream("Server error".into()).is_local());
    }
}
