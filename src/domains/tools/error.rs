//! Tool-specific error types.

use thiserror::Error;

use crate::domains::maps::MapsError;

/// Errors that can occur during tool operations.
///
/// `InvalidArguments` and `Upstream` are the two outcomes a tool call can
/// fail with. Neither is retried.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Malformed or out-of-range arguments, detected before any upstream call.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The mapping provider call failed.
    #[error("Upstream error: {0}")]
    Upstream(#[from] MapsError),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable kind, reported alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidArguments(_) => "invalid_arguments",
            Self::Upstream(_) => "upstream",
            Self::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ToolError::invalid_arguments("x").kind(), "invalid_arguments");
        assert_eq!(ToolError::from(MapsError::MissingApiKey).kind(), "upstream");
        assert_eq!(ToolError::not_found("nope").kind(), "not_found");
    }
}
