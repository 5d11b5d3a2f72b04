//! Error types for picvote
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for picvote operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, session resolution, backend API calls, and
/// vote submission.
#[derive(Error, Debug)]
pub enum PicvoteError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session resolution or persistence errors
    #[error("Session error: {0}")]
    Session(String),

    /// Vote submission refused before any network call
    #[error("Vote error: {0}")]
    Vote(String),

    /// Backend API errors (unexpected or malformed responses)
    #[error("API error: {0}")]
    Api(String),

    /// Request rejected by the backend with a non-success status
    #[error("Request rejected: status={status}, {message}")]
    Rejected {
        /// HTTP status code returned by the backend
        status: u16,
        /// Server-supplied error message, or a generic fallback
        message: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl PicvoteError {
    /// Message suitable for direct display to the user
    ///
    /// Rejections surface the server's own message; transport errors get
    /// the generic retry hint the UI shows for connectivity problems.
    pub fn user_message(&self) -> String {
        match self {
            PicvoteError::Rejected { message, .. } => message.clone(),
            PicvoteError::Session(message) | PicvoteError::Vote(message) => message.clone(),
            PicvoteError::Http(_) => "Error recording vote. Please try again.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for picvote operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = PicvoteError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_session_error_display() {
        let error = PicvoteError::Session("store unreadable".to_string());
        assert_eq!(error.to_string(), "Session error: store unreadable");
    }

    #[test]
    fn test_api_error_display() {
        let error = PicvoteError::Api("missing sessionId field".to_string());
        assert_eq!(error.to_string(), "API error: missing sessionId field");
    }

    #[test]
    fn test_vote_error_display() {
        let error = PicvoteError::Vote("vote already in flight".to_string());
        assert_eq!(error.to_string(), "Vote error: vote already in flight");
    }

    #[test]
    fn test_session_user_message_is_bare_text() {
        let error = PicvoteError::Session("Session not initialized. Please restart.".to_string());
        assert_eq!(
            error.user_message(),
            "Session not initialized. Please restart."
        );
    }

    #[test]
    fn test_rejected_error_display() {
        let error = PicvoteError::Rejected {
            status: 400,
            message: "You have already voted for this picture today!".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("status=400"));
        assert!(s.contains("already voted"));
    }

    #[test]
    fn test_rejected_user_message_keeps_server_text() {
        let error = PicvoteError::Rejected {
            status: 400,
            message: "You have already voted for this picture today!".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "You have already voted for this picture today!"
        );
    }

    #[test]
    fn test_api_user_message_is_display_string() {
        let error = PicvoteError::Api("truncated body".to_string());
        assert_eq!(error.user_message(), "API error: truncated body");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: PicvoteError = io_error.into();
        assert!(matches!(error, PicvoteError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: PicvoteError = json_error.into();
        assert!(matches!(error, PicvoteError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: PicvoteError = yaml_error.into();
        assert!(matches!(error, PicvoteError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PicvoteError>();
    }
}
