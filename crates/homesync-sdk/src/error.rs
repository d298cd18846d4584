//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK. It wraps configuration, capture, transport and
//! backend errors into a unified enum.

use homesync_models::ModelError;

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid or missing configuration (e.g. unset host variable).
    #[error("configuration error: {0}")]
    Config(String),

    /// The media library (or a file in it) could not be accessed.
    #[error("library access denied: {0}")]
    Permission(String),

    /// The capture flow failed after access was granted.
    #[error("capture failed: {0}")]
    Capture(#[from] ModelError),

    /// The backend answered with a non-success status.
    ///
    /// `detail` already holds the most specific description available:
    /// the `detail` field of the error body when the backend sent one,
    /// otherwise the HTTP status line.
    #[error("backend error ({status}): {detail}")]
    Backend {
        /// HTTP status code of the reply.
        status: u16,
        /// Extracted error description.
        detail: String,
    },

    /// HTTP transport failure (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    /// The most specific message suitable for showing to the user.
    ///
    /// Backend errors surface their extracted `detail` alone (without
    /// the status decoration); everything else falls back to the
    /// variant's display text.
    pub fn user_message(&self) -> String {
        match self {
            SdkError::Backend { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_user_message_is_bare_detail() {
        let err = SdkError::Backend {
            status: 500,
            detail: "invalid image".into(),
        };
        assert_eq!(err.user_message(), "invalid image");
        assert_eq!(err.to_string(), "backend error (500): invalid image");
    }

    #[test]
    fn other_variants_use_display_text() {
        let err = SdkError::Config("HOMESYNC_HOST is not set".into());
        assert_eq!(
            err.user_message(),
            "configuration error: HOMESYNC_HOST is not set"
        );
    }
}
