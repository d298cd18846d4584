//! Error types for the `homesync-models` crate.
//!
//! All fallible constructors and validators in this crate return
//! variants of [`ModelError`].

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A backend host string was empty or contained forbidden characters.
    #[error("invalid backend host \"{value}\": {reason}")]
    InvalidHost {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A picked file does not look like a supported image type.
    #[error("unsupported image type: {path}")]
    UnsupportedImageType {
        /// The path that was rejected.
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_host() {
        let err = ModelError::InvalidHost {
            value: "http://x".into(),
            reason: "must not contain a scheme".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid backend host \"http://x\": must not contain a scheme"
        );
    }

    #[test]
    fn error_display_image_type() {
        let err = ModelError::UnsupportedImageType {
            path: "notes.txt".into(),
        };
        assert_eq!(err.to_string(), "unsupported image type: notes.txt");
    }
}
