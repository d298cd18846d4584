//! Backend addressing types.
//!
//! The backend base address is assembled from a configured host plus a
//! fixed port and API version prefix. The host is the only part supplied
//! by the environment, so it is the only part that gets its own validated
//! type; everything else lives as constants in `homesync-sdk`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// BackendHost
// ---------------------------------------------------------------------------

/// Host (IP address or DNS name) of the HomeSync backend.
///
/// A `BackendHost` is a bare host segment — no scheme, no port, no path.
/// Validation happens once, at construction, so a malformed host can
/// never silently end up interpolated into a request URL.
///
/// # Examples
///
/// ```
/// use homesync_models::BackendHost;
///
/// let host = BackendHost::new("192.168.1.116").unwrap();
/// assert_eq!(host.as_str(), "192.168.1.116");
///
/// assert!(BackendHost::new("http://192.168.1.116").is_err());
/// assert!(BackendHost::new("").is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BackendHost(String);

impl BackendHost {
    /// Create a new `BackendHost`, validating the host string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidHost`] when the string is empty,
    /// carries a scheme, or contains path separators or whitespace.
    pub fn new(host: &str) -> Result<Self, ModelError> {
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidHost {
                value: host.to_string(),
                reason: "must not be empty".into(),
            });
        }
        if trimmed.contains("://") {
            return Err(ModelError::InvalidHost {
                value: host.to_string(),
                reason: "must not contain a scheme".into(),
            });
        }
        if trimmed.contains('/') {
            return Err(ModelError::InvalidHost {
                value: host.to_string(),
                reason: "must not contain path separators".into(),
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidHost {
                value: host.to_string(),
                reason: "must not contain whitespace".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BackendHost {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
