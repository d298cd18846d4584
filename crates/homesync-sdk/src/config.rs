//! Backend address configuration.
//!
//! The base URL is assembled from a configured host, a port, and a fixed
//! API version prefix. The host comes from `HOMESYNC_HOST` and is
//! required: a missing or malformed value is a hard startup failure, not
//! a silently undefined URL segment. The port defaults to the backend's
//! fixed 8000 and can be overridden with `HOMESYNC_PORT`.

use homesync_models::BackendHost;

use crate::error::SdkError;

/// Environment variable naming the backend host.
pub const HOST_ENV: &str = "HOMESYNC_HOST";

/// Environment variable overriding the backend port.
pub const PORT_ENV: &str = "HOMESYNC_PORT";

/// Port the backend listens on unless overridden.
pub const DEFAULT_PORT: u16 = 8000;

/// Fixed API version path segment.
pub const API_PREFIX: &str = "api/v1";

/// Resolved, validated backend address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    host: BackendHost,
    port: u16,
}

impl BackendConfig {
    /// Build a config from an already-validated host and explicit port.
    pub fn new(host: BackendHost, port: u16) -> Self {
        Self { host, port }
    }

    /// Build a config from a raw host string, using the default port.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] when the host fails validation.
    pub fn from_host(host: &str) -> Result<Self, SdkError> {
        let host = BackendHost::new(host).map_err(|e| SdkError::Config(e.to_string()))?;
        Ok(Self::new(host, DEFAULT_PORT))
    }

    /// Resolve the config from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::Config`] when `HOMESYNC_HOST` is unset or
    /// invalid, or when `HOMESYNC_PORT` is set but not a port number.
    pub fn from_env() -> Result<Self, SdkError> {
        let raw_host = std::env::var(HOST_ENV)
            .map_err(|_| SdkError::Config(format!("{HOST_ENV} is not set")))?;
        let mut config = Self::from_host(&raw_host)?;

        if let Ok(raw_port) = std::env::var(PORT_ENV) {
            config.port = raw_port
                .trim()
                .parse()
                .map_err(|_| SdkError::Config(format!("{PORT_ENV} is not a valid port: {raw_port}")))?;
        }

        Ok(config)
    }

    /// The configured host.
    pub fn host(&self) -> &BackendHost {
        &self.host
    }

    /// The configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The assembled base URL, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}/{}", self.host, self.port, API_PREFIX)
    }

    /// Full URL for an endpoint path relative to the API prefix.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_assembly() {
        let config = BackendConfig::from_host("192.168.1.116").unwrap();
        assert_eq!(config.base_url(), "http://192.168.1.116:8000/api/v1");
        assert_eq!(
            config.endpoint_url("process_ticket"),
            "http://192.168.1.116:8000/api/v1/process_ticket"
        );
        assert_eq!(
            config.endpoint_url("/process_voice_command"),
            "http://192.168.1.116:8000/api/v1/process_voice_command"
        );
    }

    #[test]
    fn explicit_port_overrides_default() {
        let host = homesync_models::BackendHost::new("localhost").unwrap();
        let config = BackendConfig::new(host, 3999);
        assert_eq!(config.port(), 3999);
        assert_eq!(config.base_url(), "http://localhost:3999/api/v1");
    }

    #[test]
    fn invalid_host_is_a_config_error() {
        let err = BackendConfig::from_host("http://10.0.0.2").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }
}
