//! HTTP client for the HomeSync backend.
//!
//! [`BackendClient`] performs the two request/response interactions the
//! screen depends on. Both are plain fire-and-forget POSTs: no retry, no
//! backoff, no authentication, and no local timeout beyond the reqwest
//! defaults. Every retry is a fresh call made by the user.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use homesync_sdk::{BackendClient, BackendConfig};
//!
//! # async fn run() -> Result<(), homesync_sdk::SdkError> {
//! let client = BackendClient::new(BackendConfig::from_host("192.168.1.116")?);
//! let reply = client.process_voice_command("what do we need to buy?").await?;
//! println!("{reply:#}");
//! # Ok(())
//! # }
//! ```

use homesync_models::{ApiErrorBody, TicketRequest, VoiceCommandRequest, TICKET_PROMPT};
use serde_json::Value;
use tracing::debug;

use crate::config::BackendConfig;
use crate::error::SdkError;

/// Endpoint path of the ticket interaction.
pub const PROCESS_TICKET_PATH: &str = "process_ticket";

/// Endpoint path of the voice-command interaction.
pub const PROCESS_VOICE_COMMAND_PATH: &str = "process_voice_command";

/// A configured client for the HomeSync backend.
///
/// Cheap to clone; the underlying reqwest client is shared.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    /// Create a client for the given backend address.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// The backend address this client talks to.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Interactions
    // ------------------------------------------------------------------

    /// Send a captured ticket image for extraction.
    ///
    /// The fixed [`TICKET_PROMPT`] is attached to every call. The reply
    /// is whatever JSON the backend produced.
    ///
    /// # Errors
    ///
    /// [`SdkError::Backend`] on a non-success status (with the `detail`
    /// field of the error body when present), [`SdkError::Http`] on
    /// transport failure.
    pub async fn process_ticket(
        &self,
        image: &homesync_models::CapturedImage,
    ) -> Result<Value, SdkError> {
        let url = self.config.endpoint_url(PROCESS_TICKET_PATH);
        let request = TicketRequest {
            image_base64: image.image_base64.clone(),
            prompt_gemini: TICKET_PROMPT.to_string(),
        };

        debug!(%url, base64_len = image.base64_len(), "sending ticket");

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        Self::read_reply(response).await
    }

    /// Send a voice-style text command for interpretation.
    ///
    /// Same success/error contract as [`process_ticket`](Self::process_ticket),
    /// tracked independently by callers.
    pub async fn process_voice_command(&self, command_text: &str) -> Result<Value, SdkError> {
        let url = self.config.endpoint_url(PROCESS_VOICE_COMMAND_PATH);
        let request = VoiceCommandRequest {
            command_text: command_text.to_string(),
        };

        debug!(%url, "sending voice command");

        let response = self.http.post(&url).json(&request).send().await?;

        Self::read_reply(response).await
    }

    // ------------------------------------------------------------------
    // Reply handling
    // ------------------------------------------------------------------

    /// Turn an HTTP reply into the backend's JSON or the most specific
    /// available error.
    ///
    /// On a non-success status the `detail` field of the error body is
    /// preferred; a body that is missing or not in the expected shape
    /// falls back to the HTTP status line.
    async fn read_reply(response: reqwest::Response) -> Result<Value, SdkError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Value>().await?);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let detail = serde_json::from_slice::<ApiErrorBody>(&bytes)
            .map(|body| body.detail)
            .unwrap_or_else(|_| format!("HTTP {status}"));

        debug!(%status, %detail, "backend call failed");
        Err(SdkError::Backend {
            status: status.as_u16(),
            detail,
        })
    }
}
