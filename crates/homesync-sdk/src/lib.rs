//! # HomeSync SDK
//!
//! Client SDK for the **HomeSync AI** backend.
//!
//! The SDK provides:
//!
//! * [`BackendClient`] — HTTP client for the two backend interactions
//!   (ticket processing and voice-style text commands).
//! * [`BackendConfig`] — backend address resolved from the environment
//!   and validated once, before anything goes on the wire.
//! * [`capture`] — the media-library capture sub-flow (access check,
//!   image read, base64 encoding).
//! * [`SdkError`] — unified error type for all SDK operations.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use homesync_sdk::{BackendClient, BackendConfig};
//!
//! # async fn run() -> Result<(), homesync_sdk::SdkError> {
//! let config = BackendConfig::from_env()?;
//! let client = BackendClient::new(config);
//!
//! let image = homesync_sdk::capture::pick_from_library("ticket.jpg")?;
//! let reply = client.process_ticket(&image).await?;
//! println!("{reply:#}");
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod client;
pub mod config;
pub mod error;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::SdkError;

// Re-export wire types from homesync-models for ergonomic usage.
pub use homesync_models::{
    render_response, CapturedImage, TicketRequest, VoiceCommandRequest, TICKET_PROMPT,
    TICKET_RESPONSE_HEADER, VOICE_RESPONSE_HEADER,
};
