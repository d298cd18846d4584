//! Wire types for the two backend endpoints.
//!
//! The request bodies mirror the backend's pydantic models field for
//! field. Success replies are arbitrary JSON and are never deserialized
//! into a fixed shape — the client pretty-prints them under a fixed
//! header. Error replies carry a structured `detail` field
//! ([`ApiErrorBody`]) when the backend produced them itself.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /process_ticket`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TicketRequest {
    /// Base64-encoded image bytes (standard alphabet, no data-URI prefix).
    pub image_base64: String,
    /// Natural-language extraction instruction forwarded to the model.
    pub prompt_gemini: String,
}

/// Body of `POST /process_voice_command`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VoiceCommandRequest {
    /// Raw command text as typed by the user.
    pub command_text: String,
}

// ---------------------------------------------------------------------------
// Error reply
// ---------------------------------------------------------------------------

/// Structured error payload returned by the backend on failure.
///
/// FastAPI wraps `HTTPException` messages as `{"detail": "..."}`; any
/// other error body simply fails to parse into this shape and the caller
/// falls back to a generic message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorBody {
    /// Human-readable error description.
    pub detail: String,
}

// ---------------------------------------------------------------------------
// Response rendering
// ---------------------------------------------------------------------------

/// Header line shown above a ticket reply.
pub const TICKET_RESPONSE_HEADER: &str = "Ticket response:";

/// Header line shown above a voice-command reply.
pub const VOICE_RESPONSE_HEADER: &str = "Voice command response:";

/// Render a backend reply as display text: the fixed header, a newline,
/// then the pretty-printed JSON.
///
/// # Examples
///
/// ```
/// use homesync_models::{render_response, TICKET_RESPONSE_HEADER};
///
/// let reply = serde_json::json!({ "total": 12.5 });
/// let text = render_response(TICKET_RESPONSE_HEADER, &reply);
/// assert!(text.starts_with("Ticket response:\n{"));
/// ```
pub fn render_response(header: &str, reply: &serde_json::Value) -> String {
    let pretty = serde_json::to_string_pretty(reply).unwrap_or_else(|_| reply.to_string());
    format!("{header}\n{pretty}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ticket_request_wire_shape() {
        let req = TicketRequest {
            image_base64: "aGVsbG8=".into(),
            prompt_gemini: "Extract the totals.".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "image_base64": "aGVsbG8=",
                "prompt_gemini": "Extract the totals.",
            })
        );
    }

    #[test]
    fn voice_request_wire_shape() {
        let req = VoiceCommandRequest {
            command_text: "what do we need to buy?".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({ "command_text": "what do we need to buy?" }));
    }

    #[test]
    fn error_body_parses_detail() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"detail": "invalid image"}"#).unwrap();
        assert_eq!(body.detail, "invalid image");
    }

    #[test]
    fn error_body_rejects_missing_detail() {
        assert!(serde_json::from_str::<ApiErrorBody>(r#"{"error": "boom"}"#).is_err());
    }

    #[test]
    fn render_response_is_header_plus_pretty_json() {
        let reply = json!({ "total": 12.5 });
        let text = render_response(TICKET_RESPONSE_HEADER, &reply);
        let expected = format!(
            "{}\n{}",
            TICKET_RESPONSE_HEADER,
            serde_json::to_string_pretty(&reply).unwrap()
        );
        assert_eq!(text, expected);
    }
}
