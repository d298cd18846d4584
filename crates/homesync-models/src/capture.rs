//! Captured-image payload.
//!
//! A capture replaces any previous one; the path is kept only so the
//! screen can show which file is about to be sent, and the base64 payload
//! is what actually goes over the wire.

use serde::{Deserialize, Serialize};

/// Number of payload characters included in a debug preview.
const PREVIEW_LEN: usize = 50;

/// An image picked from the local media library, ready to send.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// Display-only reference to the source file.
    pub path: String,
    /// Detected mime type (from the file extension).
    pub mime_type: String,
    /// Base64-encoded image bytes.
    pub image_base64: String,
}

impl CapturedImage {
    /// Length of the base64 payload in characters.
    pub fn base64_len(&self) -> usize {
        self.image_base64.len()
    }

    /// A short, log-safe preview of the base64 payload.
    pub fn base64_preview(&self) -> String {
        if self.image_base64.len() <= PREVIEW_LEN {
            self.image_base64.clone()
        } else {
            format!("{}...", &self.image_base64[..PREVIEW_LEN])
        }
    }
}

/// Map a file extension to an image mime type.
///
/// Returns `None` for anything that is not a supported still-image
/// format — the capture flow refuses such files before reading them.
pub fn image_mime_for_path(path: &str) -> Option<&'static str> {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())?
        .to_lowercase();

    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "bmp" => Some("image/bmp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_detection_by_extension() {
        assert_eq!(image_mime_for_path("ticket.jpg"), Some("image/jpeg"));
        assert_eq!(image_mime_for_path("TICKET.PNG"), Some("image/png"));
        assert_eq!(image_mime_for_path("/a/b/scan.webp"), Some("image/webp"));
        assert_eq!(image_mime_for_path("notes.txt"), None);
        assert_eq!(image_mime_for_path("no_extension"), None);
    }

    #[test]
    fn short_payload_previewed_whole() {
        let img = CapturedImage {
            path: "t.png".into(),
            mime_type: "image/png".into(),
            image_base64: "aGVsbG8=".into(),
        };
        assert_eq!(img.base64_preview(), "aGVsbG8=");
        assert_eq!(img.base64_len(), 8);
    }

    #[test]
    fn long_payload_preview_truncated() {
        let img = CapturedImage {
            path: "t.png".into(),
            mime_type: "image/png".into(),
            image_base64: "A".repeat(200),
        };
        let preview = img.base64_preview();
        assert_eq!(preview.len(), 53);
        assert!(preview.ends_with("..."));
    }
}
