//! Media-library capture sub-flow.
//!
//! The desktop stand-in for the mobile camera flow: an image is picked
//! from the local filesystem, access is confirmed before any bytes are
//! read, and the bytes are base64-encoded for the wire.
//!
//! Failure modes are kept distinct on purpose — an unreadable path is a
//! *permission* refusal, an unsupported or undecodable file is a
//! *capture* failure — because the screen reports them differently.

use std::path::Path;

use base64::Engine;
use homesync_models::{image_mime_for_path, CapturedImage, ModelError};
use tracing::debug;

use crate::error::SdkError;

/// Confirm that a library file can be accessed at all.
///
/// # Errors
///
/// Returns [`SdkError::Permission`] when the path does not exist or its
/// metadata cannot be read. This runs before any image bytes are read.
pub fn ensure_library_access(path: &str) -> Result<(), SdkError> {
    let p = Path::new(path);
    match p.metadata() {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(SdkError::Permission(format!("{path} is not a file"))),
        Err(e) => Err(SdkError::Permission(format!("cannot access {path}: {e}"))),
    }
}

/// Pick an image from the media library and prepare it for sending.
///
/// Runs the access check, rejects non-image extensions, then reads and
/// base64-encodes the bytes.
///
/// # Errors
///
/// [`SdkError::Permission`] when the file cannot be accessed,
/// [`SdkError::Capture`] when it is not a supported image type, and
/// [`SdkError::Io`] when reading fails after the access check passed.
pub fn pick_from_library(path: &str) -> Result<CapturedImage, SdkError> {
    ensure_library_access(path)?;

    let mime_type = image_mime_for_path(path).ok_or(ModelError::UnsupportedImageType {
        path: path.to_string(),
    })?;

    let bytes = std::fs::read(path)?;
    let image_base64 = base64::engine::general_purpose::STANDARD.encode(&bytes);

    debug!(
        path,
        bytes = bytes.len(),
        base64_len = image_base64.len(),
        "image captured from library"
    );

    Ok(CapturedImage {
        path: path.to_string(),
        mime_type: mime_type.to_string(),
        image_base64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_image(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> String {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn missing_file_is_a_permission_refusal() {
        let err = pick_from_library("/no/such/ticket.png").unwrap_err();
        assert!(matches!(err, SdkError::Permission(_)));
    }

    #[test]
    fn directory_is_a_permission_refusal() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_library_access(&dir.path().to_string_lossy()).unwrap_err();
        assert!(matches!(err, SdkError::Permission(_)));
    }

    #[test]
    fn non_image_extension_is_a_capture_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_image(&dir, "receipt.txt", b"plain text");
        let err = pick_from_library(&path).unwrap_err();
        assert!(matches!(
            err,
            SdkError::Capture(ModelError::UnsupportedImageType { .. })
        ));
    }

    #[test]
    fn successful_pick_encodes_base64() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp_image(&dir, "ticket.png", b"hello");
        let image = pick_from_library(&path).unwrap();
        assert_eq!(image.image_base64, "aGVsbG8=");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.path, path);
    }
}
