// SPDX-License-Identifier: MPL-2.0
//! Image intake: MIME detection, reading the selected file, and preview decoding.
//!
//! The selected image is read once and kept in memory for the whole analysis
//! cycle. Its MIME type is derived from the file extension, the same way a
//! browser fills in `File.type`, so that drops can be filtered without touching
//! the file contents.

pub mod preview;

pub use preview::{decode_preview, Preview};

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// MIME type used when the extension is unknown.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Extension tables used for MIME detection and the file picker filter.
pub mod extensions {
    /// Image file extensions offered by the picker filter.
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif", "ico", "avif",
    ];

    /// Extension to MIME type table (lowercase extensions).
    pub const MIME_TYPES: &[(&str, &str)] = &[
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("png", "image/png"),
        ("gif", "image/gif"),
        ("webp", "image/webp"),
        ("bmp", "image/bmp"),
        ("tif", "image/tiff"),
        ("tiff", "image/tiff"),
        ("ico", "image/x-icon"),
        ("avif", "image/avif"),
        ("svg", "image/svg+xml"),
        ("heic", "image/heic"),
        ("heif", "image/heif"),
        ("txt", "text/plain"),
        ("pdf", "application/pdf"),
        ("json", "application/json"),
        ("zip", "application/zip"),
        ("mp4", "video/mp4"),
        ("webm", "video/webm"),
        ("mp3", "audio/mpeg"),
    ];
}

/// Returns the MIME type implied by the path's extension.
#[must_use]
pub fn mime_from_path<P: AsRef<Path>>(path: P) -> &'static str {
    let Some(extension) = path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
    else {
        return FALLBACK_MIME;
    };

    extensions::MIME_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(FALLBACK_MIME, |(_, mime)| *mime)
}

/// Returns `true` when the MIME type belongs to the `image/` family.
#[must_use]
pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// The file chosen by the user, held in memory for one analysis cycle.
#[derive(Clone)]
pub struct SelectedImage {
    path: PathBuf,
    file_name: String,
    mime: String,
    bytes: Arc<[u8]>,
}

impl SelectedImage {
    /// Builds a selection from already-read bytes.
    pub fn new(path: impl Into<PathBuf>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let mime = mime_from_path(&path).to_string();
        Self {
            path,
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle on the raw bytes (cheap to clone into background tasks).
    #[must_use]
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("path", &self.path)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Reads the file at `path` into a [`SelectedImage`].
pub async fn load_selected_image(path: PathBuf) -> Result<SelectedImage> {
    let bytes = tokio::fs::read(&path).await.map_err(|err| {
        Error::Io(format!("{}: {err}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), len = bytes.len(), "read selected image");
    Ok(SelectedImage::new(path, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn mime_detection_covers_common_image_formats() {
        assert_eq!(mime_from_path("photo.jpg"), "image/jpeg");
        assert_eq!(mime_from_path("photo.JPEG"), "image/jpeg");
        assert_eq!(mime_from_path("/tmp/face.png"), "image/png");
        assert_eq!(mime_from_path("face.webp"), "image/webp");
    }

    #[test]
    fn non_image_and_unknown_extensions_are_not_images() {
        assert!(!is_image_mime(mime_from_path("notes.txt")));
        assert!(!is_image_mime(mime_from_path("clip.mp4")));
        assert_eq!(mime_from_path("archive.xyz"), FALLBACK_MIME);
        assert_eq!(mime_from_path("Makefile"), FALLBACK_MIME);
    }

    #[test]
    fn picker_extensions_all_map_to_image_mimes() {
        for ext in extensions::IMAGE_EXTENSIONS {
            let mime = mime_from_path(format!("file.{ext}"));
            assert!(is_image_mime(mime), "{ext} should map to an image MIME, got {mime}");
        }
    }

    #[test]
    fn selected_image_derives_name_and_mime() {
        let image = SelectedImage::new("/photos/smile.png", vec![1u8, 2, 3]);
        assert_eq!(image.file_name(), "smile.png");
        assert_eq!(image.mime(), "image/png");
        assert_eq!(image.bytes(), &[1, 2, 3]);
    }

    #[tokio::test]
    async fn load_selected_image_reads_bytes() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("face.jpg");
        std::fs::write(&path, b"jpeg-bytes").expect("write file");

        let image = load_selected_image(path.clone()).await.expect("load");
        assert_eq!(image.path(), path.as_path());
        assert_eq!(image.bytes(), b"jpeg-bytes");
        assert_eq!(image.mime(), "image/jpeg");
    }

    #[tokio::test]
    async fn load_selected_image_reports_missing_file() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("gone.png");

        match load_selected_image(missing).await {
            Err(Error::Io(message)) => assert!(message.contains("gone.png")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
