// SPDX-License-Identifier: MPL-2.0
//! Local preview decoding for the selected image.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use std::sync::Arc;

/// Longest edge of the decoded preview; larger images are downscaled.
pub const PREVIEW_MAX_EDGE: u32 = 1024;

/// A decoded, renderable representation of the selected image.
#[derive(Debug, Clone)]
pub struct Preview {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

/// Decodes encoded image bytes into an RGBA preview.
pub fn decode_preview(bytes: &[u8]) -> Result<Preview> {
    let decoded = image_rs::load_from_memory(bytes)?;
    let decoded = if decoded.width() > PREVIEW_MAX_EDGE || decoded.height() > PREVIEW_MAX_EDGE {
        decoded.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE)
    } else {
        decoded
    };

    let (width, height) = decoded.dimensions();
    let pixels = decoded.to_rgba8().into_vec();
    Ok(Preview {
        handle: image::Handle::from_rgba(width, height, pixels),
        width,
        height,
    })
}

/// Decodes off the async executor so large files don't stall the UI runtime.
pub async fn decode_preview_async(bytes: Arc<[u8]>) -> Result<Preview> {
    tokio::task::spawn_blocking(move || decode_preview(&bytes))
        .await
        .map_err(|err| Error::Image(format!("preview task failed: {err}")))?
}
