//! Leaf producers: solid fills and decoded raster blobs.

use crate::{
    artifact::model::{BlobArtifact, ImageArtifact},
    foundation::core::Rgba8,
    foundation::error::{TesseraError, TesseraResult},
};

/// `width` x `height` canvas filled uniformly with `color`.
pub fn create_solid(width: u32, height: u32, color: Rgba8) -> TesseraResult<ImageArtifact> {
    if width == 0 || height == 0 {
        return Err(TesseraError::validation(format!(
            "gfx:create_solid: size must be positive, got {width}x{height}"
        )));
    }
    ImageArtifact::filled(width, height, color)
}

/// Decode PNG/JPEG/WEBP bytes into straight RGBA.
#[tracing::instrument(skip(blob), fields(content_type = blob.content_type(), len = blob.data().len()))]
pub fn blob_to_image(blob: &BlobArtifact) -> TesseraResult<ImageArtifact> {
    let decoded = image::load_from_memory(blob.data()).map_err(|e| {
        TesseraError::decode(blob.content_type(), format!("gfx:blob_to_image: {e}"))
    })?;
    ImageArtifact::from_dynamic(decoded)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/source.rs"]
mod tests;
