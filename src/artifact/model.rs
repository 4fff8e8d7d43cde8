use std::{io::Cursor, sync::Arc};

use anyhow::Context as _;

use crate::{
    artifact::identity::{ContentHash, ContentHasher},
    foundation::core::Rgba8,
    foundation::error::{TesseraError, TesseraResult},
};

/// Opaque byte payload tagged with a content type (`image/svg+xml`, `font/ttf`, ...).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BlobArtifact {
    data: Arc<[u8]>,
    content_type: String,
}

impl BlobArtifact {
    /// Wrap `data` with its `content_type`.
    pub fn new(data: impl Into<Arc<[u8]>>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    /// Payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Content type tag.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Stable identity of payload + content type.
    pub fn content_hash(&self) -> ContentHash {
        let mut h = ContentHasher::new(b"blob");
        h.write_bytes(self.content_type.as_bytes());
        h.write_bytes(&self.data);
        h.finish()
    }
}

impl std::fmt::Debug for BlobArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobArtifact")
            .field("content_type", &self.content_type)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Raster image in straight RGBA8, row-major, top-left origin.
///
/// Width and height are always positive and `pixels().len() == width * height * 4`. The buffer is
/// shared and never mutated; every transform returns a new artifact.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ImageArtifact {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl ImageArtifact {
    /// Build from an owned straight-RGBA8 buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> TesseraResult<Self> {
        let expected = rgba_len(width, height)?;
        if pixels.len() != expected {
            return Err(TesseraError::validation(format!(
                "image buffer length {} does not match {width}x{height}x4 = {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Canvas of `width` x `height` filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> TesseraResult<Self> {
        let len = rgba_len(width, height)?;
        let pixels = color.to_array().repeat(len / 4);
        Self::new(width, height, pixels)
    }

    /// Fully transparent canvas.
    pub fn transparent(width: u32, height: u32) -> TesseraResult<Self> {
        Self::new(width, height, vec![0; rgba_len(width, height)?])
    }

    /// Take ownership of an `image` RGBA buffer.
    pub fn from_rgba_image(img: image::RgbaImage) -> TesseraResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Normalize any decoded image to RGBA8.
    pub fn from_dynamic(img: image::DynamicImage) -> TesseraResult<Self> {
        Self::from_rgba_image(img.into_rgba8())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major straight RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at (`x`, `y`), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Stable identity of dimensions + pixels.
    pub fn content_hash(&self) -> ContentHash {
        let mut h = ContentHasher::new(b"image/rgba8");
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_bytes(&self.pixels);
        h.finish()
    }

    /// Copy into an `image` RGBA buffer.
    pub fn to_rgba_image(&self) -> TesseraResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.to_vec())
            .ok_or_else(|| TesseraError::validation("image buffer does not match its dimensions"))
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> TesseraResult<Vec<u8>> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(self.to_rgba_image()?)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }

    /// New artifact of the same size with `f` applied to every pixel.
    pub(crate) fn map_pixels(&self, f: impl Fn([u8; 4]) -> [u8; 4]) -> Self {
        let mut out = Vec::with_capacity(self.pixels.len());
        for px in self.pixels.chunks_exact(4) {
            out.extend_from_slice(&f([px[0], px[1], px[2], px[3]]));
        }
        Self {
            width: self.width,
            height: self.height,
            pixels: out.into(),
        }
    }

    /// New artifact of the same size with `f` applied to the alpha channel only.
    pub(crate) fn map_alpha(&self, f: impl Fn(u8) -> u8) -> Self {
        self.map_pixels(|[r, g, b, a]| [r, g, b, f(a)])
    }
}

impl std::fmt::Debug for ImageArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageArtifact")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Byte length of a `width` x `height` RGBA8 buffer; both sides must be positive.
pub(crate) fn rgba_len(width: u32, height: u32) -> TesseraResult<usize> {
    if width == 0 || height == 0 {
        return Err(TesseraError::geometry(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| TesseraError::validation(format!("image size overflow: {width}x{height}")))
}

/// Any value an operation can produce or consume.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Raster image.
    Image(ImageArtifact),
    /// Raw bytes.
    Blob(BlobArtifact),
}

impl Artifact {
    /// Stable identity of the wrapped value.
    pub fn content_hash(&self) -> ContentHash {
        match self {
            Self::Image(i) => i.content_hash(),
            Self::Blob(b) => b.content_hash(),
        }
    }

    /// Short kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Blob(_) => "blob",
        }
    }

    /// Borrow as a raster image, or fail with a validation error naming `op` and `param`.
    pub fn as_image(&self, op: &str, param: &str) -> TesseraResult<&ImageArtifact> {
        match self {
            Self::Image(i) => Ok(i),
            other => Err(TesseraError::validation(format!(
                "{op}: {param} must be an image artifact, got {}",
                other.kind()
            ))),
        }
    }

    /// Borrow as a blob, or fail with a validation error naming `op` and `param`.
    pub fn as_blob(&self, op: &str, param: &str) -> TesseraResult<&BlobArtifact> {
        match self {
            Self::Blob(b) => Ok(b),
            other => Err(TesseraError::validation(format!(
                "{op}: {param} must be a blob artifact, got {}",
                other.kind()
            ))),
        }
    }
}

impl From<ImageArtifact> for Artifact {
    fn from(v: ImageArtifact) -> Self {
        Self::Image(v)
    }
}

impl From<BlobArtifact> for Artifact {
    fn from(v: BlobArtifact) -> Self {
        Self::Blob(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/artifact/model.rs"]
mod tests;
