use crate::{
    artifact::model::{ImageArtifact, rgba_len},
    foundation::error::{TesseraError, TesseraResult},
    raster::blend::{Paste, paste_into},
};

/// Per-edge pixel counts used by [`crop`] and [`pad`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Insets {
    /// Left edge.
    pub left: i64,
    /// Top edge.
    pub top: i64,
    /// Right edge.
    pub right: i64,
    /// Bottom edge.
    pub bottom: i64,
}

impl Insets {
    /// Build from the four edges.
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    fn validate(self, op: &str) -> TesseraResult<[u32; 4]> {
        let mut out = [0u32; 4];
        for (slot, (name, v)) in out.iter_mut().zip([
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ]) {
            if v < 0 {
                return Err(TesseraError::validation(format!(
                    "{op}: {name} must be non-negative, got {v}"
                )));
            }
            *slot = u32::try_from(v)
                .map_err(|_| TesseraError::validation(format!("{op}: {name} too large: {v}")))?;
        }
        Ok(out)
    }
}

/// Remove `insets` from each edge. The remaining rectangle must be non-empty.
pub fn crop(image: &ImageArtifact, insets: Insets) -> TesseraResult<ImageArtifact> {
    let [left, top, right, bottom] = insets.validate("gfx:crop")?;
    let (w, h) = (image.width(), image.height());
    if u64::from(left) + u64::from(right) >= u64::from(w) {
        return Err(TesseraError::geometry(format!(
            "gfx:crop: left + right must be less than width ({w}), got left={left} right={right}"
        )));
    }
    if u64::from(top) + u64::from(bottom) >= u64::from(h) {
        return Err(TesseraError::geometry(format!(
            "gfx:crop: top + bottom must be less than height ({h}), got top={top} bottom={bottom}"
        )));
    }

    let out_w = w - left - right;
    let out_h = h - top - bottom;
    let stride = w as usize * 4;
    let run = out_w as usize * 4;
    let mut out = Vec::with_capacity(run * out_h as usize);
    for row in top..top + out_h {
        let start = row as usize * stride + left as usize * 4;
        out.extend_from_slice(&image.pixels()[start..start + run]);
    }
    ImageArtifact::new(out_w, out_h, out)
}

/// Add a transparent border; the input is copied verbatim at (`left`, `top`).
pub fn pad(image: &ImageArtifact, insets: Insets) -> TesseraResult<ImageArtifact> {
    let [left, top, right, bottom] = insets.validate("gfx:pad")?;
    let out_w = grow(image.width(), left, right, "gfx:pad")?;
    let out_h = grow(image.height(), top, bottom, "gfx:pad")?;
    place_on_transparent(image, out_w, out_h, i64::from(left), i64::from(top))
}

/// Shift content by (`dx`, `dy`), growing the canvas by `|dx|` x `|dy|`.
///
/// The input lands at `(max(dx, 0), max(dy, 0))`; vacated pixels are transparent.
pub fn translate(image: &ImageArtifact, dx: i64, dy: i64) -> TesseraResult<ImageArtifact> {
    let adx = u32::try_from(dx.unsigned_abs())
        .map_err(|_| TesseraError::validation(format!("gfx:translate: dx too large: {dx}")))?;
    let ady = u32::try_from(dy.unsigned_abs())
        .map_err(|_| TesseraError::validation(format!("gfx:translate: dy too large: {dy}")))?;
    let out_w = grow(image.width(), adx, 0, "gfx:translate")?;
    let out_h = grow(image.height(), ady, 0, "gfx:translate")?;
    place_on_transparent(image, out_w, out_h, dx.max(0), dy.max(0))
}

/// Lanczos3 resample to `width` x `height`.
pub fn resize(image: &ImageArtifact, width: u32, height: u32) -> TesseraResult<ImageArtifact> {
    if width == 0 || height == 0 {
        return Err(TesseraError::validation(format!(
            "gfx:resize: size must be positive, got {width}x{height}"
        )));
    }
    if (width, height) == (image.width(), image.height()) {
        return Ok(image.clone());
    }
    let src = image.to_rgba_image()?;
    let out = image::imageops::resize(&src, width, height, image::imageops::FilterType::Lanczos3);
    ImageArtifact::from_rgba_image(out)
}

fn grow(len: u32, a: u32, b: u32, op: &str) -> TesseraResult<u32> {
    len.checked_add(a)
        .and_then(|v| v.checked_add(b))
        .ok_or_else(|| TesseraError::validation(format!("{op}: output size overflow")))
}

fn place_on_transparent(
    image: &ImageArtifact,
    width: u32,
    height: u32,
    x: i64,
    y: i64,
) -> TesseraResult<ImageArtifact> {
    let mut canvas = vec![0u8; rgba_len(width, height)?];
    paste_into(&mut canvas, width, height, image, x, y, Paste::Copy);
    ImageArtifact::new(width, height, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/geometry.rs"]
mod tests;
