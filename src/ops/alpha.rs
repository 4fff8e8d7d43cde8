//! Per-pixel alpha algebra. Every function here touches one channel at a time and never blends.

use rust_decimal::{Decimal, prelude::ToPrimitive as _};

use crate::{
    artifact::model::ImageArtifact,
    foundation::core::Rgba8,
    foundation::error::{TesseraError, TesseraResult},
    foundation::math::mul_div255_floor,
};

/// Replace RGB with `color` and scale alpha by the color's alpha: `floor(a * color.a / 255)`.
pub fn colorize(image: &ImageArtifact, color: Rgba8) -> TesseraResult<ImageArtifact> {
    Ok(image.map_pixels(|[_, _, _, a]| {
        [color.r, color.g, color.b, mul_div255_floor(a, color.a)]
    }))
}

/// Multiply alpha by the mask's alpha: `floor(image.a * mask.a / 255)`. RGB is kept.
pub fn mask_alpha(image: &ImageArtifact, mask: &ImageArtifact) -> TesseraResult<ImageArtifact> {
    if image.width() != mask.width() || image.height() != mask.height() {
        return Err(TesseraError::validation(format!(
            "gfx:mask_alpha: image and mask must have same dimensions, got {}x{} and {}x{}",
            image.width(),
            image.height(),
            mask.width(),
            mask.height()
        )));
    }

    let mut out = image.pixels().to_vec();
    for (px, m) in out.chunks_exact_mut(4).zip(mask.pixels().chunks_exact(4)) {
        px[3] = mul_div255_floor(px[3], m[3]);
    }
    ImageArtifact::new(image.width(), image.height(), out)
}

/// Scale alpha by `factor` in `[0, 1]`: `floor(a * factor)`, computed in exact decimal.
pub fn opacity(image: &ImageArtifact, factor: Decimal) -> TesseraResult<ImageArtifact> {
    if factor < Decimal::ZERO || factor > Decimal::ONE {
        return Err(TesseraError::validation(format!(
            "gfx:opacity: factor must be in range 0 to 1, got {factor}"
        )));
    }

    let mut table = [0u8; 256];
    for (a, slot) in table.iter_mut().enumerate() {
        let scaled = (Decimal::from(a as u32) * factor).floor();
        *slot = scaled.to_u8().unwrap_or(u8::MAX);
    }
    Ok(image.map_alpha(|a| table[usize::from(a)]))
}

/// `255 - alpha`. RGB is kept.
pub fn invert_alpha(image: &ImageArtifact) -> TesseraResult<ImageArtifact> {
    Ok(image.map_alpha(|a| 255 - a))
}

/// Binary alpha: `255` where `alpha >= t`, else `0`. The boundary itself maps to opaque.
pub fn threshold_alpha(image: &ImageArtifact, t: i64) -> TesseraResult<ImageArtifact> {
    let t = u8::try_from(t).map_err(|_| {
        TesseraError::validation(format!("gfx:threshold_alpha: t must be int in 0-255, got {t}"))
    })?;
    Ok(image.map_alpha(|a| if a >= t { 255 } else { 0 }))
}

/// Zero RGB and keep alpha.
pub fn extract_alpha(image: &ImageArtifact) -> TesseraResult<ImageArtifact> {
    Ok(image.map_pixels(|[_, _, _, a]| [0, 0, 0, a]))
}

#[cfg(test)]
#[path = "../../tests/unit/ops/alpha.rs"]
mod tests;
