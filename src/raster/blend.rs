use crate::{
    artifact::model::ImageArtifact,
    foundation::core::PixelRect,
    foundation::math::shift_div255,
};

/// One straight-alpha RGBA8 pixel.
pub type StraightRgba8 = [u8; 4];

const PRECISION_BITS: u32 = 7;

/// Straight-alpha source-over in fixed point.
///
/// The source alpha selects its own coverage. A transparent source leaves `dst` untouched and an
/// opaque source, or a transparent destination, reproduces `src` exactly.
pub fn over(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return dst;
    }
    if sa == 255 || dst[3] == 0 {
        return src;
    }

    let blend = u32::from(dst[3]) * (255 - sa);
    let out_a255 = sa * 255 + blend;
    let coef1 = sa * 255 * 255 * (1 << PRECISION_BITS) / out_a255;
    let coef2 = 255 * (1 << PRECISION_BITS) - coef1;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let tmp = u32::from(src[i]) * coef1 + u32::from(dst[i]) * coef2;
        out[i] = (shift_div255(tmp + (0x80 << PRECISION_BITS)) >> PRECISION_BITS) as u8;
    }
    out[3] = shift_div255(out_a255 + 0x80) as u8;
    out
}

/// Pixel operation used when placing one image onto a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paste {
    /// Alpha-over onto the existing canvas.
    Over,
    /// Replace canvas pixels verbatim.
    Copy,
}

/// Place `src` with its top-left at (`x`, `y`) on a `width` x `height` RGBA8 canvas.
///
/// Parts of `src` outside the canvas are clipped. Returns the visible rectangle, if any.
pub fn paste_into(
    canvas: &mut [u8],
    width: u32,
    height: u32,
    src: &ImageArtifact,
    x: i64,
    y: i64,
    mode: Paste,
) -> Option<PixelRect> {
    debug_assert_eq!(canvas.len(), width as usize * height as usize * 4);

    let bounds = PixelRect::new(0, 0, i64::from(width), i64::from(height));
    let placed = PixelRect::new(x, y, i64::from(src.width()), i64::from(src.height()));
    let visible = bounds.intersect(placed)?;

    let src_w = src.width() as usize;
    let dst_w = width as usize;
    let run = visible.width as usize * 4;
    let src_px = src.pixels();

    for row in visible.y..visible.bottom() {
        let sy = (row - y) as usize;
        let sx = (visible.x - x) as usize;
        let s0 = (sy * src_w + sx) * 4;
        let d0 = (row as usize * dst_w + visible.x as usize) * 4;
        let src_row = &src_px[s0..s0 + run];
        let dst_row = &mut canvas[d0..d0 + run];
        match mode {
            Paste::Copy => dst_row.copy_from_slice(src_row),
            Paste::Over => {
                for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                    let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
                    d.copy_from_slice(&out);
                }
            }
        }
    }
    Some(visible)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/blend.rs"]
mod tests;
