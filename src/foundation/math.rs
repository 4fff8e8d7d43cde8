/// `floor(x * y / 255)` for two 8-bit operands.
pub(crate) fn mul_div255_floor(x: u8, y: u8) -> u8 {
    ((u32::from(x) * u32::from(y)) / 255) as u8
}

/// `(((v >> 8) + v) >> 8)`, an exact `v / 255` for the ranges used by alpha-over.
pub(crate) fn shift_div255(v: u32) -> u32 {
    ((v >> 8) + v) >> 8
}

/// Convert premultiplied RGBA8 to straight alpha in place, rounding to nearest.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
