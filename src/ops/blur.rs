use rust_decimal::{Decimal, MathematicalOps as _, prelude::ToPrimitive as _};

use crate::{
    artifact::model::ImageArtifact,
    foundation::error::{TesseraError, TesseraResult},
};

/// Largest kernel radius [`gaussian_blur`] accepts (sigma up to about 1365).
pub const MAX_BLUR_RADIUS: u32 = 4096;

const Q16_ONE: u32 = 1 << 16;

/// Integer kernel radius for `sigma`: `ceil(3 * sigma)` in exact decimal arithmetic.
pub fn blur_radius(sigma: Decimal) -> TesseraResult<u32> {
    if sigma < Decimal::ZERO {
        return Err(TesseraError::validation(format!(
            "gfx:gaussian_blur: sigma must be non-negative, got {sigma}"
        )));
    }
    let radius = sigma
        .checked_mul(Decimal::from(3))
        .and_then(|r| r.ceil().to_u32())
        .filter(|r| *r <= MAX_BLUR_RADIUS);
    radius.ok_or_else(|| {
        TesseraError::validation(format!(
            "gfx:gaussian_blur: sigma {sigma} exceeds the maximum radius {MAX_BLUR_RADIUS}"
        ))
    })
}

/// Gaussian blur of all four channels with a separable Q16 kernel and clamped edges.
///
/// `sigma == 0` returns a pixel-identical copy. Kernel weights are evaluated in decimal
/// arithmetic, so the output bytes do not depend on the platform's float math.
#[tracing::instrument(skip(image), fields(w = image.width(), h = image.height()))]
pub fn gaussian_blur(image: &ImageArtifact, sigma: Decimal) -> TesseraResult<ImageArtifact> {
    let radius = blur_radius(sigma)?;
    if radius == 0 {
        return Ok(image.clone());
    }

    let profile = kernel_profile(radius, sigma)?;
    let (w, h) = (image.width() as usize, image.height() as usize);
    let mut tmp = vec![0u8; image.pixels().len()];
    let mut out = vec![0u8; image.pixels().len()];

    convolve(image.pixels(), &mut tmp, Axis::X, w, h, &fold(&profile, w - 1));
    convolve(&tmp, &mut out, Axis::Y, w, h, &fold(&profile, h - 1));
    ImageArtifact::new(image.width(), image.height(), out)
}

/// Q16 weights by distance from the center, `0..=radius`. The full symmetric kernel sums to
/// exactly `Q16_ONE`: rounding drift goes to the center, overshoot is cut from the outer taps.
fn kernel_profile(radius: u32, sigma: Decimal) -> TesseraResult<Vec<u32>> {
    let two_var = sigma
        .checked_mul(sigma)
        .and_then(|v| v.checked_mul(Decimal::TWO))
        .ok_or_else(|| TesseraError::validation(format!("gfx:gaussian_blur: bad sigma {sigma}")))?;

    // exp(-d^2 / 2s^2); tiny sigmas underflow to a zero tail.
    let weights: Vec<Decimal> = (0..=radius)
        .map(|d| {
            if d == 0 {
                return Decimal::ONE;
            }
            let d = Decimal::from(d);
            (d * d)
                .checked_div(two_var)
                .and_then(|e| (-e).checked_exp())
                .unwrap_or(Decimal::ZERO)
        })
        .collect();
    let total = weights[1..]
        .iter()
        .fold(Decimal::ONE, |acc, w| acc + *w * Decimal::TWO);

    let scale = Decimal::from(Q16_ONE);
    let mut profile: Vec<u32> = weights
        .iter()
        .map(|w| {
            (*w * scale)
                .checked_div(total)
                .and_then(|q| q.round().to_u32())
                .unwrap_or(0)
        })
        .collect();
    let mut sides: u32 = profile[1..].iter().map(|q| q * 2).sum();
    for q in profile[1..].iter_mut().rev() {
        if sides <= Q16_ONE {
            break;
        }
        let cut = (*q).min((sides - Q16_ONE) / 2);
        *q -= cut;
        sides -= 2 * cut;
    }
    profile[0] = Q16_ONE - sides;
    Ok(profile)
}

/// Expand a profile into a symmetric kernel reaching at most `reach` pixels each way.
///
/// Beyond `reach` every sample clamps to the same edge pixel, so the cut-off tail weight is
/// added to the outermost tap and the result is unchanged.
fn fold(profile: &[u32], reach: usize) -> Vec<u32> {
    let reach = reach.min(profile.len() - 1);
    if reach == 0 {
        let sides: u32 = profile[1..].iter().map(|q| q * 2).sum();
        return vec![profile[0] + sides];
    }
    let edge: u32 = profile[reach..].iter().sum();
    let mut side = profile[..=reach].to_vec();
    side[reach] = edge;

    let mut kernel = Vec::with_capacity(2 * reach + 1);
    kernel.extend(side[1..].iter().rev());
    kernel.extend_from_slice(&side);
    kernel
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn convolve(src: &[u8], dst: &mut [u8], axis: Axis, width: usize, height: usize, kernel: &[u32]) {
    let reach = kernel.len() / 2;
    // (samples per line, lines, pixel step along a line, pixel step between lines)
    let (len, lines, step, line_step) = match axis {
        Axis::X => (width, height, 1, width),
        Axis::Y => (height, width, width, 1),
    };

    for line in 0..lines {
        let base = line * line_step;
        for pos in 0..len {
            let mut acc = [0u64; 4];
            for (k, &weight) in kernel.iter().enumerate() {
                let sample = (pos + k).saturating_sub(reach).min(len - 1);
                let at = (base + sample * step) * 4;
                for (a, &c) in acc.iter_mut().zip(&src[at..at + 4]) {
                    *a += u64::from(weight) * u64::from(c);
                }
            }
            let at = (base + pos * step) * 4;
            for (d, a) in dst[at..at + 4].iter_mut().zip(acc) {
                *d = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ops/blur.rs"]
mod tests;
