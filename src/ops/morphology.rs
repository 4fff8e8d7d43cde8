use crate::{
    artifact::model::ImageArtifact,
    foundation::error::{TesseraError, TesseraResult},
};

/// Grow the visible shape: max filter of side `2 * radius + 1` over alpha. RGB is kept.
pub fn dilate(image: &ImageArtifact, radius: i64) -> TesseraResult<ImageArtifact> {
    morph(image, radius, "gfx:dilate", Extremum::Max)
}

/// Shrink the visible shape: min filter of side `2 * radius + 1` over alpha. RGB is kept.
pub fn erode(image: &ImageArtifact, radius: i64) -> TesseraResult<ImageArtifact> {
    morph(image, radius, "gfx:erode", Extremum::Min)
}

#[derive(Clone, Copy)]
enum Extremum {
    Max,
    Min,
}

impl Extremum {
    fn pick(self, a: u8, b: u8) -> u8 {
        match self {
            Self::Max => a.max(b),
            Self::Min => a.min(b),
        }
    }
}

fn morph(
    image: &ImageArtifact,
    radius: i64,
    op: &str,
    kind: Extremum,
) -> TesseraResult<ImageArtifact> {
    if radius < 0 {
        return Err(TesseraError::validation(format!(
            "{op}: radius must be non-negative int, got {radius}"
        )));
    }
    if radius == 0 {
        return Ok(image.clone());
    }

    let (w, h) = (image.width() as usize, image.height() as usize);
    // The square window is separable; samples past the edge are left out of the window.
    let r = usize::try_from(radius).unwrap_or(usize::MAX).min(w.max(h));
    let alpha: Vec<u8> = image.pixels().chunks_exact(4).map(|px| px[3]).collect();

    let mut rows = vec![0u8; w * h];
    for y in 0..h {
        let line = &alpha[y * w..(y + 1) * w];
        for x in 0..w {
            let lo = x.saturating_sub(r);
            let hi = (x + r).min(w - 1);
            rows[y * w + x] = line[lo..=hi]
                .iter()
                .copied()
                .reduce(|a, b| kind.pick(a, b))
                .unwrap_or(line[x]);
        }
    }

    let mut out = image.pixels().to_vec();
    for x in 0..w {
        for y in 0..h {
            let lo = y.saturating_sub(r);
            let hi = (y + r).min(h - 1);
            let mut v = rows[lo * w + x];
            for yy in lo + 1..=hi {
                v = kind.pick(v, rows[yy * w + x]);
            }
            out[(y * w + x) * 4 + 3] = v;
        }
    }

    ImageArtifact::new(image.width(), image.height(), out)
}

#[cfg(test)]
#[path = "../../tests/unit/ops/morphology.rs"]
mod tests;
