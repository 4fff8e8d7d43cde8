use crate::{
    artifact::model::{ImageArtifact, rgba_len},
    foundation::core::Align,
    foundation::error::{TesseraError, TesseraResult},
    raster::blend::{Paste, paste_into},
};

/// Main axis of a flow layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right.
    Row,
    /// Top to bottom.
    Column,
}

impl Direction {
    /// Parse `row` or `column`.
    pub fn parse(s: &str) -> TesseraResult<Self> {
        match s {
            "row" => Ok(Self::Row),
            "column" => Ok(Self::Column),
            other => Err(TesseraError::validation(format!(
                "gfx:layout: direction must be 'row' or 'column', got '{other}'"
            ))),
        }
    }
}

/// Resolved flow geometry: canvas size plus each item's top-left corner, in input order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowPlacement {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Top-left corner of every item.
    pub offsets: Vec<(i64, i64)>,
}

/// Compute the tight canvas and item offsets for `sizes` laid out along `direction`.
pub fn flow_offsets(
    direction: Direction,
    align: Align,
    gap: i64,
    sizes: &[(u32, u32)],
) -> TesseraResult<FlowPlacement> {
    if gap < 0 {
        return Err(TesseraError::validation(format!(
            "gfx:layout: gap must be non-negative, got {gap}"
        )));
    }
    if sizes.is_empty() {
        return Err(TesseraError::validation("gfx:layout: items must not be empty"));
    }

    // (main, cross) per item.
    let axes: Vec<(i64, i64)> = sizes
        .iter()
        .map(|&(w, h)| match direction {
            Direction::Row => (i64::from(w), i64::from(h)),
            Direction::Column => (i64::from(h), i64::from(w)),
        })
        .collect();

    let overflow = || TesseraError::geometry(format!("gfx:layout: gap {gap} overflows the canvas"));
    let gaps = i64::try_from(axes.len() - 1)
        .ok()
        .and_then(|n| gap.checked_mul(n))
        .ok_or_else(overflow)?;
    let total_main = axes
        .iter()
        .try_fold(gaps, |acc, (m, _)| acc.checked_add(*m))
        .ok_or_else(overflow)?;
    let total_cross = axes.iter().map(|(_, c)| *c).max().unwrap_or(0);
    if total_main <= 0 || total_cross <= 0 {
        return Err(TesseraError::geometry(format!(
            "gfx:layout: content collapses to {total_main}x{total_cross}"
        )));
    }

    let (w, h) = match direction {
        Direction::Row => (total_main, total_cross),
        Direction::Column => (total_cross, total_main),
    };
    let too_large = |_| TesseraError::geometry(format!("gfx:layout: canvas too large: {w}x{h}"));
    let (width, height) = (
        u32::try_from(w).map_err(too_large)?,
        u32::try_from(h).map_err(too_large)?,
    );

    let mut offsets = Vec::with_capacity(axes.len());
    let mut cursor = 0i64;
    for &(main, cross) in &axes {
        let across = align.offset(total_cross, cross);
        offsets.push(match direction {
            Direction::Row => (cursor, across),
            Direction::Column => (across, cursor),
        });
        // A single item never uses the gap, which may be arbitrarily large.
        cursor = cursor.saturating_add(main).saturating_add(gap);
    }

    Ok(FlowPlacement {
        width,
        height,
        offsets,
    })
}

/// Arrange `items` along one axis onto a transparent canvas sized exactly to the content.
///
/// Items are separated by `gap` pixels and aligned on the cross axis by `align`. Each item is
/// alpha-composited, so transparent regions never erase earlier content.
#[tracing::instrument(skip(items), fields(items = items.len()))]
pub fn flow_layout(
    direction: Direction,
    align: Align,
    gap: i64,
    items: &[ImageArtifact],
) -> TesseraResult<ImageArtifact> {
    let sizes: Vec<(u32, u32)> = items.iter().map(|i| (i.width(), i.height())).collect();
    let placement = flow_offsets(direction, align, gap, &sizes)?;

    let (w, h) = (placement.width, placement.height);
    let mut canvas = vec![0u8; rgba_len(w, h)?];
    for (item, &(x, y)) in items.iter().zip(&placement.offsets) {
        paste_into(&mut canvas, w, h, item, x, y, Paste::Over);
    }
    tracing::debug!(width = w, height = h, "flow layout resolved");
    ImageArtifact::new(w, h, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/flow.rs"]
mod tests;
