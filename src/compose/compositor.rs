use std::collections::HashMap;

use crate::{
    artifact::model::{ImageArtifact, rgba_len},
    compose::anchor::Anchor,
    foundation::core::PixelRect,
    foundation::error::{TesseraError, TesseraResult},
    raster::blend::{Paste, paste_into},
};

/// One named image plus its anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    /// Unique id other layers may reference.
    pub id: String,
    /// Pixels to paint.
    pub image: ImageArtifact,
    /// Placement rule.
    pub anchor: Anchor,
}

impl Layer {
    /// Build a layer.
    pub fn new(id: impl Into<String>, image: ImageArtifact, anchor: Anchor) -> Self {
        Self {
            id: id.into(),
            image,
            anchor,
        }
    }
}

/// Resolve every layer's rectangle in order.
///
/// Relative anchors may only name layers that appear earlier.
pub fn resolve_placements(layers: &[Layer]) -> TesseraResult<Vec<PixelRect>> {
    let mut by_id = HashMap::<&str, PixelRect>::with_capacity(layers.len());
    let mut rects = Vec::with_capacity(layers.len());

    for layer in layers {
        let (w, h) = (
            i64::from(layer.image.width()),
            i64::from(layer.image.height()),
        );
        let (x, y) = match &layer.anchor {
            Anchor::Absolute { x, y } => (*x, *y),
            Anchor::Relative {
                reference,
                align,
                dx,
                dy,
            } => {
                let Some(&target) = by_id.get(reference.as_str()) else {
                    let known = layers.iter().any(|l| l.id == *reference);
                    return Err(TesseraError::reference(if known {
                        format!(
                            "gfx:composite: layer '{}' references '{reference}' before it is placed",
                            layer.id
                        )
                    } else {
                        format!(
                            "gfx:composite: layer '{}' references unknown layer '{reference}'",
                            layer.id
                        )
                    }));
                };
                let (x, y) = align.place(target, w, h)?;
                match (x.checked_add(*dx), y.checked_add(*dy)) {
                    (Some(x), Some(y)) => (x, y),
                    _ => {
                        return Err(TesseraError::geometry(format!(
                            "gfx:composite: layer '{}' offset ({dx}, {dy}) overflows the coordinate range",
                            layer.id
                        )));
                    }
                }
            }
        };

        let rect = PixelRect::new(x, y, w, h);
        if by_id.insert(layer.id.as_str(), rect).is_some() {
            return Err(TesseraError::validation(format!(
                "gfx:composite: duplicate layer id '{}'",
                layer.id
            )));
        }
        tracing::debug!(id = %layer.id, x, y, w, h, "layer placed");
        rects.push(rect);
    }
    Ok(rects)
}

/// Paint `layers` in order with alpha-over onto a canvas sized by the first layer.
///
/// Layers that fall partly or fully outside the canvas are clipped.
#[tracing::instrument(skip(layers), fields(layers = layers.len()))]
pub fn composite(layers: &[Layer]) -> TesseraResult<ImageArtifact> {
    let Some(first) = layers.first() else {
        return Err(TesseraError::validation(
            "gfx:composite: at least one layer is required",
        ));
    };
    let rects = resolve_placements(layers)?;

    let (w, h) = (first.image.width(), first.image.height());
    let mut canvas = vec![0u8; rgba_len(w, h)?];
    for (layer, rect) in layers.iter().zip(&rects) {
        if paste_into(&mut canvas, w, h, &layer.image, rect.x, rect.y, Paste::Over).is_none() {
            tracing::debug!(id = %layer.id, "layer fully clipped");
        }
    }
    ImageArtifact::new(w, h, canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
