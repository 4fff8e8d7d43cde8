use std::sync::Arc;

use crate::{
    artifact::model::ImageArtifact,
    foundation::error::{TesseraError, TesseraResult},
    foundation::math::unpremultiply_rgba8_in_place,
};

/// Rasterize SVG bytes to exactly `width` x `height`, stretching the document's viewport.
///
/// `fonts` backs any `<text>` in the document. The result is straight RGBA.
#[tracing::instrument(skip(svg, fonts), fields(len = svg.len()))]
pub fn render_svg(
    svg: &[u8],
    width: u32,
    height: u32,
    fonts: &Arc<usvg::fontdb::Database>,
) -> TesseraResult<ImageArtifact> {
    if width == 0 || height == 0 {
        return Err(TesseraError::validation(format!(
            "gfx:render_svg: size must be positive, got {width}x{height}"
        )));
    }

    let opts = usvg::Options {
        fontdb: Arc::clone(fonts),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg, &opts)
        .map_err(|e| TesseraError::render(format!("gfx:render_svg: failed to parse SVG: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        TesseraError::render(format!(
            "gfx:render_svg: failed to allocate {width}x{height} pixmap"
        ))
    })?;
    let sx = width as f32 / tree.size().width();
    let sy = height as f32 / tree.size().height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    let mut rgba = pixmap.take();
    unpremultiply_rgba8_in_place(&mut rgba);
    ImageArtifact::new(width, height, rgba)
}

#[cfg(test)]
#[path = "../../tests/unit/adapters/svg.rs"]
mod tests;
