//! Text rasterization: font resolution, Parley layout and `vello_cpu` glyph fill.

use crate::{
    artifact::model::{BlobArtifact, ImageArtifact},
    foundation::core::Rgba8,
    foundation::error::{TesseraError, TesseraResult},
    foundation::math::unpremultiply_rgba8_in_place,
};

/// Transparent margin around the text box, in pixels.
pub const TEXT_PADDING: u32 = 2;

/// Slant requested from a named font family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Italic.
    Italic,
}

impl FontStyle {
    /// Parse `normal` or `italic`.
    pub fn parse(s: &str) -> TesseraResult<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "italic" => Ok(Self::Italic),
            other => Err(TesseraError::validation(format!(
                "gfx:render_text: style must be 'normal' or 'italic', got '{other}'"
            ))),
        }
    }
}

/// Where glyphs come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// Family name looked up in a font database.
    Family {
        /// Family name, e.g. `"Inter"`.
        name: String,
        /// CSS weight in `100..=900`; `None` means regular.
        weight: Option<u16>,
        /// Upright or italic.
        style: FontStyle,
    },
    /// Raw TTF/OTF bytes. Weight and style do not apply.
    Blob(BlobArtifact),
}

impl FontSource {
    /// Regular upright face of `name`.
    pub fn family(name: impl Into<String>) -> Self {
        Self::Family {
            name: name.into(),
            weight: None,
            style: FontStyle::Normal,
        }
    }
}

/// Size and fill for [`render_text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size: u32,
    /// Glyph fill color.
    pub color: Rgba8,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16,
            color: Rgba8::new(0, 0, 0, 255),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct TextBrush {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Render `text` into a tight box plus [`TEXT_PADDING`] on every side, straight RGBA.
///
/// Named families are resolved through `fonts`; an unknown family is a render failure.
#[tracing::instrument(skip(font, fonts), fields(chars = text.chars().count(), size = style.size))]
pub fn render_text(
    text: &str,
    font: &FontSource,
    style: TextStyle,
    fonts: &usvg::fontdb::Database,
) -> TesseraResult<ImageArtifact> {
    if style.size == 0 {
        return Err(TesseraError::validation(
            "gfx:render_text: size must be positive, got 0",
        ));
    }
    let (font_bytes, face_index) = load_font(font, fonts)?;

    let mut font_ctx = parley::FontContext::default();
    let mut layout_ctx = parley::LayoutContext::<TextBrush>::new();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
    let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
        TesseraError::render("gfx:render_text: no font families found in font data")
    })?;
    let family_name = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| TesseraError::render("gfx:render_text: font family has no name"))?
        .to_string();

    let color = style.color;
    let mut builder = layout_ctx.ranged_builder(&mut font_ctx, text, 1.0, true);
    builder.push_default(parley::style::StyleProperty::FontStack(
        parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
    ));
    builder.push_default(parley::style::StyleProperty::FontSize(style.size as f32));
    if let FontSource::Family { weight, style, .. } = font {
        if let Some(w) = weight {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::new(f32::from(*w)),
            ));
        }
        if *style == FontStyle::Italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }
    }
    builder.push_default(parley::style::StyleProperty::Brush(TextBrush {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }));
    let mut layout: parley::Layout<TextBrush> = builder.build(text);
    layout.break_all_lines(None);

    let mut text_w = 0.0f32;
    let mut text_h = 0.0f32;
    for line in layout.lines() {
        let m = line.metrics();
        text_w = text_w.max(m.advance);
        text_h += m.ascent + m.descent + m.leading;
    }
    let width = text_w.ceil() as u32 + 2 * TEXT_PADDING;
    let height = text_h.ceil() as u32 + 2 * TEXT_PADDING;
    let (w16, h16) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(TesseraError::render(format!(
                "gfx:render_text: text box {width}x{height} exceeds rasterizer limits"
            )));
        }
    };

    let glyph_font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes),
        face_index,
    );
    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(TEXT_PADDING),
        f64::from(TEXT_PADDING),
    )));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&glyph_font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);
    let mut rgba = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    ImageArtifact::new(width, height, rgba)
}

fn load_font(font: &FontSource, fonts: &usvg::fontdb::Database) -> TesseraResult<(Vec<u8>, u32)> {
    match font {
        FontSource::Blob(blob) => {
            if blob.data().is_empty() {
                return Err(TesseraError::render(
                    "gfx:render_text: font blob is empty",
                ));
            }
            Ok((blob.data().to_vec(), 0))
        }
        FontSource::Family {
            name,
            weight,
            style,
        } => {
            if let Some(w) = weight
                && !(100..=900).contains(w)
            {
                return Err(TesseraError::validation(format!(
                    "gfx:render_text: weight must be in range 100-900, got {w}"
                )));
            }
            let families = [usvg::fontdb::Family::Name(name.as_str())];
            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(weight.unwrap_or(400)),
                stretch: usvg::fontdb::Stretch::Normal,
                style: match style {
                    FontStyle::Normal => usvg::fontdb::Style::Normal,
                    FontStyle::Italic => usvg::fontdb::Style::Italic,
                },
            };
            let not_found = || {
                TesseraError::render(format!(
                    "gfx:render_text: failed to find font '{name}' (weight={weight:?}, style={style:?})"
                ))
            };
            let id = fonts.query(&query).ok_or_else(not_found)?;
            fonts
                .with_face_data(id, |data, index| (data.to_vec(), index))
                .ok_or_else(not_found)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/adapters/text.rs"]
mod tests;
