//! Typed operation registry.
//!
//! [`OpName`] is the closed set of operation keys. [`OpCall`] is one invocation with its
//! parameters, as parsed from a recipe step: numeric parameters arrive as [`Scalar`] and
//! artifact parameters name earlier steps.

use std::sync::Arc;

use crate::{
    adapters::{
        resource::{MemoryResourceResolver, ResourceResolver},
        svg::render_svg,
        text::{FontSource, FontStyle, TextStyle, render_text},
    },
    artifact::model::{Artifact, BlobArtifact, ImageArtifact},
    compose::{
        anchor::Anchor,
        compositor::{Layer, composite},
    },
    foundation::{
        core::{Align, Rgba8},
        error::{TesseraError, TesseraResult},
        scalar::Scalar,
    },
    layout::flow::{Direction, flow_layout},
    ops::{alpha, blur, geometry, morphology, source},
};

macro_rules! op_names {
    ($($variant:ident => $key:literal),+ $(,)?) => {
        /// Stable identifier of every operation Tessera provides.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum OpName {
            $(
                #[doc = concat!("`", $key, "`")]
                $variant,
            )+
        }

        impl OpName {
            /// Every operation, in registry order.
            pub const ALL: &'static [OpName] = &[$(OpName::$variant),+];

            /// Registry key, e.g. `"gfx:composite"`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(OpName::$variant => $key,)+
                }
            }

            /// Look up a registry key.
            pub fn parse(key: &str) -> TesseraResult<Self> {
                match key {
                    $($key => Ok(OpName::$variant),)+
                    other => Err(TesseraError::validation(format!("unknown operation '{other}'"))),
                }
            }
        }
    };
}

op_names! {
    CreateSolid => "gfx:create_solid",
    BlobToImage => "gfx:blob_to_image",
    ResolveResource => "gfx:resolve_resource",
    RenderSvg => "gfx:render_svg",
    RenderText => "gfx:render_text",
    Resize => "gfx:resize",
    Colorize => "gfx:colorize",
    Opacity => "gfx:opacity",
    MaskAlpha => "gfx:mask_alpha",
    InvertAlpha => "gfx:invert_alpha",
    ThresholdAlpha => "gfx:threshold_alpha",
    ExtractAlpha => "gfx:extract_alpha",
    Dilate => "gfx:dilate",
    Erode => "gfx:erode",
    GaussianBlur => "gfx:gaussian_blur",
    Crop => "gfx:crop",
    Pad => "gfx:pad",
    Translate => "gfx:translate",
    Layout => "gfx:layout",
    Composite => "gfx:composite",
}

impl std::fmt::Display for OpName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal text or a reference to an earlier step's blob.
///
/// `{"step": "icon"}` names a step; a bare string is used as-is (inline SVG markup, or a font
/// family name).
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(untagged)]
pub enum TextOrStep {
    /// Output of an earlier step.
    Step {
        /// Step id.
        step: String,
    },
    /// Literal value.
    Literal(String),
}

/// One layer of a [`OpCall::Composite`] call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct LayerSpec {
    /// Layer id used by relative anchors.
    pub id: String,
    /// Step producing the layer's pixels; defaults to `id`.
    #[serde(default)]
    pub image: Option<String>,
    /// Placement rule.
    pub anchor: Anchor,
}

impl LayerSpec {
    /// Step id holding the layer's image.
    pub fn image_step(&self) -> &str {
        self.image.as_deref().unwrap_or(&self.id)
    }
}

/// A single operation invocation with unconverted parameters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "op")]
#[allow(missing_docs)]
pub enum OpCall {
    #[serde(rename = "gfx:create_solid")]
    CreateSolid { size: [Scalar; 2], color: Rgba8 },
    #[serde(rename = "gfx:blob_to_image")]
    BlobToImage { blob: String },
    #[serde(rename = "gfx:resolve_resource")]
    ResolveResource { name: String },
    #[serde(rename = "gfx:render_svg")]
    RenderSvg {
        svg: TextOrStep,
        width: Scalar,
        height: Scalar,
    },
    #[serde(rename = "gfx:render_text")]
    RenderText {
        text: String,
        font: TextOrStep,
        size: Scalar,
        color: Rgba8,
        #[serde(default)]
        weight: Option<Scalar>,
        #[serde(default)]
        style: FontStyle,
    },
    #[serde(rename = "gfx:resize")]
    Resize {
        image: String,
        width: Scalar,
        height: Scalar,
    },
    #[serde(rename = "gfx:colorize")]
    Colorize { image: String, color: Rgba8 },
    #[serde(rename = "gfx:opacity")]
    Opacity { image: String, factor: Scalar },
    #[serde(rename = "gfx:mask_alpha")]
    MaskAlpha { image: String, mask: String },
    #[serde(rename = "gfx:invert_alpha")]
    InvertAlpha { image: String },
    #[serde(rename = "gfx:threshold_alpha")]
    ThresholdAlpha { image: String, t: Scalar },
    #[serde(rename = "gfx:extract_alpha")]
    ExtractAlpha { image: String },
    #[serde(rename = "gfx:dilate")]
    Dilate { image: String, radius: Scalar },
    #[serde(rename = "gfx:erode")]
    Erode { image: String, radius: Scalar },
    #[serde(rename = "gfx:gaussian_blur")]
    GaussianBlur { image: String, sigma: Scalar },
    #[serde(rename = "gfx:crop")]
    Crop {
        image: String,
        left: Scalar,
        top: Scalar,
        right: Scalar,
        bottom: Scalar,
    },
    #[serde(rename = "gfx:pad")]
    Pad {
        image: String,
        left: Scalar,
        top: Scalar,
        right: Scalar,
        bottom: Scalar,
    },
    #[serde(rename = "gfx:translate")]
    Translate {
        image: String,
        dx: Scalar,
        dy: Scalar,
    },
    #[serde(rename = "gfx:layout")]
    Layout {
        direction: Direction,
        align: Align,
        gap: Scalar,
        items: Vec<String>,
    },
    #[serde(rename = "gfx:composite")]
    Composite { layers: Vec<LayerSpec> },
}

/// Lookup of already-produced artifacts by step id.
pub trait ArtifactSource {
    /// Artifact produced by step `id`, if any.
    fn artifact(&self, id: &str) -> Option<&Artifact>;
}

impl ArtifactSource for std::collections::HashMap<String, Artifact> {
    fn artifact(&self, id: &str) -> Option<&Artifact> {
        self.get(id)
    }
}

impl ArtifactSource for std::collections::BTreeMap<String, Artifact> {
    fn artifact(&self, id: &str) -> Option<&Artifact> {
        self.get(id)
    }
}

/// External collaborators an operation may need.
#[derive(Clone)]
pub struct Services {
    /// Bundled-resource lookup for `gfx:resolve_resource`.
    pub resolver: Arc<dyn ResourceResolver>,
    /// Font database for `gfx:render_text` family lookups and SVG `<text>`.
    pub fonts: Arc<usvg::fontdb::Database>,
}

impl Services {
    /// Services with `resolver` and an empty font database.
    pub fn new(resolver: Arc<dyn ResourceResolver>) -> Self {
        Self {
            resolver,
            fonts: Arc::new(usvg::fontdb::Database::new()),
        }
    }

    /// Replace the font database.
    pub fn with_fonts(mut self, fonts: usvg::fontdb::Database) -> Self {
        self.fonts = Arc::new(fonts);
        self
    }

    /// Load the host's installed fonts into a fresh database.
    pub fn with_system_fonts(self) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "system fonts loaded");
        self.with_fonts(db)
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(Arc::new(MemoryResourceResolver::new()))
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("fonts", &self.fonts.len())
            .finish_non_exhaustive()
    }
}

impl OpCall {
    /// Registry key of this call.
    pub fn name(&self) -> OpName {
        match self {
            Self::CreateSolid { .. } => OpName::CreateSolid,
            Self::BlobToImage { .. } => OpName::BlobToImage,
            Self::ResolveResource { .. } => OpName::ResolveResource,
            Self::RenderSvg { .. } => OpName::RenderSvg,
            Self::RenderText { .. } => OpName::RenderText,
            Self::Resize { .. } => OpName::Resize,
            Self::Colorize { .. } => OpName::Colorize,
            Self::Opacity { .. } => OpName::Opacity,
            Self::MaskAlpha { .. } => OpName::MaskAlpha,
            Self::InvertAlpha { .. } => OpName::InvertAlpha,
            Self::ThresholdAlpha { .. } => OpName::ThresholdAlpha,
            Self::ExtractAlpha { .. } => OpName::ExtractAlpha,
            Self::Dilate { .. } => OpName::Dilate,
            Self::Erode { .. } => OpName::Erode,
            Self::GaussianBlur { .. } => OpName::GaussianBlur,
            Self::Crop { .. } => OpName::Crop,
            Self::Pad { .. } => OpName::Pad,
            Self::Translate { .. } => OpName::Translate,
            Self::Layout { .. } => OpName::Layout,
            Self::Composite { .. } => OpName::Composite,
        }
    }

    /// Step ids this call reads, in parameter order.
    pub fn dependencies(&self) -> Vec<&str> {
        match self {
            Self::CreateSolid { .. } | Self::ResolveResource { .. } => Vec::new(),
            Self::BlobToImage { blob } => vec![blob.as_str()],
            Self::RenderSvg { svg: source, .. } | Self::RenderText { font: source, .. } => {
                match source {
                    TextOrStep::Step { step } => vec![step.as_str()],
                    TextOrStep::Literal(_) => Vec::new(),
                }
            }
            Self::MaskAlpha { image, mask } => vec![image.as_str(), mask.as_str()],
            Self::Resize { image, .. }
            | Self::Colorize { image, .. }
            | Self::Opacity { image, .. }
            | Self::InvertAlpha { image }
            | Self::ThresholdAlpha { image, .. }
            | Self::ExtractAlpha { image }
            | Self::Dilate { image, .. }
            | Self::Erode { image, .. }
            | Self::GaussianBlur { image, .. }
            | Self::Crop { image, .. }
            | Self::Pad { image, .. }
            | Self::Translate { image, .. } => vec![image.as_str()],
            Self::Layout { items, .. } => items.iter().map(String::as_str).collect(),
            Self::Composite { layers } => layers.iter().map(LayerSpec::image_step).collect(),
        }
    }

    /// Convert parameters, resolve step references from `env` and run the operation.
    pub fn execute(
        &self,
        env: &dyn ArtifactSource,
        services: &Services,
    ) -> TesseraResult<Artifact> {
        let op = self.name().as_str();
        let out: Artifact = match self {
            Self::CreateSolid { size, color } => {
                let [w, h] = size;
                source::create_solid(
                    w.to_positive(op, "width")?,
                    h.to_positive(op, "height")?,
                    *color,
                )?
                .into()
            }
            Self::BlobToImage { blob } => {
                source::blob_to_image(blob_ref(env, op, "blob", blob)?)?.into()
            }
            Self::ResolveResource { name } => services.resolver.resolve(name)?.into(),
            Self::RenderSvg { svg, width, height } => {
                let (w, h) = (width.to_positive(op, "width")?, height.to_positive(op, "height")?);
                let bytes = match svg {
                    TextOrStep::Step { step } => blob_ref(env, op, "svg", step)?.data(),
                    TextOrStep::Literal(markup) => markup.as_bytes(),
                };
                render_svg(bytes, w, h, &services.fonts)?.into()
            }
            Self::RenderText {
                text,
                font,
                size,
                color,
                weight,
                style,
            } => {
                let size = size.to_positive(op, "size")?;
                let font = match font {
                    TextOrStep::Step { step } => {
                        FontSource::Blob(blob_ref(env, op, "font", step)?.clone())
                    }
                    TextOrStep::Literal(name) => FontSource::Family {
                        name: name.clone(),
                        weight: weight
                            .as_ref()
                            .map(|w| font_weight(w, op))
                            .transpose()?,
                        style: *style,
                    },
                };
                let style = TextStyle {
                    size,
                    color: *color,
                };
                render_text(text, &font, style, &services.fonts)?.into()
            }
            Self::Resize {
                image,
                width,
                height,
            } => geometry::resize(
                image_ref(env, op, "image", image)?,
                width.to_positive(op, "width")?,
                height.to_positive(op, "height")?,
            )?
            .into(),
            Self::Colorize { image, color } => {
                alpha::colorize(image_ref(env, op, "image", image)?, *color)?.into()
            }
            Self::Opacity { image, factor } => alpha::opacity(
                image_ref(env, op, "image", image)?,
                factor.to_decimal(op, "factor")?,
            )?
            .into(),
            Self::MaskAlpha { image, mask } => alpha::mask_alpha(
                image_ref(env, op, "image", image)?,
                image_ref(env, op, "mask", mask)?,
            )?
            .into(),
            Self::InvertAlpha { image } => {
                alpha::invert_alpha(image_ref(env, op, "image", image)?)?.into()
            }
            Self::ThresholdAlpha { image, t } => alpha::threshold_alpha(
                image_ref(env, op, "image", image)?,
                t.to_int_truncated(op, "t")?,
            )?
            .into(),
            Self::ExtractAlpha { image } => {
                alpha::extract_alpha(image_ref(env, op, "image", image)?)?.into()
            }
            Self::Dilate { image, radius } => morphology::dilate(
                image_ref(env, op, "image", image)?,
                radius.to_int_truncated(op, "radius")?,
            )?
            .into(),
            Self::Erode { image, radius } => morphology::erode(
                image_ref(env, op, "image", image)?,
                radius.to_int_truncated(op, "radius")?,
            )?
            .into(),
            Self::GaussianBlur { image, sigma } => blur::gaussian_blur(
                image_ref(env, op, "image", image)?,
                sigma.to_decimal(op, "sigma")?,
            )?
            .into(),
            Self::Crop {
                image,
                left,
                top,
                right,
                bottom,
            } => geometry::crop(
                image_ref(env, op, "image", image)?,
                insets(op, [left, top, right, bottom])?,
            )?
            .into(),
            Self::Pad {
                image,
                left,
                top,
                right,
                bottom,
            } => geometry::pad(
                image_ref(env, op, "image", image)?,
                insets(op, [left, top, right, bottom])?,
            )?
            .into(),
            Self::Translate { image, dx, dy } => geometry::translate(
                image_ref(env, op, "image", image)?,
                dx.to_int_truncated(op, "dx")?,
                dy.to_int_truncated(op, "dy")?,
            )?
            .into(),
            Self::Layout {
                direction,
                align,
                gap,
                items,
            } => {
                let gap = gap.to_int_truncated(op, "gap")?;
                let items = items
                    .iter()
                    .map(|id| image_ref(env, op, "items", id).cloned())
                    .collect::<TesseraResult<Vec<_>>>()?;
                flow_layout(*direction, *align, gap, &items)?.into()
            }
            Self::Composite { layers } => {
                let layers = layers
                    .iter()
                    .map(|spec| {
                        let image = image_ref(env, op, "layers", spec.image_step())?;
                        Ok(Layer::new(&spec.id, image.clone(), spec.anchor.clone()))
                    })
                    .collect::<TesseraResult<Vec<_>>>()?;
                composite(&layers)?.into()
            }
        };
        Ok(out)
    }
}

fn lookup<'a>(
    env: &'a dyn ArtifactSource,
    op: &str,
    param: &str,
    id: &str,
) -> TesseraResult<&'a Artifact> {
    env.artifact(id).ok_or_else(|| {
        TesseraError::reference(format!("{op}: {param} references unknown step '{id}'"))
    })
}

fn image_ref<'a>(
    env: &'a dyn ArtifactSource,
    op: &str,
    param: &str,
    id: &str,
) -> TesseraResult<&'a ImageArtifact> {
    lookup(env, op, param, id)?.as_image(op, param)
}

fn blob_ref<'a>(
    env: &'a dyn ArtifactSource,
    op: &str,
    param: &str,
    id: &str,
) -> TesseraResult<&'a BlobArtifact> {
    lookup(env, op, param, id)?.as_blob(op, param)
}

fn insets(op: &str, [left, top, right, bottom]: [&Scalar; 4]) -> TesseraResult<geometry::Insets> {
    Ok(geometry::Insets::new(
        left.to_int_truncated(op, "left")?,
        top.to_int_truncated(op, "top")?,
        right.to_int_truncated(op, "right")?,
        bottom.to_int_truncated(op, "bottom")?,
    ))
}

fn font_weight(weight: &Scalar, op: &str) -> TesseraResult<u16> {
    let w = weight.to_int_truncated(op, "weight")?;
    u16::try_from(w)
        .ok()
        .filter(|w| (100..=900).contains(w))
        .ok_or_else(|| {
            TesseraError::validation(format!("{op}: weight must be in range 100-900, got {w}"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/registry/op.rs"]
mod tests;
