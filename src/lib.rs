//! Tessera is a deterministic raster compositing and layout engine.
//!
//! Pre-rendered pixel buffers (icons, text, solid fills, rasterized SVG) are arranged and blended
//! into one output image. Every operation is a pure function from artifacts to a new artifact, and
//! every artifact carries a content hash derived only from its value, so identical inputs always
//! produce identical hashes.
//!
//! # Pipeline overview
//!
//! 1. **Produce**: solid fills, decoded blobs, [`render_svg`] and [`render_text`] create
//!    [`ImageArtifact`]s.
//! 2. **Transform**: alpha algebra, morphology, blur and geometry in [`ops`] reshape single images.
//! 3. **Combine**: [`flow_layout`] packs items along one axis; [`composite`] stacks anchored
//!    layers onto a canvas defined by the first layer.
//! 4. **Run**: a [`Recipe`] lists [`OpCall`] steps and executes them strictly in order.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Straight RGBA8** everywhere; adapters unpremultiply their rasterizer output.
//! - **Exact numerics**: sizes truncate, sigmas and factors use exact decimals.
//! - **No hidden state**: nothing is cached or retained between calls.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Text, SVG and resource adapters.
pub mod adapters;
/// Artifact values and content hashes.
pub mod artifact;
/// Anchor-based compositor.
pub mod compose;
/// Shared types and errors.
pub mod foundation;
/// Flow layout.
pub mod layout;
/// Pixel transforms.
pub mod ops;
/// Pixel blending primitives.
pub mod raster;
/// Operation registry and recipes.
pub mod registry;

pub use adapters::resource::{
    DirResourceResolver, MemoryResourceResolver, ResourceResolver, normalize_rel_path,
};
pub use adapters::svg::render_svg;
pub use adapters::text::{FontSource, FontStyle, TEXT_PADDING, TextStyle, render_text};
pub use artifact::identity::ContentHash;
pub use artifact::model::{Artifact, BlobArtifact, ImageArtifact};
pub use compose::anchor::{AlignPair, Anchor};
pub use compose::compositor::{Layer, composite, resolve_placements};
pub use foundation::core::{Align, PixelRect, Rgba8};
pub use foundation::error::{TesseraError, TesseraResult};
pub use foundation::scalar::Scalar;
pub use layout::flow::{Direction, FlowPlacement, flow_layout, flow_offsets};
pub use registry::op::{ArtifactSource, LayerSpec, OpCall, OpName, Services, TextOrStep};
pub use registry::recipe::{Recipe, RecipeOutputs, Step};
