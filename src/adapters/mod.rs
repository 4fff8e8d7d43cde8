//! Boundary adapters that turn non-raster inputs into artifacts.

/// Bundled resource lookup.
pub mod resource;
/// SVG rasterization.
pub mod svg;
/// Text rasterization.
pub mod text;
