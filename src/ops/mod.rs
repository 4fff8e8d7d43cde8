//! Pure single-image (or image + mask) transforms.
//!
//! Every function validates its arguments before touching pixels and returns a new
//! [`ImageArtifact`](crate::artifact::model::ImageArtifact).

/// Alpha-channel algebra.
pub mod alpha;
/// Gaussian blur.
pub mod blur;
/// Crop, pad, translate and resize.
pub mod geometry;
/// Dilate and erode.
pub mod morphology;
/// Solid fills and raster decoding.
pub mod source;
