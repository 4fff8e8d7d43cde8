//! Low-level pixel blending shared by every compositing path.

/// Straight-alpha over and clipped paste.
pub mod blend;
