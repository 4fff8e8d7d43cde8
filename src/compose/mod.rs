//! Anchor-based layer compositing.

/// Absolute and relative anchors.
pub mod anchor;
/// Ordered alpha-over layer stack.
pub mod compositor;
