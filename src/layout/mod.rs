//! Content-sized flow layout.

/// Row and column flow.
pub mod flow;
