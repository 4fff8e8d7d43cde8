//! Shared value types, numeric helpers and the error taxonomy.

/// Colors, alignment codes and pixel rectangles.
pub mod core;
/// Error taxonomy and result alias.
pub mod error;
pub(crate) mod math;
/// Loosely-typed numeric parameters.
pub mod scalar;
