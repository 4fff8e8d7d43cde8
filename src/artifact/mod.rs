//! Immutable artifact values and their content identity.

/// SHA-256 content hashes.
pub mod identity;
/// Blob and image artifacts.
pub mod model;
