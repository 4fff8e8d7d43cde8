//! Operation registry and recipe runner.

/// Operation names and typed calls.
pub mod op;
/// Ordered step execution.
pub mod recipe;
