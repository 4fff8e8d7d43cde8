/// Convenience result type used across Tessera.
pub type TesseraResult<T> = Result<T, TesseraError>;

/// Top-level error taxonomy used by every operation.
///
/// Every failure is raised before an output artifact exists, so callers never observe a partially
/// applied operation.
#[derive(thiserror::Error, Debug)]
pub enum TesseraError {
    /// Wrong argument shape, out-of-range scalar, malformed color, empty collection or unknown code.
    #[error("validation error: {0}")]
    Validation(String),

    /// An external byte payload could not be parsed as the expected image format.
    #[error("decode error ({content_type}): {message}")]
    Decode {
        /// Content type of the blob that failed to decode.
        content_type: String,
        /// Decoder diagnostic.
        message: String,
    },

    /// A crop, inset or layout would produce a non-positive canvas.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// A relative anchor or recipe reference names an unknown or not-yet-produced value.
    #[error("reference error: {0}")]
    Reference(String),

    /// Failure inside a rendering adapter (SVG rasterizer, font resolution, text shaping).
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TesseraError {
    /// Build a [`TesseraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TesseraError::Decode`] value.
    pub fn decode(content_type: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Decode {
            content_type: content_type.into(),
            message: msg.into(),
        }
    }

    /// Build a [`TesseraError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`TesseraError::Reference`] value.
    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference(msg.into())
    }

    /// Build a [`TesseraError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
