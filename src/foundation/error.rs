/// Convenience result type used across the engine.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Pointer and resize callbacks never surface these: an unmeasurable layout
/// there is a no-op for that frame. Errors come from configuration, pure
/// conversions handed degenerate geometry, and malformed JSON.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// Invalid user-provided configuration or position data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Geometry that cannot be used for a conversion (e.g. zero-width container).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build an [`OverlayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`OverlayError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build an [`OverlayError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
