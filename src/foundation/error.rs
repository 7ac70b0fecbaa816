/// Convenience result type used across arplus.
pub type ArplusResult<T> = Result<T, ArplusError>;

/// Top-level error taxonomy used by engine APIs.
///
/// None of these are fatal to the process. Upscale findings are not errors at all; they travel
/// as data in [`crate::RenderedPreset::warnings`].
#[derive(thiserror::Error, Debug)]
pub enum ArplusError {
    /// Invalid user-provided or project data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A transform or layer state rejected at the store boundary (non-finite field, scale <= 0,
    /// opacity outside 0..=1).
    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    /// A preset id that is not part of the fixed catalog.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// A layer id that is not present in the project.
    #[error("unknown layer: {0}")]
    UnknownLayer(String),

    /// Errors when serializing or deserializing project data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ArplusError {
    /// Build an [`ArplusError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`ArplusError::InvalidTransform`] value.
    pub fn invalid_transform(msg: impl Into<String>) -> Self {
        Self::InvalidTransform(msg.into())
    }

    /// Build an [`ArplusError::UnknownPreset`] value.
    pub fn unknown_preset(id: impl Into<String>) -> Self {
        Self::UnknownPreset(id.into())
    }

    /// Build an [`ArplusError::UnknownLayer`] value.
    pub fn unknown_layer(id: impl Into<String>) -> Self {
        Self::UnknownLayer(id.into())
    }

    /// Build an [`ArplusError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
