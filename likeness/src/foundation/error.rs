/// Convenience result type used across Likeness.
pub type LikenessResult<T> = Result<T, LikenessError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum LikenessError {
    /// Invalid user-provided payload or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source photo could not be loaded or decoded. Nothing was drawn.
    #[error("image unavailable: {0}")]
    ImageUnavailable(String),

    /// Errors while preparing or drawing the render surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LikenessError {
    /// Build a [`LikenessError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LikenessError::ImageUnavailable`] value.
    pub fn image_unavailable(msg: impl Into<String>) -> Self {
        Self::ImageUnavailable(msg.into())
    }

    /// Build a [`LikenessError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LikenessError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
