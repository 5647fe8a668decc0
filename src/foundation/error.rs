/// Convenience result type used across the crate.
pub type StoryResult<T> = Result<T, StoryError>;

/// Top-level error taxonomy used by the story APIs.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// Invalid user-provided configuration or layout data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or malformed static assets (vector animation, morph paths).
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while validating or sampling animation data.
    #[error("animation error: {0}")]
    Animation(String),

    /// The host could not provide a drawable canvas surface.
    #[error("surface error: {0}")]
    Surface(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`StoryError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`StoryError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`StoryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Prefix the message with `what`, keeping the variant.
    pub fn context(self, what: impl std::fmt::Display) -> Self {
        match self {
            Self::Validation(m) => Self::Validation(format!("{what}: {m}")),
            Self::Asset(m) => Self::Asset(format!("{what}: {m}")),
            Self::Animation(m) => Self::Animation(format!("{what}: {m}")),
            Self::Surface(m) => Self::Surface(format!("{what}: {m}")),
            Self::Serde(m) => Self::Serde(format!("{what}: {m}")),
            Self::Other(e) => Self::Other(e.context(what.to_string())),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
