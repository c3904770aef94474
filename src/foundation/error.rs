/// Convenience result type used across the crate.
pub type PolaroidResult<T> = Result<T, PolaroidError>;

/// Top-level error taxonomy.
///
/// The compositor and the export namer are total over their inputs; these variants cover the
/// surrounding boundaries (template validation, decoding, fonts, encoding, sinks).
#[derive(thiserror::Error, Debug)]
pub enum PolaroidError {
    /// Invalid template constants, color strings or raw pixel buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// An operation needs an input that has not been provided yet.
    #[error("missing input: {0}")]
    MissingInput(String),

    /// Uploaded bytes could not be decoded into an image.
    #[error("decode error: {0}")]
    Decode(String),

    /// No usable caption font could be loaded.
    #[error("font error: {0}")]
    Font(String),

    /// Raster backend failure.
    #[error("render error: {0}")]
    Render(String),

    /// PNG encoding or sink delivery failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PolaroidError {
    /// Build a [`PolaroidError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PolaroidError::MissingInput`] value.
    pub fn missing_input(msg: impl Into<String>) -> Self {
        Self::MissingInput(msg.into())
    }

    /// Build a [`PolaroidError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PolaroidError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`PolaroidError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PolaroidError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
