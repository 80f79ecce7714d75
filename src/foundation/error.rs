/// Convenience result type used across meshgrad.
pub type MeshgradResult<T> = Result<T, MeshgradError>;

/// Error taxonomy for the outer boundaries of the crate (config, buffers, export).
///
/// Interactive mutations on a live gradient never produce these; they degrade to no-ops.
#[derive(thiserror::Error, Debug)]
pub enum MeshgradError {
    /// Invalid user-provided configuration or buffer shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterising or exporting a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MeshgradError {
    /// Build a [`MeshgradError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MeshgradError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`MeshgradError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
