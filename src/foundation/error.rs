/// Convenience result type used across the crate.
pub type JumpscareResult<T> = Result<T, JumpscareError>;

#[derive(thiserror::Error, Debug)]
/// Error taxonomy shared by the library and the binaries.
pub enum JumpscareError {
    /// A required file or directory is absent.
    #[error("resource missing: {0}")]
    ResourceMissing(String),

    /// An asset could not be parsed or scaled.
    #[error("decode error: {0}")]
    Decode(String),

    /// No audio playback mechanism could be found or started.
    #[error("audio backend unavailable: {0}")]
    BackendUnavailable(String),

    /// An animated asset carried zero frames.
    #[error("asset has no frames")]
    NoFrames,

    /// The render surface has a zero dimension.
    #[error("invalid surface: {width}x{height}")]
    InvalidSurface {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Settings or configuration failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Terminal setup, drawing or input failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JumpscareError {
    /// Build [`JumpscareError::ResourceMissing`].
    pub fn resource_missing(msg: impl Into<String>) -> Self {
        Self::ResourceMissing(msg.into())
    }

    /// Build [`JumpscareError::Decode`].
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build [`JumpscareError::BackendUnavailable`].
    pub fn backend_unavailable(msg: impl Into<String>) -> Self {
        Self::BackendUnavailable(msg.into())
    }

    /// Build [`JumpscareError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`JumpscareError::Terminal`].
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Process exit code for this error when it ends a binary.
    ///
    /// A missing audio backend maps to `2`; everything else is `1`.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::BackendUnavailable(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
