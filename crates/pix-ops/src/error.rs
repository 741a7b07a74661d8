//! Error types for image transforms.

use thiserror::Error;

/// Error type for image transforms.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Malformed convolution kernel.
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Filter parameter outside its documented domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operation applied to a zero-area buffer.
    #[error("empty image: operation requires a non-zero-area buffer")]
    EmptyImage,

    /// Core buffer error surfaced through an operation.
    #[error(transparent)]
    Core(#[from] pix_core::Error),
}

/// Result type for image transforms.
pub type OpsResult<T> = Result<T, OpsError>;
