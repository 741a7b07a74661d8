//! Error types for pix-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers failures that can occur while constructing
//! core buffer types. Filter-level errors (invalid parameters, malformed
//! kernels, empty inputs) live in `pix-ops`; file-level errors live in
//! `pix-io`. The split keeps each crate's error surface aligned with what
//! its callers can actually handle.
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur constructing core image types.
#[derive(Debug, Error)]
pub enum Error {
    /// Decoded pixel data length doesn't match the declared dimensions.
    ///
    /// Returned by [`PixelBuffer::from_decoded`](crate::PixelBuffer::from_decoded)
    /// when `data.len() != width * height * 3`. A loader that hands the
    /// core a buffer tripping this has a bug; the core never constructs
    /// such data itself.
    #[error("decode error: {width}x{height} RGB needs {expected} bytes, got {got}")]
    Decode {
        /// Declared image width.
        width: u32,
        /// Declared image height.
        height: u32,
        /// Expected byte length (`width * height * 3`).
        expected: usize,
        /// Actual byte length supplied.
        got: usize,
    },
}

impl Error {
    /// Creates an [`Error::Decode`] error.
    #[inline]
    pub fn decode(width: u32, height: u32, got: usize) -> Self {
        Self::Decode {
            width,
            height,
            expected: width as usize * height as usize * crate::CHANNELS,
            got,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message() {
        let err = Error::decode(4, 2, 10);
        let msg = err.to_string();
        assert!(msg.contains("4x2"));
        assert!(msg.contains("24"));
        assert!(msg.contains("10"));
    }
}
