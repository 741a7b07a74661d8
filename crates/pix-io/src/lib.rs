//! # pix-io
//!
//! Image I/O boundary for the pix-rs editing pipeline.
//!
//! The editing core only ever sees a decoded [`PixelBuffer`]; this crate
//! owns the conversion between files on disk and that in-memory form.
//! Every decoded image is normalized to 8-bit RGB (grayscale replicated,
//! alpha dropped, 16-bit narrowed), so downstream code never receives a
//! malformed or surprising buffer.
//!
//! # Formats
//!
//! - PNG via the `png` crate (feature `png`, default)
//! - JPEG via `jpeg-decoder` / `jpeg-encoder` (feature `jpeg`, default)
//!
//! # Example
//!
//! ```rust,ignore
//! let image = pix_io::read("photo.jpg")?;
//! let edited = pix_ops::apply(&image, &request)?;
//! pix_io::write("photo_out.png", &edited)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use error::{IoError, IoResult};

use pix_core::PixelBuffer;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Supported image file formats, detected from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Portable Network Graphics.
    Png,
    /// JPEG/JFIF.
    Jpeg,
}

impl Format {
    /// Detects the format from a path's extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] for unknown or missing
    /// extensions.
    pub fn from_path<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Format::Png),
            "jpg" | "jpeg" => Ok(Format::Jpeg),
            _ => Err(IoError::UnsupportedFormat(format!(
                "{} (expected .png, .jpg, or .jpeg)",
                path.as_ref().display()
            ))),
        }
    }
}

/// Reads an image file into an RGB pixel buffer, dispatching on the
/// file extension.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unrecognized extensions and
/// the underlying decode/IO errors otherwise.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let format = Format::from_path(&path)?;
    debug!(path = %path.as_ref().display(), ?format, "read");
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::read(path),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::read(path),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support not compiled in"
        ))),
    }
}

/// Writes a pixel buffer to an image file, dispatching on the file
/// extension.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unrecognized extensions and
/// the underlying encode/IO errors otherwise.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let format = Format::from_path(&path)?;
    debug!(path = %path.as_ref().display(), ?format, "write");
    match format {
        #[cfg(feature = "png")]
        Format::Png => png::write(path, image),
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::write(path, image),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{other:?} support not compiled in"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a.png").unwrap(), Format::Png);
        assert_eq!(Format::from_path("a.PNG").unwrap(), Format::Png);
        assert_eq!(Format::from_path("a.jpg").unwrap(), Format::Jpeg);
        assert_eq!(Format::from_path("b.JPEG").unwrap(), Format::Jpeg);
        assert!(Format::from_path("c.gif").is_err());
        assert!(Format::from_path("noext").is_err());
    }
}
