//! PNG format support.
//!
//! Reads any PNG the `png` crate can normalize to 8-bit (palette images
//! are expanded, 16-bit narrowed) and converts to the pipeline's RGB
//! layout: grayscale is replicated across channels, alpha is dropped.
//! Writing always emits 8-bit RGB.
//!
//! # Example
//!
//! ```rust,ignore
//! use pix_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{IoError, IoResult};
use pix_core::PixelBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Reads a PNG file into an RGB pixel buffer.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    trace!(path = %path.as_ref().display(), "png::read");
    let file = File::open(path.as_ref())?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    // Expand palette/low-bit-depth and narrow 16-bit so only the four
    // 8-bit color types remain.
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let width = info.width;
    let height = info.height;
    let pixels = &buf[..info.buffer_size()];

    let rgb: Vec<u8> = match info.color_type {
        png::ColorType::Rgb => pixels.to_vec(),
        png::ColorType::Rgba => pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect(),
        png::ColorType::Grayscale => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        png::ColorType::GrayscaleAlpha => pixels
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0]])
            .collect(),
        color_type => {
            return Err(IoError::DecodeError(format!(
                "unexpected color type after normalization: {color_type:?}"
            )));
        }
    };

    debug!(width, height, "png decoded");
    Ok(PixelBuffer::from_decoded(width, height, rgb)?)
}

/// Writes a pixel buffer to a PNG file (8-bit RGB).
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    trace!(path = %path.as_ref().display(), "png::write");
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());
    encoder.set_source_srgb(png::SrgbRenderingIntent::Perceptual);

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(image.data())
        .map_err(|e| IoError::EncodeError(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_rgb_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.png");

        let mut data = Vec::new();
        for y in 0..16u32 {
            for x in 0..16u32 {
                data.extend_from_slice(&[(x * 16) as u8, (y * 16) as u8, 128]);
            }
        }
        let image = PixelBuffer::from_decoded(16, 16, data).unwrap();

        write(&path, &image).expect("write failed");
        let loaded = read(&path).expect("read failed");

        // PNG is lossless: byte-exact round trip.
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read("/nonexistent/missing.png");
        assert!(matches!(result, Err(IoError::Io(_))));
    }
}
