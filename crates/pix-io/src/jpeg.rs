//! JPEG format support.
//!
//! Decoding goes through `jpeg-decoder` (RGB and grayscale sources
//! normalized to the pipeline's RGB layout), encoding through
//! `jpeg-encoder` at a fixed visually-transparent quality.

use crate::{IoError, IoResult};
use pix_core::PixelBuffer;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Encoding quality (0-100). High enough that repeated edit/save cycles
/// stay visually stable.
const JPEG_QUALITY: u8 = 95;

/// Reads a JPEG file into an RGB pixel buffer.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    trace!(path = %path.as_ref().display(), "jpeg::read");
    let file = File::open(path.as_ref())?;
    let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(file));
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(e.to_string()))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing image info after decode".into()))?;

    let rgb: Vec<u8> = match info.pixel_format {
        jpeg_decoder::PixelFormat::RGB24 => pixels,
        jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
        jpeg_decoder::PixelFormat::L16 => pixels
            .chunks_exact(2)
            .flat_map(|px| {
                let g = px[0]; // high byte
                [g, g, g]
            })
            .collect(),
        jpeg_decoder::PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .flat_map(|cmyk| {
                let c = cmyk[0] as f32 / 255.0;
                let m = cmyk[1] as f32 / 255.0;
                let y = cmyk[2] as f32 / 255.0;
                let k = cmyk[3] as f32 / 255.0;
                [
                    ((1.0 - c) * (1.0 - k) * 255.0) as u8,
                    ((1.0 - m) * (1.0 - k) * 255.0) as u8,
                    ((1.0 - y) * (1.0 - k) * 255.0) as u8,
                ]
            })
            .collect(),
    };

    debug!(width = info.width, height = info.height, "jpeg decoded");
    Ok(PixelBuffer::from_decoded(
        info.width as u32,
        info.height as u32,
        rgb,
    )?)
}

/// Writes a pixel buffer to a JPEG file (8-bit RGB).
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    trace!(path = %path.as_ref().display(), "jpeg::write");
    let mut buffer = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut buffer, JPEG_QUALITY);
    encoder
        .encode(
            image.data(),
            image.width() as u16,
            image.height() as u16,
            jpeg_encoder::ColorType::Rgb,
        )
        .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;
    std::fs::write(path.as_ref(), buffer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_roundtrip_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.jpg");

        let image = PixelBuffer::filled(24, 18, [200, 100, 50]);
        write(&path, &image).expect("write failed");
        let loaded = read(&path).expect("read failed");

        assert_eq!(loaded.dimensions(), (24, 18));
        // JPEG is lossy; a flat field should still come back close.
        let [r, g, b] = loaded.pixel(12, 9);
        assert!((r as i32 - 200).abs() < 10);
        assert!((g as i32 - 100).abs() < 10);
        assert!((b as i32 - 50).abs() < 10);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read("/nonexistent/missing.jpg");
        assert!(matches!(result, Err(IoError::Io(_))));
    }
}
