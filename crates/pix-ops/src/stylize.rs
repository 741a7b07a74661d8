//! Stylize transforms: sepia, vintage, solarize, posterize.

use crate::{OpsError, OpsResult};
use pix_core::{luminance_rec601, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Vintage tint endpoints: dark brown for black, tan for white.
const VINTAGE_BLACK: [u8; 3] = [0x70, 0x42, 0x14];
const VINTAGE_WHITE: [u8; 3] = [0xC0, 0xA0, 0x80];

/// Sepia color-mixing matrix, rows are output R/G/B.
const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Applies the sepia color-mixing matrix to every pixel.
///
/// Each output channel is a fixed linear combination of the input RGB,
/// clamped to [0, 255].
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
pub fn sepia(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), "sepia");
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }
    Ok(src.map_pixels(|[r, g, b]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        let mut out = [0u8; 3];
        for (c, row) in SEPIA_MATRIX.iter().enumerate() {
            out[c] = (r * row[0] + g * row[1] + b * row[2]).clamp(0.0, 255.0) as u8;
        }
        out
    }))
}

/// Applies a vintage duotone: grayscale, then map black to dark brown and
/// white to tan with per-channel linear interpolation.
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
///
/// # Example
///
/// ```rust
/// use pix_core::PixelBuffer;
/// use pix_ops::stylize::vintage;
///
/// let black = PixelBuffer::filled(1, 1, [0, 0, 0]);
/// assert_eq!(vintage(&black).unwrap().pixel(0, 0), [0x70, 0x42, 0x14]);
///
/// let white = PixelBuffer::filled(1, 1, [255, 255, 255]);
/// assert_eq!(vintage(&white).unwrap().pixel(0, 0), [0xC0, 0xA0, 0x80]);
/// ```
pub fn vintage(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), "vintage");
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }
    Ok(src.map_pixels(|px| {
        let y = luminance_rec601(px) as f32 / 255.0;
        let mut out = [0u8; 3];
        for c in 0..3 {
            let lo = VINTAGE_BLACK[c] as f32;
            let hi = VINTAGE_WHITE[c] as f32;
            out[c] = (lo + (hi - lo) * y).round().clamp(0.0, 255.0) as u8;
        }
        out
    }))
}

/// Solarizes the image: channel values at or above `threshold` are
/// inverted, values below pass through.
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source. The threshold
/// is a `u8`, so the [0, 255] domain is enforced by the type.
///
/// # Example
///
/// ```rust
/// use pix_core::PixelBuffer;
/// use pix_ops::stylize::solarize;
///
/// let white = PixelBuffer::filled(2, 2, [255, 255, 255]);
/// let out = solarize(&white, 128).unwrap();
/// assert_eq!(out.pixel(0, 0), [0, 0, 0]);
/// ```
pub fn solarize(src: &PixelBuffer, threshold: u8) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        threshold,
        "solarize"
    );
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }
    let flip = |v: u8| if v >= threshold { 255 - v } else { v };
    Ok(src.map_pixels(|[r, g, b]| [flip(r), flip(g), flip(b)]))
}

/// Posterizes the image: keeps the top `bits` bits of each channel and
/// zeroes the rest.
///
/// With `bits == 8` the image is unchanged; with `bits == 1` every
/// channel collapses to 0 or 128.
///
/// # Errors
///
/// Returns [`OpsError::InvalidParameter`] when `bits` is outside [1, 8]
/// and [`OpsError::EmptyImage`] for a zero-area source.
pub fn posterize(src: &PixelBuffer, bits: u8) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), bits, "posterize");
    if !(1..=8).contains(&bits) {
        return Err(OpsError::InvalidParameter(format!(
            "posterize bits must be in [1, 8], got {bits}"
        )));
    }
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }
    // u8 shifts by 8 overflow, widen before masking.
    let mask = !(0xffu16 >> bits) as u8;
    Ok(src.map_pixels(|[r, g, b]| [r & mask, g & mask, b & mask]))
}
