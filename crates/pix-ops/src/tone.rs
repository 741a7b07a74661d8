//! Tonal transforms: grayscale conversions and channel inversion.

use crate::{OpsError, OpsResult};
use pix_core::{luminance_rec601, PixelBuffer, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Classic black-and-white: Rec.601 luminance replicated into all three
/// channels.
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
///
/// # Example
///
/// ```rust
/// use pix_core::PixelBuffer;
/// use pix_ops::tone::grayscale;
///
/// let src = PixelBuffer::filled(2, 2, [255, 0, 0]);
/// let out = grayscale(&src).unwrap();
/// let [r, g, b] = out.pixel(0, 0);
/// assert_eq!(r, g);
/// assert_eq!(g, b);
/// ```
pub fn grayscale(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), "grayscale");
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }
    Ok(src.map_pixels(|px| {
        let y = luminance_rec601(px);
        [y, y, y]
    }))
}

/// High-contrast black-and-white: grayscale followed by auto-contrast.
///
/// The observed luminance range [min, max] is remapped linearly onto
/// [0, 255]. A flat image (min == max) converts to plain grayscale
/// unchanged, since there is no range to stretch.
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
pub fn grayscale_high_contrast(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        "grayscale_high_contrast"
    );
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }

    let mut luma = Vec::with_capacity(src.pixel_count());
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for chunk in src.data().chunks_exact(CHANNELS) {
        let y = luminance_rec601([chunk[0], chunk[1], chunk[2]]);
        min = min.min(y);
        max = max.max(y);
        luma.push(y);
    }
    debug!(min, max, "auto-contrast range");

    let range = max as f32 - min as f32;
    let mut dst = Vec::with_capacity(src.data().len());
    for y in luma {
        let v = if range > 0.0 {
            ((y as f32 - min as f32) * 255.0 / range).round() as u8
        } else {
            y
        };
        dst.extend_from_slice(&[v, v, v]);
    }

    Ok(PixelBuffer::from_decoded(src.width(), src.height(), dst)?)
}

/// Inverts every channel: `v -> 255 - v`.
///
/// Exactly involutive: applying twice restores the original image.
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
pub fn invert(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), "invert");
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }
    Ok(src.map_pixels(|[r, g, b]| [255 - r, 255 - g, 255 - b]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_flattens_channels() {
        let src = PixelBuffer::filled(3, 3, [200, 50, 10]);
        let out = grayscale(&src).unwrap();
        let [r, g, b] = out.pixel(1, 1);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(out.dimensions(), src.dimensions());
    }

    #[test]
    fn test_grayscale_white_stays_white() {
        let src = PixelBuffer::filled(2, 2, [255, 255, 255]);
        let out = grayscale(&src).unwrap();
        assert_eq!(out.pixel(0, 0), [255, 255, 255]);
    }

    #[test]
    fn test_high_contrast_stretches_range() {
        // Two gray levels 100 and 150 -> stretched to 0 and 255.
        let src = PixelBuffer::filled(2, 1, [100, 100, 100]).with_pixel_set(1, 0, [150, 150, 150]);
        let out = grayscale_high_contrast(&src).unwrap();
        assert_eq!(out.pixel(0, 0), [0, 0, 0]);
        assert_eq!(out.pixel(1, 0), [255, 255, 255]);
    }

    #[test]
    fn test_high_contrast_flat_image_unchanged() {
        let src = PixelBuffer::filled(3, 3, [77, 77, 77]);
        let out = grayscale_high_contrast(&src).unwrap();
        assert_eq!(out.pixel(1, 1), [77, 77, 77]);
    }

    #[test]
    fn test_invert_is_involutive() {
        let src = PixelBuffer::filled(2, 2, [3, 128, 254]).with_pixel_set(0, 1, [0, 255, 17]);
        let twice = invert(&invert(&src).unwrap()).unwrap();
        assert_eq!(twice, src);
    }

    #[test]
    fn test_invert_values() {
        let src = PixelBuffer::filled(1, 1, [0, 128, 255]);
        let out = invert(&src).unwrap();
        assert_eq!(out.pixel(0, 0), [255, 127, 0]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let src = PixelBuffer::from_decoded(0, 0, vec![]).unwrap();
        assert!(matches!(grayscale(&src), Err(OpsError::EmptyImage)));
        assert!(matches!(
            grayscale_high_contrast(&src),
            Err(OpsError::EmptyImage)
        ));
        assert!(matches!(invert(&src), Err(OpsError::EmptyImage)));
    }
}
