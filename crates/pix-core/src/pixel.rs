//! Pixel-level helpers: luminance weighting.
//!
//! The grayscale conversions in `pix-ops` all reduce RGB to a single
//! luminance value using the Rec.601 weighting, which is the weighting
//! photo-editing tools conventionally apply to 8-bit sRGB-ish material.

/// Rec.601 luminance coefficient for the red channel.
///
/// Used in the standard luminance formula: `Y = 0.299*R + 0.587*G + 0.114*B`
pub const REC601_LUMA_R: f32 = 0.299;

/// Rec.601 luminance coefficient for the green channel.
pub const REC601_LUMA_G: f32 = 0.587;

/// Rec.601 luminance coefficient for the blue channel.
pub const REC601_LUMA_B: f32 = 0.114;

/// Rec.601 luminance coefficients as an array [R, G, B].
///
/// # Example
/// ```
/// use pix_core::pixel::REC601_LUMA;
/// let rgb = [0.5, 0.3, 0.2];
/// let luma = rgb[0] * REC601_LUMA[0] + rgb[1] * REC601_LUMA[1] + rgb[2] * REC601_LUMA[2];
/// ```
pub const REC601_LUMA: [f32; 3] = [REC601_LUMA_R, REC601_LUMA_G, REC601_LUMA_B];

/// Calculate Rec.601 luminance from an 8-bit RGB pixel.
///
/// The weighted sum is rounded to the nearest integer, so a uniform gray
/// input maps to itself exactly.
///
/// # Example
/// ```
/// use pix_core::pixel::luminance_rec601;
/// assert_eq!(luminance_rec601([255, 255, 255]), 255);
/// assert_eq!(luminance_rec601([0, 0, 0]), 0);
/// assert_eq!(luminance_rec601([128, 128, 128]), 128);
/// ```
#[inline]
pub fn luminance_rec601(rgb: [u8; 3]) -> u8 {
    let y = rgb[0] as f32 * REC601_LUMA_R
        + rgb[1] as f32 * REC601_LUMA_G
        + rgb[2] as f32 * REC601_LUMA_B;
    y.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let sum: f32 = REC601_LUMA.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_gray_is_fixed_point() {
        for v in [0u8, 1, 17, 128, 200, 254, 255] {
            assert_eq!(luminance_rec601([v, v, v]), v);
        }
    }

    #[test]
    fn test_green_dominates() {
        let green = luminance_rec601([0, 255, 0]);
        let red = luminance_rec601([255, 0, 0]);
        let blue = luminance_rec601([0, 0, 255]);
        assert!(green > red);
        assert!(red > blue);
    }
}
