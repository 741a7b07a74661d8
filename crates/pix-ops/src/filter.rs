//! Convolution engine and rank filtering.
//!
//! Everything spatial in the catalog funnels through two routines here:
//! [`convolve`] for weighted-sum kernels and [`median`] for the rank
//! filter. Both use edge-clamped borders: an out-of-bounds neighbor
//! lookup replicates the nearest in-bounds pixel.
//!
//! # Kernels
//!
//! - [`Kernel::gaussian`] / [`Kernel::box_blur`] - radius-derived blurs
//! - [`Kernel::sharpen`] / [`Kernel::detail`] - crispening
//! - [`Kernel::find_edges`] / [`Kernel::edge_enhance`] - edge work
//! - [`Kernel::emboss`] / [`Kernel::contour`] - offset-based effects
//! - [`Kernel::new`] - arbitrary user-supplied weights
//!
//! # Example
//!
//! ```rust
//! use pix_core::PixelBuffer;
//! use pix_ops::filter::{convolve, Kernel};
//!
//! let src = PixelBuffer::filled(16, 16, [128, 128, 128]);
//! let kernel = Kernel::gaussian(1.0).unwrap();
//! let blurred = convolve(&src, &kernel).unwrap();
//! assert_eq!(blurred.dimensions(), (16, 16));
//! ```

use crate::{OpsError, OpsResult};
use pix_core::{PixelBuffer, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Convolution kernel: square weight matrix plus scale and offset.
///
/// After the weighted sum is computed for a pixel, it is divided by
/// `scale` and `offset` is added, then the result is rounded and clamped
/// to [0, 255]. A `scale` of `0.0` is treated as `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Kernel weights, row-major, `size * size` entries.
    pub data: Vec<f64>,
    /// Kernel side length (odd, >= 1).
    pub size: usize,
    /// Divisor applied to the weighted sum.
    pub scale: f64,
    /// Bias added after scaling.
    pub offset: f64,
}

impl Kernel {
    /// Creates a kernel from user-supplied weights.
    ///
    /// `scale` defaults to the sum of the weights, or `1.0` when the sum
    /// is zero; `offset` defaults to `0.0`. Use [`with_scale`](Self::with_scale)
    /// and [`with_offset`](Self::with_offset) to override.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidKernel`] when `size` is even, `size < 1`,
    /// or `data.len() != size * size`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pix_ops::filter::Kernel;
    ///
    /// let k = Kernel::new(vec![1.0; 9], 3).unwrap();
    /// assert_eq!(k.scale, 9.0);
    ///
    /// assert!(Kernel::new(vec![1.0; 4], 2).is_err());
    /// ```
    pub fn new(data: Vec<f64>, size: usize) -> OpsResult<Self> {
        if size < 1 || size % 2 == 0 {
            return Err(OpsError::InvalidKernel(format!(
                "kernel size must be odd and >= 1, got {size}"
            )));
        }
        if data.len() != size * size {
            return Err(OpsError::InvalidKernel(format!(
                "kernel data size {} doesn't match {}x{}",
                data.len(),
                size,
                size
            )));
        }
        let sum: f64 = data.iter().sum();
        let scale = if sum == 0.0 { 1.0 } else { sum };
        Ok(Self {
            data,
            size,
            scale,
            offset: 0.0,
        })
    }

    /// Overrides the scale divisor.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Overrides the offset bias.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// The 1x1 identity kernel. Convolving with it copies the image.
    pub fn identity() -> Self {
        Self {
            data: vec![1.0],
            size: 1,
            scale: 1.0,
            offset: 0.0,
        }
    }

    /// Creates a Gaussian blur kernel from a blur radius.
    ///
    /// The radius acts as the standard deviation; weights are truncated at
    /// three standard deviations, giving a kernel of side
    /// `2 * ceil(3 * radius) + 1`. A radius of `0` degenerates to the
    /// identity kernel.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] for a negative or non-finite
    /// radius.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pix_ops::filter::Kernel;
    ///
    /// let k = Kernel::gaussian(1.0).unwrap();
    /// assert_eq!(k.size, 7);
    /// ```
    pub fn gaussian(radius: f64) -> OpsResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "blur radius must be >= 0, got {radius}"
            )));
        }
        if radius == 0.0 {
            return Ok(Self::identity());
        }

        let half = (radius * 3.0).ceil() as i64;
        let size = (half * 2 + 1) as usize;
        let sigma2 = 2.0 * radius * radius;

        let mut data = Vec::with_capacity(size * size);
        let mut sum = 0.0f64;
        for y in -half..=half {
            for x in -half..=half {
                let d = (x * x + y * y) as f64;
                let w = (-d / sigma2).exp();
                data.push(w);
                sum += w;
            }
        }

        Ok(Self {
            data,
            size,
            scale: sum,
            offset: 0.0,
        })
    }

    /// Creates a box blur kernel from a blur radius.
    ///
    /// Uniform weights over a square of side `2 * ceil(radius) + 1`; the
    /// output is the plain average of that neighborhood. A radius of `0`
    /// degenerates to the identity kernel.
    ///
    /// # Errors
    ///
    /// Returns [`OpsError::InvalidParameter`] for a negative or non-finite
    /// radius.
    pub fn box_blur(radius: f64) -> OpsResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "blur radius must be >= 0, got {radius}"
            )));
        }
        let half = radius.ceil() as usize;
        let size = half * 2 + 1;
        let count = size * size;
        Ok(Self {
            data: vec![1.0; count],
            size,
            scale: count as f64,
            offset: 0.0,
        })
    }

    /// Creates the classic 3x3 sharpening kernel.
    pub fn sharpen() -> Self {
        Self {
            data: vec![
                -2.0, -2.0, -2.0,
                -2.0, 32.0, -2.0,
                -2.0, -2.0, -2.0,
            ],
            size: 3,
            scale: 16.0,
            offset: 0.0,
        }
    }

    /// Creates the detail-enhancement kernel.
    pub fn detail() -> Self {
        Self {
            data: vec![
                0.0, -1.0, 0.0,
                -1.0, 10.0, -1.0,
                0.0, -1.0, 0.0,
            ],
            size: 3,
            scale: 6.0,
            offset: 0.0,
        }
    }

    /// Creates the edge-detection kernel (Laplacian-8).
    ///
    /// On flat regions the weighted sum is zero, so output pixels go
    /// black except where intensity changes.
    pub fn find_edges() -> Self {
        Self {
            data: vec![
                -1.0, -1.0, -1.0,
                -1.0, 8.0, -1.0,
                -1.0, -1.0, -1.0,
            ],
            size: 3,
            scale: 1.0,
            offset: 0.0,
        }
    }

    /// Creates the edge-enhancement kernel.
    pub fn edge_enhance() -> Self {
        Self {
            data: vec![
                -1.0, -1.0, -1.0,
                -1.0, 9.0, -1.0,
                -1.0, -1.0, -1.0,
            ],
            size: 3,
            scale: 1.0,
            offset: 0.0,
        }
    }

    /// Creates the emboss kernel.
    ///
    /// The 128 offset re-centers the signed relief so flat regions come
    /// out mid-gray.
    pub fn emboss() -> Self {
        Self {
            data: vec![
                -1.0, 0.0, 0.0,
                0.0, 1.0, 0.0,
                0.0, 0.0, 0.0,
            ],
            size: 3,
            scale: 1.0,
            offset: 128.0,
        }
    }

    /// Creates the contour kernel.
    ///
    /// Inverted edge detection: the 255 offset turns flat regions white
    /// and draws edges dark, like a line sketch.
    pub fn contour() -> Self {
        Self {
            data: vec![
                -1.0, -1.0, -1.0,
                -1.0, 8.0, -1.0,
                -1.0, -1.0, -1.0,
            ],
            size: 3,
            scale: 1.0,
            offset: 255.0,
        }
    }

    /// Returns the kernel radius (half-size).
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Effective scale divisor: a stored scale of `0.0` is treated as `1.0`.
    #[inline]
    pub(crate) fn effective_scale(&self) -> f64 {
        if self.scale == 0.0 { 1.0 } else { self.scale }
    }
}

/// Applies a convolution kernel to an image.
///
/// For each output pixel and channel the `size x size` neighborhood is
/// weighted and summed with edge-clamped borders, divided by the kernel
/// scale, biased by the kernel offset, then rounded and clamped to
/// [0, 255]. The output has the same dimensions as the input.
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
///
/// # Example
///
/// ```rust
/// use pix_core::PixelBuffer;
/// use pix_ops::filter::{convolve, Kernel};
///
/// let src = PixelBuffer::filled(8, 8, [100, 100, 100]);
/// let out = convolve(&src, &Kernel::box_blur(1.0).unwrap()).unwrap();
/// // Constant image stays constant under an averaging kernel.
/// assert_eq!(out.pixel(4, 4), [100, 100, 100]);
/// ```
pub fn convolve(src: &PixelBuffer, kernel: &Kernel) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        kernel_size = kernel.size,
        "convolve"
    );
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }

    let width = src.width() as usize;
    let height = src.height() as usize;
    let half = kernel.radius() as isize;
    let scale = kernel.effective_scale();
    let data = src.data();
    let mut dst = vec![0u8; data.len()];

    for y in 0..height {
        for x in 0..width {
            let mut sums = [0.0f64; CHANNELS];

            for ky in 0..kernel.size {
                let sy = (y as isize + ky as isize - half)
                    .clamp(0, height as isize - 1) as usize;
                for kx in 0..kernel.size {
                    let sx = (x as isize + kx as isize - half)
                        .clamp(0, width as isize - 1) as usize;

                    let src_idx = (sy * width + sx) * CHANNELS;
                    let kw = kernel.data[ky * kernel.size + kx];

                    for c in 0..CHANNELS {
                        sums[c] += data[src_idx + c] as f64 * kw;
                    }
                }
            }

            let dst_idx = (y * width + x) * CHANNELS;
            for c in 0..CHANNELS {
                dst[dst_idx + c] =
                    (sums[c] / scale + kernel.offset).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(PixelBuffer::from_decoded(src.width(), src.height(), dst)?)
}

/// Applies a median rank filter to an image.
///
/// For each pixel and channel the `(2*radius+1)` square neighborhood is
/// collected with edge-clamped borders and the median value is emitted.
/// Unlike [`convolve`] this is an order statistic, not a weighted sum, so
/// it removes salt-and-pepper noise while preserving edges.
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
///
/// # Example
///
/// ```rust
/// use pix_core::PixelBuffer;
/// use pix_ops::filter::median;
///
/// let src = PixelBuffer::filled(5, 5, [128, 128, 128])
///     .with_pixel_set(2, 2, [255, 255, 255]); // lone spike
/// let out = median(&src, 1).unwrap();
/// assert_eq!(out.pixel(2, 2), [128, 128, 128]);
/// ```
pub fn median(src: &PixelBuffer, radius: usize) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), radius, "median");
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }

    let width = src.width() as usize;
    let height = src.height() as usize;
    let size = 2 * radius + 1;
    let count = size * size;
    let data = src.data();
    let mut dst = vec![0u8; data.len()];

    let mut values: Vec<u8> = Vec::with_capacity(count);
    for y in 0..height {
        for x in 0..width {
            for c in 0..CHANNELS {
                values.clear();
                for ky in 0..size {
                    let sy = (y as isize + ky as isize - radius as isize)
                        .clamp(0, height as isize - 1) as usize;
                    for kx in 0..size {
                        let sx = (x as isize + kx as isize - radius as isize)
                            .clamp(0, width as isize - 1) as usize;
                        values.push(data[(sy * width + sx) * CHANNELS + c]);
                    }
                }
                values.sort_unstable();
                dst[(y * width + x) * CHANNELS + c] = values[count / 2];
            }
        }
    }

    Ok(PixelBuffer::from_decoded(src.width(), src.height(), dst)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_new_defaults_scale_to_sum() {
        let k = Kernel::new(vec![1.0; 9], 3).unwrap();
        assert_eq!(k.scale, 9.0);
        assert_eq!(k.offset, 0.0);
    }

    #[test]
    fn test_kernel_new_zero_sum_scale() {
        let k = Kernel::new(vec![1.0, -1.0, 1.0, -1.0, 0.0, 1.0, -1.0, 1.0, -1.0], 3).unwrap();
        assert_eq!(k.scale, 1.0);
    }

    #[test]
    fn test_kernel_new_rejects_even_size() {
        assert!(matches!(
            Kernel::new(vec![1.0; 4], 2),
            Err(OpsError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_kernel_new_rejects_zero_size() {
        assert!(matches!(
            Kernel::new(vec![], 0),
            Err(OpsError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_kernel_new_rejects_length_mismatch() {
        assert!(matches!(
            Kernel::new(vec![1.0; 8], 3),
            Err(OpsError::InvalidKernel(_))
        ));
    }

    #[test]
    fn test_kernel_gaussian_normalized() {
        let k = Kernel::gaussian(1.5).unwrap();
        assert_eq!(k.size % 2, 1);
        let sum: f64 = k.data.iter().sum();
        approx::assert_relative_eq!(sum, k.scale, epsilon = 1e-12);
        // Center weight is the largest
        let center = k.data[k.data.len() / 2];
        assert!(center > k.data[0]);
    }

    #[test]
    fn test_kernel_gaussian_zero_radius_is_identity() {
        let k = Kernel::gaussian(0.0).unwrap();
        assert_eq!(k.size, 1);
        assert_eq!(k.data, vec![1.0]);
    }

    #[test]
    fn test_kernel_gaussian_rejects_negative() {
        assert!(matches!(
            Kernel::gaussian(-1.0),
            Err(OpsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_kernel_box_size() {
        let k = Kernel::box_blur(2.0).unwrap();
        assert_eq!(k.size, 5);
        assert_eq!(k.scale, 25.0);
    }

    #[test]
    fn test_convolve_identity() {
        let src = PixelBuffer::filled(4, 4, [10, 200, 30]).with_pixel_set(1, 2, [0, 0, 0]);
        let out = convolve(&src, &Kernel::identity()).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_convolve_box_average_with_clamped_edges() {
        // 3x3 ramp: value = 10 * (y * 3 + x) in the red channel.
        let mut data = Vec::new();
        for i in 0..9u8 {
            data.extend_from_slice(&[10 * i, 0, 0]);
        }
        let src = PixelBuffer::from_decoded(3, 3, data).unwrap();

        // All-ones 3x3 with unspecified scale == box blur (average of 9).
        let kernel = Kernel::new(vec![1.0; 9], 3).unwrap();
        let out = convolve(&src, &kernel).unwrap();

        // Center pixel: plain average of the whole ramp = 40.
        assert_eq!(out.pixel(1, 1)[0], 40);

        // Corner (0,0): edge-clamped neighborhood replicates row/col 0.
        // Neighbors: 0,0,10, 0,0,10, 30,30,40 -> sum 120 / 9 = 13.33 -> 13.
        assert_eq!(out.pixel(0, 0)[0], 13);
    }

    #[test]
    fn test_convolve_offset_applies_after_scale() {
        let src = PixelBuffer::filled(3, 3, [50, 50, 50]);
        let kernel = Kernel::identity().with_offset(100.0);
        let out = convolve(&src, &kernel).unwrap();
        assert_eq!(out.pixel(1, 1), [150, 150, 150]);
    }

    #[test]
    fn test_convolve_clamps_output() {
        let src = PixelBuffer::filled(3, 3, [200, 200, 200]);
        let kernel = Kernel::identity().with_offset(100.0);
        let out = convolve(&src, &kernel).unwrap();
        assert_eq!(out.pixel(0, 0), [255, 255, 255]);

        let kernel = Kernel::identity().with_offset(-250.0);
        let out = convolve(&src, &kernel).unwrap();
        assert_eq!(out.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_convolve_zero_scale_treated_as_one() {
        let src = PixelBuffer::filled(3, 3, [7, 7, 7]);
        let kernel = Kernel::identity().with_scale(0.0);
        let out = convolve(&src, &kernel).unwrap();
        assert_eq!(out.pixel(1, 1), [7, 7, 7]);
    }

    #[test]
    fn test_convolve_empty_image() {
        let src = PixelBuffer::from_decoded(0, 0, vec![]).unwrap();
        assert!(matches!(
            convolve(&src, &Kernel::identity()),
            Err(OpsError::EmptyImage)
        ));
    }

    #[test]
    fn test_emboss_flat_region_is_mid_gray() {
        let src = PixelBuffer::filled(5, 5, [90, 90, 90]);
        let out = convolve(&src, &Kernel::emboss()).unwrap();
        // -1*90 + 1*90 = 0, plus offset 128.
        assert_eq!(out.pixel(2, 2), [128, 128, 128]);
    }

    #[test]
    fn test_find_edges_flat_region_is_black() {
        let src = PixelBuffer::filled(5, 5, [90, 90, 90]);
        let out = convolve(&src, &Kernel::find_edges()).unwrap();
        assert_eq!(out.pixel(2, 2), [0, 0, 0]);
    }

    #[test]
    fn test_contour_flat_region_is_white() {
        let src = PixelBuffer::filled(5, 5, [90, 90, 90]);
        let out = convolve(&src, &Kernel::contour()).unwrap();
        assert_eq!(out.pixel(2, 2), [255, 255, 255]);
    }

    #[test]
    fn test_sharpen_preserves_flat_regions() {
        let src = PixelBuffer::filled(5, 5, [90, 90, 90]);
        let out = convolve(&src, &Kernel::sharpen()).unwrap();
        // Weights sum to the scale, so flat regions are unchanged.
        assert_eq!(out.pixel(2, 2), [90, 90, 90]);
    }

    #[test]
    fn test_median_constant() {
        let src = PixelBuffer::filled(8, 8, [64, 64, 64]);
        let out = median(&src, 1).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_median_removes_spike() {
        let src = PixelBuffer::filled(5, 5, [100, 100, 100]).with_pixel_set(2, 2, [255, 0, 255]);
        let out = median(&src, 1).unwrap();
        assert_eq!(out.pixel(2, 2), [100, 100, 100]);
    }

    #[test]
    fn test_median_preserves_edge() {
        // Left half black, right half white.
        let src = PixelBuffer::from_decoded(
            4,
            4,
            (0..16)
                .flat_map(|i| if i % 4 < 2 { [0u8, 0, 0] } else { [255, 255, 255] })
                .collect(),
        )
        .unwrap();
        let out = median(&src, 1).unwrap();
        assert_eq!(out.pixel(0, 2)[0], 0);
        assert_eq!(out.pixel(3, 2)[0], 255);
    }

    #[test]
    fn test_median_empty_image() {
        let src = PixelBuffer::from_decoded(0, 0, vec![]).unwrap();
        assert!(matches!(median(&src, 1), Err(OpsError::EmptyImage)));
    }
}
