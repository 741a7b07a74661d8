//! The filter catalog: a closed, enumerable set of transforms.
//!
//! [`FilterRequest`] is the tagged-variant rendering of a menu of named
//! effects: every entry the editor offers is one variant, parameters and
//! all. [`apply`] dispatches a request with an exhaustive match, so adding
//! a catalog entry is a compile-enforced, test-enumerable change.
//!
//! # Example
//!
//! ```rust
//! use pix_core::PixelBuffer;
//! use pix_ops::catalog::{apply, FilterRequest};
//!
//! let img = PixelBuffer::filled(4, 4, [255, 255, 255]);
//! let out = apply(&img, &FilterRequest::Solarize { threshold: 128 }).unwrap();
//! assert_eq!(out.pixel(0, 0), [0, 0, 0]);
//! ```

use crate::filter::{convolve, median, Kernel};
use crate::{noise, stylize, tone, OpsError, OpsResult};
use pix_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// One invocation of a catalog filter, parameters included.
///
/// Parameter domains are validated by the functions this dispatches to,
/// regardless of what the caller already checked.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterRequest {
    /// Classic black-and-white (luminance grayscale).
    ClassicBw,
    /// Grayscale with auto-contrast range stretch.
    HighContrastBw,
    /// Brown/tan duotone.
    Vintage,
    /// Sepia color-mix matrix.
    Sepia,
    /// Invert channels at or above the threshold.
    Solarize {
        /// Inversion threshold.
        threshold: u8,
    },
    /// Keep only the top `bits` bits of each channel.
    Posterize {
        /// Bits to keep, in [1, 8].
        bits: u8,
    },
    /// Invert every channel.
    Invert,
    /// Additive uniform noise.
    AddNoise {
        /// Maximum absolute per-channel delta.
        amount: u32,
        /// Generator seed; equal seeds reproduce equal noise.
        seed: u64,
    },
    /// User-supplied convolution kernel.
    Custom {
        /// Kernel side length (odd, >= 1).
        size: usize,
        /// Row-major weights, `size * size` entries.
        weights: Vec<f64>,
    },
    /// Gaussian blur with the given radius.
    GaussianBlur {
        /// Blur radius (standard deviation), >= 0.
        radius: f64,
    },
    /// Box blur with the given radius.
    BoxBlur {
        /// Blur radius, >= 0.
        radius: f64,
    },
    /// Fixed sharpening kernel.
    Sharpen,
    /// Fixed detail-enhancement kernel.
    Detail,
    /// Fixed edge-detection kernel.
    FindEdges,
    /// Fixed edge-enhancement kernel.
    EdgeEnhance,
    /// Fixed emboss kernel.
    Emboss,
    /// Fixed contour kernel.
    Contour,
    /// 3x3 median rank filter.
    ReduceNoise,
}

impl FilterRequest {
    /// Stable lowercase name of the filter, for logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            FilterRequest::ClassicBw => "classic-bw",
            FilterRequest::HighContrastBw => "high-contrast-bw",
            FilterRequest::Vintage => "vintage",
            FilterRequest::Sepia => "sepia",
            FilterRequest::Solarize { .. } => "solarize",
            FilterRequest::Posterize { .. } => "posterize",
            FilterRequest::Invert => "invert",
            FilterRequest::AddNoise { .. } => "add-noise",
            FilterRequest::Custom { .. } => "custom",
            FilterRequest::GaussianBlur { .. } => "gaussian-blur",
            FilterRequest::BoxBlur { .. } => "box-blur",
            FilterRequest::Sharpen => "sharpen",
            FilterRequest::Detail => "detail",
            FilterRequest::FindEdges => "find-edges",
            FilterRequest::EdgeEnhance => "edge-enhance",
            FilterRequest::Emboss => "emboss",
            FilterRequest::Contour => "contour",
            FilterRequest::ReduceNoise => "reduce-noise",
        }
    }
}

/// Applies a catalog filter to an image, producing a new image.
///
/// Pure dispatch: the source is never mutated, and a failed call leaves
/// no partial state anywhere. Callers commit the returned buffer to
/// history only on success.
pub fn apply(src: &PixelBuffer, request: &FilterRequest) -> OpsResult<PixelBuffer> {
    debug!(filter = request.name(), "apply");
    match request {
        FilterRequest::ClassicBw => tone::grayscale(src),
        FilterRequest::HighContrastBw => tone::grayscale_high_contrast(src),
        FilterRequest::Vintage => stylize::vintage(src),
        FilterRequest::Sepia => stylize::sepia(src),
        FilterRequest::Solarize { threshold } => stylize::solarize(src, *threshold),
        FilterRequest::Posterize { bits } => stylize::posterize(src, *bits),
        FilterRequest::Invert => tone::invert(src),
        FilterRequest::AddNoise { amount, seed } => noise::add_noise(src, *amount, *seed),
        FilterRequest::Custom { size, weights } => {
            // The engine itself accepts any odd size >= 1; the catalog
            // entry is the user-facing one and requires a real window.
            if *size < 3 || *size % 2 == 0 {
                return Err(OpsError::InvalidParameter(format!(
                    "custom kernel size must be odd and >= 3, got {size}"
                )));
            }
            let kernel = Kernel::new(weights.clone(), *size)?;
            convolve(src, &kernel)
        }
        FilterRequest::GaussianBlur { radius } => convolve(src, &Kernel::gaussian(*radius)?),
        FilterRequest::BoxBlur { radius } => convolve(src, &Kernel::box_blur(*radius)?),
        FilterRequest::Sharpen => convolve(src, &Kernel::sharpen()),
        FilterRequest::Detail => convolve(src, &Kernel::detail()),
        FilterRequest::FindEdges => convolve(src, &Kernel::find_edges()),
        FilterRequest::EdgeEnhance => convolve(src, &Kernel::edge_enhance()),
        FilterRequest::Emboss => convolve(src, &Kernel::emboss()),
        FilterRequest::Contour => convolve(src, &Kernel::contour()),
        FilterRequest::ReduceNoise => median(src, 1),
    }
}
