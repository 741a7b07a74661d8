//! # pix-ops
//!
//! Image transforms for the pix-rs editing pipeline.
//!
//! Every transform is a pure function `&PixelBuffer -> PixelBuffer`: the
//! source is never mutated, the output is freshly allocated, and a failed
//! call produces no partial state. The caller decides what to do with the
//! result (typically: commit it to a history stack).
//!
//! # Modules
//!
//! - [`filter`] - Convolution engine ([`Kernel`], [`convolve`], [`median`])
//! - [`tone`] - Grayscale conversions and inversion
//! - [`stylize`] - Sepia, vintage, solarize, posterize
//! - [`noise`] - Seedable additive noise
//! - [`catalog`] - The closed [`FilterRequest`] dispatch over all of the above
//! - [`parallel`] - Rayon row-parallel convolution/median (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use pix_core::PixelBuffer;
//! use pix_ops::{apply, FilterRequest};
//!
//! let img = PixelBuffer::filled(8, 8, [200, 150, 100]);
//! let sepia = apply(&img, &FilterRequest::Sepia).unwrap();
//! let blurred = apply(&sepia, &FilterRequest::GaussianBlur { radius: 2.0 }).unwrap();
//! assert_eq!(blurred.dimensions(), (8, 8));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod catalog;
pub mod filter;
pub mod noise;
pub mod stylize;
pub mod tone;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use catalog::{apply, FilterRequest};
pub use error::{OpsError, OpsResult};
pub use filter::{convolve, median, Kernel};
