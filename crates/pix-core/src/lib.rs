//! # pix-core
//!
//! Core types for raster image editing.
//!
//! This crate provides the foundational types used throughout the pix-rs
//! workspace:
//!
//! - [`PixelBuffer`] - Owned, immutable RGB raster buffer
//! - [`luminance_rec601`] - Standard grayscale weighting helpers
//! - [`Error`], [`Result`] - Core error types
//!
//! ## Design Philosophy
//!
//! Every transform in the editing pipeline consumes a [`PixelBuffer`] and
//! produces a *new* [`PixelBuffer`]; buffers are never mutated after
//! construction. This is what makes history snapshots safe to hold: no two
//! snapshots can alias the same pixel storage.
//!
//! ## Crate Structure
//!
//! This crate is the foundation of pix-rs and has no internal dependencies.
//! All other pix-rs crates depend on `pix-core`:
//!
//! ```text
//! pix-core (this crate)
//!    ^
//!    |
//!    +-- pix-ops (filters, convolution)
//!    +-- pix-history (undo/redo stack)
//!    +-- pix-io (PNG/JPEG loading and saving)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;

// Re-exports for convenience
pub use buffer::{PixelBuffer, CHANNELS};
pub use error::{Error, Result};
pub use pixel::{luminance_rec601, REC601_LUMA, REC601_LUMA_B, REC601_LUMA_G, REC601_LUMA_R};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pix_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::{PixelBuffer, CHANNELS};
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{luminance_rec601, REC601_LUMA};
}
