//! Parallel variants of the spatial filters using Rayon.
//!
//! Each output row depends only on the immutable source buffer, so rows
//! partition cleanly across threads. Results are bit-identical to the
//! serial versions in [`crate::filter`]; pick by image size.
//!
//! # Example
//!
//! ```rust
//! use pix_core::PixelBuffer;
//! use pix_ops::{filter, parallel, filter::Kernel};
//!
//! let src = PixelBuffer::filled(64, 64, [128, 64, 32]);
//! let kernel = Kernel::gaussian(1.5).unwrap();
//! let serial = filter::convolve(&src, &kernel).unwrap();
//! let par = parallel::convolve(&src, &kernel).unwrap();
//! assert_eq!(serial, par);
//! ```

use crate::filter::Kernel;
use crate::{OpsError, OpsResult};
use pix_core::{PixelBuffer, CHANNELS};
use rayon::prelude::*;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Row-parallel convolution. Same semantics as [`crate::filter::convolve`].
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
pub fn convolve(src: &PixelBuffer, kernel: &Kernel) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        kernel_size = kernel.size,
        "parallel convolve"
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

    dst.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
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

                for c in 0..CHANNELS {
                    row[x * CHANNELS + c] =
                        (sums[c] / scale + kernel.offset).round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    Ok(PixelBuffer::from_decoded(src.width(), src.height(), dst)?)
}

/// Row-parallel median filter. Same semantics as [`crate::filter::median`].
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
pub fn median(src: &PixelBuffer, radius: usize) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        radius,
        "parallel median"
    );
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }

    let width = src.width() as usize;
    let height = src.height() as usize;
    let size = 2 * radius + 1;
    let count = size * size;
    let data = src.data();
    let mut dst = vec![0u8; data.len()];

    dst.par_chunks_mut(width * CHANNELS)
        .enumerate()
        .for_each(|(y, row)| {
            let mut values: Vec<u8> = Vec::with_capacity(count);
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
                    row[x * CHANNELS + c] = values[count / 2];
                }
            }
        });

    Ok(PixelBuffer::from_decoded(src.width(), src.height(), dst)?)
}
