//! The pixel buffer type shared by every stage of the editing pipeline.
//!
//! # Memory Layout
//!
//! Buffers store pixels in **row-major** order, top-to-bottom, with the
//! three channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  <- Row 0
//!         [R G B R G B R G B ...]  <- Row 1
//!         ...
//! ```
//!
//! # Immutability
//!
//! A [`PixelBuffer`] never changes after construction. Transforms allocate
//! a new buffer ([`map_pixels`](PixelBuffer::map_pixels),
//! [`with_pixel_set`](PixelBuffer::with_pixel_set)); there is no
//! `set_pixel`. The history stack relies on this: each snapshot it holds
//! is an independent, exclusively-owned buffer.
//!
//! # Usage
//!
//! ```rust
//! use pix_core::PixelBuffer;
//!
//! let img = PixelBuffer::filled(4, 4, [255, 128, 0]);
//! assert_eq!(img.pixel(2, 2), [255, 128, 0]);
//!
//! let inverted = img.map_pixels(|[r, g, b]| [255 - r, 255 - g, 255 - b]);
//! assert_eq!(inverted.pixel(2, 2), [0, 127, 255]);
//! assert_eq!(img.pixel(2, 2), [255, 128, 0]); // original untouched
//! ```

use crate::{Error, Result};

/// Number of channels per pixel. The pipeline is fixed-format RGB.
pub const CHANNELS: usize = 3;

/// Owned RGB raster buffer.
///
/// Dimensions are `u32`; storage is a contiguous `Vec<u8>` whose length is
/// always exactly `width * height * 3`. Cloning performs a deep copy, so a
/// clone never shares storage with its source.
///
/// # Example
///
/// ```rust
/// use pix_core::PixelBuffer;
///
/// let data = vec![0u8; 8 * 8 * 3];
/// let img = PixelBuffer::from_decoded(8, 8, data).unwrap();
/// assert_eq!(img.dimensions(), (8, 8));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Interleaved RGB bytes, row-major.
    data: Vec<u8>,
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
}

impl PixelBuffer {
    /// Creates a buffer from already-decoded RGB data.
    ///
    /// This is the loader boundary: decoders hand the core raw interleaved
    /// bytes plus dimensions, and this constructor is the only place the
    /// length invariant is checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if `data.len() != width * height * 3`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pix_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_decoded(2, 2, vec![0u8; 12]).unwrap();
    /// assert_eq!(img.pixel_count(), 4);
    ///
    /// assert!(PixelBuffer::from_decoded(2, 2, vec![0u8; 11]).is_err());
    /// ```
    pub fn from_decoded(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::decode(width, height, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a buffer filled with a single pixel value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pix_core::PixelBuffer;
    ///
    /// let white = PixelBuffer::filled(10, 10, [255, 255, 255]);
    /// assert_eq!(white.pixel(9, 9), [255, 255, 255]);
    /// ```
    pub fn filled(width: u32, height: u32, pixel: [u8; 3]) -> Self {
        let pixel_count = width as usize * height as usize;
        let mut data = Vec::with_capacity(pixel_count * CHANNELS);
        for _ in 0..pixel_count {
            data.extend_from_slice(&pixel);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the number of channels per pixel (always 3).
    #[inline]
    pub const fn channels(&self) -> usize {
        CHANNELS
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a reference to the raw interleaved pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the raw pixel data.
    ///
    /// Used by encoders at the saver boundary.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the byte offset for the pixel at (x, y).
    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Returns a new buffer identical to this one except for the pixel at
    /// (x, y).
    ///
    /// Copy-on-write semantics: the source buffer is untouched. Bulk
    /// transforms should prefer [`map_pixels`](Self::map_pixels), which
    /// copies once instead of per call.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if (x, y) is out of bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pix_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::filled(2, 2, [0, 0, 0]);
    /// let marked = img.with_pixel_set(1, 1, [255, 0, 0]);
    /// assert_eq!(marked.pixel(1, 1), [255, 0, 0]);
    /// assert_eq!(img.pixel(1, 1), [0, 0, 0]);
    /// ```
    pub fn with_pixel_set(&self, x: u32, y: u32, pixel: [u8; 3]) -> PixelBuffer {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let mut out = self.clone();
        let offset = out.pixel_offset(x, y);
        out.data[offset..offset + CHANNELS].copy_from_slice(&pixel);
        out
    }

    /// Returns a row of pixels as a raw byte slice.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if y >= height.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize * CHANNELS;
        let end = start + self.width as usize * CHANNELS;
        &self.data[start..end]
    }

    /// Iterates over all pixels with their coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pix_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::filled(3, 3, [7, 7, 7]);
    /// for (x, y, px) in img.pixels() {
    ///     assert!(x < 3 && y < 3);
    ///     assert_eq!(px, [7, 7, 7]);
    /// }
    /// ```
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [u8; 3])> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }

    /// Applies a function to each pixel, producing a new buffer.
    ///
    /// This is the workhorse of the point-wise filters: one allocation, one
    /// pass, the source left untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pix_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::filled(4, 4, [10, 20, 30]);
    /// let doubled = img.map_pixels(|[r, g, b]| {
    ///     [r.saturating_mul(2), g.saturating_mul(2), b.saturating_mul(2)]
    /// });
    /// assert_eq!(doubled.pixel(0, 0), [20, 40, 60]);
    /// ```
    pub fn map_pixels<F>(&self, f: F) -> PixelBuffer
    where
        F: Fn([u8; 3]) -> [u8; 3],
    {
        let mut data = Vec::with_capacity(self.data.len());
        for chunk in self.data.chunks_exact(CHANNELS) {
            let out = f([chunk[0], chunk[1], chunk[2]]);
            data.extend_from_slice(&out);
        }
        PixelBuffer {
            data,
            width: self.width,
            height: self.height,
        }
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &CHANNELS)
            .finish()
    }
}
