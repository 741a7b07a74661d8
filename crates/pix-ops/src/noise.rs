//! Additive uniform noise with a deterministic, seedable generator.

use crate::{OpsError, OpsResult};
use pix_core::{PixelBuffer, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// MINSTD modulus (2^31 - 1).
const LCG_M: u64 = 0x7fff_ffff;
/// MINSTD multiplier.
const LCG_A: u64 = 48271;

/// Minimal linear congruential generator (MINSTD parameters).
///
/// Deterministic and seedable so that noise output is reproducible in
/// tests and across platforms. Not suitable for anything
/// security-sensitive, which additive image noise is not.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        // State must stay in [1, m - 1].
        SimpleRng {
            state: seed % (LCG_M - 1) + 1,
        }
    }

    /// Next raw value in [1, m - 1].
    fn next_u32(&mut self) -> u32 {
        self.state = self.state * LCG_A % LCG_M;
        self.state as u32
    }

    /// Uniform integer in [-amount, +amount].
    fn next_delta(&mut self, amount: u32) -> i64 {
        let span = 2 * amount as u64 + 1;
        (self.next_u32() as u64 % span) as i64 - amount as i64
    }
}

/// Adds uniform noise to every channel of every pixel.
///
/// Each channel independently receives a uniformly sampled integer delta
/// in `[-amount, +amount]`, and the result is clamped to [0, 255]. The
/// same `seed` always produces the same output, so callers wanting fresh
/// noise per application must vary the seed themselves.
///
/// # Errors
///
/// Returns [`OpsError::EmptyImage`] for a zero-area source.
///
/// # Example
///
/// ```rust
/// use pix_core::PixelBuffer;
/// use pix_ops::noise::add_noise;
///
/// let src = PixelBuffer::filled(8, 8, [128, 128, 128]);
/// let a = add_noise(&src, 64, 7).unwrap();
/// let b = add_noise(&src, 64, 7).unwrap();
/// assert_eq!(a, b); // same seed, same noise
/// ```
pub fn add_noise(src: &PixelBuffer, amount: u32, seed: u64) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        amount,
        seed,
        "add_noise"
    );
    if src.is_empty() {
        return Err(OpsError::EmptyImage);
    }
    if amount == 0 {
        return Ok(src.clone());
    }

    let mut rng = SimpleRng::new(seed);
    let mut dst = Vec::with_capacity(src.data().len());
    for chunk in src.data().chunks_exact(CHANNELS) {
        for &v in chunk {
            let noisy = v as i64 + rng.next_delta(amount);
            dst.push(noisy.clamp(0, 255) as u8);
        }
    }

    Ok(PixelBuffer::from_decoded(src.width(), src.height(), dst)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_output() {
        let src = PixelBuffer::filled(4, 4, [100, 150, 200]);
        let a = add_noise(&src, 32, 12345).unwrap();
        let b = add_noise(&src, 32, 12345).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let src = PixelBuffer::filled(8, 8, [128, 128, 128]);
        let a = add_noise(&src, 32, 1).unwrap();
        let b = add_noise(&src, 32, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_zero_amount_is_identity() {
        let src = PixelBuffer::filled(4, 4, [10, 20, 30]);
        let out = add_noise(&src, 0, 99).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_deltas_bounded() {
        let src = PixelBuffer::filled(16, 16, [128, 128, 128]);
        let out = add_noise(&src, 16, 42).unwrap();
        for (&a, &b) in src.data().iter().zip(out.data().iter()) {
            assert!((a as i32 - b as i32).abs() <= 16);
        }
    }

    #[test]
    fn test_output_clamped() {
        let src = PixelBuffer::filled(16, 16, [255, 0, 255]);
        let out = add_noise(&src, 64, 7).unwrap();
        // All outputs are valid u8 by construction; check the extremes
        // were clamped, not wrapped.
        for (_, _, [r, g, _]) in out.pixels() {
            assert!(r >= 255 - 64);
            assert!(g <= 64);
        }
    }

    #[test]
    fn test_rng_deltas_cover_span() {
        let mut rng = SimpleRng::new(0);
        let mut seen_neg = false;
        let mut seen_pos = false;
        for _ in 0..1000 {
            let d = rng.next_delta(4);
            assert!((-4..=4).contains(&d));
            seen_neg |= d < 0;
            seen_pos |= d > 0;
        }
        assert!(seen_neg && seen_pos);
    }

    #[test]
    fn test_empty_image_rejected() {
        let src = PixelBuffer::from_decoded(0, 0, vec![]).unwrap();
        assert!(matches!(add_noise(&src, 64, 0), Err(OpsError::EmptyImage)));
    }
}
