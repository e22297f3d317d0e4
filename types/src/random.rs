//! Randomness seam.
//!
//! Every simulated branch and every generated id draws from a
//! [`RandomSource`], so tests can script the outcome of a run.

use rand::{Rng, RngCore};

/// Trait for drawing pseudo-random values.
pub trait RandomSource: Send + Sync {
    /// A uniform draw in `[0, 1)`.
    fn next_f64(&self) -> f64;

    /// Fill `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);

    /// Human-readable name of this source.
    fn name(&self) -> &str;
}

/// Thread-local OS-seeded randomness.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_f64(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::thread_rng().fill_bytes(dest);
    }

    fn name(&self) -> &str {
        "thread-random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_stay_in_unit_interval() {
        let rng = ThreadRandom;
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
