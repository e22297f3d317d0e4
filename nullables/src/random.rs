//! Nullable random: scripted draws.

use kavach_types::RandomSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// A deterministic random source for testing.
///
/// `next_f64` returns the configured draws in order, cycling when exhausted.
/// `fill_bytes` writes a counter so generated ids stay unique.
pub struct NullRandom {
    draws: Mutex<Vec<f64>>,
    index: Mutex<usize>,
    counter: AtomicU64,
}

impl NullRandom {
    /// Create with a sequence of draws, each in `[0, 1)`.
    pub fn new(draws: Vec<f64>) -> Self {
        Self {
            draws: Mutex::new(draws),
            index: Mutex::new(0),
            counter: AtomicU64::new(0),
        }
    }

    /// Create with a single draw returned for every call.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Draws that pass every simulated check.
    pub fn always_pass() -> Self {
        Self::constant(0.99)
    }

    /// Replace the remaining draws.
    pub fn script(&self, draws: Vec<f64>) {
        *self.draws.lock().unwrap() = draws;
        *self.index.lock().unwrap() = 0;
    }

    /// Number of `next_f64` calls so far.
    pub fn draws_taken(&self) -> usize {
        *self.index.lock().unwrap()
    }
}

impl Default for NullRandom {
    fn default() -> Self {
        Self::always_pass()
    }
}

impl RandomSource for NullRandom {
    fn next_f64(&self) -> f64 {
        let draws = self.draws.lock().unwrap();
        let mut idx = self.index.lock().unwrap();
        let value = if draws.is_empty() {
            0.99
        } else {
            draws[*idx % draws.len()]
        };
        *idx += 1;
        value
    }

    fn fill_bytes(&self, dest: &mut [u8]) {
        let n = self.counter.fetch_add(1, Ordering::SeqCst).to_be_bytes();
        dest.fill(0);
        let len = dest.len().min(n.len());
        let start = dest.len() - len;
        dest[start..].copy_from_slice(&n[n.len() - len..]);
    }

    fn name(&self) -> &str {
        "null-random"
    }
}
