//! Seedable generator behind `Random` node selection.
//!
//! Reproducible for a given seed and **not** cryptographic.

use std::sync::atomic::{AtomicU64, Ordering};

pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform draw in `[0, 1)`.
    fn next_f64_unit(&mut self) -> f64 {
        // 53 bits of mantissa
        let x = self.next_u64() >> 11;
        (x as f64) / ((1u64 << 53) as f64)
    }

    /// Uniform draw in `[0, bound)`. `bound` must be non-zero.
    fn below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0, "below() needs a non-empty range");
        // Lemire's multiply-shift; the bias is negligible for tree-sized ranges.
        let wide = (self.next_u64() as u128) * (bound as u128);
        (wide >> 64) as usize
    }
}

impl<R: DeterministicRng + ?Sized> DeterministicRng for Box<R> {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// SplitMix64: good seeding RNG and small deterministic generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// A generator on its own stream, distinct for every call within the process.
    pub fn from_stream() -> Self {
        Self::new(next_stream_seed())
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        mix64(self.state)
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.step()
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

pub fn derive_seed(global_seed: u64, stream: u64) -> u64 {
    mix64(global_seed ^ mix64(stream.wrapping_add(0x9E3779B97F4A7C15)))
}

static STREAMS: AtomicU64 = AtomicU64::new(0);

fn next_stream_seed() -> u64 {
    let stream = STREAMS.fetch_add(1, Ordering::Relaxed);
    derive_seed(0x5EED_BE4A_7100_0001, stream)
}
