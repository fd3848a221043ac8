//! Simple random number generator for weight initialization.
//!
//! A lightweight xorshift-based PRNG. A non-zero seed gives fully reproducible
//! sequences; a zero seed draws its state from the system clock.

use std::time::{SystemTime, UNIX_EPOCH};

const FALLBACK_STATE: u64 = 0x9e3779b97f4a7c15;

/// Xorshift64 generator seeded through a splitmix64 scramble.
///
/// The scramble keeps small seeds (1, 2, 42, ...) from producing a run of
/// near-zero outputs at the start of the sequence.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    /// Create a new RNG. A seed of zero means "non-deterministic".
    pub fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: FALLBACK_STATE,
        };
        if seed == 0 {
            rng.reseed_from_time();
        } else {
            rng.reseed(seed);
        }
        rng
    }

    /// Reseed with an explicit non-zero seed.
    pub fn reseed(&mut self, seed: u64) {
        let mixed = splitmix64(seed);
        self.state = if mixed == 0 { FALLBACK_STATE } else { mixed };
    }

    /// Reseed based on the current time.
    pub fn reseed_from_time(&mut self) {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        self.reseed(nanos ^ FALLBACK_STATE);
    }

    /// Basic xorshift step.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform sample in [0, 1) with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform sample in [low, high).
    pub fn gen_range_f64(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}
