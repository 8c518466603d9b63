//! Seeded PRNG wrapper.
//!
//! Runs must be byte-identical reruns given a fixed seed, so this wraps
//! `rand::rngs::StdRng` seeded explicitly rather than `rand::thread_rng()`.
//!
//! Draw order: by ascending tick, then by ascending node id, arrivals
//! before transitions. `SimRng` doesn't enforce this itself, it's the
//! scheduler's job to call it in that order, but every method here
//! corresponds to exactly one documented draw so the order is easy to
//! audit at the call site.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution};

/// Thin wrapper around a seeded `StdRng` exposing the two draws the engine
/// needs: packet arrival and backoff counter selection.
pub struct SimRng {
    inner: StdRng,
}

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Bernoulli trial for packet arrival in `Random` mode.
    pub fn packet_arrives(&mut self, prob: f64) -> bool {
        if prob <= 0.0 {
            return false;
        }
        if prob >= 1.0 {
            return true;
        }
        Bernoulli::new(prob)
            .expect("packetProb must be in [0, 1]")
            .sample(&mut self.inner)
    }

    /// Uniform backoff draw `U{0, 2^be - 1}`. `be == 0` always yields `0`.
    pub fn backoff_window(&mut self, be: u8) -> u32 {
        let max = (1u32 << be) - 1;
        if max == 0 {
            0
        } else {
            self.inner.gen_range(0..=max)
        }
    }
}
