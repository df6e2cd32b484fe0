//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through a single SimRng seeded from the
//! run's master seed.
//!
//! The stream is consumed in a fixed stage order (see engine.rs):
//!   Partitioner -> Popularity -> Arrivals -> Durations.
//! Reordering the stages changes every output for a given seed.

use rand::SeedableRng;
use rand_distr::Distribution;
use rand_pcg::Pcg64Mcg;

/// The run's single deterministic random stream.
pub struct SimRng {
    seed: u64,
    inner: Pcg64Mcg,
}

impl SimRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// The master seed this stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::Rng;
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Roll a float in [lo, hi). Returns `lo` when the range is empty.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_f64() * (hi - lo)
    }

    /// Draw one value from any `rand_distr` distribution.
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.inner)
    }

    /// Draw `amount` distinct indices from [0, n), in draw order.
    pub fn sample_distinct(&mut self, n: usize, amount: usize) -> Vec<usize> {
        assert!(amount <= n, "cannot draw {amount} distinct values from {n}");
        rand::seq::index::sample(&mut self.inner, n, amount).into_vec()
    }
}
