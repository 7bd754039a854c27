use rand::{rngs::StdRng, Rng, SeedableRng};

/// Source of the simulator's random choices, injectable for deterministic tests.
pub trait RandomSource {
    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    fn index_below(&mut self, len: usize) -> usize;
    /// Uniform value in `min..=max`. Returns `min` when the range is empty.
    fn millis_between(&mut self, min: u64, max: u64) -> u64;
}

#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl RngSource<StdRng> {
    /// Seeded sources repeat the same conversation flow on every run.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn index_below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }

    fn millis_between(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}
