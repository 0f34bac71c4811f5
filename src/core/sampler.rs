/// Randomness capability used by the combination generator.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the random choices made while building groupings.
pub trait Sampler {
    /// Pick `k` distinct indices from `0..n`, uniformly. `k` never exceeds `n`.
    fn sample(&mut self, n: usize, k: usize) -> Vec<usize>;

    /// Pick a size uniformly from `min..=max`.
    fn roll(&mut self, min: usize, max: usize) -> usize;
}

/// [`Sampler`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSampler<R> {
    rng: R,
}

impl<R: Rng> RngSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSampler<StdRng> {
    /// Unseeded; results differ run to run.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Sampler for RngSampler<R> {
    fn sample(&mut self, n: usize, k: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, n, k.min(n)).into_vec()
    }

    fn roll(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn sample(&mut self, n: usize, k: usize) -> Vec<usize> {
        (**self).sample(n, k)
    }

    fn roll(&mut self, min: usize, max: usize) -> usize {
        (**self).roll(min, max)
    }
}
