use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Supplier of uniform values in `[0, 1)`, one fresh value per call.
///
/// Implemented for closures so tests can feed a fixed sequence, and for
/// any [`rand::Rng`] through [`RngSource`].
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Adapter from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Source backed by the thread-local generator.
pub fn thread_source() -> RngSource<ThreadRng> {
    RngSource(rand::rng())
}

/// Reproducible source for a given seed.
pub fn seeded_source(seed: u64) -> RngSource<StdRng> {
    RngSource(StdRng::seed_from_u64(seed))
}
