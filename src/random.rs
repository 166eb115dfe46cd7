use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `count` samples uniformly distributed in `[0, 1)`.
///
/// The same `seed` always yields the same samples.  If no seed is given the
/// generator is seeded from the operating system.
pub fn uniform_samples(count: usize, seed: Option<u64>) -> Vec<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..count).map(|_| rng.gen::<f64>()).collect()
}
