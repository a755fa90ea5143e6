//! Random number generator construction.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic generator from a seed.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use u_mdvrp::random::create_rng;
///
/// let a: u64 = create_rng(42).random();
/// let b: u64 = create_rng(42).random();
/// assert_eq!(a, b);
/// ```
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from the seed if given, otherwise from OS entropy.
pub fn create_rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Draws one seed per worker from a master generator.
///
/// Each worker builds its own generator from its seed with [`create_rng`],
/// so a seeded master gives reproducible workers.
pub fn worker_seeds<R: Rng>(rng: &mut R, num_workers: usize) -> Vec<u64> {
    (0..num_workers).map(|_| rng.random()).collect()
}
