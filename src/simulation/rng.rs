//! Seedable random source threaded through every stochastic operation.
//!
//! Genome initialization, mutation, placement and parent selection all draw from
//! a [`SimRng`] owned by the ecosystem, so a run is reproducible from its seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random number generator used by the simulation.
pub type SimRng = ChaCha8Rng;

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}
