//! Seeded randomness
//!
//! A pass seed fans out into independent per-mutant streams, so mutant `i`
//! is the same whether mutants are built sequentially or on a thread pool.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// RNG for stream `stream` of a pass seeded with `seed`
pub fn derive_rng(seed: u64, stream: u64) -> StdRng {
    // splitmix64 finalizer over the combined key
    let mut z = seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    StdRng::seed_from_u64(z ^ (z >> 31))
}

/// Seed from configuration, or fresh entropy when none is configured
pub fn resolve_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(rand::random)
}
