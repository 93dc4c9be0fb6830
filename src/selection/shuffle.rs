//! Deterministic per-event shuffling.
//!
//! Ties in rank are broken by a shuffle seeded from the event id, so a
//! re-run for the same event with the same input reproduces the same
//! order. No process-wide RNG is involved; the generator is passed
//! explicitly.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Stable 64-bit seed for an event id (FNV-1a over the UTF-8 bytes).
///
/// Unlike `std::hash`, the result does not change between Rust releases
/// or processes.
pub fn event_seed(event_id: &str) -> u64 {
    event_id
        .bytes()
        .fold(FNV_OFFSET, |hash, b| (hash ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// Seeded generator for an event.
pub fn event_rng(event_id: &str) -> StdRng {
    StdRng::seed_from_u64(event_seed(event_id))
}

/// Returns indices of `items` in priority order (highest first).
///
/// Indices are shuffled with `rng` first, then stably sorted by `rank`
/// descending, so equal ranks keep their shuffled relative order.
pub fn priority_order<T, K, F, R>(items: &[T], rank: F, rng: &mut R) -> Vec<usize>
where
    K: Ord,
    F: Fn(&T) -> K,
    R: Rng + ?Sized,
{
    let mut indices: Vec<usize> = (0..items.len()).collect();
    indices.shuffle(rng);
    indices.sort_by(|&a, &b| rank(&items[b]).cmp(&rank(&items[a])));
    indices
}
