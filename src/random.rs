//! Seeded random number sources.
//!
//! Every run draws from its own generator so that concurrent runs never
//! share state and tests can reproduce a run from a seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The generator type used by all runners.
pub type AssignRng = ChaCha8Rng;

/// Creates a deterministic generator from a seed.
pub fn create_rng(seed: u64) -> AssignRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed, drawing a fresh seed from
/// thread-local entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> AssignRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Uniform resource index in `[0, resource_count)`.
///
/// # Panics
/// Panics if `resource_count` is zero.
pub fn random_resource<R: Rng>(resource_count: usize, rng: &mut R) -> usize {
    rng.random_range(0..resource_count)
}

/// Uniform assignment of `task_count` tasks over `resource_count` resources.
pub fn random_assignment<R: Rng>(
    task_count: usize,
    resource_count: usize,
    rng: &mut R,
) -> Vec<usize> {
    (0..task_count)
        .map(|_| random_resource(resource_count, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_random_assignment_in_range() {
        let mut rng = create_rng(42);
        let assignment = random_assignment(200, 4, &mut rng);
        assert_eq!(assignment.len(), 200);
        assert!(assignment.iter().all(|&r| r < 4));
        // With 200 draws every resource should show up.
        for r in 0..4 {
            assert!(assignment.contains(&r), "resource {r} never drawn");
        }
    }

    #[test]
    fn test_empty_assignment() {
        let mut rng = create_rng(1);
        assert!(random_assignment(0, 3, &mut rng).is_empty());
    }
}
