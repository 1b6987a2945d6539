//! Genetic operators for integer assignment vectors.
//!
//! Genes are resource indices, not permutation positions, so any value in
//! `[0, resource_count)` is legal at any locus and the operators need no
//! repair step.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: exchange tails after a random cut
//!
//! # Mutation Operators
//!
//! - [`uniform_reset_mutation`]: each gene independently redrawn with
//!   probability `rate`
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Eiben & Smith (2015), *Introduction to Evolutionary Computing*, §4.2

use crate::random::random_resource;
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover at `cut`.
///
/// Child A takes `parent1[..cut]` and `parent2[cut..]`; child B the
/// reverse. A cut of 0 swaps the parents whole.
///
/// # Panics
/// Panics if parents have different lengths or `cut > len`.
pub fn crossover_at(parent1: &[usize], parent2: &[usize], cut: usize) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

    let mut child1 = Vec::with_capacity(parent1.len());
    child1.extend_from_slice(&parent1[..cut]);
    child1.extend_from_slice(&parent2[cut..]);

    let mut child2 = Vec::with_capacity(parent2.len());
    child2.extend_from_slice(&parent2[..cut]);
    child2.extend_from_slice(&parent1[cut..]);

    (child1, child2)
}

/// Single-point crossover with the cut drawn uniformly from `[0, len)`.
///
/// Empty parents produce empty children.
pub fn single_point_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    if parent1.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let cut = rng.random_range(0..parent1.len());
    crossover_at(parent1, parent2, cut)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Redraws each gene with probability `rate` from `[0, resource_count)`.
///
/// The new value may equal the old one.
pub fn uniform_reset_mutation<R: Rng>(
    genes: &mut [usize],
    resource_count: usize,
    rate: f64,
    rng: &mut R,
) {
    for gene in genes.iter_mut() {
        if rng.random::<f64>() < rate {
            *gene = random_resource(resource_count, rng);
        }
    }
}
