//! Selection strategies for the GA.
//!
//! Selection determines which chromosomes are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::population::Candidate;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selection strategy for choosing parents.
///
/// All strategies assume **maximization** (higher fitness = better).
///
/// # Examples
///
/// ```
/// use u_assign::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Selection {
    /// Tournament selection: draw `k` indices with replacement, keep the
    /// fittest. Parents may coincide.
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Weights are fitness shifted so the worst member gets a small
    /// positive share.
    Roulette,

    /// Linear rank selection: weight `n − rank`, best rank 0.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// Returns 0 for an empty population.
    pub fn select<R: Rng>(&self, population: &[Candidate], rng: &mut R) -> usize {
        if population.len() <= 1 {
            return 0;
        }

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

/// Tournament selection: pick k random chromosomes, return the fittest.
fn tournament<R: Rng>(population: &[Candidate], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness > population[best_idx].fitness {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection on min-shifted fitness.
fn roulette<R: Rng>(population: &[Candidate], rng: &mut R) -> usize {
    let n = population.len();
    let epsilon = 1e-10;

    let min_fitness = population
        .iter()
        .map(|c| c.fitness)
        .filter(|f| f.is_finite())
        .fold(f64::INFINITY, f64::min);

    let weights: Vec<f64> = population
        .iter()
        .map(|c| {
            let w = c.fitness - min_fitness + epsilon;
            if w.is_finite() && w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1
}

/// Linear rank selection.
fn rank<R: Rng>(population: &[Candidate], rng: &mut R) -> usize {
    let n = population.len();

    let mut indexed: Vec<(usize, f64)> = population
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.fitness))
        .collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed[n - 1].0
}
