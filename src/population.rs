//! Population primitives shared by all optimizers.
//!
//! A [`Candidate`] is an assignment vector plus its fitness. Candidates are
//! never edited in place once scored: neighbors are built as new candidates
//! with an unevaluated fitness and swapped in under each algorithm's
//! selection rule. [`BestTracker`] keeps the best-ever assignment as an
//! independent snapshot so it survives population churn.

use crate::model::FitnessModel;
use crate::random::random_assignment;
use rand::Rng;
use std::cmp::Ordering;

/// Fitness of a candidate that has not been evaluated yet.
pub const UNEVALUATED: f64 = f64::NEG_INFINITY;

/// A candidate assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// `assignment[i]` is the resource index of task `i`.
    pub assignment: Vec<usize>,
    pub fitness: f64,
}

impl Candidate {
    /// Wraps an assignment with an unevaluated fitness.
    pub fn new(assignment: Vec<usize>) -> Self {
        Self {
            assignment,
            fitness: UNEVALUATED,
        }
    }

    /// Uniformly random candidate.
    pub fn random<R: Rng>(task_count: usize, resource_count: usize, rng: &mut R) -> Self {
        Self::new(random_assignment(task_count, resource_count, rng))
    }

    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED
    }

    /// Copy of this candidate with gene `index` set to `value`. The copy is
    /// unevaluated.
    pub fn with_gene(&self, index: usize, value: usize) -> Self {
        let mut assignment = self.assignment.clone();
        assignment[index] = value;
        Self::new(assignment)
    }

    /// Scores the candidate with the (cached) model and stores the result.
    pub fn evaluate(&mut self, model: &mut FitnessModel) -> f64 {
        self.fitness = model.evaluate(&self.assignment);
        self.fitness
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }
}

/// Descending fitness order (best first). NaN compares equal.
pub fn by_fitness_desc(a: &Candidate, b: &Candidate) -> Ordering {
    b.fitness.partial_cmp(&a.fitness).unwrap_or(Ordering::Equal)
}

/// Sorts best first. Stable, so equal-fitness candidates keep their order.
pub fn sort_descending(population: &mut [Candidate]) {
    population.sort_by(by_fitness_desc);
}

/// Index of the fittest candidate; the first one wins ties.
pub fn best_index(population: &[Candidate]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, c) in population.iter().enumerate() {
        let better = match best {
            None => true,
            Some(b) => c.fitness > population[b].fitness,
        };
        if better {
            best = Some(i);
        }
    }
    best
}

/// Clamps a signed resource index into `[0, max_index]`.
pub fn clamp_index(value: i64, max_index: usize) -> usize {
    value.clamp(0, max_index as i64) as usize
}

/// Clamps a real-valued position into `[0, max_index]` after rounding.
pub fn clamp_position(value: f64, max_index: usize) -> usize {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, max_index as f64) as usize
}

/// Best-ever assignment snapshot plus a per-iteration history of its fitness.
///
/// The tracked fitness only ever increases, so the history is monotonically
/// non-decreasing.
#[derive(Debug, Clone)]
pub struct BestTracker {
    assignment: Option<Vec<usize>>,
    fitness: f64,
    history: Vec<f64>,
}

impl Default for BestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BestTracker {
    pub fn new() -> Self {
        Self {
            assignment: None,
            fitness: UNEVALUATED,
            history: Vec::new(),
        }
    }

    /// Records `assignment` if it beats the current best. Returns `true` when
    /// the snapshot changed.
    pub fn offer(&mut self, assignment: &[usize], fitness: f64) -> bool {
        if (self.assignment.is_none() && !fitness.is_nan()) || fitness > self.fitness {
            self.assignment = Some(assignment.to_vec());
            self.fitness = fitness;
            true
        } else {
            false
        }
    }

    /// Offers the fittest member of `population`.
    pub fn offer_population(&mut self, population: &[Candidate]) -> bool {
        match best_index(population) {
            Some(i) => self.offer(&population[i].assignment, population[i].fitness),
            None => false,
        }
    }

    /// Appends the current best fitness to the history.
    pub fn record(&mut self) {
        self.history.push(self.fitness);
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn assignment(&self) -> Option<&[usize]> {
        self.assignment.as_deref()
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    /// The best assignment, or all zeros of length `task_count` when nothing
    /// was ever recorded.
    pub fn assignment_or_zeros(&self, task_count: usize) -> Vec<usize> {
        self.assignment
            .clone()
            .unwrap_or_else(|| vec![0; task_count])
    }

    /// Consumes the tracker into `(assignment, fitness, history)`.
    pub fn into_parts(self, task_count: usize) -> (Vec<usize>, f64, Vec<f64>) {
        let assignment = self.assignment.unwrap_or_else(|| vec![0; task_count]);
        (assignment, self.fitness, self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn cand(assignment: Vec<usize>, fitness: f64) -> Candidate {
        Candidate {
            assignment,
            fitness,
        }
    }

    #[test]
    fn test_new_candidate_is_unevaluated() {
        let c = Candidate::new(vec![0, 1]);
        assert!(!c.is_evaluated());
        assert_eq!(c.fitness, UNEVALUATED);
    }

    #[test]
    fn test_with_gene_invalidates_fitness() {
        let c = cand(vec![0, 1, 2], 0.7);
        let n = c.with_gene(1, 2);
        assert_eq!(n.assignment, vec![0, 2, 2]);
        assert!(!n.is_evaluated());
        // Original untouched.
        assert_eq!(c.assignment, vec![0, 1, 2]);
        assert_eq!(c.fitness, 0.7);
    }

    #[test]
    fn test_random_candidate_shape() {
        let mut rng = create_rng(3);
        let c = Candidate::random(12, 3, &mut rng);
        assert_eq!(c.len(), 12);
        assert!(c.assignment.iter().all(|&r| r < 3));
    }

    #[test]
    fn test_sort_descending_and_best_index() {
        let mut pop = vec![
            cand(vec![0], 0.2),
            cand(vec![1], 0.9),
            cand(vec![2], 0.5),
            cand(vec![3], 0.9),
        ];
        assert_eq!(best_index(&pop), Some(1));
        sort_descending(&mut pop);
        let order: Vec<usize> = pop.iter().map(|c| c.assignment[0]).collect();
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_best_index_empty() {
        assert_eq!(best_index(&[]), None);
    }

    #[test]
    fn test_clamp_helpers() {
        assert_eq!(clamp_index(-3, 4), 0);
        assert_eq!(clamp_index(2, 4), 2);
        assert_eq!(clamp_index(9, 4), 4);
        assert_eq!(clamp_position(-0.6, 3), 0);
        assert_eq!(clamp_position(1.5, 3), 2);
        assert_eq!(clamp_position(7.2, 3), 3);
        assert_eq!(clamp_position(f64::NAN, 3), 0);
    }

    #[test]
    fn test_tracker_only_improves() {
        let mut best = BestTracker::new();
        assert!(best.offer(&[0, 0], 0.1));
        assert!(!best.offer(&[1, 1], 0.05));
        assert!(!best.offer(&[1, 1], 0.1));
        assert!(best.offer(&[1, 0], 0.3));
        assert_eq!(best.assignment(), Some(&[1, 0][..]));
        assert_eq!(best.fitness(), 0.3);
    }

    #[test]
    fn test_tracker_fallback_zeros() {
        let best = BestTracker::new();
        assert_eq!(best.assignment_or_zeros(3), vec![0, 0, 0]);
        let (a, f, h) = best.into_parts(2);
        assert_eq!(a, vec![0, 0]);
        assert_eq!(f, UNEVALUATED);
        assert!(h.is_empty());
    }

    #[test]
    fn test_tracker_ignores_nan() {
        let mut best = BestTracker::new();
        assert!(!best.offer(&[0], f64::NAN));
        assert!(best.assignment().is_none());
    }

    #[test]
    fn test_tracker_history_monotone() {
        let mut best = BestTracker::new();
        for f in [0.1, 0.05, 0.4, 0.2, 0.5] {
            best.offer(&[0], f);
            best.record();
        }
        assert_eq!(best.history(), &[0.1, 0.1, 0.4, 0.4, 0.5]);
    }
}
