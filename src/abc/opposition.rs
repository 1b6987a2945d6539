//! Elite opposition-based learning.
//!
//! Each food source is mirrored across the middle of the resource range and
//! pulled toward a randomly chosen elite:
//!
//! ```text
//! opposite = (min + max) − x[j]
//! x'[j]    = clamp(floor((1 − d) · opposite + d · elite[j]), min, max)
//! ```
//!
//! The opposition population is merged with the current one and the fittest
//! half survives.
//!
//! # References
//!
//! - Tizhoosh (2005), "Opposition-Based Learning: A New Scheme for Machine
//!   Intelligence"
//! - Zhou et al. (2016), "Elite opposition-based artificial bee colony"

use super::colony::Colony;
use crate::error::AssignError;
use crate::model::FitnessModel;
use crate::population::{clamp_index, sort_descending, Candidate};
use rand::Rng;

/// Elite-opposition image of `original` with respect to `elite`.
///
/// Values are clamped into `[0, max_index]` whatever the inputs.
pub fn opposition_assignment(
    original: &[usize],
    elite: &[usize],
    max_index: usize,
    elite_coefficient: f64,
) -> Vec<usize> {
    let d = elite_coefficient;
    original
        .iter()
        .zip(elite)
        .map(|(&x, &e)| {
            let opposite = max_index as f64 - x as f64;
            let value = ((1.0 - d) * opposite + d * e as f64).floor();
            clamp_index(value as i64, max_index)
        })
        .collect()
}

/// Maps a uniform draw `k ∈ [0, 1)` to an elite slot, clamped to the last
/// slot.
pub fn elite_slot(k: f64, elite_count: usize) -> usize {
    let slot = (k * elite_count as f64).floor().max(0.0) as usize;
    slot.min(elite_count.saturating_sub(1))
}

impl Colony {
    /// Builds and evaluates one opposition candidate per food source, then
    /// keeps the fittest `population_size` of the combined set.
    ///
    /// The population is left untouched if any evaluation fails.
    pub fn elite_opposition_phase<R: Rng>(
        &mut self,
        model: &mut FitnessModel,
        rng: &mut R,
    ) -> Result<(), AssignError> {
        let size = self.population.len();
        let elite_count = self.config.elite_count().min(size);

        let mut ranked = self.population.clone();
        sort_descending(&mut ranked);
        let elites: Vec<Vec<usize>> = ranked
            .into_iter()
            .take(elite_count)
            .map(|c| c.assignment)
            .collect();

        let mut opposition = Vec::with_capacity(size);
        for i in 0..size {
            let k: f64 = rng.random();
            let elite = &elites[elite_slot(k, elite_count)];
            let mut candidate = Candidate::new(opposition_assignment(
                &self.population[i].assignment,
                elite,
                self.max_index,
                self.config.elite_coefficient,
            ));
            self.budget.charge();
            candidate.fitness = model.try_evaluate(&candidate.assignment)?;
            opposition.push(candidate);
        }

        let mut merged = std::mem::take(&mut self.population);
        merged.extend(opposition);
        sort_descending(&mut merged);
        merged.truncate(size);
        self.population = merged;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abc::colony::EvaluationBudget;
    use crate::abc::AbcConfig;
    use crate::model::{Task, TaskWeight};
    use crate::random::create_rng;

    #[test]
    fn test_opposition_formula() {
        // max_index = 4, d = 0.9: opposite of 1 is 3; 0.1*3 + 0.9*2 = 2.1 -> 2
        assert_eq!(opposition_assignment(&[1], &[2], 4, 0.9), vec![2]);
        // d = 0 gives the pure mirror image.
        assert_eq!(opposition_assignment(&[0, 1, 4], &[0, 0, 0], 4, 0.0), vec![4, 3, 0]);
        // d = 1 copies the elite.
        assert_eq!(opposition_assignment(&[0, 1, 4], &[2, 2, 2], 4, 1.0), vec![2, 2, 2]);
    }

    #[test]
    fn test_opposition_clamps_out_of_range_inputs() {
        // Elite and original values beyond the resource range would push the
        // formula past both bounds.
        let out = opposition_assignment(&[0, 50, 7], &[9, 0, 100], 2, 0.9);
        assert!(out.iter().all(|&r| r <= 2), "got {out:?}");
        assert_eq!(out[0], 2);
        assert_eq!(out[1], 0);

        let out = opposition_assignment(&[3, 3], &[3, 3], 2, 1.5);
        assert!(out.iter().all(|&r| r <= 2));
    }

    #[test]
    fn test_opposition_range_exhaustive_small() {
        for max_index in 0..5usize {
            for x in 0..=max_index {
                for e in 0..=max_index {
                    for d in [0.0, 0.25, 0.5, 0.9, 1.0] {
                        let v = opposition_assignment(&[x], &[e], max_index, d)[0];
                        assert!(v <= max_index);
                    }
                }
            }
        }
    }

    #[test]
    fn test_elite_slot_clamps() {
        assert_eq!(elite_slot(0.0, 3), 0);
        assert_eq!(elite_slot(0.5, 3), 1);
        assert_eq!(elite_slot(0.999, 3), 2);
        assert_eq!(elite_slot(1.0, 3), 2);
        assert_eq!(elite_slot(0.7, 1), 0);
    }

    #[test]
    fn test_phase_keeps_size_and_improves_or_holds() {
        let tasks = (0..12)
            .map(|i| Task::new(format!("t{i}"), 300.0 + 50.0 * i as f64, TaskWeight::Light))
            .collect();
        let mut model = FitnessModel::new(tasks, vec![250.0, 750.0, 1500.0]);
        let config = AbcConfig::elite_opposition();
        let mut rng = create_rng(21);
        let mut colony = Colony::initialize(
            &config,
            EvaluationBudget::function_evaluations(config.max_evaluations()),
            &mut model,
            &mut rng,
        );

        let mut before: Vec<f64> = colony.population().iter().map(|c| c.fitness).collect();
        before.sort_by(|a, b| b.partial_cmp(a).unwrap());

        colony.elite_opposition_phase(&mut model, &mut rng).unwrap();

        assert_eq!(colony.population().len(), 30);
        assert_eq!(colony.budget().evaluations(), 60);
        let after: Vec<f64> = colony.population().iter().map(|c| c.fitness).collect();
        // Sorted best first, and rank-by-rank at least as good as before.
        for w in after.windows(2) {
            assert!(w[0] >= w[1]);
        }
        for (a, b) in after.iter().zip(&before) {
            assert!(a >= b);
        }
        assert!(colony
            .population()
            .iter()
            .all(|c| c.assignment.iter().all(|&r| r < 3)));
    }
}
