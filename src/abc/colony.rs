//! Bee-colony state and the phases shared by both ABC variants.
//!
//! A [`Colony`] owns the food sources (population), their abandonment
//! counters, the best-ever snapshot, and an [`EvaluationBudget`]. The
//! standard and EOBL loops drive the same phase methods; they differ only in
//! the budget policy and in what they do between phases.

use super::config::AbcConfig;
use crate::error::AssignError;
use crate::model::FitnessModel;
use crate::population::{clamp_index, BestTracker, Candidate};
use rand::Rng;
use tracing::trace;

/// How a run's work is metered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationBudget {
    /// Stop after a fixed number of iterations. Evaluations are counted but
    /// do not limit the run.
    Iterations {
        completed: usize,
        max: usize,
        evaluations: usize,
    },

    /// Stop once `max` fitness evaluations have been spent.
    FunctionEvaluations { used: usize, max: usize },
}

impl EvaluationBudget {
    pub fn iterations(max: usize) -> Self {
        EvaluationBudget::Iterations {
            completed: 0,
            max,
            evaluations: 0,
        }
    }

    pub fn function_evaluations(max: usize) -> Self {
        EvaluationBudget::FunctionEvaluations { used: 0, max }
    }

    /// Charges one fitness evaluation.
    pub fn charge(&mut self) {
        match self {
            EvaluationBudget::Iterations { evaluations, .. } => *evaluations += 1,
            EvaluationBudget::FunctionEvaluations { used, .. } => *used += 1,
        }
    }

    /// Marks the end of one loop iteration.
    pub fn end_iteration(&mut self) {
        if let EvaluationBudget::Iterations { completed, .. } = self {
            *completed += 1;
        }
    }

    pub fn exhausted(&self) -> bool {
        match *self {
            EvaluationBudget::Iterations { completed, max, .. } => completed >= max,
            EvaluationBudget::FunctionEvaluations { used, max } => used >= max,
        }
    }

    /// Evaluations charged so far.
    pub fn evaluations(&self) -> usize {
        match *self {
            EvaluationBudget::Iterations { evaluations, .. } => evaluations,
            EvaluationBudget::FunctionEvaluations { used, .. } => used,
        }
    }
}

/// Food sources, abandonment counters and best-ever snapshot of one run.
#[derive(Debug, Clone)]
pub struct Colony {
    pub(super) config: AbcConfig,
    pub(super) population: Vec<Candidate>,
    pub(super) trials: Vec<usize>,
    pub(super) best: BestTracker,
    pub(super) budget: EvaluationBudget,
    pub(super) max_index: usize,
}

impl Colony {
    /// Creates a colony of random food sources and evaluates them.
    ///
    /// Every initial evaluation is charged to `budget`.
    pub fn initialize<R: Rng>(
        config: &AbcConfig,
        budget: EvaluationBudget,
        model: &mut FitnessModel,
        rng: &mut R,
    ) -> Self {
        let population = (0..config.population_size)
            .map(|_| Candidate::random(model.task_count(), model.resource_count(), rng))
            .collect();
        Self::from_population(config, budget, population, model)
    }

    /// Creates a colony from explicit food sources and evaluates them.
    ///
    /// `population` should hold `config.population_size` candidates whose
    /// genes lie in `[0, model.resource_count())`.
    pub fn from_population(
        config: &AbcConfig,
        mut budget: EvaluationBudget,
        mut population: Vec<Candidate>,
        model: &mut FitnessModel,
    ) -> Self {
        let mut best = BestTracker::new();
        for candidate in population.iter_mut() {
            budget.charge();
            candidate.evaluate(model);
            best.offer(&candidate.assignment, candidate.fitness);
        }
        best.record();

        Self {
            config: config.clone(),
            trials: vec![0; population.len()],
            population,
            best,
            budget,
            max_index: model.resource_count().saturating_sub(1),
        }
    }

    pub fn population(&self) -> &[Candidate] {
        &self.population
    }

    /// Abandonment counters, indexed like the population.
    pub fn trials(&self) -> &[usize] {
        &self.trials
    }

    /// Overrides one abandonment counter.
    pub fn set_trial(&mut self, index: usize, value: usize) {
        self.trials[index] = value;
    }

    pub fn best(&self) -> &BestTracker {
        &self.best
    }

    pub fn budget(&self) -> &EvaluationBudget {
        &self.budget
    }

    /// Scores a candidate through the checked evaluator, charging the budget
    /// before the attempt.
    fn score(
        &mut self,
        candidate: &mut Candidate,
        model: &mut FitnessModel,
    ) -> Result<f64, AssignError> {
        self.budget.charge();
        let fitness = model.try_evaluate(&candidate.assignment)?;
        candidate.fitness = fitness;
        Ok(fitness)
    }

    /// Neighbor of food source `base`: one random dimension moved by
    /// `φ · (x_base − x_partner)` with `φ ∈ {−1, 0, 1}` and a partner drawn
    /// from the other employed bees.
    fn neighbor<R: Rng>(&self, base: usize, rng: &mut R) -> Candidate {
        let source = &self.population[base];
        let employed = self.config.employed_count();

        let dimension = rng.random_range(0..source.len());
        let mut partner = rng.random_range(0..employed - 1);
        if partner >= base {
            partner += 1;
        }

        let x = source.assignment[dimension] as i64;
        let xk = self.population[partner].assignment[dimension] as i64;
        let phi: i64 = rng.random_range(-1..=1);
        let value = clamp_index(x + phi * (x - xk), self.max_index);

        source.with_gene(dimension, value)
    }

    /// Replaces food source `slot` with `candidate` if it is strictly
    /// fitter, resetting the counter; otherwise increments the counter.
    fn greedy_select(&mut self, slot: usize, candidate: Candidate) {
        if candidate.fitness > self.population[slot].fitness {
            self.best.offer(&candidate.assignment, candidate.fitness);
            self.population[slot] = candidate;
            self.trials[slot] = 0;
        } else {
            self.trials[slot] += 1;
        }
    }

    /// One neighbor attempt per employed bee.
    pub fn employed_phase<R: Rng>(
        &mut self,
        model: &mut FitnessModel,
        rng: &mut R,
    ) -> Result<(), AssignError> {
        for i in 0..self.config.employed_count() {
            let mut candidate = self.neighbor(i, rng);
            self.score(&mut candidate, model)?;
            self.greedy_select(i, candidate);
        }
        Ok(())
    }

    /// Fitness-proportional recruitment probabilities, indexed like the
    /// population. Only employed bees get a non-zero share, and all shares
    /// are zero when the employed fitness sum is not positive.
    pub fn selection_probabilities(&self) -> Vec<f64> {
        let employed = self.config.employed_count();
        let sum: f64 = self.population[..employed]
            .iter()
            .map(|c| c.fitness)
            .sum();

        self.population
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i < employed && sum > 0.0 {
                    c.fitness / sum
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Roulette-wheel pick of an employed bee. Falls back to a uniform pick
    /// when rounding leaves the wheel short of the draw.
    fn select_source<R: Rng>(&self, probabilities: &[f64], rng: &mut R) -> usize {
        let employed = self.config.employed_count();
        let r: f64 = rng.random();
        let mut cumulative = 0.0;
        for (i, p) in probabilities.iter().take(employed).enumerate() {
            cumulative += p;
            if r <= cumulative {
                return i;
            }
        }
        rng.random_range(0..employed)
    }

    /// Each onlooker recruits to an employed bee's source and tries one
    /// neighbor of it.
    pub fn onlooker_phase<R: Rng>(
        &mut self,
        probabilities: &[f64],
        model: &mut FitnessModel,
        rng: &mut R,
    ) -> Result<(), AssignError> {
        for _ in 0..self.config.onlooker_count() {
            let selected = self.select_source(probabilities, rng);
            let mut candidate = self.neighbor(selected, rng);
            self.score(&mut candidate, model)?;
            self.greedy_select(selected, candidate);
        }
        Ok(())
    }

    /// Promotes the fittest current source to the best-ever snapshot.
    pub fn store_best_source(&mut self) {
        self.best.offer_population(&self.population);
    }

    /// Abandons the most-stagnant employed source if its counter exceeds the
    /// limit, replacing it with a fresh random source. Returns the index of
    /// the replaced source.
    pub fn scout_phase<R: Rng>(
        &mut self,
        model: &mut FitnessModel,
        rng: &mut R,
    ) -> Result<Option<usize>, AssignError> {
        let employed = self.config.employed_count();
        let mut stagnant: Option<usize> = None;
        for i in 0..employed {
            if stagnant.map_or(true, |s| self.trials[i] > self.trials[s]) {
                stagnant = Some(i);
            }
        }

        let index = match stagnant {
            Some(i) if self.trials[i] > self.config.limit => i,
            _ => return Ok(None),
        };

        trace!(
            source = index,
            trials = self.trials[index],
            limit = self.config.limit,
            "abandoning food source"
        );

        let mut scout = Candidate::random(
            self.population[index].len(),
            self.max_index + 1,
            rng,
        );
        self.score(&mut scout, model)?;
        self.best.offer(&scout.assignment, scout.fitness);
        self.population[index] = scout;
        self.trials[index] = 0;
        Ok(Some(index))
    }

    /// The standard sequence: employed phase, recruitment probabilities,
    /// onlooker phase, best-source bookkeeping, scout phase.
    pub fn forage<R: Rng>(
        &mut self,
        model: &mut FitnessModel,
        rng: &mut R,
    ) -> Result<Option<usize>, AssignError> {
        self.employed_phase(model, rng)?;
        let probabilities = self.selection_probabilities();
        self.onlooker_phase(&probabilities, model, rng)?;
        self.store_best_source();
        self.scout_phase(model, rng)
    }

    /// Closes an iteration: promotes the population best, records history
    /// and advances the budget.
    pub fn finish_iteration(&mut self) {
        self.store_best_source();
        self.best.record();
        self.budget.end_iteration();
    }

    /// Charges one evaluation without evaluating anything.
    pub(super) fn charge_budget(&mut self) {
        self.budget.charge();
    }

    pub fn into_best(self) -> BestTracker {
        self.best
    }
}
