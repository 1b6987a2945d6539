//! Property-based tests for the assignment facade and the optimizers.
//!
//! Runs use small budgets so each case stays fast.

use proptest::collection::vec;
use proptest::prelude::*;
use u_assign::abc::{opposition_assignment, AbcConfig, AbcRunner, AbcVariant};
use u_assign::ga::{GaConfig, GaRunner};
use u_assign::model::{FitnessModel, Task, TaskWeight};
use u_assign::pso::{PsoConfig, PsoRunner};
use u_assign::{optimize_with, Algorithm, OptimizeOptions, RawTask};

fn weight_strategy() -> impl Strategy<Value = TaskWeight> {
    prop_oneof![
        Just(TaskWeight::Light),
        Just(TaskWeight::Medium),
        Just(TaskWeight::Heavy),
    ]
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (1.0f64..5000.0, weight_strategy()).prop_map(|(length, weight)| Task::new("t", length, weight))
}

fn raw_task_strategy() -> impl Strategy<Value = RawTask> {
    (
        prop::option::of(0.0f64..5000.0),
        prop::option::of(prop_oneof![
            Just("light".to_string()),
            Just("sedang".to_string()),
            Just("HEAVY".to_string()),
            Just("unknown".to_string()),
        ]),
    )
        .prop_map(|(length, weight)| RawTask {
            name: None,
            length,
            weight,
        })
}

fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
    prop_oneof![
        Just(Algorithm::AbcStandard),
        Just(Algorithm::AbcEobl),
        Just(Algorithm::Genetic),
        Just(Algorithm::ParticleSwarm),
    ]
}

fn small_options(algorithm: Algorithm, seed: u64) -> OptimizeOptions {
    OptimizeOptions::new(algorithm)
        .with_seed(seed)
        .with_abc(AbcConfig::default().with_population_size(10).with_iterations(4))
        .with_ga(GaConfig::default().with_population_size(10).with_max_generations(4))
        .with_pso(PsoConfig::default().with_swarm_size(10).with_iterations(4))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_output_shape(
        tasks in vec(raw_task_strategy(), 1..25),
        capacities in vec(1.0f64..3000.0, 1..6),
        extra in 0usize..3,
        algorithm in algorithm_strategy(),
        seed in any::<u64>(),
    ) {
        let task_count = tasks.len() + extra;
        let resource_count = capacities.len();
        let report = optimize_with(
            task_count,
            resource_count,
            &tasks,
            &capacities,
            &small_options(algorithm, seed),
        );
        prop_assert_eq!(report.assignment.len(), task_count);
        prop_assert!(report.assignment.iter().all(|&r| r < resource_count));
        prop_assert!(!report.is_fallback());
    }

    #[test]
    fn prop_capacity_mismatch_is_all_zero(
        tasks in vec(raw_task_strategy(), 1..10),
        capacities in vec(1.0f64..3000.0, 1..6),
        declared in 1usize..8,
        algorithm in algorithm_strategy(),
    ) {
        prop_assume!(declared != capacities.len());
        let report = optimize_with(
            tasks.len(),
            declared,
            &tasks,
            &capacities,
            &small_options(algorithm, 0),
        );
        prop_assert!(report.is_fallback());
        prop_assert_eq!(report.assignment, vec![0; tasks.len()]);
    }

    #[test]
    fn prop_empty_tasks_is_all_zero(
        task_count in 0usize..10,
        algorithm in algorithm_strategy(),
    ) {
        let report = optimize_with(task_count, 2, &[], &[500.0, 1000.0], &small_options(algorithm, 0));
        prop_assert_eq!(report.assignment, vec![0; task_count]);
    }

    #[test]
    fn prop_history_monotone(
        tasks in vec(task_strategy(), 1..20),
        capacities in vec(1.0f64..3000.0, 1..5),
        seed in any::<u64>(),
    ) {
        let histories = {
            let mut model = FitnessModel::new(tasks.clone(), capacities.clone());
            let abc = AbcRunner::run(
                &mut model,
                &AbcConfig::default().with_population_size(8).with_iterations(5).with_seed(seed),
            ).unwrap();
            let mut model = FitnessModel::new(tasks.clone(), capacities.clone());
            let eobl = AbcRunner::run(
                &mut model,
                &AbcConfig::default()
                    .with_variant(AbcVariant::EliteOpposition)
                    .with_population_size(8)
                    .with_iterations(5)
                    .with_seed(seed),
            ).unwrap();
            let mut model = FitnessModel::new(tasks.clone(), capacities.clone());
            let ga = GaRunner::run(
                &mut model,
                &GaConfig::default().with_population_size(8).with_max_generations(5).with_seed(seed),
            ).unwrap();
            let mut model = FitnessModel::new(tasks.clone(), capacities.clone());
            let pso = PsoRunner::run(
                &mut model,
                &PsoConfig::default().with_swarm_size(8).with_iterations(5).with_seed(seed),
            ).unwrap();
            [abc.fitness_history, eobl.fitness_history, ga.fitness_history, pso.fitness_history]
        };
        for history in histories {
            prop_assert!(!history.is_empty());
            for w in history.windows(2) {
                prop_assert!(w[1] >= w[0]);
            }
        }
    }

    #[test]
    fn prop_evaluate_is_pure_and_cached(
        tasks in vec(task_strategy(), 1..15),
        capacities in vec(1.0f64..3000.0, 1..5),
        seed in any::<u64>(),
    ) {
        let m = capacities.len();
        let assignment: Vec<usize> = (0..tasks.len())
            .map(|i| ((seed as usize).wrapping_add(i * 7)) % m)
            .collect();
        let mut model = FitnessModel::new(tasks, capacities);
        let first = model.evaluate(&assignment);
        let second = model.evaluate(&assignment);
        prop_assert_eq!(first.to_bits(), second.to_bits());
        prop_assert_eq!(first.to_bits(), model.compute(&assignment).to_bits());
        prop_assert_eq!(model.cache().hits(), 1);
        prop_assert_eq!(model.cache().len(), 1);
    }

    #[test]
    fn prop_opposition_in_range(
        original in vec(0usize..50, 1..20),
        elite in vec(0usize..50, 1..20),
        max_index in 0usize..10,
        d in 0.0f64..=1.0,
    ) {
        let out = opposition_assignment(&original, &elite, max_index, d);
        prop_assert_eq!(out.len(), original.len().min(elite.len()));
        prop_assert!(out.iter().all(|&r| r <= max_index));
    }
}
