//! Population-based task-to-resource assignment.
//!
//! Assigns N independent tasks to M heterogeneous compute resources so as
//! to jointly minimize total execution time and a monetary cost proxy,
//! without enumerating the M^N assignment space. Every optimizer scores
//! candidates through one shared [`model::FitnessModel`]:
//!
//! ```text
//! exec_i  = length_i / capacity[assignment[i]]
//! cost_i  = 0.5 · exec_i + 0.1 · weight_length(weight_i)
//! fitness = 1 / Σ exec_i + 1 / Σ cost_i        (higher is better)
//! ```
//!
//! - **Artificial Bee Colony (ABC)**: employed/onlooker/scout search with a
//!   fixed iteration budget, and an elite opposition-based learning (EOBL)
//!   variant with a function-evaluation budget.
//! - **Genetic Algorithm (GA)**: elitist generational GA with single-point
//!   crossover and per-gene reset mutation.
//! - **Particle Swarm Optimization (PSO)**: discrete swarm with rounded,
//!   clamped positions.
//!
//! # Entry points
//!
//! - [`optimize()`]: the fail-closed request facade; always returns a
//!   complete assignment.
//! - [`optimize_with`] / [`optimize_all`]: configured runs with a full
//!   [`Optimization`] report.
//! - The runners ([`abc::AbcRunner`], [`ga::GaRunner`], [`pso::PsoRunner`])
//!   for direct use on a [`model::FitnessModel`].
//!
//! # Logging
//!
//! Runs emit `tracing` events (`debug` per iteration, `info` on
//! completion, `warn` on fallback). No subscriber is installed.
//!
//! # Features
//!
//! - `serde`: serialization for task records, configs and reports
//! - `parallel`: [`optimize_all`] runs its algorithms on the rayon pool
//! - `wasm`: `wasm-bindgen` exports of the facade

pub mod abc;
pub mod error;
pub mod ga;
pub mod model;
pub mod optimize;
pub mod population;
pub mod pso;
pub mod random;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::AssignError;
pub use model::{RawTask, Task, TaskWeight};
pub use optimize::{
    optimize, optimize_all, optimize_with, repair, validate_request, Algorithm, Optimization,
    OptimizeOptions,
};
