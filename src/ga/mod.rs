//! Genetic Algorithm over assignment vectors.
//!
//! Chromosomes are [`Candidate`](crate::population::Candidate)s whose genes
//! are resource indices. Each generation keeps the best chromosome
//! unchanged, breeds the rest from selected parent pairs with single-point
//! crossover and per-gene reset mutation, and re-scores the whole
//! generation through the cached fitness model.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, selection, rates)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best assignment and run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Single-point crossover and reset mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::GaConfig;
pub use runner::{GaResult, GaRunner};
pub use selection::Selection;
