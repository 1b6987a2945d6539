//! Artificial Bee Colony optimizer.
//!
//! The colony holds `population_size` food sources. The first half are
//! employed bees, each exploiting its own source; the second half are
//! onlookers that recruit to employed sources in proportion to fitness.
//! A source whose improvement counter exceeds `limit` is abandoned and
//! re-seeded by a scout.
//!
//! # Variants
//!
//! - [`AbcVariant::Standard`]: fixed iteration budget; the first evaluation
//!   failure aborts the run.
//! - [`AbcVariant::EliteOpposition`]: function-evaluation budget, with an
//!   elite opposition-based regeneration step chosen at random each
//!   iteration. Failed iterations are skipped.
//!
//! # Key Types
//!
//! - [`AbcConfig`]: colony size, limit, budget, EOBL parameters
//! - [`Colony`]: food sources and the shared phases
//! - [`AbcRunner`]: executes either loop
//! - [`AbcResult`]: best assignment and run statistics
//!
//! # References
//!
//! - Karaboga (2005), "An Idea Based on Honey Bee Swarm for Numerical
//!   Optimization", Technical Report TR06, Erciyes University
//! - Karaboga & Basturk (2007), "A powerful and efficient algorithm for
//!   numerical function optimization: artificial bee colony (ABC) algorithm"
//! - Zhou et al. (2016), "Elite opposition-based artificial bee colony"

mod colony;
mod config;
mod opposition;
mod runner;

pub use colony::{Colony, EvaluationBudget};
pub use config::{AbcConfig, AbcVariant};
pub use opposition::{elite_slot, opposition_assignment};
pub use runner::{AbcResult, AbcRunner};
