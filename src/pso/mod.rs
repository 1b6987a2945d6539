//! Discrete Particle Swarm Optimization.
//!
//! Positions are assignment vectors; velocities are real-valued per task.
//! After each velocity update a position component is rounded to the
//! nearest resource index and clamped into range.
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer"

mod config;
mod particle;
mod runner;

pub use config::PsoConfig;
pub use particle::Particle;
pub use runner::{PsoResult, PsoRunner};
