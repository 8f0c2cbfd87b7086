//! Planning pipeline.
//!
//! [`Planner`] validates a batch, compiles it, hands the system to a
//! [`SolverBackend`](crate::cp::SolverBackend), and extracts the result.
//!
//! # Modes
//!
//! - [`SolveMode::Joint`]: one system for the whole batch.
//! - [`SolveMode::PerStudent`]: one system per student, optionally on
//!   the rayon pool. Students share no constraints, so both modes
//!   produce the same schedules.
//!
//! Infeasibility and timeouts are [`PlanOutcome`] variants. A timeout is
//! never retried here; retrying with a larger limit or another mode is
//! up to the caller.

mod config;
mod runner;

pub use config::{PlannerConfig, SolveMode};
pub use runner::{Infeasibility, PlanOutcome, Planner};
