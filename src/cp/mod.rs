//! Constraint system layer.
//!
//! A backend-neutral model of the allocation problem: block variables,
//! hard constraints, weighted soft constraints, and an objective.
//!
//! # Key Components
//!
//! - **Variables**: [`BlockVar`] with its raw value [`RawBlockValue`]
//! - **Constraints**: [`Constraint`] (slot count, exact total length,
//!   minimum length, distinct days, forbidden points) and
//!   [`SoftConstraint`] (weighted avoid points)
//! - **System**: [`ConstraintSystem`], splittable into independent
//!   [`Component`]s
//! - **Backend**: the [`SolverBackend`] trait and the exact
//!   [`BacktrackingSolver`]
//!
//! # Design
//!
//! The system is data. Any engine that can honor the [`SolverBackend`]
//! contract (ILP, CP-SAT, MaxSAT, or plain search) can be plugged in
//! without touching the compiler or the extractor.
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod backtracking;
mod model;
mod solver;
mod variables;

pub use backtracking::BacktrackingSolver;
pub use model::{Component, Constraint, ConstraintSystem, Objective, SoftConstraint};
pub use solver::{SolverBackend, SolverConfig, SolverOutcome, SolverStatus};
pub use variables::{BlockVar, RawBlockValue, UnitDomain, VarId};
