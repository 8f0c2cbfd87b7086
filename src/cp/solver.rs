//! Solver backend interface.

use super::model::ConstraintSystem;
use super::variables::RawBlockValue;

/// Status of the backend after execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Every variable has a value, all hard constraints hold, and the
    /// objective is minimal.
    Satisfiable,
    /// No assignment satisfies the hard constraints.
    Infeasible,
    /// The time limit expired before the backend could decide.
    Unknown,
    /// System is invalid or malformed.
    ModelInvalid,
}

/// Result of one backend invocation.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    /// Backend status.
    pub status: SolverStatus,
    /// Objective value (summed weight of violated soft constraints).
    pub objective_value: Option<u64>,
    /// One value per variable, indexed like `ConstraintSystem::vars`.
    /// Empty unless `status` is `Satisfiable`.
    pub values: Vec<RawBlockValue>,
    /// Solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl SolverOutcome {
    /// Creates an outcome without values.
    pub fn empty(status: SolverStatus) -> Self {
        Self {
            status,
            objective_value: None,
            values: Vec::new(),
            solve_time_ms: 0,
        }
    }

    /// Creates a satisfiable outcome.
    pub fn satisfiable(values: Vec<RawBlockValue>, objective_value: u64) -> Self {
        Self {
            status: SolverStatus::Satisfiable,
            objective_value: Some(objective_value),
            values,
            solve_time_ms: 0,
        }
    }

    /// Sets the solve time.
    pub fn with_solve_time_ms(mut self, ms: u64) -> Self {
        self.solve_time_ms = ms;
        self
    }

    /// Whether a solution was found.
    pub fn is_solution_found(&self) -> bool {
        self.status == SolverStatus::Satisfiable
    }
}

/// Backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SolverConfig {
    /// Maximum solve time in milliseconds.
    pub time_limit_ms: u64,
    /// Number of parallel workers a backend may use.
    pub num_workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 60_000,
            num_workers: 1,
        }
    }
}

impl SolverConfig {
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n;
        self
    }
}

/// Trait for solver backends.
///
/// Implementors perform the combinatorial search. A conforming backend:
///
/// - returns `Satisfiable` only with a value for every variable that
///   satisfies every hard constraint and minimizes the objective;
/// - returns `Infeasible` only when no such assignment exists;
/// - returns `Unknown` only when the time limit expires first.
///
/// Any method will do (ILP, CP, MaxSAT, plain backtracking). Wrappers
/// around external engines implement this trait the same way.
pub trait SolverBackend {
    /// Solves the system and returns an outcome.
    fn solve(&self, system: &ConstraintSystem, config: &SolverConfig) -> SolverOutcome;
}

impl<B: SolverBackend + ?Sized> SolverBackend for &B {
    fn solve(&self, system: &ConstraintSystem, config: &SolverConfig) -> SolverOutcome {
        (**self).solve(system, config)
    }
}
