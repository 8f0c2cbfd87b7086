//! Compile, solve, and extract.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::{PlannerConfig, SolveMode};
use crate::compile::ConstraintCompiler;
use crate::cp::{BacktrackingSolver, ConstraintSystem, SolverBackend};
use crate::error::Result;
use crate::extract::{ExtractedSchedule, Extraction, ResultExtractor};
use crate::model::StudentRequest;

/// Students whose constraints cannot be met.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Infeasibility {
    /// Students that are infeasible on their own, in input order.
    ///
    /// Empty when localization was not requested or when every student
    /// is feasible alone and only the joint solve failed.
    pub students: Vec<String>,
}

/// Terminal outcome of one planning request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// An optimal schedule for every student.
    Solved(ExtractedSchedule),
    /// No schedule satisfies the hard constraints.
    Infeasible(Infeasibility),
    /// The backend hit its time limit before deciding.
    Unknown,
}

impl PlanOutcome {
    /// Whether a schedule was produced.
    pub fn is_solved(&self) -> bool {
        matches!(self, PlanOutcome::Solved(_))
    }

    /// The schedule, if one was produced.
    pub fn schedule(&self) -> Option<&ExtractedSchedule> {
        match self {
            PlanOutcome::Solved(schedule) => Some(schedule),
            _ => None,
        }
    }
}

/// Runs the full pipeline against a backend.
///
/// # Examples
///
/// ```
/// use u_timeblock::model::StudentRequest;
/// use u_timeblock::planner::{PlanOutcome, Planner};
/// use u_timeblock::time::Day;
///
/// let planner = Planner::default();
/// let requests = vec![StudentRequest::new("alice", 16).with_avoid(Day::Monday, 5)];
///
/// let PlanOutcome::Solved(result) = planner.plan(&requests).unwrap() else {
///     panic!("expected a schedule");
/// };
/// assert_eq!(result.objective_value, 0);
/// assert_eq!(result.schedule.get("alice").unwrap().total_units(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct Planner<B> {
    backend: B,
    config: PlannerConfig,
    extractor: ResultExtractor,
}

impl Default for Planner<BacktrackingSolver> {
    fn default() -> Self {
        Self::new(BacktrackingSolver::new(), PlannerConfig::default())
    }
}

impl<B> Planner<B> {
    pub fn new(backend: B, config: PlannerConfig) -> Self {
        let extractor = ResultExtractor::new(config.compiler.clone());
        Self {
            backend,
            config,
            extractor,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl<B: SolverBackend + Sync> Planner<B> {
    /// Plans a schedule for `requests`.
    ///
    /// Invalid configuration or requests fail with
    /// [`Error::Config`](crate::Error::Config) before any solve.
    /// Infeasibility and timeouts are returned as [`PlanOutcome`]s.
    pub fn plan(&self, requests: &[StudentRequest]) -> Result<PlanOutcome> {
        self.config.validate()?;
        let compiler = ConstraintCompiler::new(self.config.compiler.clone());
        compiler.validate_requests(requests)?;

        info!(
            students = requests.len(),
            mode = ?self.config.mode,
            time_limit_ms = self.config.solver.time_limit_ms,
            "planning started"
        );
        let started = Instant::now();

        let outcome = match self.config.mode {
            SolveMode::Joint => self.plan_joint(&compiler, requests)?,
            SolveMode::PerStudent => self.plan_per_student(&compiler, requests)?,
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &outcome {
            PlanOutcome::Solved(result) => info!(
                students = result.schedule.len(),
                blocks = result.schedule.block_count(),
                objective = result.objective_value,
                elapsed_ms,
                "planning finished"
            ),
            PlanOutcome::Infeasible(infeasibility) => warn!(
                students = ?infeasibility.students,
                elapsed_ms,
                "no schedule satisfies the hard constraints"
            ),
            PlanOutcome::Unknown => warn!(
                time_limit_ms = self.config.solver.time_limit_ms,
                elapsed_ms,
                "solver time limit reached"
            ),
        }
        Ok(outcome)
    }

    fn plan_joint(
        &self,
        compiler: &ConstraintCompiler,
        requests: &[StudentRequest],
    ) -> Result<PlanOutcome> {
        let system = compiler.compile(requests)?;
        Ok(match self.solve(&system, requests)? {
            Extraction::Solved(result) => PlanOutcome::Solved(result),
            Extraction::Unknown => PlanOutcome::Unknown,
            Extraction::Infeasible => PlanOutcome::Infeasible(self.localize(compiler, requests)?),
        })
    }

    fn plan_per_student(
        &self,
        compiler: &ConstraintCompiler,
        requests: &[StudentRequest],
    ) -> Result<PlanOutcome> {
        let results = self.for_each_student(requests, |request| {
            self.solve_student(compiler, request)
        });

        let mut parts = Vec::with_capacity(requests.len());
        let mut infeasible = Vec::new();
        let mut undecided = false;
        for (request, result) in requests.iter().zip(results) {
            match result? {
                Extraction::Solved(part) => parts.push(part),
                Extraction::Infeasible => infeasible.push(request.id().to_string()),
                Extraction::Unknown => undecided = true,
            }
        }

        // A proven infeasible student decides the batch.
        if !infeasible.is_empty() {
            return Ok(PlanOutcome::Infeasible(Infeasibility {
                students: infeasible,
            }));
        }
        if undecided {
            return Ok(PlanOutcome::Unknown);
        }
        Ok(PlanOutcome::Solved(ExtractedSchedule::merge(parts)))
    }

    /// Re-solves each student alone and collects the infeasible ones.
    fn localize(
        &self,
        compiler: &ConstraintCompiler,
        requests: &[StudentRequest],
    ) -> Result<Infeasibility> {
        if !self.config.localize_infeasibility {
            return Ok(Infeasibility::default());
        }
        debug!(students = requests.len(), "localizing infeasibility");

        let results = self.for_each_student(requests, |request| {
            self.solve_student(compiler, request)
        });
        let mut students = Vec::new();
        for (request, result) in requests.iter().zip(results) {
            if result? == Extraction::Infeasible {
                students.push(request.id().to_string());
            }
        }
        Ok(Infeasibility { students })
    }

    fn solve_student(
        &self,
        compiler: &ConstraintCompiler,
        request: &StudentRequest,
    ) -> Result<Extraction> {
        let system = compiler.compile_student(request)?;
        self.solve(&system, std::slice::from_ref(request))
    }

    fn solve(&self, system: &ConstraintSystem, requests: &[StudentRequest]) -> Result<Extraction> {
        debug!(
            system = %system.name,
            vars = system.var_count(),
            constraints = system.constraint_count(),
            soft_constraints = system.soft_count(),
            "solving"
        );
        let outcome = self.backend.solve(system, &self.config.solver);
        debug!(
            system = %system.name,
            status = ?outcome.status,
            objective = ?outcome.objective_value,
            solve_time_ms = outcome.solve_time_ms,
            "backend finished"
        );
        self.extractor.extract(system, requests, &outcome)
    }

    #[cfg(feature = "parallel")]
    fn for_each_student<T, F>(&self, requests: &[StudentRequest], f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&StudentRequest) -> T + Sync + Send,
    {
        if self.config.parallel {
            requests.par_iter().map(f).collect()
        } else {
            requests.iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn for_each_student<T, F>(&self, requests: &[StudentRequest], f: F) -> Vec<T>
    where
        F: Fn(&StudentRequest) -> T,
    {
        requests.iter().map(f).collect()
    }
}
