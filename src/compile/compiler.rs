//! Translation of student requests into a constraint system.

use std::collections::BTreeSet;

use super::config::CompilerConfig;
use crate::cp::{BlockVar, Constraint, ConstraintSystem, Objective, SoftConstraint, VarId};
use crate::error::{Error, Result};
use crate::model::StudentRequest;
use crate::time::TimeUnit;

/// Builds declarative constraint systems from student requests.
///
/// Each student gets `max_slots` optional block variables named
/// `"{id}_{slot}"`, and the following hard constraints over them:
///
/// - `SlotCount`: between `min_slots` and `max_slots` blocks are present
/// - `TotalLength`: present lengths sum to the required units
/// - `MinLength`: every present block is at least `min_block_length` long
/// - `DistinctDays`: present blocks sit on pairwise distinct days
/// - `Forbidden`: no block covers an impossible point
///
/// Every avoid point becomes one weight-1 soft constraint over all of the
/// student's variables, and the objective minimizes their violations.
/// No constraint ever mentions two students.
///
/// # Examples
///
/// ```
/// use u_timeblock::compile::{CompilerConfig, ConstraintCompiler};
/// use u_timeblock::model::StudentRequest;
/// use u_timeblock::time::Day;
///
/// let compiler = ConstraintCompiler::new(CompilerConfig::default());
/// let requests = vec![
///     StudentRequest::new("alice", 16).with_avoid(Day::Monday, 5),
///     StudentRequest::new("bob", 8),
/// ];
/// let system = compiler.compile(&requests).unwrap();
/// assert_eq!(system.var_count(), 6);
/// assert_eq!(system.soft_count(), 1);
/// assert_eq!(system.components().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintCompiler {
    config: CompilerConfig,
}

impl ConstraintCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles every request into one joint system.
    ///
    /// Fails with [`Error::Config`] before building anything if the
    /// configuration or any request is invalid.
    pub fn compile(&self, requests: &[StudentRequest]) -> Result<ConstraintSystem> {
        self.config.validate()?;
        self.validate_requests(requests)?;

        let grid = &self.config.grid;
        let mut system = ConstraintSystem::new("timeblock", grid.first_unit, grid.last_unit);
        for request in requests {
            self.add_student(&mut system, request);
        }
        system.set_objective(Objective::MinimizeViolations);
        Ok(system)
    }

    /// Compiles a single student's independent subsystem.
    pub fn compile_student(&self, request: &StudentRequest) -> Result<ConstraintSystem> {
        let mut system = self.compile(std::slice::from_ref(request))?;
        system.name = request.id().to_string();
        Ok(system)
    }

    /// Checks the requests against the configured bounds.
    ///
    /// Rejects requests that no schedule could satisfy even when the
    /// student is considered alone and every point is available.
    pub fn validate_requests(&self, requests: &[StudentRequest]) -> Result<()> {
        let grid = &self.config.grid;
        let max_units = self.config.max_required_units();
        let min_units = self.config.min_slots as TimeUnit * self.config.min_block_length;
        let mut seen = BTreeSet::new();

        for request in requests {
            let id = request.id();
            if !seen.insert(id) {
                return Err(Error::config(format!("duplicate student id {id:?}")));
            }
            let required = request.required_units();
            if required <= 0 {
                return Err(Error::config(format!(
                    "student {id:?}: required units must be positive, got {required}"
                )));
            }
            if required > max_units {
                return Err(Error::config(format!(
                    "student {id:?}: required units {required} exceed the maximum {max_units} \
                     ({} slots of {} units)",
                    self.config.max_slots,
                    grid.span()
                )));
            }
            if required < min_units {
                return Err(Error::config(format!(
                    "student {id:?}: required units {required} are below the minimum {min_units} \
                     ({} slots of at least {} units)",
                    self.config.min_slots, self.config.min_block_length
                )));
            }
            let outside = request
                .impossible()
                .iter()
                .chain(request.avoid())
                .find(|(_, t)| !grid.contains(*t));
            if let Some((day, t)) = outside {
                return Err(Error::config(format!(
                    "student {id:?}: point ({day}, {t}) lies outside [{}, {}]",
                    grid.first_unit, grid.last_unit
                )));
            }
        }
        Ok(())
    }

    fn add_student(&self, system: &mut ConstraintSystem, request: &StudentRequest) {
        let grid = &self.config.grid;
        let id = request.id();

        let vars: Vec<VarId> = (0..self.config.max_slots)
            .map(|slot| {
                system.add_var(
                    BlockVar::new(format!("{id}_{slot}"), id, slot, grid.first_unit, grid.last_unit)
                        .with_length(self.config.min_block_length, grid.span())
                        .as_optional(),
                )
            })
            .collect();

        system.add_constraint(Constraint::SlotCount {
            vars: vars.clone(),
            min: self.config.min_slots,
            max: self.config.max_slots,
        });
        system.add_constraint(Constraint::TotalLength {
            vars: vars.clone(),
            total: request.required_units(),
        });
        for &var in &vars {
            system.add_constraint(Constraint::MinLength {
                var,
                min: self.config.min_block_length,
            });
        }
        system.add_constraint(Constraint::DistinctDays { vars: vars.clone() });

        for &(day, time) in request.impossible() {
            for &var in &vars {
                system.add_constraint(Constraint::Forbidden { var, day, time });
            }
        }

        for &(day, time) in request.avoid() {
            system.add_soft_constraint(SoftConstraint {
                name: format!("{id}_avoid_{day}_{time}"),
                vars: vars.clone(),
                day,
                time,
                weight: 1,
            });
        }
    }
}
