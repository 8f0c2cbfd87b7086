//! Decoding backend values into schedules.

use crate::compile::CompilerConfig;
use crate::cp::{ConstraintSystem, RawBlockValue, SolverOutcome, SolverStatus};
use crate::error::{Error, Result};
use crate::model::{Schedule, SlotAssignment, StudentRequest, TimeBlock};
use crate::time::{Day, TimeUnit};

use super::report::ViolationReport;

/// A decoded, verified schedule with its violation report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractedSchedule {
    /// One slot assignment per student.
    pub schedule: Schedule,
    /// Covered avoid points per student.
    pub violations: ViolationReport,
    /// Objective value of the schedule (covered avoid points).
    pub objective_value: u64,
}

impl ExtractedSchedule {
    /// Concatenates schedules of disjoint student sets.
    ///
    /// Equivalent to one joint extraction because no constraint links
    /// two students.
    pub fn merge(parts: impl IntoIterator<Item = ExtractedSchedule>) -> Self {
        let mut assignments = Vec::new();
        let mut violations = ViolationReport::default();
        let mut objective_value = 0;
        for part in parts {
            assignments.extend(part.schedule);
            violations.merge(part.violations);
            objective_value += part.objective_value;
        }
        Self {
            schedule: assignments.into_iter().collect(),
            violations,
            objective_value,
        }
    }
}

/// What a backend outcome turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The backend found an optimal schedule.
    Solved(ExtractedSchedule),
    /// The backend proved that no schedule exists.
    Infeasible,
    /// The backend ran out of time.
    Unknown,
}

/// Turns backend outcomes into [`Schedule`]s.
///
/// # Examples
///
/// ```
/// use u_timeblock::compile::CompilerConfig;
/// use u_timeblock::cp::RawBlockValue;
/// use u_timeblock::extract::ResultExtractor;
/// use u_timeblock::model::TimeBlock;
/// use u_timeblock::time::Day;
///
/// let extractor = ResultExtractor::new(CompilerConfig::default());
/// let block = extractor.decode(&RawBlockValue::block(Day::Monday, 1, 9)).unwrap();
/// assert_eq!(block, TimeBlock::Assigned { day: Day::Monday, start: 1, end: 9 });
/// assert_eq!(extractor.decode(&RawBlockValue::absent()).unwrap(), TimeBlock::Unassigned);
/// ```
#[derive(Debug, Clone)]
pub struct ResultExtractor {
    config: CompilerConfig,
}

impl ResultExtractor {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Decodes one raw backend value.
    ///
    /// Absent values become [`TimeBlock::Unassigned`]. Present values
    /// must name a weekday and satisfy `start < end` within the grid.
    pub fn decode(&self, raw: &RawBlockValue) -> Result<TimeBlock> {
        if !raw.present {
            return Ok(TimeBlock::Unassigned);
        }
        let day = Day::from_index(raw.day)
            .ok_or_else(|| Error::backend(format!("day index {} out of range", raw.day)))?;
        TimeBlock::assigned(day, raw.start, raw.end, &self.config.grid).ok_or_else(|| {
            Error::backend(format!(
                "block [{}, {}] on {day} is empty or outside the grid",
                raw.start, raw.end
            ))
        })
    }

    /// Converts an outcome for `system` (compiled from `requests`) into
    /// an [`Extraction`].
    ///
    /// Fails with [`Error::Backend`] when the backend rejected the system,
    /// when its values do not decode, or when the decoded schedule breaks
    /// a hard constraint of some request.
    pub fn extract(
        &self,
        system: &ConstraintSystem,
        requests: &[StudentRequest],
        outcome: &SolverOutcome,
    ) -> Result<Extraction> {
        match outcome.status {
            SolverStatus::Infeasible => return Ok(Extraction::Infeasible),
            SolverStatus::Unknown => return Ok(Extraction::Unknown),
            SolverStatus::ModelInvalid => {
                return Err(Error::backend(format!(
                    "backend rejected system {:?} as invalid",
                    system.name
                )))
            }
            SolverStatus::Satisfiable => {}
        }

        if outcome.values.len() != system.var_count() {
            return Err(Error::backend(format!(
                "expected {} values, got {}",
                system.var_count(),
                outcome.values.len()
            )));
        }
        let blocks = outcome
            .values
            .iter()
            .map(|raw| self.decode(raw))
            .collect::<Result<Vec<_>>>()?;

        let mut assignments = Vec::with_capacity(requests.len());
        for request in requests {
            let vars = system.vars_of(request.id());
            if vars.len() != self.config.max_slots {
                return Err(Error::backend(format!(
                    "student {:?} has {} variables, expected {}",
                    request.id(),
                    vars.len(),
                    self.config.max_slots
                )));
            }
            let assignment = SlotAssignment::new(vars.iter().map(|&v| blocks[v]).collect());
            self.verify(request, &assignment)?;
            assignments.push((request.id().to_string(), assignment));
        }
        let schedule: Schedule = assignments.into_iter().collect();

        let objective_value = system.violation_cost(&outcome.values);
        if let Some(claimed) = outcome.objective_value {
            if claimed != objective_value {
                return Err(Error::backend(format!(
                    "backend reported objective {claimed}, schedule costs {objective_value}"
                )));
            }
        }
        let violations = ViolationReport::compute(&schedule, requests);

        Ok(Extraction::Solved(ExtractedSchedule {
            schedule,
            violations,
            objective_value,
        }))
    }

    /// Checks one student's assignment against the hard constraints.
    pub fn verify(&self, request: &StudentRequest, assignment: &SlotAssignment) -> Result<()> {
        let id = request.id();
        let fail = |what: String| Err(Error::backend(format!("student {id:?}: {what}")));

        let count = assignment.assigned_count();
        if count < self.config.min_slots || count > self.config.max_slots {
            return fail(format!(
                "{count} blocks outside [{}, {}]",
                self.config.min_slots, self.config.max_slots
            ));
        }
        let total: TimeUnit = assignment.total_units();
        if total != request.required_units() {
            return fail(format!(
                "blocks sum to {total} units, required {}",
                request.required_units()
            ));
        }
        if let Some(short) = assignment
            .assigned()
            .find(|b| b.length() < self.config.min_block_length)
        {
            return fail(format!(
                "block {short} shorter than {} units",
                self.config.min_block_length
            ));
        }
        let mut days = [false; Day::COUNT];
        for day in assignment.assigned().filter_map(TimeBlock::day) {
            if std::mem::replace(&mut days[day.index()], true) {
                return fail(format!("two blocks on {day}"));
            }
        }
        if let Some((day, time)) = request
            .impossible()
            .iter()
            .find(|&&(day, time)| assignment.covers(day, time))
        {
            return fail(format!("impossible point ({day}, {time}) covered"));
        }
        Ok(())
    }
}
