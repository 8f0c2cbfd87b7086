//! Exact depth-first branch-and-bound backend.
//!
//! The system is first split into variable-disjoint components, which
//! are solved independently (in parallel with the `parallel` feature
//! when more than one worker is configured). Within a component the
//! variables are decided in index order; each variable draws from a
//! precomputed table of candidate values that already respect its
//! domain, its minimum length, and its forbidden points.
//!
//! Pruning after each decision:
//! - slot counts: mandatory and possible presences of the undecided
//!   variables must still fit `[min, max]`;
//! - exact sums: the remaining length must be reachable by some number
//!   of undecided blocks, each between the smallest minimum length and
//!   its own maximum length;
//! - distinct days: a day already used in the group is skipped;
//! - objective: a candidate whose added penalty does not beat the
//!   incumbent is skipped.
//!
//! Candidates are tried cheapest first, so a component stops as soon
//! as a zero-penalty solution appears. The search is exponential in
//! the worst case and intended for small instances.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use super::model::{Component, Constraint, ConstraintSystem};
use super::solver::{SolverBackend, SolverConfig, SolverOutcome, SolverStatus};
use super::variables::{RawBlockValue, VarId};
use crate::time::{Day, TimeUnit};

/// Nodes between deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// An exact backtracking backend for small instances.
///
/// # Examples
///
/// ```
/// use u_timeblock::cp::{
///     BacktrackingSolver, BlockVar, Constraint, ConstraintSystem, SolverBackend,
///     SolverConfig, SolverStatus,
/// };
///
/// let mut system = ConstraintSystem::new("one-block", 1, 40);
/// let v = system.add_var(BlockVar::new("s_0", "s", 0, 1, 40));
/// system.add_constraint(Constraint::TotalLength { vars: vec![v], total: 8 });
///
/// let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
/// assert_eq!(outcome.status, SolverStatus::Satisfiable);
/// assert_eq!(outcome.values[0].length(), 8);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self
    }
}

impl SolverBackend for BacktrackingSolver {
    fn solve(&self, system: &ConstraintSystem, config: &SolverConfig) -> SolverOutcome {
        let started = Instant::now();

        if let Err(reason) = system.validate() {
            debug!(system = %system.name, %reason, "rejecting invalid system");
            return SolverOutcome::empty(SolverStatus::ModelInvalid);
        }

        // Constraints over no variables are decided by the empty assignment.
        let trivially_violated = system
            .constraints
            .iter()
            .any(|c| c.vars().is_empty() && !c.is_satisfied(&[]));
        if trivially_violated {
            return SolverOutcome::empty(SolverStatus::Infeasible)
                .with_solve_time_ms(elapsed_ms(started));
        }

        let deadline = started.checked_add(Duration::from_millis(config.time_limit_ms));
        let components = system.components();
        debug!(
            system = %system.name,
            vars = system.var_count(),
            constraints = system.constraint_count(),
            soft_constraints = system.soft_count(),
            components = components.len(),
            "backtracking search started"
        );

        let results = solve_components(&components, deadline, config.num_workers);

        let mut values = vec![RawBlockValue::absent(); system.var_count()];
        let mut objective = 0;
        let mut undecided = false;
        for (component, result) in components.iter().zip(results) {
            match result {
                ComponentResult::Solved { values: local, cost } => {
                    for (i, value) in local.into_iter().enumerate() {
                        values[component.var_map[i]] = value;
                    }
                    objective += cost;
                }
                ComponentResult::Infeasible => {
                    debug!(system = %component.system.name, "component infeasible");
                    return SolverOutcome::empty(SolverStatus::Infeasible)
                        .with_solve_time_ms(elapsed_ms(started));
                }
                ComponentResult::Unknown => undecided = true,
            }
        }

        if undecided {
            return SolverOutcome::empty(SolverStatus::Unknown)
                .with_solve_time_ms(elapsed_ms(started));
        }
        debug_assert!(system.is_feasible(&values));
        SolverOutcome::satisfiable(values, objective).with_solve_time_ms(elapsed_ms(started))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(feature = "parallel")]
fn solve_components(
    components: &[Component],
    deadline: Option<Instant>,
    num_workers: usize,
) -> Vec<ComponentResult> {
    if num_workers > 1 && components.len() > 1 {
        components
            .par_iter()
            .map(|c| solve_component(&c.system, deadline))
            .collect()
    } else {
        components
            .iter()
            .map(|c| solve_component(&c.system, deadline))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn solve_components(
    components: &[Component],
    deadline: Option<Instant>,
    _num_workers: usize,
) -> Vec<ComponentResult> {
    components
        .iter()
        .map(|c| solve_component(&c.system, deadline))
        .collect()
}

enum ComponentResult {
    Solved {
        values: Vec<RawBlockValue>,
        cost: u64,
    },
    Infeasible,
    Unknown,
}

fn solve_component(system: &ConstraintSystem, deadline: Option<Instant>) -> ComponentResult {
    let tables = Tables::build(system);
    let mut state = State::new(&tables, deadline);
    search(&tables, &mut state, 0);

    debug!(
        system = %system.name,
        nodes = state.nodes,
        timed_out = state.timed_out,
        best = ?state.best.as_ref().map(|(cost, _)| *cost),
        "component search finished"
    );

    match state.best {
        Some((cost, chosen)) if cost == 0 || !state.timed_out => ComponentResult::Solved {
            values: chosen
                .iter()
                .enumerate()
                .map(|(var, &index)| tables.candidates[var][index].value)
                .collect(),
            cost,
        },
        _ if state.timed_out => ComponentResult::Unknown,
        _ => ComponentResult::Infeasible,
    }
}

/// A precomputed value for one variable.
struct Candidate {
    value: RawBlockValue,
    /// Soft constraints this value covers.
    soft: Vec<usize>,
    /// Summed weight of `soft`.
    weight: u64,
}

struct SumSpec {
    vars: Vec<VarId>,
    total: TimeUnit,
    /// A slot count over exactly the same variables, if any.
    linked_count: Option<usize>,
}

struct CountSpec {
    vars: Vec<VarId>,
    min: usize,
    max: usize,
}

/// Read-only search data for one component.
struct Tables {
    candidates: Vec<Vec<Candidate>>,
    min_len: Vec<TimeUnit>,
    max_len: Vec<TimeUnit>,
    can_be_absent: Vec<bool>,
    can_be_present: Vec<bool>,
    sums: Vec<SumSpec>,
    counts: Vec<CountSpec>,
    distinct_count: usize,
    var_sums: Vec<Vec<usize>>,
    var_counts: Vec<Vec<usize>>,
    var_distinct: Vec<Vec<usize>>,
    soft_weights: Vec<u64>,
}

impl Tables {
    fn build(system: &ConstraintSystem) -> Self {
        let n = system.var_count();
        let mut min_length: Vec<TimeUnit> = system.vars.iter().map(|v| v.length.min).collect();
        let mut forbidden: Vec<[BTreeSet<TimeUnit>; Day::COUNT]> =
            (0..n).map(|_| Default::default()).collect();
        let mut sums = Vec::new();
        let mut counts = Vec::new();
        let mut distinct = Vec::new();

        for constraint in &system.constraints {
            match constraint {
                Constraint::SlotCount { vars, min, max } => counts.push(CountSpec {
                    vars: vars.clone(),
                    min: *min,
                    max: *max,
                }),
                Constraint::TotalLength { vars, total } => sums.push(SumSpec {
                    vars: vars.clone(),
                    total: *total,
                    linked_count: None,
                }),
                Constraint::MinLength { var, min } => {
                    min_length[*var] = min_length[*var].max(*min);
                }
                Constraint::DistinctDays { vars } => distinct.push(vars.clone()),
                Constraint::Forbidden { var, day, time } => {
                    forbidden[*var][day.index()].insert(*time);
                }
            }
        }

        for sum in &mut sums {
            let key: BTreeSet<VarId> = sum.vars.iter().copied().collect();
            sum.linked_count = counts
                .iter()
                .position(|c| c.vars.iter().copied().collect::<BTreeSet<_>>() == key);
        }

        let mut var_softs: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (s, soft) in system.soft_constraints.iter().enumerate() {
            for &v in &soft.vars {
                if !var_softs[v].contains(&s) {
                    var_softs[v].push(s);
                }
            }
        }

        let candidates: Vec<Vec<Candidate>> = (0..n)
            .map(|v| enumerate_candidates(system, v, min_length[v], &forbidden[v], &var_softs[v]))
            .collect();

        let mut min_len = vec![TimeUnit::MAX; n];
        let mut max_len = vec![0; n];
        let mut can_be_present = vec![false; n];
        for (v, list) in candidates.iter().enumerate() {
            for candidate in list.iter().filter(|c| c.value.present) {
                let length = candidate.value.length();
                min_len[v] = min_len[v].min(length);
                max_len[v] = max_len[v].max(length);
                can_be_present[v] = true;
            }
        }
        let can_be_absent = system.vars.iter().map(|v| v.is_optional).collect();

        let index_by_var = |lists: &[Vec<VarId>]| {
            let mut by_var = vec![Vec::new(); n];
            for (i, vars) in lists.iter().enumerate() {
                for &v in vars {
                    by_var[v].push(i);
                }
            }
            by_var
        };
        let var_sums = index_by_var(&sums.iter().map(|s| s.vars.clone()).collect::<Vec<_>>());
        let var_counts = index_by_var(&counts.iter().map(|c| c.vars.clone()).collect::<Vec<_>>());
        let var_distinct = index_by_var(&distinct);

        Self {
            candidates,
            min_len,
            max_len,
            can_be_absent,
            can_be_present,
            sums,
            counts,
            distinct_count: distinct.len(),
            var_sums,
            var_counts,
            var_distinct,
            soft_weights: system.soft_constraints.iter().map(|s| s.weight).collect(),
        }
    }

    fn days_free(&self, var: VarId, candidate: &Candidate, state: &State) -> bool {
        !candidate.value.present
            || self.var_distinct[var]
                .iter()
                .all(|&d| state.days_used[d] & (1 << candidate.value.day) == 0)
    }

    fn soft_delta(&self, candidate: &Candidate, state: &State) -> u64 {
        candidate
            .soft
            .iter()
            .filter(|&&s| state.soft_hits[s] == 0)
            .map(|&s| self.soft_weights[s])
            .sum()
    }

    fn apply(&self, var: VarId, index: usize, state: &mut State) {
        let candidate = &self.candidates[var][index];
        state.chosen[var] = index;
        let length = candidate.value.length();
        for &s in &self.var_sums[var] {
            state.sum[s] += length;
        }
        if candidate.value.present {
            for &c in &self.var_counts[var] {
                state.present[c] += 1;
            }
            for &d in &self.var_distinct[var] {
                state.days_used[d] |= 1 << candidate.value.day;
            }
        }
        for &s in &candidate.soft {
            if state.soft_hits[s] == 0 {
                state.cost += self.soft_weights[s];
            }
            state.soft_hits[s] += 1;
        }
    }

    fn undo(&self, var: VarId, index: usize, state: &mut State) {
        let candidate = &self.candidates[var][index];
        let length = candidate.value.length();
        for &s in &self.var_sums[var] {
            state.sum[s] -= length;
        }
        if candidate.value.present {
            for &c in &self.var_counts[var] {
                state.present[c] -= 1;
            }
            for &d in &self.var_distinct[var] {
                state.days_used[d] &= !(1 << candidate.value.day);
            }
        }
        for &s in &candidate.soft {
            state.soft_hits[s] -= 1;
            if state.soft_hits[s] == 0 {
                state.cost -= self.soft_weights[s];
            }
        }
    }

    /// Whether the constraints touching `var` can still be met once
    /// variables `0..=var` are decided.
    fn consistent(&self, var: VarId, state: &State) -> bool {
        self.var_counts[var]
            .iter()
            .all(|&c| self.count_feasible(c, var, state))
            && self.var_sums[var]
                .iter()
                .all(|&s| self.sum_feasible(s, var, state))
    }

    fn count_feasible(&self, c: usize, decided_up_to: VarId, state: &State) -> bool {
        let spec = &self.counts[c];
        let placed = state.present[c];
        let undecided = spec.vars.iter().filter(|&&v| v > decided_up_to);
        let mandatory = undecided.clone().filter(|&&v| !self.can_be_absent[v]).count();
        let possible = undecided.filter(|&&v| self.can_be_present[v]).count();
        placed + mandatory <= spec.max && placed + possible >= spec.min
    }

    fn sum_feasible(&self, s: usize, decided_up_to: VarId, state: &State) -> bool {
        let spec = &self.sums[s];
        let remaining = spec.total - state.sum[s];
        if remaining < 0 {
            return false;
        }

        let undecided: Vec<VarId> = spec
            .vars
            .iter()
            .copied()
            .filter(|&v| v > decided_up_to)
            .collect();
        let mandatory = undecided.iter().filter(|&&v| !self.can_be_absent[v]).count();
        let mut presentable: Vec<VarId> = undecided
            .into_iter()
            .filter(|&v| self.can_be_present[v])
            .collect();

        let mut fewest = mandatory;
        let mut most = presentable.len();
        if let Some(c) = spec.linked_count {
            let count = &self.counts[c];
            let placed = state.present[c];
            fewest = fewest.max(count.min.saturating_sub(placed));
            most = most.min(count.max.saturating_sub(placed));
        }
        if fewest > most {
            return false;
        }
        if remaining == 0 {
            return fewest == 0;
        }

        let shortest = presentable
            .iter()
            .map(|&v| self.min_len[v])
            .min()
            .unwrap_or(TimeUnit::MAX);
        presentable.sort_by_key(|&v| std::cmp::Reverse(self.max_len[v]));
        let mut longest_sum: TimeUnit = 0;
        for (i, &v) in presentable.iter().enumerate().take(most) {
            let n = i + 1;
            longest_sum += self.max_len[v];
            if n < fewest {
                continue;
            }
            if shortest.saturating_mul(n as TimeUnit) <= remaining && remaining <= longest_sum {
                return true;
            }
        }
        false
    }
}

fn enumerate_candidates(
    system: &ConstraintSystem,
    v: VarId,
    min_length: TimeUnit,
    forbidden: &[BTreeSet<TimeUnit>; Day::COUNT],
    softs: &[usize],
) -> Vec<Candidate> {
    let var = &system.vars[v];
    let mut candidates = Vec::new();

    for &day in &var.days {
        let blocked = &forbidden[day.index()];
        for start in var.start.min..=var.start.max {
            let shortest_end = var.end.min.max(start + min_length.max(1));
            for end in shortest_end..=var.end.max {
                let length = end - start;
                if length > var.length.max {
                    break;
                }
                if length < var.length.min {
                    continue;
                }
                // Any longer block also covers a blocked instant.
                if blocked.range(start..=end).next().is_some() {
                    break;
                }
                let value = RawBlockValue::block(day, start, end);
                let soft: Vec<usize> = softs
                    .iter()
                    .copied()
                    .filter(|&s| {
                        let sc = &system.soft_constraints[s];
                        value.covers(sc.day, sc.time)
                    })
                    .collect();
                let weight = soft.iter().map(|&s| system.soft_constraints[s].weight).sum();
                candidates.push(Candidate {
                    value,
                    soft,
                    weight,
                });
            }
        }
    }

    candidates.sort_by_key(|c| {
        (
            c.weight,
            std::cmp::Reverse(c.value.length()),
            c.value.day,
            c.value.start,
        )
    });

    if var.is_optional {
        candidates.push(Candidate {
            value: RawBlockValue::absent(),
            soft: Vec::new(),
            weight: 0,
        });
    }
    candidates
}

/// Mutable search state for one component.
struct State {
    chosen: Vec<usize>,
    sum: Vec<TimeUnit>,
    present: Vec<usize>,
    days_used: Vec<u8>,
    soft_hits: Vec<u32>,
    cost: u64,
    best: Option<(u64, Vec<usize>)>,
    nodes: u64,
    deadline: Option<Instant>,
    timed_out: bool,
}

impl State {
    fn new(tables: &Tables, deadline: Option<Instant>) -> Self {
        Self {
            chosen: vec![0; tables.candidates.len()],
            sum: vec![0; tables.sums.len()],
            present: vec![0; tables.counts.len()],
            days_used: vec![0; tables.distinct_count],
            soft_hits: vec![0; tables.soft_weights.len()],
            cost: 0,
            best: None,
            nodes: 0,
            deadline,
            timed_out: false,
        }
    }

    fn should_stop(&self) -> bool {
        self.timed_out || self.best.as_ref().is_some_and(|(cost, _)| *cost == 0)
    }

    fn tick(&mut self) {
        self.nodes += 1;
        if self.nodes % DEADLINE_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
        {
            self.timed_out = true;
        }
    }
}

fn search(tables: &Tables, state: &mut State, var: VarId) {
    state.tick();
    if state.should_stop() {
        return;
    }

    if var == tables.candidates.len() {
        if state
            .best
            .as_ref()
            .is_none_or(|(best, _)| state.cost < *best)
        {
            state.best = Some((state.cost, state.chosen.clone()));
        }
        return;
    }

    for index in 0..tables.candidates[var].len() {
        let candidate = &tables.candidates[var][index];
        if !tables.days_free(var, candidate, state) {
            continue;
        }
        let delta = tables.soft_delta(candidate, state);
        if state
            .best
            .as_ref()
            .is_some_and(|(best, _)| state.cost + delta >= *best)
        {
            continue;
        }

        tables.apply(var, index, state);
        if tables.consistent(var, state) {
            search(tables, state, var + 1);
        }
        tables.undo(var, index, state);

        if state.should_stop() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{BlockVar, Objective, SoftConstraint};

    /// One student with `slots` optional variables over `[1, last]`.
    fn student_system(
        slots: usize,
        last: TimeUnit,
        total: TimeUnit,
        min_slots: usize,
        min_len: TimeUnit,
    ) -> ConstraintSystem {
        let mut system = ConstraintSystem::new("student", 1, last);
        let vars: Vec<VarId> = (0..slots)
            .map(|slot| {
                system.add_var(
                    BlockVar::new(format!("s_{slot}"), "s", slot, 1, last)
                        .with_length(min_len, last - 1)
                        .as_optional(),
                )
            })
            .collect();
        system.add_constraint(Constraint::SlotCount {
            vars: vars.clone(),
            min: min_slots,
            max: slots,
        });
        system.add_constraint(Constraint::TotalLength {
            vars: vars.clone(),
            total,
        });
        for &v in &vars {
            system.add_constraint(Constraint::MinLength { var: v, min: min_len });
        }
        system.add_constraint(Constraint::DistinctDays { vars });
        system.set_objective(Objective::MinimizeViolations);
        system
    }

    fn forbid_day(system: &mut ConstraintSystem, day: Day, last: TimeUnit) {
        for var in 0..system.var_count() {
            for time in 1..=last {
                system.add_constraint(Constraint::Forbidden { var, day, time });
            }
        }
    }

    fn avoid(system: &mut ConstraintSystem, day: Day, time: TimeUnit) {
        let vars: Vec<VarId> = (0..system.var_count()).collect();
        system.add_soft_constraint(SoftConstraint {
            name: format!("avoid_{day}_{time}"),
            vars,
            day,
            time,
            weight: 1,
        });
    }

    #[test]
    fn test_feasible_student() {
        let system = student_system(3, 40, 16, 2, 4);
        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());

        assert_eq!(outcome.status, SolverStatus::Satisfiable);
        assert_eq!(outcome.objective_value, Some(0));
        assert_eq!(outcome.values.len(), 3);
        assert!(system.is_feasible(&outcome.values));

        let present: Vec<_> = outcome.values.iter().filter(|v| v.present).collect();
        assert!((2..=3).contains(&present.len()));
        assert_eq!(present.iter().map(|v| v.length()).sum::<TimeUnit>(), 16);
    }

    #[test]
    fn test_infeasible_when_every_day_forbidden() {
        let mut system = student_system(3, 40, 16, 2, 4);
        for day in Day::ALL {
            forbid_day(&mut system, day, 40);
        }
        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
        assert_eq!(outcome.status, SolverStatus::Infeasible);
        assert!(outcome.values.is_empty());
    }

    #[test]
    fn test_infeasible_when_too_few_days() {
        // two blocks required on distinct days, only Wednesday open
        let mut system = student_system(3, 12, 8, 2, 4);
        for day in [Day::Monday, Day::Tuesday, Day::Thursday, Day::Friday] {
            forbid_day(&mut system, day, 12);
        }
        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
        assert_eq!(outcome.status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_avoid_point_is_dodged() {
        let mut system = student_system(3, 40, 16, 2, 4);
        avoid(&mut system, Day::Monday, 5);
        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());

        assert_eq!(outcome.status, SolverStatus::Satisfiable);
        assert_eq!(outcome.objective_value, Some(0));
        assert!(outcome.values.iter().all(|v| !v.covers(Day::Monday, 5)));
    }

    #[test]
    fn test_unavoidable_penalty_is_minimized() {
        // Only Monday is open and the day is 8 units long. A 6-unit block
        // is either [1, 7] (covers 1 and 2) or [2, 8] (covers 2 only).
        let mut system = student_system(1, 8, 6, 1, 4);
        for day in [Day::Tuesday, Day::Wednesday, Day::Thursday, Day::Friday] {
            forbid_day(&mut system, day, 8);
        }
        avoid(&mut system, Day::Monday, 1);
        avoid(&mut system, Day::Monday, 2);

        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
        assert_eq!(outcome.status, SolverStatus::Satisfiable);
        assert_eq!(outcome.objective_value, Some(1));
        assert_eq!(outcome.values[0], RawBlockValue::block(Day::Monday, 2, 8));
        assert_eq!(system.violation_cost(&outcome.values), 1);
    }

    #[test]
    fn test_mandatory_var_without_candidates() {
        let mut system = ConstraintSystem::new("tight", 1, 10);
        let v = system.add_var(BlockVar::new("x_0", "x", 0, 1, 10).with_length(20, 20));
        system.add_constraint(Constraint::MinLength { var: v, min: 20 });
        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
        assert_eq!(outcome.status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_one_infeasible_component_fails_all() {
        let mut system = student_system(2, 12, 8, 1, 4);
        let extra = system.add_var(BlockVar::new("t_0", "t", 0, 1, 12));
        system.add_constraint(Constraint::TotalLength {
            vars: vec![extra],
            total: 40,
        });
        assert_eq!(system.components().len(), 2);

        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
        assert_eq!(outcome.status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_parallel_components_match_sequential() {
        let mut system = ConstraintSystem::new("pair", 1, 20);
        for group in ["a", "b", "c"] {
            let v = system.add_var(BlockVar::new(format!("{group}_0"), group, 0, 1, 20));
            system.add_constraint(Constraint::TotalLength {
                vars: vec![v],
                total: 6,
            });
            system.add_soft_constraint(SoftConstraint {
                name: format!("{group}_avoid"),
                vars: vec![v],
                day: Day::Monday,
                time: 1,
                weight: 3,
            });
        }

        let sequential = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
        let parallel = BacktrackingSolver::new()
            .solve(&system, &SolverConfig::default().with_num_workers(4));

        assert_eq!(sequential.status, SolverStatus::Satisfiable);
        assert_eq!(sequential.objective_value, Some(0));
        assert_eq!(sequential.values, parallel.values);
    }

    #[test]
    fn test_invalid_system() {
        let mut system = ConstraintSystem::new("broken", 1, 40);
        system.add_constraint(Constraint::DistinctDays { vars: vec![7] });
        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
        assert_eq!(outcome.status, SolverStatus::ModelInvalid);
    }

    #[test]
    fn test_empty_slot_count_is_decided_upfront() {
        let mut system = ConstraintSystem::new("empty", 1, 40);
        system.add_constraint(Constraint::SlotCount {
            vars: vec![],
            min: 1,
            max: 2,
        });
        let outcome = BacktrackingSolver::new().solve(&system, &SolverConfig::default());
        assert_eq!(outcome.status, SolverStatus::Infeasible);
    }

    #[test]
    fn test_expired_time_limit_reports_unknown() {
        // Every point is penalized, so no zero-cost solution exists and
        // proving optimality needs far more nodes than one check interval.
        let mut system = student_system(5, 40, 20, 1, 1);
        for day in Day::ALL {
            for time in 1..=40 {
                avoid(&mut system, day, time);
            }
        }
        let outcome = BacktrackingSolver::new()
            .solve(&system, &SolverConfig::default().with_time_limit_ms(0));
        assert_eq!(outcome.status, SolverStatus::Unknown);
        assert!(outcome.values.is_empty());
    }
}
