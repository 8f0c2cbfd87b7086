//! Constraint system definition.

use super::variables::{BlockVar, RawBlockValue, VarId};
use crate::time::{Day, TimeUnit};

/// A hard constraint over block variables.
///
/// Constraints only speak about present blocks; absent variables
/// contribute nothing to counts, sums, or coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// The number of present variables lies in `[min, max]`.
    SlotCount {
        vars: Vec<VarId>,
        min: usize,
        max: usize,
    },

    /// The lengths of the present variables sum to exactly `total`.
    TotalLength { vars: Vec<VarId>, total: TimeUnit },

    /// A present variable is at least `min` units long.
    MinLength { var: VarId, min: TimeUnit },

    /// No two present variables share a day.
    DistinctDays { vars: Vec<VarId> },

    /// A present variable does not cover `(day, time)`.
    Forbidden {
        var: VarId,
        day: Day,
        time: TimeUnit,
    },
}

impl Constraint {
    /// Variables the constraint refers to.
    pub fn vars(&self) -> Vec<VarId> {
        match self {
            Constraint::SlotCount { vars, .. }
            | Constraint::TotalLength { vars, .. }
            | Constraint::DistinctDays { vars } => vars.clone(),
            Constraint::MinLength { var, .. } | Constraint::Forbidden { var, .. } => vec![*var],
        }
    }

    /// Whether a complete assignment satisfies the constraint.
    pub fn is_satisfied(&self, values: &[RawBlockValue]) -> bool {
        match self {
            Constraint::SlotCount { vars, min, max } => {
                let present = vars.iter().filter(|&&v| values[v].present).count();
                (*min..=*max).contains(&present)
            }
            Constraint::TotalLength { vars, total } => {
                vars.iter().map(|&v| values[v].length()).sum::<TimeUnit>() == *total
            }
            Constraint::MinLength { var, min } => {
                let value = &values[*var];
                !value.present || value.length() >= *min
            }
            Constraint::DistinctDays { vars } => {
                let mut seen = [false; Day::COUNT];
                for &v in vars {
                    let value = &values[v];
                    if !value.present {
                        continue;
                    }
                    match seen.get_mut(value.day) {
                        Some(slot) if !*slot => *slot = true,
                        _ => return false,
                    }
                }
                true
            }
            Constraint::Forbidden { var, day, time } => !values[*var].covers(*day, *time),
        }
    }
}

/// A weighted soft constraint: no present variable in `vars` covers
/// `(day, time)`.
///
/// Violated at most once, however many variables cover the point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftConstraint {
    /// Name for reporting.
    pub name: String,
    /// Variables the constraint watches.
    pub vars: Vec<VarId>,
    /// Day of the watched point.
    pub day: Day,
    /// Time of the watched point.
    pub time: TimeUnit,
    /// Penalty when violated.
    pub weight: u64,
}

impl SoftConstraint {
    /// Whether a complete assignment violates the constraint.
    pub fn is_violated(&self, values: &[RawBlockValue]) -> bool {
        self.vars.iter().any(|&v| values[v].covers(self.day, self.time))
    }
}

/// Objective of a constraint system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Minimize the summed weight of violated soft constraints.
    MinimizeViolations,
}

/// A declarative constraint system: variables, hard constraints,
/// weighted soft constraints, and an objective.
///
/// # Examples
///
/// ```
/// use u_timeblock::cp::{BlockVar, Constraint, ConstraintSystem, Objective};
///
/// let mut system = ConstraintSystem::new("example", 1, 40);
/// let a = system.add_var(BlockVar::new("s_0", "s", 0, 1, 40).as_optional());
/// let b = system.add_var(BlockVar::new("s_1", "s", 1, 1, 40).as_optional());
/// system.add_constraint(Constraint::DistinctDays { vars: vec![a, b] });
/// system.set_objective(Objective::MinimizeViolations);
/// assert!(system.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintSystem {
    /// System name.
    pub name: String,
    /// Smallest schedulable unit.
    pub first_unit: TimeUnit,
    /// Largest schedulable unit.
    pub last_unit: TimeUnit,
    /// Decision variables, indexed by [`VarId`].
    pub vars: Vec<BlockVar>,
    /// Hard constraints.
    pub constraints: Vec<Constraint>,
    /// Soft constraints.
    pub soft_constraints: Vec<SoftConstraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

/// A variable-disjoint part of a system, with its variables renumbered.
#[derive(Debug, Clone)]
pub struct Component {
    /// The sub-system.
    pub system: ConstraintSystem,
    /// `var_map[local]` is the id of the variable in the parent system.
    pub var_map: Vec<VarId>,
}

impl ConstraintSystem {
    /// Creates an empty system over units `[first_unit, last_unit]`.
    pub fn new(name: impl Into<String>, first_unit: TimeUnit, last_unit: TimeUnit) -> Self {
        Self {
            name: name.into(),
            first_unit,
            last_unit,
            vars: Vec::new(),
            constraints: Vec::new(),
            soft_constraints: Vec::new(),
            objective: None,
        }
    }

    /// Adds a variable and returns its id.
    pub fn add_var(&mut self, var: BlockVar) -> VarId {
        self.vars.push(var);
        self.vars.len() - 1
    }

    /// Adds a hard constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Adds a soft constraint.
    pub fn add_soft_constraint(&mut self, soft: SoftConstraint) {
        self.soft_constraints.push(soft);
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    /// Returns the number of variables.
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Returns the number of hard constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the number of soft constraints.
    pub fn soft_count(&self) -> usize {
        self.soft_constraints.len()
    }

    /// Ids of the variables owned by `group`, in slot order.
    pub fn vars_of(&self, group: &str) -> Vec<VarId> {
        let mut ids: Vec<VarId> = (0..self.vars.len())
            .filter(|&i| self.vars[i].group == group)
            .collect();
        ids.sort_by_key(|&i| self.vars[i].slot);
        ids
    }

    /// Validates the system for consistency.
    ///
    /// Checks that every referenced variable exists and that variable
    /// domains stay within the unit bounds.
    pub fn validate(&self) -> Result<(), String> {
        if self.first_unit >= self.last_unit {
            return Err(format!(
                "empty unit range [{}, {}]",
                self.first_unit, self.last_unit
            ));
        }
        for var in &self.vars {
            if var.start.min < self.first_unit || var.end.max > self.last_unit {
                return Err(format!("variable {} exceeds unit bounds", var.name));
            }
        }
        let n = self.vars.len();
        for constraint in &self.constraints {
            if let Some(v) = constraint.vars().into_iter().find(|&v| v >= n) {
                return Err(format!("undefined variable: {v}"));
            }
            if let Constraint::SlotCount { min, max, .. } = constraint {
                if min > max {
                    return Err(format!("slot count: min {min} exceeds max {max}"));
                }
            }
        }
        for soft in &self.soft_constraints {
            if let Some(&v) = soft.vars.iter().find(|&&v| v >= n) {
                return Err(format!("soft constraint {}: undefined variable: {v}", soft.name));
            }
        }
        Ok(())
    }

    /// Whether a complete assignment satisfies every hard constraint
    /// and every variable domain.
    pub fn is_feasible(&self, values: &[RawBlockValue]) -> bool {
        values.len() == self.vars.len()
            && self.vars.iter().zip(values).all(|(var, value)| var.admits(value))
            && self.constraints.iter().all(|c| c.is_satisfied(values))
    }

    /// Summed weight of the soft constraints a complete assignment violates.
    pub fn violation_cost(&self, values: &[RawBlockValue]) -> u64 {
        self.soft_constraints
            .iter()
            .filter(|s| s.is_violated(values))
            .map(|s| s.weight)
            .sum()
    }

    /// Splits the system into variable-disjoint components.
    ///
    /// Two variables share a component when any hard or soft constraint
    /// mentions both. Components are ordered by their smallest variable.
    pub fn components(&self) -> Vec<Component> {
        let n = self.vars.len();
        let mut parent: Vec<usize> = (0..n).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        let mut union_all = |vars: &[VarId]| {
            if let Some((&first, rest)) = vars.split_first() {
                for &v in rest {
                    let a = find(&mut parent, first);
                    let b = find(&mut parent, v);
                    if a != b {
                        parent[a.max(b)] = a.min(b);
                    }
                }
            }
        };
        for constraint in &self.constraints {
            union_all(&constraint.vars());
        }
        for soft in &self.soft_constraints {
            union_all(&soft.vars);
        }

        // root -> component index, in order of first appearance
        let mut index_of_root = vec![usize::MAX; n];
        let mut component_of = vec![0usize; n];
        let mut var_maps: Vec<Vec<VarId>> = Vec::new();
        for v in 0..n {
            let root = find(&mut parent, v);
            if index_of_root[root] == usize::MAX {
                index_of_root[root] = var_maps.len();
                var_maps.push(Vec::new());
            }
            component_of[v] = index_of_root[root];
            var_maps[component_of[v]].push(v);
        }

        let mut local = vec![0usize; n];
        for map in &var_maps {
            for (i, &v) in map.iter().enumerate() {
                local[v] = i;
            }
        }

        let mut components: Vec<Component> = var_maps
            .into_iter()
            .enumerate()
            .map(|(k, var_map)| Component {
                system: ConstraintSystem {
                    name: format!("{}#{k}", self.name),
                    first_unit: self.first_unit,
                    last_unit: self.last_unit,
                    vars: var_map.iter().map(|&v| self.vars[v].clone()).collect(),
                    constraints: Vec::new(),
                    soft_constraints: Vec::new(),
                    objective: self.objective,
                },
                var_map,
            })
            .collect();

        let remap = |vars: &[VarId]| vars.iter().map(|&v| local[v]).collect::<Vec<_>>();

        for constraint in &self.constraints {
            let vars = constraint.vars();
            let Some(&anchor) = vars.first() else {
                continue;
            };
            let k = component_of[anchor];
            let local_constraint = match constraint {
                Constraint::SlotCount { vars, min, max } => Constraint::SlotCount {
                    vars: remap(vars),
                    min: *min,
                    max: *max,
                },
                Constraint::TotalLength { vars, total } => Constraint::TotalLength {
                    vars: remap(vars),
                    total: *total,
                },
                Constraint::MinLength { var, min } => Constraint::MinLength {
                    var: local[*var],
                    min: *min,
                },
                Constraint::DistinctDays { vars } => Constraint::DistinctDays { vars: remap(vars) },
                Constraint::Forbidden { var, day, time } => Constraint::Forbidden {
                    var: local[*var],
                    day: *day,
                    time: *time,
                },
            };
            components[k].system.constraints.push(local_constraint);
        }
        for soft in &self.soft_constraints {
            let Some(&anchor) = soft.vars.first() else {
                continue;
            };
            let k = component_of[anchor];
            components[k].system.soft_constraints.push(SoftConstraint {
                vars: remap(&soft.vars),
                ..soft.clone()
            });
        }

        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_student_system() -> ConstraintSystem {
        let mut system = ConstraintSystem::new("test", 1, 40);
        for student in ["a", "b"] {
            let vars: Vec<VarId> = (0..2)
                .map(|slot| {
                    system.add_var(
                        BlockVar::new(format!("{student}_{slot}"), student, slot, 1, 40)
                            .as_optional(),
                    )
                })
                .collect();
            system.add_constraint(Constraint::SlotCount {
                vars: vars.clone(),
                min: 1,
                max: 2,
            });
            system.add_constraint(Constraint::TotalLength {
                vars: vars.clone(),
                total: 8,
            });
            system.add_constraint(Constraint::DistinctDays { vars: vars.clone() });
            system.add_soft_constraint(SoftConstraint {
                name: format!("{student}_avoid"),
                vars,
                day: Day::Monday,
                time: 3,
                weight: 1,
            });
        }
        system.set_objective(Objective::MinimizeViolations);
        system
    }

    #[test]
    fn test_system_creation() {
        let system = two_student_system();
        assert_eq!(system.var_count(), 4);
        assert_eq!(system.constraint_count(), 6);
        assert_eq!(system.soft_count(), 2);
        assert!(system.validate().is_ok());
        assert_eq!(system.vars_of("b"), vec![2, 3]);
        assert!(system.vars_of("nobody").is_empty());
    }

    #[test]
    fn test_undefined_variable() {
        let mut system = ConstraintSystem::new("test", 1, 40);
        system.add_constraint(Constraint::MinLength { var: 3, min: 4 });
        assert!(system.validate().is_err());
    }

    #[test]
    fn test_inverted_slot_count() {
        let mut system = ConstraintSystem::new("test", 1, 40);
        let v = system.add_var(BlockVar::new("x_0", "x", 0, 1, 40));
        system.add_constraint(Constraint::SlotCount {
            vars: vec![v],
            min: 2,
            max: 1,
        });
        assert!(system.validate().is_err());
    }

    #[test]
    fn test_feasibility_and_cost() {
        let system = two_student_system();
        let values = vec![
            RawBlockValue::block(Day::Monday, 1, 5),
            RawBlockValue::block(Day::Tuesday, 1, 5),
            RawBlockValue::block(Day::Friday, 10, 18),
            RawBlockValue::absent(),
        ];
        assert!(system.is_feasible(&values));
        // student a covers Monday 3
        assert_eq!(system.violation_cost(&values), 1);

        let same_day = vec![
            RawBlockValue::block(Day::Monday, 1, 5),
            RawBlockValue::block(Day::Monday, 10, 14),
            RawBlockValue::block(Day::Friday, 10, 18),
            RawBlockValue::absent(),
        ];
        assert!(!system.is_feasible(&same_day));

        let short = vec![
            RawBlockValue::block(Day::Monday, 1, 5),
            RawBlockValue::absent(),
            RawBlockValue::block(Day::Friday, 10, 18),
            RawBlockValue::absent(),
        ];
        assert!(!system.is_feasible(&short));
    }

    #[test]
    fn test_forbidden_and_min_length() {
        let values = vec![RawBlockValue::block(Day::Wednesday, 4, 6)];
        assert!(!Constraint::Forbidden {
            var: 0,
            day: Day::Wednesday,
            time: 6
        }
        .is_satisfied(&values));
        assert!(Constraint::Forbidden {
            var: 0,
            day: Day::Wednesday,
            time: 7
        }
        .is_satisfied(&values));
        assert!(!Constraint::MinLength { var: 0, min: 4 }.is_satisfied(&values));
        assert!(Constraint::MinLength { var: 0, min: 4 }.is_satisfied(&[RawBlockValue::absent()]));
    }

    #[test]
    fn test_components_split_students() {
        let system = two_student_system();
        let components = system.components();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].var_map, vec![0, 1]);
        assert_eq!(components[1].var_map, vec![2, 3]);
        for component in &components {
            assert_eq!(component.system.var_count(), 2);
            assert_eq!(component.system.constraint_count(), 3);
            assert_eq!(component.system.soft_count(), 1);
            assert!(component.system.validate().is_ok());
            assert_eq!(component.system.objective, Some(Objective::MinimizeViolations));
        }
        assert_eq!(components[1].system.vars[0].name, "b_0");
    }

    #[test]
    fn test_unconstrained_vars_are_singletons() {
        let mut system = ConstraintSystem::new("test", 1, 40);
        system.add_var(BlockVar::new("x_0", "x", 0, 1, 40));
        system.add_var(BlockVar::new("y_0", "y", 0, 1, 40));
        assert_eq!(system.components().len(), 2);
    }
}
