//! Slot assignments and complete schedules.

use std::collections::BTreeMap;

use crate::time::{Day, TimeUnit};

use super::block::TimeBlock;

/// The fixed-length slot sequence of one student.
///
/// Slot order carries no meaning; slots are positional only so that a
/// backend can address them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotAssignment {
    blocks: Vec<TimeBlock>,
}

impl SlotAssignment {
    /// Creates an assignment from its slots.
    pub fn new(blocks: Vec<TimeBlock>) -> Self {
        Self { blocks }
    }

    /// All slots, including unassigned ones.
    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    /// Number of slots.
    pub fn slot_count(&self) -> usize {
        self.blocks.len()
    }

    /// Assigned blocks only, in slot order.
    pub fn assigned(&self) -> impl Iterator<Item = &TimeBlock> + '_ {
        self.blocks.iter().filter(|b| b.is_assigned())
    }

    /// Assigned blocks sorted by day then start.
    pub fn assigned_by_day(&self) -> Vec<TimeBlock> {
        let mut blocks: Vec<TimeBlock> = self.assigned().copied().collect();
        blocks.sort_by_key(|b| match b {
            TimeBlock::Assigned { day, start, .. } => (Some(*day), *start),
            TimeBlock::Unassigned => (None, 0),
        });
        blocks
    }

    /// Number of assigned slots.
    pub fn assigned_count(&self) -> usize {
        self.assigned().count()
    }

    /// Sum of assigned block lengths.
    pub fn total_units(&self) -> TimeUnit {
        self.blocks.iter().map(TimeBlock::length).sum()
    }

    /// Whether any assigned block covers `(day, time)`.
    pub fn covers(&self, day: Day, time: TimeUnit) -> bool {
        self.blocks.iter().any(|b| b.covers(day, time))
    }
}

/// Assignments for every student, keyed by student id.
///
/// A schedule is built in one step from a complete set of assignments
/// and is not modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    assignments: BTreeMap<String, SlotAssignment>,
}

impl Schedule {
    /// Assignment of one student.
    pub fn get(&self, student_id: &str) -> Option<&SlotAssignment> {
        self.assignments.get(student_id)
    }

    /// Iterates `(student id, assignment)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotAssignment)> + '_ {
        self.assignments.iter().map(|(id, a)| (id.as_str(), a))
    }

    /// Student ids in order.
    pub fn student_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.assignments.keys().map(String::as_str)
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Total number of assigned blocks across all students.
    pub fn block_count(&self) -> usize {
        self.assignments.values().map(SlotAssignment::assigned_count).sum()
    }
}

impl FromIterator<(String, SlotAssignment)> for Schedule {
    fn from_iter<I: IntoIterator<Item = (String, SlotAssignment)>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Schedule {
    type Item = (String, SlotAssignment);
    type IntoIter = std::collections::btree_map::IntoIter<String, SlotAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SlotAssignment {
        SlotAssignment::new(vec![
            TimeBlock::Assigned {
                day: Day::Wednesday,
                start: 10,
                end: 18,
            },
            TimeBlock::Unassigned,
            TimeBlock::Assigned {
                day: Day::Monday,
                start: 1,
                end: 9,
            },
        ])
    }

    #[test]
    fn test_slot_assignment_counts() {
        let a = sample();
        assert_eq!(a.slot_count(), 3);
        assert_eq!(a.assigned_count(), 2);
        assert_eq!(a.total_units(), 16);
        assert!(a.covers(Day::Monday, 9));
        assert!(!a.covers(Day::Tuesday, 9));
    }

    #[test]
    fn test_assigned_by_day() {
        let days: Vec<_> = sample()
            .assigned_by_day()
            .iter()
            .filter_map(TimeBlock::day)
            .collect();
        assert_eq!(days, vec![Day::Monday, Day::Wednesday]);
    }

    #[test]
    fn test_schedule_from_iter() {
        let schedule: Schedule = vec![
            ("zoe".to_string(), sample()),
            ("adam".to_string(), SlotAssignment::new(vec![TimeBlock::Unassigned])),
        ]
        .into_iter()
        .collect();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.student_ids().collect::<Vec<_>>(), vec!["adam", "zoe"]);
        assert_eq!(schedule.block_count(), 2);
        assert!(schedule.get("zoe").is_some());
        assert!(schedule.get("nobody").is_none());
    }
}
