//! Per-student scheduling requests.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::time::{Day, TimeUnit};

/// An instant on a given day.
pub type Point = (Day, TimeUnit);

/// What one student needs from the schedule.
///
/// `impossible` points are hard exclusions; `avoid` points are soft.
/// The two sets are kept disjoint: marking a point impossible removes
/// it from `avoid`, and marking an impossible point as avoided is a no-op.
///
/// # Examples
///
/// ```
/// use u_timeblock::model::StudentRequest;
/// use u_timeblock::time::Day;
///
/// let request = StudentRequest::new("alice", 16)
///     .with_avoid(Day::Monday, 5)
///     .with_impossible(Day::Monday, 5)
///     .with_impossible_range(Day::Friday, 1..=8);
///
/// assert!(request.is_impossible(Day::Monday, 5));
/// assert!(!request.is_avoided(Day::Monday, 5));
/// assert_eq!(request.impossible().len(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRequest {
    id: String,
    required_units: TimeUnit,
    impossible: BTreeSet<Point>,
    avoid: BTreeSet<Point>,
}

impl StudentRequest {
    /// Creates a request with no exclusions.
    pub fn new(id: impl Into<String>, required_units: TimeUnit) -> Self {
        Self {
            id: id.into(),
            required_units,
            impossible: BTreeSet::new(),
            avoid: BTreeSet::new(),
        }
    }

    /// Marks a point impossible.
    pub fn with_impossible(mut self, day: Day, time: TimeUnit) -> Self {
        self.mark_impossible(day, time);
        self
    }

    /// Marks every point of a range impossible.
    pub fn with_impossible_range(mut self, day: Day, times: RangeInclusive<TimeUnit>) -> Self {
        for time in times {
            self.mark_impossible(day, time);
        }
        self
    }

    /// Marks a point as one to avoid.
    pub fn with_avoid(mut self, day: Day, time: TimeUnit) -> Self {
        self.mark_avoid(day, time);
        self
    }

    /// Marks every point of a range as one to avoid.
    pub fn with_avoid_range(mut self, day: Day, times: RangeInclusive<TimeUnit>) -> Self {
        for time in times {
            self.mark_avoid(day, time);
        }
        self
    }

    pub(crate) fn mark_impossible(&mut self, day: Day, time: TimeUnit) {
        self.avoid.remove(&(day, time));
        self.impossible.insert((day, time));
    }

    pub(crate) fn mark_avoid(&mut self, day: Day, time: TimeUnit) {
        if !self.impossible.contains(&(day, time)) {
            self.avoid.insert((day, time));
        }
    }

    /// Student identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Total units to schedule.
    pub fn required_units(&self) -> TimeUnit {
        self.required_units
    }

    /// Hard exclusions, ordered by day then time.
    pub fn impossible(&self) -> &BTreeSet<Point> {
        &self.impossible
    }

    /// Soft exclusions, ordered by day then time.
    pub fn avoid(&self) -> &BTreeSet<Point> {
        &self.avoid
    }

    pub fn is_impossible(&self, day: Day, time: TimeUnit) -> bool {
        self.impossible.contains(&(day, time))
    }

    pub fn is_avoided(&self, day: Day, time: TimeUnit) -> bool {
        self.avoid.contains(&(day, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request() {
        let r = StudentRequest::new("bob", 8);
        assert_eq!(r.id(), "bob");
        assert_eq!(r.required_units(), 8);
        assert!(r.impossible().is_empty());
        assert!(r.avoid().is_empty());
    }

    #[test]
    fn test_impossible_wins_over_avoid() {
        let r = StudentRequest::new("bob", 8)
            .with_avoid(Day::Tuesday, 3)
            .with_impossible(Day::Tuesday, 3);
        assert!(r.is_impossible(Day::Tuesday, 3));
        assert!(!r.is_avoided(Day::Tuesday, 3));

        let r = r.with_avoid(Day::Tuesday, 3);
        assert!(r.avoid().is_empty());
    }

    #[test]
    fn test_ranges() {
        let r = StudentRequest::new("carol", 4)
            .with_impossible_range(Day::Monday, 1..=4)
            .with_avoid_range(Day::Monday, 3..=6);
        assert_eq!(r.impossible().len(), 4);
        // 3 and 4 are already impossible
        assert_eq!(
            r.avoid().iter().copied().collect::<Vec<_>>(),
            vec![(Day::Monday, 5), (Day::Monday, 6)]
        );
    }
}
