//! Avoid-point violation reporting.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Point, Schedule, StudentRequest};

/// The avoid points each student's schedule actually covers.
///
/// Only students with at least one covered point appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViolationReport {
    covered: BTreeMap<String, BTreeSet<Point>>,
}

impl ViolationReport {
    /// Collects, per student, the avoid points covered by `schedule`.
    ///
    /// Students absent from the schedule cover nothing.
    pub fn compute(schedule: &Schedule, requests: &[StudentRequest]) -> Self {
        let covered = requests
            .iter()
            .filter_map(|request| {
                let assignment = schedule.get(request.id())?;
                let points: BTreeSet<Point> = request
                    .avoid()
                    .iter()
                    .copied()
                    .filter(|&(day, time)| assignment.covers(day, time))
                    .collect();
                (!points.is_empty()).then(|| (request.id().to_string(), points))
            })
            .collect();
        Self { covered }
    }

    /// Covered avoid points of one student.
    pub fn covered(&self, student_id: &str) -> Option<&BTreeSet<Point>> {
        self.covered.get(student_id)
    }

    /// Iterates `(student id, covered points)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Point>)> + '_ {
        self.covered.iter().map(|(id, points)| (id.as_str(), points))
    }

    /// Total number of covered `(student, avoid point)` pairs.
    pub fn total(&self) -> usize {
        self.covered.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }

    pub(crate) fn merge(&mut self, other: ViolationReport) {
        for (id, points) in other.covered {
            self.covered.entry(id).or_default().extend(points);
        }
    }
}
