//! Time blocks.

use std::fmt;

use crate::time::{self, Day, TimeGrid, TimeUnit};

/// A concrete block of time, or the explicit absence of one.
///
/// `Unassigned` is the only representation of "no block"; there are
/// no reserved day or time values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum TimeBlock {
    /// A block on `day` spanning `[start, end]`, with `start < end`.
    Assigned {
        day: Day,
        start: TimeUnit,
        end: TimeUnit,
    },
    /// No block.
    Unassigned,
}

impl TimeBlock {
    /// Creates an assigned block, checking `start < end` and grid bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_timeblock::model::TimeBlock;
    /// use u_timeblock::time::{Day, TimeGrid};
    ///
    /// let grid = TimeGrid::default();
    /// assert!(TimeBlock::assigned(Day::Monday, 1, 5, &grid).is_some());
    /// assert!(TimeBlock::assigned(Day::Monday, 5, 5, &grid).is_none());
    /// assert!(TimeBlock::assigned(Day::Monday, 30, 41, &grid).is_none());
    /// ```
    pub fn assigned(day: Day, start: TimeUnit, end: TimeUnit, grid: &TimeGrid) -> Option<Self> {
        (start < end && grid.contains(start) && grid.contains(end))
            .then_some(TimeBlock::Assigned { day, start, end })
    }

    /// Whether this is an `Assigned` block.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        matches!(self, TimeBlock::Assigned { .. })
    }

    /// Day of the block, if assigned.
    pub fn day(&self) -> Option<Day> {
        match self {
            TimeBlock::Assigned { day, .. } => Some(*day),
            TimeBlock::Unassigned => None,
        }
    }

    /// Block length in units (`end - start`); 0 when unassigned.
    pub fn length(&self) -> TimeUnit {
        match self {
            TimeBlock::Assigned { start, end, .. } => end - start,
            TimeBlock::Unassigned => 0,
        }
    }

    /// Whether the block covers `(day, time)`.
    #[inline]
    pub fn covers(&self, day: Day, time: TimeUnit) -> bool {
        time::covers_point(self, day, time)
    }

    /// Whether the block overlaps `other` on the same day.
    #[inline]
    pub fn overlaps(&self, other: &TimeBlock) -> bool {
        time::overlaps(self, other)
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBlock::Assigned { day, start, end } => write!(f, "{day} [{start}, {end}]"),
            TimeBlock::Unassigned => f.write_str("unassigned"),
        }
    }
}
