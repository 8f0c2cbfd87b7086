//! Time model: weekdays, quantization, and interval predicates.
//!
//! All predicates are pure. Intervals are closed: a block `[start, end]`
//! covers both endpoints, so two blocks that merely touch overlap.

mod day;
mod grid;

pub use day::{Day, ParseDayError};
pub use grid::{TimeGrid, TimeUnit};

use crate::model::TimeBlock;

/// Closed-interval overlap test: `start1 <= end2 && start2 <= end1`.
#[inline]
pub fn intervals_overlap(start1: TimeUnit, end1: TimeUnit, start2: TimeUnit, end2: TimeUnit) -> bool {
    start1 <= end2 && start2 <= end1
}

/// Whether two blocks overlap on the same day.
///
/// `Unassigned` blocks overlap nothing.
pub fn overlaps(a: &TimeBlock, b: &TimeBlock) -> bool {
    match (a, b) {
        (
            TimeBlock::Assigned {
                day: day1,
                start: start1,
                end: end1,
            },
            TimeBlock::Assigned {
                day: day2,
                start: start2,
                end: end2,
            },
        ) => day1 == day2 && intervals_overlap(*start1, *end1, *start2, *end2),
        _ => false,
    }
}

/// Whether `block` covers the instant `(day, time)`.
pub fn covers_point(block: &TimeBlock, day: Day, time: TimeUnit) -> bool {
    match *block {
        TimeBlock::Assigned {
            day: block_day,
            start,
            end,
        } => block_day == day && start <= time && time <= end,
        TimeBlock::Unassigned => false,
    }
}
