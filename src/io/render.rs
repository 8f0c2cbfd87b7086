//! Text rendering of schedules.

use std::fmt::Write;

use crate::model::{Schedule, TimeBlock};
use crate::time::TimeGrid;

/// Renders one assigned block as `"<Day>: <h>:<mm> to <h>:<mm>"`.
///
/// Returns `None` for [`TimeBlock::Unassigned`].
///
/// # Examples
///
/// ```
/// use u_timeblock::io::render_block;
/// use u_timeblock::model::TimeBlock;
/// use u_timeblock::time::{Day, TimeGrid};
///
/// let block = TimeBlock::Assigned { day: Day::Tuesday, start: 1, end: 9 };
/// assert_eq!(
///     render_block(&block, &TimeGrid::default()).as_deref(),
///     Some("Tuesday: 9:00 to 11:00")
/// );
/// ```
pub fn render_block(block: &TimeBlock, grid: &TimeGrid) -> Option<String> {
    let TimeBlock::Assigned { day, start, end } = *block else {
        return None;
    };
    let (start_hour, start_minute) = grid.dequantize(start);
    let (end_hour, end_minute) = grid.dequantize(end);
    Some(format!(
        "{day}: {start_hour}:{start_minute:02} to {end_hour}:{end_minute:02}"
    ))
}

/// Renders a whole schedule.
///
/// Each student gets a `"<id>:"` line followed by one indented line per
/// assigned block, sorted by day. Students come in id order; unassigned
/// slots are omitted.
pub fn render_schedule(schedule: &Schedule, grid: &TimeGrid) -> String {
    let mut out = String::new();
    for (id, assignment) in schedule.iter() {
        let _ = writeln!(out, "{id}:");
        for block in assignment.assigned_by_day() {
            if let Some(line) = render_block(&block, grid) {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
    out
}
