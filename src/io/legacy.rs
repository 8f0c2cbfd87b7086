//! Legacy availability grid.
//!
//! One grid per student. The header names the days; each following
//! row starts with a time (a unit number or `H:MM`) and holds one cell
//! per day: `x` impossible, `2` avoided, anything else available.
//!
//! ```text
//! time,Monday,Tuesday,Wednesday
//! 9:00,x,,2
//! 9:15,x,1,2
//! ```
//!
//! Prefer the per-student row format; this adapter exists for old
//! exports and produces the same [`StudentRequest`].

use super::{csv_error, csv_reader, record_line};
use crate::error::{Error, Result};
use crate::model::StudentRequest;
use crate::time::{Day, TimeGrid, TimeUnit};

/// Parses a legacy grid into one request.
///
/// # Examples
///
/// ```
/// use u_timeblock::io::parse_legacy_grid;
/// use u_timeblock::time::{Day, TimeGrid};
///
/// let text = "time,Mon,Tue\n9:00,x,2\n9:15,,x\n";
/// let request = parse_legacy_grid(text, "dana", 16, &TimeGrid::default()).unwrap();
/// assert!(request.is_impossible(Day::Monday, 1));
/// assert!(request.is_avoided(Day::Tuesday, 1));
/// assert!(request.is_impossible(Day::Tuesday, 2));
/// ```
pub fn parse_legacy_grid(
    text: &str,
    student_id: &str,
    required_units: TimeUnit,
    grid: &TimeGrid,
) -> Result<StudentRequest> {
    grid.validate()?;
    let mut records = Vec::new();
    for (index, record) in csv_reader(text.as_bytes()).records().enumerate() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        records.push((record_line(&record, index + 1), record));
    }
    let mut rows = records.iter();

    let (header_line, header) = rows
        .next()
        .ok_or_else(|| Error::parse(1, "missing header row"))?;
    let days = header
        .iter()
        .skip(1)
        .map(|cell| {
            cell.parse::<Day>()
                .map_err(|e| Error::parse(*header_line, e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut request = StudentRequest::new(student_id, required_units);
    for (number, record) in rows {
        let time_cell = record.get(0).unwrap_or_default();
        let unit = parse_time_cell(time_cell, grid)
            .ok_or_else(|| Error::parse(*number, format!("unreadable time {time_cell:?}")))?;

        let marks = record.len() - 1;
        if marks > days.len() {
            return Err(Error::parse(
                *number,
                format!("{marks} cells for {} days", days.len()),
            ));
        }
        for (&day, mark) in days.iter().zip(record.iter().skip(1)) {
            if mark.eq_ignore_ascii_case("x") {
                request.mark_impossible(day, unit);
            } else if mark == "2" {
                request.mark_avoid(day, unit);
            }
        }
    }
    Ok(request)
}

/// A unit number, or a wall-clock `H:MM` on the grid.
fn parse_time_cell(cell: &str, grid: &TimeGrid) -> Option<TimeUnit> {
    match cell.split_once(':') {
        Some((hour, minute)) => grid.quantize(hour.parse().ok()?, minute.parse().ok()?),
        None => cell.parse().ok().filter(|&u| grid.contains(u)),
    }
}
