//! Canonical per-student rows.
//!
//! One student per line:
//!
//! ```text
//! name,num_hours,fieldname_1,status_1,fieldname_2,status_2,...
//! ```
//!
//! A fieldname `"<day><hour>.<quarter>"` names a point: the first digit
//! is the day index (0 = Monday), the rest is the wall-clock hour and a
//! 1-based sub-hour index. Status `1` marks the point available, `x`
//! (any case) impossible, anything else avoided.

use std::io::Read;

use super::{csv_error, csv_reader, record_line};
use crate::error::{Error, Result};
use crate::model::{Point, StudentRequest};
use crate::time::{Day, TimeGrid, TimeUnit};

/// Decodes a fieldname into a point.
///
/// The unit is `(hour - start_hour) * units_per_hour + quarter`, with a
/// 1-based `quarter` in `1..=units_per_hour`. A quarter of `0` is
/// rejected rather than read as the previous hour's last unit, so
/// `"310.0"` is `None`; write `"39.4"` for that instant.
///
/// Returns `None` for malformed names, for points outside the grid, and
/// when `grid` itself does not validate.
///
/// # Examples
///
/// ```
/// use u_timeblock::io::parse_fieldname;
/// use u_timeblock::time::{Day, TimeGrid};
///
/// let grid = TimeGrid::default();
/// assert_eq!(parse_fieldname("39.1", &grid), Some((Day::Thursday, 1)));
/// assert_eq!(parse_fieldname("310.1", &grid), Some((Day::Thursday, 5)));
/// assert_eq!(parse_fieldname("99.1", &grid), None);
/// ```
pub fn parse_fieldname(field: &str, grid: &TimeGrid) -> Option<Point> {
    grid.validate().ok()?;
    let field = field.trim();
    let day_digit = field.chars().next()?.to_digit(10)?;
    let day = Day::from_index(day_digit as usize)?;
    let (hour, quarter) = field.get(1..)?.split_once('.')?;
    let hour: TimeUnit = hour.parse().ok()?;
    let quarter: TimeUnit = quarter.parse().ok()?;
    if quarter < 1 || quarter > grid.units_per_hour() {
        return None;
    }
    let unit = hour
        .checked_sub(TimeUnit::from(grid.start_hour))?
        .checked_mul(grid.units_per_hour())?
        .checked_add(quarter)?;
    grid.contains(unit).then_some((day, unit))
}

/// Parses canonical rows from a string.
///
/// Cells follow CSV quoting, so a quoted name may contain commas.
/// Blank lines are skipped, as is a leading header row whose first cell
/// is `name`. Any malformed row fails the whole batch.
pub fn parse_student_rows(text: &str, grid: &TimeGrid) -> Result<Vec<StudentRequest>> {
    read_student_rows(text.as_bytes(), grid)
}

/// Parses canonical rows from a reader.
pub fn read_student_rows<R: Read>(reader: R, grid: &TimeGrid) -> Result<Vec<StudentRequest>> {
    grid.validate()?;
    let mut requests = Vec::new();
    let mut first = true;
    for (index, record) in csv_reader(reader).records().enumerate() {
        let record = record.map_err(csv_error)?;
        let number = record_line(&record, index + 1);
        let cells: Vec<&str> = record.iter().collect();
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        if std::mem::take(&mut first) && cells[0].eq_ignore_ascii_case("name") {
            continue;
        }
        requests.push(parse_row(&cells, number, grid)?);
    }
    Ok(requests)
}

fn parse_row(cells: &[&str], line: usize, grid: &TimeGrid) -> Result<StudentRequest> {
    let [name, hours, pairs @ ..] = cells else {
        return Err(Error::parse(line, "expected name and num_hours"));
    };
    if name.is_empty() {
        return Err(Error::parse(line, "empty student name"));
    }
    let hours: i64 = hours
        .parse()
        .map_err(|_| Error::parse(line, format!("num_hours {hours:?} is not an integer")))?;
    let required = grid
        .units_for_hours(hours)
        .ok_or_else(|| Error::parse(line, format!("num_hours {hours} is out of range")))?;

    // spreadsheet exports pad rows with empty cells; an odd leftover is
    // the empty status of the last fieldname
    let trailing = pairs.iter().rev().take_while(|c| c.is_empty()).count();
    let mut used = pairs.len() - trailing;
    if used % 2 == 1 && trailing > 0 {
        used += 1;
    }
    let pairs = &pairs[..used];
    if pairs.len() % 2 != 0 {
        return Err(Error::parse(line, "fieldname without a status"));
    }

    let mut impossible = Vec::new();
    let mut avoid = Vec::new();
    for pair in pairs.chunks_exact(2) {
        let (field, status) = (pair[0], pair[1]);
        let point = parse_fieldname(field, grid)
            .ok_or_else(|| Error::parse(line, format!("unreadable fieldname {field:?}")))?;
        if status == "1" {
            continue;
        }
        if status.eq_ignore_ascii_case("x") {
            impossible.push(point);
        } else {
            avoid.push(point);
        }
    }

    let mut request = StudentRequest::new(*name, required);
    for (day, time) in avoid {
        request.mark_avoid(day, time);
    }
    for (day, time) in impossible {
        request.mark_impossible(day, time);
    }
    Ok(request)
}
