//! Input adapters and output rendering.
//!
//! - [`parse_student_rows`] / [`read_student_rows`]: the canonical
//!   per-student row format
//! - [`parse_legacy_grid`]: the older one-grid-per-student format
//! - [`render_schedule`]: human-readable output
//!
//! Every adapter produces plain [`StudentRequest`](crate::model::StudentRequest)s;
//! a malformed record fails the whole batch with
//! [`Error::Parse`](crate::Error::Parse).

mod legacy;
mod render;
mod rows;

pub use legacy::parse_legacy_grid;
pub use render::{render_block, render_schedule};
pub use rows::{parse_fieldname, parse_student_rows, read_student_rows};

use std::io::Read;

use crate::error::Error;

/// Headerless reader with trimmed cells; rows may differ in width.
fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn csv_error(err: csv::Error) -> Error {
    let line = err.position().map_or(0, |p| p.line() as usize);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => Error::Io(e),
        _ => Error::parse(line, message),
    }
}

/// 1-based line on which `record` starts.
fn record_line(record: &csv::StringRecord, fallback: usize) -> usize {
    record.position().map_or(fallback, |p| p.line() as usize)
}
