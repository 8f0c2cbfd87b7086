//! Result extraction.
//!
//! Maps raw backend values to [`TimeBlock`](crate::model::TimeBlock)s
//! through one total decode step, groups them per student, re-checks
//! the hard constraints, and reports which avoid points were covered.

mod extractor;
mod report;

pub use extractor::{ExtractedSchedule, Extraction, ResultExtractor};
pub use report::ViolationReport;
