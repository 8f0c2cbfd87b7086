//! Entity model.
//!
//! - [`TimeBlock`]: an assigned block or the explicit `Unassigned` marker
//! - [`StudentRequest`]: required units plus impossible and avoid points
//! - [`SlotAssignment`]: one student's fixed-length slot sequence
//! - [`Schedule`]: assignments for every student, keyed by id
//!
//! All types are plain values, built once per solve.

mod block;
mod request;
mod schedule;

pub use block::TimeBlock;
pub use request::{Point, StudentRequest};
pub use schedule::{Schedule, SlotAssignment};
