//! Weekly time-block allocation.
//!
//! Given students who each need a fixed amount of time spread over
//! distinct weekdays, with hard *impossible* points and soft *avoid*
//! points, produce one set of blocks per student that meets every hard
//! constraint and covers as few avoid points as possible.
//!
//! - **time**: weekdays, the quantization grid, interval predicates.
//! - **model**: `TimeBlock`, `StudentRequest`, `SlotAssignment`, `Schedule`.
//! - **compile**: requests to a declarative constraint system.
//! - **cp**: the constraint system, the `SolverBackend` contract, and an
//!   exact backtracking backend.
//! - **extract**: backend values back to verified schedules.
//! - **planner**: the compile, solve, extract pipeline, joint or per student.
//! - **io**: CSV adapters and text rendering.
//!
//! # Architecture
//!
//! The compiler never searches and the extractor never guesses: all
//! combinatorial work happens behind [`cp::SolverBackend`], so any engine
//! honoring its contract can replace the bundled one.
//!
//! ```
//! use u_timeblock::model::StudentRequest;
//! use u_timeblock::planner::Planner;
//! use u_timeblock::time::Day;
//!
//! let requests = vec![
//!     StudentRequest::new("alice", 16).with_impossible_range(Day::Monday, 1..=40),
//!     StudentRequest::new("bob", 12).with_avoid(Day::Tuesday, 10),
//! ];
//! let outcome = Planner::default().plan(&requests).unwrap();
//! assert!(outcome.is_solved());
//! ```

pub mod compile;
pub mod cp;
pub mod error;
pub mod extract;
pub mod io;
pub mod model;
pub mod planner;
pub mod time;

pub use error::{Error, Result};
