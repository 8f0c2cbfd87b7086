//! Constraint compiler.
//!
//! Turns a batch of [`StudentRequest`](crate::model::StudentRequest)s
//! and a [`CompilerConfig`] into a [`ConstraintSystem`](crate::cp::ConstraintSystem).
//! The output is purely declarative; no search happens here.

mod compiler;
mod config;

pub use compiler::ConstraintCompiler;
pub use config::CompilerConfig;
