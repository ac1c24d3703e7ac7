//! Common test utilities for csynth-core
//!
//! Scripted toolchain, seed fixtures and a small C integer-expression
//! evaluator for checking what substitutions compute.

#![allow(dead_code)]

mod backend;
mod c_eval;
mod fixtures;

pub use backend::*;
pub use c_eval::*;
pub use fixtures::*;
