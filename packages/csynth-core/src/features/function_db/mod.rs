//! Function database
//!
//! Read-only collection of verified C functions with confirmed
//! (inputs, output) pairs, loaded once and shared by every mutant.

pub mod domain;
pub mod infrastructure;

pub use domain::{Function, IoPair};
pub use infrastructure::FunctionDb;
