//! Stability Tracker
//!
//! Reads the instrumented program's output and decides which tags executed
//! and which of their variables held a single, corroborated value.

pub mod domain;
pub mod infrastructure;

pub use domain::{Observation, StabilityReport};
pub use infrastructure::{parse_profile, track_stability};
