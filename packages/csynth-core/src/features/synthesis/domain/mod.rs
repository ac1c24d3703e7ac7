//! Overflow-safe expression construction

mod call_builder;
mod input;
mod output;

pub use call_builder::{build_substitution, Substitution};
pub use input::synthesize_inputs;
pub use output::{synthesize_output, OutputTerms};
