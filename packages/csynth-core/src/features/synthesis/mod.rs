//! Expression Synthesizer
//!
//! Turns alive tags into calls of verified functions whose arithmetic
//! disguise nets out exactly, then assembles whole mutants.

pub mod domain;
pub mod infrastructure;

pub use domain::{
    build_substitution, synthesize_inputs, synthesize_output, OutputTerms, Substitution,
};
pub use infrastructure::{
    insert_declarations, strip_tag_residue, synthesize_mutant, MutantOptions, MutantText,
};
