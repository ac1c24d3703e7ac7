//! Text and randomness utilities shared across features
//!
//! - `splice`: exact-text, first-match source rewriting
//! - `rng`: per-mutant seeded random streams

pub mod rng;
pub mod splice;

pub use rng::{derive_rng, resolve_seed};
pub use splice::{closing_paren, replace_first, replace_first_if_present, unwrap_first_call};
