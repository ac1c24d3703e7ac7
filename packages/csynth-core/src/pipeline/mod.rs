//! Single-seed pipeline: annotate → analyze → instrument → run → track

pub mod profiling;

pub use profiling::{profile_seed, ProfiledSeed};
