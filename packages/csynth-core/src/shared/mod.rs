//! Shared models and text utilities used by every feature

pub mod constants;
pub mod models;
pub mod utils;
