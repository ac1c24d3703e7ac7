//! Feature modules, in pipeline order
//!
//! scope_model → static_analysis → instrumentation → (toolchain) →
//! stability → synthesis, with function_db feeding synthesis.

pub mod function_db;
pub mod instrumentation;
pub mod scope_model;
pub mod stability;
pub mod static_analysis;
pub mod synthesis;
pub mod toolchain;
