//! Scope Model
//!
//! Child → parent links between lexical scope ids, extracted from tag
//! annotations, and the visibility query environment selection relies on.

pub mod domain;

pub use domain::ScopeForest;
