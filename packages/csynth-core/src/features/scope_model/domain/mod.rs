//! Scope forest domain model

mod scope_forest;

pub use scope_forest::{ScopeForest, GLOBAL_SCOPE};
