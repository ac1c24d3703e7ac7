//! Static Analyzer
//!
//! Parses `Tag<id>(/*<type>:<scope>:<parent>:<stmt>:<style>*/<expr>)`
//! annotations into one `Tag`/`Var` pair each and fills the scope forest.

pub mod domain;
pub mod infrastructure;

pub use domain::{Analysis, Annotation, TagStyle};
pub use infrastructure::{analyze, parse_annotations};
