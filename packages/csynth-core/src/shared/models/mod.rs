//! Core data model: C scalar types, tagged variables and tags

pub mod c_type;
pub mod tag;
pub mod var;

pub use c_type::{c_literal, strip_type_qualifiers, CType, ScalarType};
pub use tag::{Tag, TagTable};
pub use var::Var;
