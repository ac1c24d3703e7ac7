mod analyzer;
mod annotation_parser;

pub use analyzer::analyze;
pub use annotation_parser::parse_annotations;
