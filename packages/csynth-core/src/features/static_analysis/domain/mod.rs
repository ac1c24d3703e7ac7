//! Domain types for annotation analysis

use crate::features::scope_model::ScopeForest;
use crate::shared::models::TagTable;

/// Whether a tag wraps a statement or a sub-expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStyle {
    Statement,
    Expression,
}

impl TagStyle {
    /// `s` is a statement; every other style letter is an expression
    pub fn from_letter(letter: &str) -> Self {
        if letter == "s" {
            TagStyle::Statement
        } else {
            TagStyle::Expression
        }
    }
}

/// One annotation exactly as it appears in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub id: u32,
    pub raw_type: String,
    pub scope_id: i64,
    pub parent_scope_id: i64,
    pub statement_id: i64,
    pub style: TagStyle,
    /// Wrapped expression (the primary variable's name)
    pub expression: String,
    /// Full annotation text from `Tag` to the balanced closing parenthesis
    pub text: String,
    /// Byte offset of `text` in the source
    pub offset: usize,
}

/// Result of one analysis pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub tags: TagTable,
    pub scopes: ScopeForest,
}
