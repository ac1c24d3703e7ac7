//! Builds the tag table and scope forest from annotations

use super::super::domain::{Analysis, TagStyle};
use super::annotation_parser::parse_annotations;
use crate::errors::{Result, SynthError};
use crate::shared::models::{Tag, Var};
use tracing::debug;

/// Analyze annotated source text
///
/// Pure function of the text: running it twice on the same source yields
/// identical tables. Fails on a repeated tag id or a scope recorded under
/// two different parents.
pub fn analyze(source: &str) -> Result<Analysis> {
    let mut analysis = Analysis::default();

    for annotation in parse_annotations(source)? {
        let var = Var::new(
            annotation.expression.clone(),
            &annotation.raw_type,
            annotation.scope_id,
        );
        let tag = Tag::new(
            annotation.id,
            annotation.text,
            annotation.style == TagStyle::Statement,
            annotation.statement_id,
            var,
        );

        if !analysis.tags.insert(tag) {
            return Err(SynthError::DuplicateTagId(annotation.id));
        }
        analysis
            .scopes
            .record_link(annotation.scope_id, annotation.parent_scope_id)?;
    }

    debug!(
        tags = analysis.tags.len(),
        scopes = analysis.scopes.len(),
        "static analysis complete"
    );
    Ok(analysis)
}
