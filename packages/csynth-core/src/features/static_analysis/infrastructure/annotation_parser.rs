//! Annotation scanner
//!
//! The header is matched by regex; the wrapped expression is then taken up
//! to the balanced closing parenthesis so `a[(i+1)]` or `f(x)` stay whole.

use super::super::domain::{Annotation, TagStyle};
use crate::errors::{Result, SynthError};
use crate::shared::utils::closing_paren;
use once_cell::sync::Lazy;
use regex::Regex;

static ANNOTATION_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bTag(\d+)\(/\*([^:]*):(-?\d+):(-?\d+):(-?\d+):(\w+)\*/")
        .expect("annotation header regex")
});

/// Every annotation in source order; nested annotations are reported too
pub fn parse_annotations(source: &str) -> Result<Vec<Annotation>> {
    let mut annotations = Vec::new();

    for caps in ANNOTATION_HEADER.captures_iter(source) {
        let (Some(whole), Some(id), Some(raw_type), Some(scope), Some(parent), Some(stmt), Some(style)) = (
            caps.get(0),
            caps.get(1),
            caps.get(2),
            caps.get(3),
            caps.get(4),
            caps.get(5),
            caps.get(6),
        ) else {
            continue;
        };

        let close = closing_paren(source, whole.end())
            .ok_or_else(|| SynthError::splice(whole.as_str()))?;

        annotations.push(Annotation {
            id: parse_int(id.as_str(), whole.as_str())?,
            raw_type: raw_type.as_str().trim().to_string(),
            scope_id: parse_int(scope.as_str(), whole.as_str())?,
            parent_scope_id: parse_int(parent.as_str(), whole.as_str())?,
            statement_id: parse_int(stmt.as_str(), whole.as_str())?,
            style: TagStyle::from_letter(style.as_str()),
            expression: source[whole.end()..close].to_string(),
            text: source[whole.start()..=close].to_string(),
            offset: whole.start(),
        });
    }

    Ok(annotations)
}

fn parse_int<T: std::str::FromStr>(digits: &str, context: &str) -> Result<T> {
    digits
        .parse()
        .map_err(|_| SynthError::splice(format!("{context} (bad number {digits})")))
}
