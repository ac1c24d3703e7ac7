//! Tags and the per-pass tag table

use super::var::Var;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static NESTED_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bTag\d+\(/\*").expect("nested annotation regex"));

/// One annotated site eligible for substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: u32,

    /// Verbatim annotation text, used for exact-match splicing
    pub original_text: String,

    /// Wraps a whole statement rather than a sub-expression
    pub is_statement: bool,

    /// Key of the matching `bef_stmt`/`aft_stmt` markers
    pub statement_id: i64,

    pub primary_var: Var,

    /// Fixed at instrumentation time
    pub environment: Vec<Var>,

    /// Every snippet instrumentation inserted for this tag
    pub instrumentation_strings: Vec<String>,

    /// Direct call that replaced `original_text` in the instrumented source
    pub inline_call: Option<String>,
}

impl Tag {
    pub fn new(
        id: u32,
        original_text: impl Into<String>,
        is_statement: bool,
        statement_id: i64,
        primary_var: Var,
    ) -> Self {
        Self {
            id,
            original_text: original_text.into(),
            is_statement,
            statement_id,
            primary_var,
            environment: Vec::new(),
            instrumentation_strings: Vec::new(),
            inline_call: None,
        }
    }

    /// Stable primary (if any) followed by stable environment variables, in order
    pub fn stable_vars(&self) -> Vec<&Var> {
        std::iter::once(&self.primary_var)
            .chain(self.environment.iter())
            .filter(|var| var.stable_value().is_some())
            .collect()
    }

    /// The wrapped expression holds another tag's annotation
    ///
    /// Such a tag is an enclosing tag: its expression text is not a plain
    /// variable, so it is neither instrumented, used as environment nor
    /// substituted. The tags nested inside it are.
    pub fn encloses_annotation(&self) -> bool {
        NESTED_ANNOTATION.is_match(&self.primary_var.name)
    }

    /// `Tag<id>(/*type:scope:parent:stmt:style*/`, the annotation minus its expression
    pub fn annotation_head(&self) -> &str {
        match self.original_text.find("*/") {
            Some(end) => &self.original_text[..end + 2],
            None => &self.original_text,
        }
    }

    /// Whether `source` still calls `Tag<id>(` outside its stub definition
    pub fn is_called_in(&self, source: &str) -> bool {
        let call = format!("Tag{}(", self.id);
        source.match_indices(&call).any(|(at, _)| {
            let before = &source[..at];
            let ident_char = before
                .chars()
                .next_back()
                .map_or(false, |c| c.is_ascii_alphanumeric() || c == '_');
            !ident_char && !before.ends_with("#define ")
        })
    }

    /// `#define Tag<id>(x) (x)` as emitted by the profiler
    pub fn stub_define(&self) -> String {
        format!("#define Tag{}(x) (x)", self.id)
    }

    pub fn before_marker(&self) -> String {
        format!("/*bef_stmt:{}*/", self.statement_id)
    }

    pub fn after_marker(&self) -> String {
        format!("/*aft_stmt:{}*/", self.statement_id)
    }
}

/// Tags of one analysis pass keyed by id (ascending iteration)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable {
    tags: BTreeMap<u32, Tag>,
}

impl TagTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tag; returns false (and leaves the table unchanged) on a duplicate id
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.tags.contains_key(&tag.id) {
            return false;
        }
        self.tags.insert(tag.id, tag);
        true
    }

    pub fn get(&self, id: u32) -> Option<&Tag> {
        self.tags.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Tag> {
        self.tags.get_mut(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.tags.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Ids in ascending order
    pub fn ids(&self) -> Vec<u32> {
        self.tags.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tag> {
        self.tags.values_mut()
    }
}
