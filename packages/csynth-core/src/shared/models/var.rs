//! Tagged variable

use super::c_type::{strip_type_qualifiers, CType};
use crate::shared::constants::INVALID_TAG_VALUE;

/// A variable (or lvalue expression) read at a tag site
///
/// Stability starts true and can only degrade. Environment copies are
/// independent values, so a change recorded against one tag's copy never
/// leaks into another tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Var {
    /// Identifier or expression text, verbatim from the annotation
    pub name: String,

    /// Raw type with `const`/`static`/`volatile` stripped
    pub declared_type: String,

    /// Parsed form of `declared_type`
    pub c_type: CType,

    /// Scope id (0 = global)
    pub scope_id: i64,

    pub is_constant: bool,
    pub is_global: bool,

    is_stable: bool,
    observed_value: Option<i128>,
}

impl Var {
    pub fn new(name: impl Into<String>, raw_type: &str, scope_id: i64) -> Self {
        let declared_type = strip_type_qualifiers(raw_type);
        Self {
            name: name.into(),
            c_type: CType::parse(&declared_type),
            declared_type,
            scope_id,
            is_constant: raw_type.contains("const"),
            is_global: scope_id == 0,
            is_stable: true,
            observed_value: None,
        }
    }

    pub fn is_stable(&self) -> bool {
        self.is_stable
    }

    /// First value seen for this variable, if it ever printed
    pub fn observed_value(&self) -> Option<i128> {
        self.observed_value
    }

    /// Stable and observed: the only state in which the value may be relied on
    pub fn stable_value(&self) -> Option<i128> {
        if self.is_stable {
            self.observed_value
        } else {
            None
        }
    }

    pub fn mark_unstable(&mut self) {
        self.is_stable = false;
    }

    /// Feed one observation
    ///
    /// The first value is kept; any later differing value or any sentinel
    /// reading marks the variable unstable. Returns whether this was a
    /// re-observation (a value was already recorded).
    pub fn record_observation(&mut self, value: i128) -> bool {
        let seen_before = match self.observed_value {
            Some(first) => {
                if first != value {
                    self.is_stable = false;
                }
                true
            }
            None => {
                self.observed_value = Some(value);
                false
            }
        };
        if value == INVALID_TAG_VALUE {
            self.is_stable = false;
        }
        seen_before
    }

    /// Argument text for a tag-check call; dereferences get a null guard
    pub fn guarded_arg(&self) -> String {
        if self.name.contains('*') {
            format!("&({name})==0?{INVALID_TAG_VALUE}:{name}", name = self.name)
        } else {
            self.name.clone()
        }
    }
}
