//! Arena-backed scope forest
//!
//! Scope ids are interned into dense indices; each slot holds the index of
//! its parent. A root links to itself, which is how the profiler reports
//! function bodies and the global scope. Walks are bounded by the number of
//! interned scopes, so a malformed cycle terminates.

use crate::errors::{Result, SynthError};
use std::collections::HashMap;

/// Scope id of file-level declarations
pub const GLOBAL_SCOPE: i64 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeForest {
    index: HashMap<i64, usize>,
    ids: Vec<i64>,
    parents: Vec<Option<usize>>,
}

impl Default for ScopeForest {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeForest {
    /// Empty forest containing only the global root
    pub fn new() -> Self {
        let mut forest = Self {
            index: HashMap::new(),
            ids: Vec::new(),
            parents: Vec::new(),
        };
        let global = forest.intern(GLOBAL_SCOPE);
        forest.parents[global] = Some(global);
        forest
    }

    fn intern(&mut self, id: i64) -> usize {
        if let Some(&slot) = self.index.get(&id) {
            return slot;
        }
        let slot = self.ids.len();
        self.index.insert(id, slot);
        self.ids.push(id);
        self.parents.push(None);
        slot
    }

    /// Record `child`'s parent; a second, different parent is a `ScopeConflict`
    pub fn record_link(&mut self, child: i64, parent: i64) -> Result<()> {
        let child_slot = self.intern(child);
        let parent_slot = self.intern(parent);
        match self.parents[child_slot] {
            None => {
                self.parents[child_slot] = Some(parent_slot);
                Ok(())
            }
            Some(existing) if existing == parent_slot => Ok(()),
            Some(existing) => Err(SynthError::ScopeConflict {
                child,
                existing: self.ids[existing],
                conflicting: parent,
            }),
        }
    }

    /// Recorded parent of `scope`, if any
    pub fn parent_of(&self, scope: i64) -> Option<i64> {
        let slot = *self.index.get(&scope)?;
        self.parents[slot].map(|parent| self.ids[parent])
    }

    /// Number of known scopes, including the global root
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Can a variable declared in `to_scope` be named from `from_scope`?
    pub fn is_visible(&self, from_scope: i64, to_scope: i64) -> bool {
        if to_scope == GLOBAL_SCOPE || from_scope == to_scope {
            return true;
        }
        let (Some(&from), Some(&target)) = (self.index.get(&from_scope), self.index.get(&to_scope))
        else {
            return false;
        };

        let mut current = from;
        for _ in 0..self.ids.len() {
            let Some(parent) = self.parents[current] else {
                return false;
            };
            if parent == target {
                return true;
            }
            if parent == current {
                return false;
            }
            current = parent;
        }
        false
    }
}
