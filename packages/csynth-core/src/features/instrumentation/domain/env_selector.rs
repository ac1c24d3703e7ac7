//! Environment variable selection
//!
//! Only tags *before* the current one (ascending id) are candidates: a
//! variable tagged later may not be initialized yet when this tag runs.

use crate::features::scope_model::ScopeForest;
use crate::shared::constants::RESERVED_LOOP_NAMES;
use crate::shared::models::TagTable;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Pick up to `num_env` environment tags for `tag_id`
///
/// Candidates come from the `window` tags preceding it and must name a
/// different variable, avoid loop-induction names, carry a supported scalar
/// type, hold no nested annotation and be visible from the tag's scope. Duplicates by name keep the
/// earliest tag. Returns candidate tag ids in random order.
pub fn select_environment<R: Rng + ?Sized>(
    tags: &TagTable,
    scopes: &ScopeForest,
    tag_id: u32,
    window: usize,
    num_env: usize,
    rng: &mut R,
) -> Vec<u32> {
    let ids = tags.ids();
    let (Some(position), Some(tag)) = (ids.iter().position(|&id| id == tag_id), tags.get(tag_id))
    else {
        return Vec::new();
    };
    let primary = &tag.primary_var;

    let mut seen_names = HashSet::new();
    let mut candidates = Vec::new();
    for &candidate_id in &ids[position.saturating_sub(window)..position] {
        let Some(candidate) = tags.get(candidate_id) else {
            continue;
        };
        let var = &candidate.primary_var;
        if var.name == primary.name || RESERVED_LOOP_NAMES.contains(&var.name.as_str()) {
            continue;
        }
        if var.c_type.value_scalar().is_err() || candidate.encloses_annotation() {
            continue;
        }
        if !scopes.is_visible(primary.scope_id, var.scope_id) {
            continue;
        }
        if seen_names.insert(var.name.clone()) {
            candidates.push(candidate_id);
        }
    }

    candidates.shuffle(rng);
    candidates.truncate(num_env);
    candidates
}
