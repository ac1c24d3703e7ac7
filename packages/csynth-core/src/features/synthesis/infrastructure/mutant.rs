//! One mutant from one profiling pass
//!
//! Walks alive tags in execution order. Each is included with probability
//! `p` percent and substituted at most once; a function choice the tag
//! cannot use is re-picked once before the tag is left alone. Tags that
//! enclose another annotation are never substituted, so a nested tag's
//! annotation text exists exactly once when it is replaced.

use super::cleanup::{remove_unused_stub, strip_tag_residue};
use super::declarations::insert_declarations;
use crate::config::SynthesisConfig;
use crate::errors::Result;
use crate::features::function_db::{Function, FunctionDb};
use crate::features::synthesis::domain::build_substitution;
use crate::shared::models::{Tag, TagTable};
use crate::shared::utils::replace_first;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Function picks per tag (first choice plus one re-pick)
const FUNCTION_ATTEMPTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutantOptions {
    /// Per-tag inclusion probability in percent
    pub probability: u32,
    pub strip_unused_tags: bool,
}

impl Default for MutantOptions {
    fn default() -> Self {
        Self {
            probability: 100,
            strip_unused_tags: false,
        }
    }
}

impl From<&SynthesisConfig> for MutantOptions {
    fn from(config: &SynthesisConfig) -> Self {
        Self {
            probability: config.probability,
            strip_unused_tags: config.strip_unused_tags,
        }
    }
}

/// Complete mutant text and what went into it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutantText {
    pub source: String,
    /// Substituted tag ids, in substitution order
    pub substituted: Vec<u32>,
    /// Distinct functions inserted
    pub functions: Vec<String>,
}

/// Build one mutant from the annotated (pre-instrumentation) source
pub fn synthesize_mutant<R: Rng + ?Sized>(
    annotated: &str,
    tags: &TagTable,
    alive_tags: &[u32],
    db: &FunctionDb,
    options: MutantOptions,
    rng: &mut R,
) -> Result<MutantText> {
    let mut source = annotated.to_string();
    let mut replaced: HashSet<u32> = HashSet::new();
    let mut substituted: Vec<&Tag> = Vec::new();
    let mut chosen: Vec<&Function> = Vec::new();

    for &tag_id in alive_tags {
        if replaced.contains(&tag_id) || rng.gen_range(0..100) >= options.probability {
            continue;
        }
        let Some(tag) = tags.get(tag_id) else {
            continue;
        };
        if tag.encloses_annotation() {
            debug!(tag = tag_id, "enclosing tag skipped");
            continue;
        }

        for attempt in 1..=FUNCTION_ATTEMPTS {
            let function = db.random_with_io(rng);
            match build_substitution(tag, function, rng) {
                Ok(substitution) => {
                    replace_first(&mut source, &tag.original_text, &substitution.text)?;
                    replaced.insert(tag_id);
                    substituted.push(tag);
                    chosen.push(function);
                    debug!(tag = tag_id, function = %function.call_name, "tag substituted");
                    break;
                }
                Err(err) if err.is_recoverable() => {
                    debug!(tag = tag_id, attempt, %err, "function choice abandoned");
                }
                Err(err) => return Err(err),
            }
        }
    }

    let mut source = insert_declarations(&source, &chosen);
    if options.strip_unused_tags {
        source = strip_tag_residue(&source, &unsubstituted(tags, &replaced));
        for tag in &substituted {
            remove_unused_stub(&mut source, tag);
        }
    }

    let mut functions: Vec<String> = Vec::new();
    for function in &chosen {
        if !functions.contains(&function.call_name) {
            functions.push(function.call_name.clone());
        }
    }

    Ok(MutantText {
        source,
        substituted: substituted.iter().map(|tag| tag.id).collect(),
        functions,
    })
}

/// Tags whose residue may be stripped; instrumentation data is irrelevant here
fn unsubstituted(tags: &TagTable, replaced: &HashSet<u32>) -> TagTable {
    let mut rest = TagTable::new();
    for tag in tags.iter().filter(|tag| !replaced.contains(&tag.id)) {
        let mut tag = tag.clone();
        tag.instrumentation_strings.clear();
        tag.inline_call = None;
        rest.insert(tag);
    }
    rest
}

impl MutantText {
    pub fn is_unchanged(&self) -> bool {
        self.substituted.is_empty()
    }
}
