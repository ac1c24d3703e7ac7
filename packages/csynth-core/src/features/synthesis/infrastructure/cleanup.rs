//! Tag residue removal
//!
//! Undoes what the profiler and the instrumentation engine added for tags
//! that were not substituted: stub macros, annotation wrappers, inline
//! tag-check calls, inserted before/after calls and statement markers.
//! Substitution markers (`/*TAG<id>:STA*/`) are kept.

use crate::shared::models::{Tag, TagTable};
use crate::shared::utils::unwrap_first_call;
use once_cell::sync::Lazy;
use regex::Regex;

static STATEMENT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*(?:bef|aft)_stmt:-?\d+\*/\n?").expect("marker regex"));

/// Remove tagging residue from annotated or instrumented `source`
///
/// Annotations are unwrapped by their head, so an enclosing annotation is
/// still found after a nested one inside it was rewritten. A stub is only
/// removed once nothing calls its tag.
pub fn strip_tag_residue(source: &str, tags: &TagTable) -> String {
    let mut out = source.to_string();

    for tag in tags.iter() {
        for inserted in &tag.instrumentation_strings {
            out = out
                .replace(&format!("{inserted}\n"), "")
                .replace(inserted.as_str(), "");
        }

        unwrap_first_call(&mut out, tag.annotation_head(), !tag.is_statement);
        if let Some(call) = &tag.inline_call {
            let unwrapped = if tag.is_statement {
                ""
            } else {
                tag.primary_var.name.as_str()
            };
            out = out.replace(call.as_str(), unwrapped);
        }
    }

    for tag in tags.iter() {
        remove_unused_stub(&mut out, tag);
    }

    STATEMENT_MARKER.replace_all(&out, "").into_owned()
}

/// Drop `#define Tag<id>(x) (x)` unless `source` still calls the tag
pub(crate) fn remove_unused_stub(source: &mut String, tag: &Tag) -> bool {
    if tag.is_called_in(source) {
        return false;
    }
    let stub = tag.stub_define();
    let stripped = source.replace(&format!("{stub}\n"), "").replace(&stub, "");
    let removed = stripped.len() != source.len();
    *source = stripped;
    removed
}
