//! Substitution text for one tag
//!
//! Expression tags keep their value through an identity wrapper:
//!
//! ```text
//! ((T)(call(args)<terms>-(net))+expr)
//! ```
//!
//! Statement tags instead restore a stable, non-constant variable to its
//! observed value after the call:
//!
//! ```text
//! var = (V)((call(args)<terms>)-(net))+(value);
//! ```

use super::input::synthesize_inputs;
use super::output::synthesize_output;
use crate::errors::Result;
use crate::features::function_db::Function;
use crate::shared::models::{c_literal, Tag, Var};
use rand::seq::SliceRandom;
use rand::Rng;

/// Text that replaces a tag's annotation, plus what it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub tag_id: u32,
    /// Marker-wrapped replacement for the annotation text
    pub text: String,
    pub call_name: String,
    /// Variable assigned back for statement tags
    pub restored: Option<String>,
}

/// Build a substitution for `tag` calling `function`
///
/// Fails with `UnsupportedType` when the function's signature or the tag's
/// type has no numeric mapping; the caller may then re-pick a function.
pub fn build_substitution<R: Rng + ?Sized>(
    tag: &Tag,
    function: &Function,
    rng: &mut R,
) -> Result<Substitution> {
    let parameters = function.scalar_parameters()?;
    let return_type = function.scalar_return()?;
    tag.primary_var.c_type.value_scalar()?;

    let stable = tag.stable_vars();
    let pair = function.random_io(rng)?;
    let args = synthesize_inputs(&stable, pair, &parameters, rng)?.join(", ");
    let terms = synthesize_output(&stable, pair.output, return_type)?;
    let call = format!("{}({args})", function.call_name);

    let (body, restored) = if tag.is_statement {
        match restore_target(tag, &stable, rng) {
            Some((var, value)) => (
                format!(
                    "{} = ({})(({call}{}){})+({});",
                    var.name,
                    var.declared_type,
                    terms.text,
                    terms.net_correction(),
                    c_literal(value)
                ),
                Some(var.name.clone()),
            ),
            None => (format!("({call}{})", terms.text), None),
        }
    } else {
        (
            format!(
                "(({})({call}{}{})+{})",
                tag.primary_var.declared_type,
                terms.text,
                terms.net_correction(),
                tag.primary_var.name
            ),
            None,
        )
    };

    Ok(Substitution {
        tag_id: tag.id,
        text: format!(
            "/*TAG{id}:STA*/{body}/*TAG{id}:END:{name}*/",
            id = tag.id,
            name = tag.primary_var.name
        ),
        call_name: function.call_name.clone(),
        restored,
    })
}

/// Stable non-constant primary, else a random stable non-constant environment variable
fn restore_target<'a, R: Rng + ?Sized>(
    tag: &'a Tag,
    stable: &[&'a Var],
    rng: &mut R,
) -> Option<(&'a Var, i128)> {
    let primary = &tag.primary_var;
    if !primary.is_constant {
        if let Some(value) = primary.stable_value() {
            return Some((primary, value));
        }
    }
    let candidates: Vec<&Var> = stable
        .iter()
        .copied()
        .filter(|var| !var.is_constant && !std::ptr::eq(*var, primary))
        .collect();
    let var = candidates.choose(rng)?;
    var.stable_value().map(|value| (*var, value))
}
