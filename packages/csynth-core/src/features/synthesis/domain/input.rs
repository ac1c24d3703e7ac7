//! Call argument synthesis
//!
//! A literal argument `v` of parameter type `T` becomes
//! `(T)(env)+(v - (T)env_value)` for a random stable variable, which has
//! the same value under C's conversions while no longer looking constant.

use crate::errors::{Result, SynthError};
use crate::features::function_db::IoPair;
use crate::shared::constants::BACKEND_CONST_LIMIT;
use crate::shared::models::{c_literal, ScalarType, Var};
use rand::seq::SliceRandom;
use rand::Rng;

/// One argument text per parameter
///
/// With no stable variables every argument is a plain literal. The disguise
/// is refused when the cast environment value or the correction constant
/// exceeds the backend constant limit.
pub fn synthesize_inputs<R: Rng + ?Sized>(
    stable: &[&Var],
    pair: &IoPair,
    parameters: &[ScalarType],
    rng: &mut R,
) -> Result<Vec<String>> {
    if pair.inputs.len() != parameters.len() {
        return Err(SynthError::unsupported(format!(
            "IO pair has {} inputs for {} parameters",
            pair.inputs.len(),
            parameters.len()
        )));
    }

    let mut args = Vec::with_capacity(parameters.len());
    for (&value, &ty) in pair.inputs.iter().zip(parameters) {
        let disguised = match stable.choose(rng) {
            Some(env) => {
                let observed = env
                    .stable_value()
                    .ok_or_else(|| SynthError::unsupported(format!("{} has no stable value", env.name)))?;
                let cast = ty.wrap(observed)?;
                let delta = value - cast;
                if cast.abs() > BACKEND_CONST_LIMIT || delta.abs() > BACKEND_CONST_LIMIT {
                    None
                } else {
                    Some(format!("({ty})({})+({})", env.name, c_literal(delta)))
                }
            }
            None => None,
        };
        args.push(disguised.unwrap_or_else(|| c_literal(value)));
    }
    Ok(args)
}
