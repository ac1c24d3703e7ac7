//! Output correction terms
//!
//! Builds the additive tail appended to a call whose confirmed result is
//! `output`. Each stable variable contributes `+(T)(env)` when the running
//! total stays inside the return type's range and under the backend limit;
//! otherwise it contributes a self-cancelling `+((T)(env)-(c))` or nothing.
//! `net` is the exact value of `call + terms`, so `call + terms - net == 0`.
//! Subtracted constants are split so no literal exceeds the backend limit.

use crate::errors::Result;
use crate::shared::constants::BACKEND_CONST_LIMIT;
use crate::shared::models::{c_literal, ScalarType, Var};
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTerms {
    pub text: String,
    pub net: i128,
}

impl OutputTerms {
    /// `-(net)`, split into backend-sized pieces
    pub fn net_correction(&self) -> String {
        subtraction(self.net)
    }
}

/// `-(c1)-(c2)…` summing to `value`, each `|ci|` within the backend limit
pub fn subtraction(value: i128) -> String {
    let step = value.signum() * BACKEND_CONST_LIMIT;
    let mut rest = value;
    let mut text = String::new();
    while rest.abs() > BACKEND_CONST_LIMIT {
        let _ = write!(text, "-({})", c_literal(step));
        rest -= step;
    }
    let _ = write!(text, "-({})", c_literal(rest));
    text
}

pub fn synthesize_output(stable: &[&Var], output: i128, return_type: ScalarType) -> Result<OutputTerms> {
    let (min, max) = return_type.range()?;
    let mut text = String::new();
    let mut net = output;

    if !(min..=max).contains(&output) {
        text.push_str(&subtraction(output));
        net = 0;
    }

    for env in stable {
        let Some(observed) = env.stable_value() else {
            continue;
        };
        let cast = return_type.wrap(observed)?;
        if cast.abs() > BACKEND_CONST_LIMIT || (cast + net).abs() > BACKEND_CONST_LIMIT {
            continue;
        }
        if (min..=max).contains(&(cast + net)) {
            let _ = write!(text, "+({return_type})({})", env.name);
            net += cast;
        } else {
            let _ = write!(
                text,
                "+(({return_type})({})-({}))",
                env.name,
                c_literal(cast)
            );
        }
    }

    Ok(OutputTerms { text, net })
}
