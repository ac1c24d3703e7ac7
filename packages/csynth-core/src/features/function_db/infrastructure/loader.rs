//! JSON function database loader
//!
//! Entries missing any of `function_name`, `parameter_types`, `return_type`
//! or `function` are dropped. IO values may be decimal strings or integers;
//! a pair holding anything else is dropped on its own, and a function left
//! with no usable pair simply has no IO.

use super::super::domain::{Function, IoPair};
use crate::errors::{Result, SynthError};
use crate::shared::models::CType;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Int(i64),
    UInt(u64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    fn to_i128(&self) -> Option<i128> {
        match self {
            RawValue::Int(v) => Some(*v as i128),
            RawValue::UInt(v) => Some(*v as i128),
            RawValue::Text(s) => s.trim().parse().ok(),
            RawValue::Other(value) => value.as_i64().map(i128::from),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawIoPair {
    Pair(Vec<RawValue>, RawValue),
    Other(serde_json::Value),
}

impl RawIoPair {
    fn to_io_pair(&self) -> std::result::Result<IoPair, String> {
        let (inputs, output) = match self {
            RawIoPair::Pair(inputs, output) => (inputs, output),
            RawIoPair::Other(value) => return Err(format!("not an [inputs, output] pair: {value}")),
        };
        let inputs = inputs
            .iter()
            .map(RawValue::to_i128)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| "non-integer input".to_string())?;
        let output = output
            .to_i128()
            .ok_or_else(|| "non-integer output".to_string())?;
        Ok(IoPair { inputs, output })
    }
}

#[derive(Debug, Deserialize)]
struct RawFunction {
    function_name: Option<String>,
    parameter_types: Option<Vec<String>>,
    return_type: Option<String>,
    function: Option<String>,
    #[serde(default)]
    io_list: Vec<RawIoPair>,
    #[serde(default)]
    misc: Vec<String>,
    #[serde(default)]
    include_headers: Vec<String>,
}

impl RawFunction {
    fn into_function(self) -> Option<Function> {
        let call_name = self.function_name?;
        let parameter_types: Vec<CType> = self
            .parameter_types?
            .iter()
            .map(|raw| CType::parse(raw))
            .filter(|ty| !ty.is_void())
            .collect();
        let return_type = CType::parse(&self.return_type?);
        let body = self.function?;

        let arity = parameter_types.len();
        let io_pairs: Vec<IoPair> = self
            .io_list
            .iter()
            .filter_map(|raw| {
                let pair = match raw.to_io_pair() {
                    Ok(pair) => pair,
                    Err(reason) => {
                        warn!(function = %call_name, %reason, "dropping malformed IO pair");
                        return None;
                    }
                };
                if pair.inputs.len() != arity {
                    debug!(function = %call_name, "dropping IO pair with wrong arity");
                    return None;
                }
                Some(pair)
            })
            .collect();
        if io_pairs.is_empty() && !self.io_list.is_empty() {
            warn!(function = %call_name, "no usable IO pair left");
        }

        Some(Function {
            call_name,
            parameter_types,
            return_type,
            body,
            io_pairs,
            misc: self.misc,
            include_headers: self.include_headers,
        })
    }
}

/// Loaded database; guaranteed to hold at least one function with IO pairs
#[derive(Debug, Clone)]
pub struct FunctionDb {
    functions: Vec<Function>,
    with_io: Vec<usize>,
}

impl FunctionDb {
    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let db = Self::from_json_str(&content)?;
        info!(
            path = %path.display(),
            functions = db.len(),
            with_io = db.with_io.len(),
            "function database loaded"
        );
        Ok(db)
    }

    /// Parse JSON text (an array of function objects)
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: Vec<RawFunction> = serde_json::from_str(content)?;
        let total = raw.len();
        let functions: Vec<Function> = raw
            .into_iter()
            .filter_map(RawFunction::into_function)
            .collect();
        if functions.len() < total {
            debug!(
                dropped = total - functions.len(),
                "skipped entries missing required fields"
            );
        }
        Self::from_functions(functions)
    }

    pub fn from_functions(functions: Vec<Function>) -> Result<Self> {
        let with_io: Vec<usize> = functions
            .iter()
            .enumerate()
            .filter(|(_, f)| f.has_io())
            .map(|(i, _)| i)
            .collect();
        if with_io.is_empty() {
            return Err(SynthError::EmptyFunctionDb);
        }
        Ok(Self { functions, with_io })
    }

    /// Uniform choice among functions with IO pairs
    pub fn random_with_io<R: Rng + ?Sized>(&self, rng: &mut R) -> &Function {
        let index = self.with_io.choose(rng).copied().unwrap_or(self.with_io[0]);
        &self.functions[index]
    }

    pub fn get(&self, index: usize) -> Option<&Function> {
        self.functions.get(index)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Function> {
        self.functions.iter()
    }
}
