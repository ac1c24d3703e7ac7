//! Function database entries

use crate::errors::{Result, SynthError};
use crate::shared::models::{CType, ScalarType};
use rand::seq::SliceRandom;
use rand::Rng;

/// One confirmed call: `call_name(inputs...) == output`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoPair {
    pub inputs: Vec<i128>,
    pub output: i128,
}

/// A verified function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub call_name: String,
    /// Formal parameter types; `void` is not an arity
    pub parameter_types: Vec<CType>,
    pub return_type: CType,
    pub body: String,
    pub io_pairs: Vec<IoPair>,
    /// Typedefs and global declarations the body needs
    pub misc: Vec<String>,
    /// Headers the body needs beyond the seed's own includes
    pub include_headers: Vec<String>,
}

impl Function {
    pub fn has_io(&self) -> bool {
        !self.io_pairs.is_empty()
    }

    /// Parameter scalars; any pointer or unknown parameter is `UnsupportedType`
    pub fn scalar_parameters(&self) -> Result<Vec<ScalarType>> {
        self.parameter_types
            .iter()
            .map(|ty| {
                ty.value_scalar().map_err(|_| {
                    SynthError::unsupported(format!("{}: parameter type {}", self.call_name, ty))
                })
            })
            .collect()
    }

    /// Return scalar; a pointer return is read as its base type
    pub fn scalar_return(&self) -> Result<ScalarType> {
        match &self.return_type {
            CType::Base(ty) | CType::Pointer(ty) if !ty.is_void() => Ok(*ty),
            other => Err(SynthError::unsupported(format!(
                "{}: return type {}",
                self.call_name, other
            ))),
        }
    }

    /// Uniformly chosen IO pair
    pub fn random_io<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&IoPair> {
        self.io_pairs
            .choose(rng)
            .ok_or_else(|| SynthError::unsupported(format!("{} has no IO pairs", self.call_name)))
    }
}
