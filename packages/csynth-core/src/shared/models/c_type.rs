//! C integer types as seen in tag annotations and function signatures
//!
//! `CType` is closed: a base scalar, a pointer to one, or something we
//! cannot reason about. Unknown spellings stay `Unsupported` and every
//! numeric query on them fails with `UnsupportedType`.

use crate::errors::{Result, SynthError};
use std::fmt;

/// Integer scalar types understood by the synthesizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    Char,
    UChar,
    Void,
}

/// Spellings accepted for each scalar; the canonical one comes first per type
const SPELLINGS: &[(&str, ScalarType)] = &[
    ("int8_t", ScalarType::I8),
    ("signed char", ScalarType::I8),
    ("uint8_t", ScalarType::U8),
    ("int16_t", ScalarType::I16),
    ("short", ScalarType::I16),
    ("short int", ScalarType::I16),
    ("signed short", ScalarType::I16),
    ("uint16_t", ScalarType::U16),
    ("unsigned short", ScalarType::U16),
    ("unsigned short int", ScalarType::U16),
    ("int32_t", ScalarType::I32),
    ("int", ScalarType::I32),
    ("signed", ScalarType::I32),
    ("signed int", ScalarType::I32),
    ("uint32_t", ScalarType::U32),
    ("unsigned int", ScalarType::U32),
    ("unsigned", ScalarType::U32),
    ("int64_t", ScalarType::I64),
    ("long", ScalarType::I64),
    ("long int", ScalarType::I64),
    ("long long", ScalarType::I64),
    ("long long int", ScalarType::I64),
    ("uint64_t", ScalarType::U64),
    ("unsigned long", ScalarType::U64),
    ("unsigned long int", ScalarType::U64),
    ("unsigned long long", ScalarType::U64),
    ("unsigned long long int", ScalarType::U64),
    ("char", ScalarType::Char),
    ("unsigned char", ScalarType::UChar),
    ("void", ScalarType::Void),
];

impl ScalarType {
    /// All non-void scalars
    pub const INTEGERS: [ScalarType; 10] = [
        ScalarType::I8,
        ScalarType::U8,
        ScalarType::I16,
        ScalarType::U16,
        ScalarType::I32,
        ScalarType::U32,
        ScalarType::I64,
        ScalarType::U64,
        ScalarType::Char,
        ScalarType::UChar,
    ];

    /// Look up a normalized spelling (qualifiers already stripped)
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        SPELLINGS
            .iter()
            .find(|(s, _)| *s == spelling)
            .map(|(_, ty)| *ty)
    }

    /// Canonical C spelling
    pub fn c_name(self) -> &'static str {
        match self {
            ScalarType::I8 => "int8_t",
            ScalarType::U8 => "uint8_t",
            ScalarType::I16 => "int16_t",
            ScalarType::U16 => "uint16_t",
            ScalarType::I32 => "int32_t",
            ScalarType::U32 => "uint32_t",
            ScalarType::I64 => "int64_t",
            ScalarType::U64 => "uint64_t",
            ScalarType::Char => "char",
            ScalarType::UChar => "unsigned char",
            ScalarType::Void => "void",
        }
    }

    pub fn is_void(self) -> bool {
        self == ScalarType::Void
    }

    fn bits(self) -> Result<u32> {
        match self {
            ScalarType::I8 | ScalarType::U8 | ScalarType::Char | ScalarType::UChar => Ok(8),
            ScalarType::I16 | ScalarType::U16 => Ok(16),
            ScalarType::I32 | ScalarType::U32 => Ok(32),
            ScalarType::I64 | ScalarType::U64 => Ok(64),
            ScalarType::Void => Err(SynthError::unsupported("void has no width")),
        }
    }

    /// `char` is treated as signed, matching the profiler's format choice
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            ScalarType::I8 | ScalarType::I16 | ScalarType::I32 | ScalarType::I64 | ScalarType::Char
        )
    }

    /// Inclusive representable range
    pub fn range(self) -> Result<(i128, i128)> {
        let bits = self.bits()?;
        if self.is_signed() {
            Ok((-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1))
        } else {
            Ok((0, (1i128 << bits) - 1))
        }
    }

    pub fn contains(self, value: i128) -> Result<bool> {
        let (min, max) = self.range()?;
        Ok(min <= value && value <= max)
    }

    /// C conversion of an integer value to this type (two's complement wrap)
    pub fn wrap(self, value: i128) -> Result<i128> {
        let bits = self.bits()?;
        let modulus = 1i128 << bits;
        let reduced = value.rem_euclid(modulus);
        if self.is_signed() && reduced >= modulus / 2 {
            Ok(reduced - modulus)
        } else {
            Ok(reduced)
        }
    }

    /// `<inttypes.h>` format macro for `printf`
    pub fn printf_macro(self) -> Result<&'static str> {
        match self {
            ScalarType::I8 | ScalarType::Char => Ok("PRId8"),
            ScalarType::U8 | ScalarType::UChar => Ok("PRIu8"),
            ScalarType::I16 => Ok("PRId16"),
            ScalarType::U16 => Ok("PRIu16"),
            ScalarType::I32 => Ok("PRId32"),
            ScalarType::U32 => Ok("PRIu32"),
            ScalarType::I64 => Ok("PRId64"),
            ScalarType::U64 => Ok("PRIu64"),
            ScalarType::Void => Err(SynthError::unsupported("void has no printf format")),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.c_name())
    }
}

/// A parsed C type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CType {
    Base(ScalarType),
    Pointer(ScalarType),
    Unsupported(String),
}

impl CType {
    /// Parse a raw type string; qualifiers are ignored
    pub fn parse(raw: &str) -> Self {
        let stripped = strip_type_qualifiers(raw);
        match stripped.matches('*').count() {
            0 => ScalarType::from_spelling(&stripped)
                .map(CType::Base)
                .unwrap_or(CType::Unsupported(stripped)),
            1 => {
                let base = normalize_spaces(&stripped.replace('*', " "));
                ScalarType::from_spelling(&base)
                    .map(CType::Pointer)
                    .unwrap_or(CType::Unsupported(stripped))
            }
            _ => CType::Unsupported(stripped),
        }
    }

    /// The scalar itself, or the pointee for pointers
    pub fn base(&self) -> Option<ScalarType> {
        match self {
            CType::Base(ty) | CType::Pointer(ty) => Some(*ty),
            CType::Unsupported(_) => None,
        }
    }

    /// A non-void base scalar usable as a value; anything else is unsupported
    pub fn value_scalar(&self) -> Result<ScalarType> {
        match self {
            CType::Base(ty) if !ty.is_void() => Ok(*ty),
            other => Err(SynthError::unsupported(format!(
                "{} is not an integer value type",
                other
            ))),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, CType::Base(ScalarType::Void))
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CType::Base(ty) => write!(f, "{}", ty),
            CType::Pointer(ty) => write!(f, "{} *", ty),
            CType::Unsupported(raw) => write!(f, "{}", raw),
        }
    }
}

fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove `const`, `static` and `volatile` and normalize whitespace
pub fn strip_type_qualifiers(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|word| !matches!(*word, "const" | "static" | "volatile"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render an integer as a C literal that keeps its value under the usual
/// arithmetic conversions
pub fn c_literal(value: i128) -> String {
    if value == i64::MIN as i128 {
        "(-9223372036854775807LL-1)".to_string()
    } else if value > i64::MAX as i128 {
        format!("{}ULL", value)
    } else {
        value.to_string()
    }
}
