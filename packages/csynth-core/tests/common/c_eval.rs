//! Minimal C integer-expression evaluator
//!
//! Covers what substitutions emit: decimal literals with `U`/`L`/`LL`/`ULL`
//! suffixes, typed identifiers, casts to integer types, calls, unary minus,
//! `+`/`-` with integer promotion and the usual arithmetic conversions, and
//! a single `name = expr;` assignment. Comments are skipped. Signed
//! overflow is reported as an error instead of wrapping.

use csynth_core::ScalarType;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CValue {
    pub value: i128,
    pub ty: ScalarType,
}

type Body = Box<dyn Fn(&[i128]) -> Result<i128, String>>;

struct CFunction {
    params: Vec<ScalarType>,
    ret: ScalarType,
    body: Body,
}

#[derive(Default)]
pub struct CEnv {
    vars: HashMap<String, CValue>,
    functions: HashMap<String, CFunction>,
}

impl CEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: &str, ty: ScalarType, value: i128) -> Self {
        self.vars.insert(name.to_string(), CValue { value, ty });
        self
    }

    /// `body` receives arguments already converted to the parameter types
    pub fn with_function(
        mut self,
        name: &str,
        params: Vec<ScalarType>,
        ret: ScalarType,
        body: impl Fn(&[i128]) -> Result<i128, String> + 'static,
    ) -> Self {
        self.functions.insert(
            name.to_string(),
            CFunction {
                params,
                ret,
                body: Box::new(body),
            },
        );
        self
    }

    pub fn eval(&self, expr: &str) -> Result<CValue, String> {
        let mut parser = Parser::new(tokenize(expr)?, self);
        let value = parser.expr()?;
        parser.finish()?;
        Ok(value)
    }

    /// Evaluate `name = expr;` and return the name and the converted value
    pub fn exec_assignment(&self, stmt: &str) -> Result<(String, i128), String> {
        let mut parser = Parser::new(tokenize(stmt)?, self);
        let name = match parser.next() {
            Some(Token::Ident(name)) => name,
            other => return Err(format!("expected assignment target, got {other:?}")),
        };
        parser.expect('=')?;
        let value = parser.expr()?;
        parser.expect(';')?;
        parser.finish()?;

        let target = self
            .vars
            .get(&name)
            .ok_or_else(|| format!("unknown identifier {name}"))?;
        Ok((name, convert(value.value, target.ty)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(CValue),
    Ident(String),
    Punct(char),
}

fn tokenize(text: &str) -> Result<Vec<Token>, String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
        } else if c == '/' && chars.get(i + 1) == Some(&'*') {
            let rest: String = chars[i + 2..].iter().collect();
            let end = rest.find("*/").ok_or("unterminated comment")?;
            i += 2 + rest[..end].chars().count() + 2;
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[start..i].iter().collect();
            let suffix_start = i;
            while i < chars.len() && matches!(chars[i], 'u' | 'U' | 'l' | 'L') {
                i += 1;
            }
            let suffix: String = chars[suffix_start..i].iter().collect();
            tokens.push(Token::Number(literal(&digits, &suffix)?));
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            tokens.push(Token::Ident(chars[start..i].iter().collect()));
        } else if "()+-,=;".contains(c) {
            tokens.push(Token::Punct(c));
            i += 1;
        } else {
            return Err(format!("unexpected character {c:?}"));
        }
    }
    Ok(tokens)
}

/// LP64 typing of a decimal literal
fn literal(digits: &str, suffix: &str) -> Result<CValue, String> {
    let value: i128 = digits.parse().map_err(|e| format!("{digits}: {e}"))?;
    let suffix = suffix.to_ascii_uppercase();
    let unsigned = suffix.contains('U');
    let long = suffix.contains('L');

    let candidates: &[ScalarType] = match (unsigned, long) {
        (false, false) => &[ScalarType::I32, ScalarType::I64],
        (false, true) => &[ScalarType::I64],
        (true, false) => &[ScalarType::U32, ScalarType::U64],
        (true, true) => &[ScalarType::U64],
    };
    for &ty in candidates {
        if ty.contains(value).map_err(|e| e.to_string())? {
            return Ok(CValue { value, ty });
        }
    }
    Err(format!("literal {digits}{suffix} has no type"))
}

fn convert(value: i128, ty: ScalarType) -> Result<i128, String> {
    ty.wrap(value).map_err(|e| e.to_string())
}

fn promote(ty: ScalarType) -> ScalarType {
    match ty {
        ScalarType::I8
        | ScalarType::U8
        | ScalarType::I16
        | ScalarType::U16
        | ScalarType::Char
        | ScalarType::UChar => ScalarType::I32,
        other => other,
    }
}

fn rank(ty: ScalarType) -> u8 {
    match ty {
        ScalarType::I64 | ScalarType::U64 => 2,
        _ => 1,
    }
}

fn common_type(a: ScalarType, b: ScalarType) -> ScalarType {
    let (a, b) = (promote(a), promote(b));
    if a == b {
        return a;
    }
    if a.is_signed() == b.is_signed() {
        return if rank(a) >= rank(b) { a } else { b };
    }
    let (signed, unsigned) = if a.is_signed() { (a, b) } else { (b, a) };
    if rank(unsigned) >= rank(signed) {
        unsigned
    } else {
        signed
    }
}

fn checked(raw: i128, ty: ScalarType) -> Result<CValue, String> {
    if ty.is_signed() {
        if !ty.contains(raw).map_err(|e| e.to_string())? {
            return Err(format!("signed overflow: {raw} in {ty}"));
        }
        Ok(CValue { value: raw, ty })
    } else {
        Ok(CValue {
            value: convert(raw, ty)?,
            ty,
        })
    }
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    env: &'a CEnv,
}

impl<'a> Parser<'a> {
    fn new(tokens: Vec<Token>, env: &'a CEnv) -> Self {
        Self {
            tokens,
            pos: 0,
            env,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, punct: char) -> bool {
        if self.peek() == Some(&Token::Punct(punct)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, punct: char) -> Result<(), String> {
        if self.eat(punct) {
            Ok(())
        } else {
            Err(format!("expected {punct:?}, got {:?}", self.peek()))
        }
    }

    fn finish(&self) -> Result<(), String> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(format!("trailing token {token:?}")),
        }
    }

    fn expr(&mut self) -> Result<CValue, String> {
        let mut acc = self.unary()?;
        loop {
            if self.eat('+') {
                let rhs = self.unary()?;
                acc = binary(acc, rhs, |a, b| a + b)?;
            } else if self.eat('-') {
                let rhs = self.unary()?;
                acc = binary(acc, rhs, |a, b| a - b)?;
            } else {
                return Ok(acc);
            }
        }
    }

    fn unary(&mut self) -> Result<CValue, String> {
        if self.eat('-') {
            let operand = self.unary()?;
            let ty = promote(operand.ty);
            return checked(-convert(operand.value, ty)?, ty);
        }
        if self.eat('+') {
            let operand = self.unary()?;
            let ty = promote(operand.ty);
            return Ok(CValue {
                value: convert(operand.value, ty)?,
                ty,
            });
        }
        if let Some(ty) = self.cast_type() {
            let operand = self.unary()?;
            return Ok(CValue {
                value: convert(operand.value, ty)?,
                ty,
            });
        }
        self.primary()
    }

    /// Consume `(type-name)` when the parenthesis holds one
    fn cast_type(&mut self) -> Option<ScalarType> {
        if self.peek() != Some(&Token::Punct('(')) {
            return None;
        }
        let mut words = Vec::new();
        let mut i = self.pos + 1;
        while let Some(Token::Ident(word)) = self.tokens.get(i) {
            words.push(word.as_str());
            i += 1;
        }
        if words.is_empty() || self.tokens.get(i) != Some(&Token::Punct(')')) {
            return None;
        }
        let ty = ScalarType::from_spelling(&words.join(" ")).filter(|ty| !ty.is_void())?;
        self.pos = i + 1;
        Some(ty)
    }

    fn primary(&mut self) -> Result<CValue, String> {
        match self.next() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Punct('(')) => {
                let value = self.expr()?;
                self.expect(')')?;
                Ok(value)
            }
            Some(Token::Ident(name)) => {
                if self.eat('(') {
                    self.call(&name)
                } else {
                    self.env
                        .vars
                        .get(&name)
                        .copied()
                        .ok_or_else(|| format!("unknown identifier {name}"))
                }
            }
            other => Err(format!("unexpected token {other:?}")),
        }
    }

    fn call(&mut self, name: &str) -> Result<CValue, String> {
        let mut args = Vec::new();
        if !self.eat(')') {
            loop {
                args.push(self.expr()?);
                if self.eat(')') {
                    break;
                }
                self.expect(',')?;
            }
        }

        let function = self
            .env
            .functions
            .get(name)
            .ok_or_else(|| format!("unknown function {name}"))?;
        if args.len() != function.params.len() {
            return Err(format!(
                "{name} takes {} arguments, got {}",
                function.params.len(),
                args.len()
            ));
        }
        let converted = args
            .iter()
            .zip(&function.params)
            .map(|(arg, &ty)| convert(arg.value, ty))
            .collect::<Result<Vec<_>, _>>()?;
        let result = (function.body)(&converted)?;
        Ok(CValue {
            value: convert(result, function.ret)?,
            ty: function.ret,
        })
    }
}

fn binary(lhs: CValue, rhs: CValue, op: impl Fn(i128, i128) -> i128) -> Result<CValue, String> {
    let ty = common_type(lhs.ty, rhs.ty);
    let a = convert(lhs.value, ty)?;
    let b = convert(rhs.value, ty)?;
    checked(op(a, b), ty)
}
