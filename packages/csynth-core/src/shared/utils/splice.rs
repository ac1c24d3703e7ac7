//! Exact-text splicing
//!
//! Every source rewrite in a pass replaces exactly one verbatim occurrence.
//! A missing needle means the text was already rewritten or never existed,
//! which callers treat as malformed input.

use crate::errors::{Result, SynthError};

/// Replace the first occurrence of `needle`; `SpliceNotFound` if absent
pub fn replace_first(source: &mut String, needle: &str, replacement: &str) -> Result<()> {
    if replace_first_if_present(source, needle, replacement) {
        Ok(())
    } else {
        Err(SynthError::splice(needle))
    }
}

/// Replace the first occurrence of `needle`, reporting whether it was found
pub fn replace_first_if_present(source: &mut String, needle: &str, replacement: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    match source.find(needle) {
        Some(start) => {
            source.replace_range(start..start + needle.len(), replacement);
            true
        }
        None => false,
    }
}

/// Index of the `)` closing a group whose `(` ends just before `from`
///
/// Parentheses inside character and string literals are not counted.
pub fn closing_paren(source: &str, from: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 1usize;
    let mut quote: Option<u8> = None;
    let mut i = from;
    while i < bytes.len() {
        let byte = bytes[i];
        match quote {
            Some(_) if byte == b'\\' => i += 1,
            Some(q) if byte == q => quote = None,
            Some(_) => {}
            None => match byte {
                b'\'' | b'"' => quote = Some(byte),
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}

/// Unwrap the first call opened by `head` (text up to and including its
/// first argument's start), keeping the argument text or dropping the call
pub fn unwrap_first_call(source: &mut String, head: &str, keep_argument: bool) -> bool {
    if head.is_empty() {
        return false;
    }
    let Some(start) = source.find(head) else {
        return false;
    };
    let inner_start = start + head.len();
    let Some(close) = closing_paren(source, inner_start) else {
        return false;
    };
    let replacement = if keep_argument {
        source[inner_start..close].to_string()
    } else {
        String::new()
    };
    source.replace_range(start..=close, &replacement);
    true
}
