//! Parser for textual array/tuple literals.
//!
//! A composite cell is written as a flat delimited literal such as
//! `1,2,[3,4],5`: commas separate elements and square brackets introduce an
//! explicitly nested sequence. [`parse_expression`] turns such a literal into
//! a nested sequence of trimmed string tokens, represented as
//! [`CellValue::Text`] leaves inside [`CellValue::Parsed`] sequences so the
//! result can feed straight back into [`crate::convert_value`].
//!
//! ## Examples
//!
//! ```rust
//! use gridcast::{parse_expression, CellValue};
//!
//! let parsed = parse_expression("1,2,[3,4],5").unwrap();
//! assert_eq!(
//!     parsed,
//!     vec![
//!         CellValue::from("1"),
//!         CellValue::from("2"),
//!         CellValue::Parsed(vec![CellValue::from("3"), CellValue::from("4")]),
//!         CellValue::from("5"),
//!     ]
//! );
//! ```
//!
//! ## Lenient by contract
//!
//! An unmatched closing bracket is the only structural failure
//! ([`crate::Error::MalformedExpression`]). Unbalanced *open* brackets are
//! tolerated: the content of an unclosed level simply becomes the final
//! result. Downstream consumers rely on this leniency, so the parser must
//! not tighten it.

use crate::{CellValue, Error, Result};

/// Parses a delimited literal into a nested sequence of string tokens.
///
/// Token handling mirrors the element-count contract that list and tuple
/// conversion depend on: a pending token is flushed on every comma, except
/// that an empty token is dropped unless the comma is the first character of
/// the input or immediately follows another comma. A leading comma or a run
/// of commas therefore still yields empty-string elements, while a single
/// trailing comma yields nothing.
///
/// # Examples
///
/// ```rust
/// use gridcast::{parse_expression, CellValue};
///
/// assert_eq!(parse_expression("a,").unwrap().len(), 1);
/// assert_eq!(parse_expression(",a").unwrap().len(), 2);
/// assert_eq!(parse_expression("a,,b").unwrap().len(), 3);
/// ```
///
/// # Errors
///
/// Returns [`crate::Error::MalformedExpression`] when a `]` appears with no
/// open `[` to match.
pub fn parse_expression(input: &str) -> Result<Vec<CellValue>> {
    let mut stack: Vec<Vec<CellValue>> = Vec::new();
    let mut result: Vec<CellValue> = Vec::new();
    let mut token = String::new();
    let mut prev: Option<char> = None;

    for (i, ch) in input.chars().enumerate() {
        match ch {
            '[' => {
                stack.push(std::mem::take(&mut result));
            }
            ']' => {
                let mut parent = stack.pop().ok_or_else(|| {
                    Error::malformed_expression(format!("unmatched ']' at position {}", i))
                })?;
                if !token.is_empty() {
                    result.push(CellValue::Text(token.trim().to_string()));
                    token.clear();
                }
                parent.push(CellValue::Parsed(std::mem::take(&mut result)));
                result = parent;
            }
            ',' => {
                if !token.is_empty() || prev == Some(',') || i == 0 {
                    result.push(CellValue::Text(token.trim().to_string()));
                    token.clear();
                }
            }
            _ => token.push(ch),
        }
        prev = Some(ch);
    }

    if !token.is_empty() {
        result.push(CellValue::Text(token.trim().to_string()));
    }

    Ok(result)
}
