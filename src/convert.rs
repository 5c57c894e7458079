//! Conversion of raw cell values against a compiled [`TypeNode`].
//!
//! [`convert_value`] walks the schema tree and the raw cell together,
//! producing a JSON-shaped [`Value`]. Composite cells that arrive as text are
//! run through [`crate::parse_expression`] first; cells that arrive already
//! parsed ([`CellValue::Parsed`]) are consumed directly, which lets one
//! parse result be reused across repeated rows.
//!
//! ## Examples
//!
//! ```rust
//! use gridcast::{compile_signature, convert_value, CellValue, Registry, Value};
//!
//! let node = compile_signature("int[]", &Registry::new()).unwrap();
//! let out = convert_value(&CellValue::from("1,2,3"), &node, None).unwrap();
//! assert_eq!(
//!     out,
//!     Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
//! );
//! ```

use crate::enums::EnumTable;
use crate::signature::{TypeKind, TypeNode};
use crate::value::Number;
use crate::{parse_expression, CellValue, Error, Result, Value};

/// Converts one raw cell value according to its compiled type.
///
/// An empty cell (absent, or empty text) resolves to [`Value::Null`] when the
/// type is optional and fails otherwise; this check runs before any
/// kind-specific handling, so `"0"` and the number `0` are never treated as
/// absent.
///
/// Tuples accept a bare scalar when every slot after the first is optional:
/// the scalar fills the first slot and the result is a one-element sequence.
/// Tuple conversion zips declared slot types against element positions;
/// surplus trailing elements are silently dropped, and missing trailing
/// elements are treated as absent (legal only for optional slots).
///
/// # Examples
///
/// ```rust
/// use gridcast::{compile_signature, convert_value, CellValue, Registry, Value};
///
/// let node = compile_signature("string,int?,int?", &Registry::new()).unwrap();
///
/// let out = convert_value(&CellValue::from("x"), &node, None).unwrap();
/// assert_eq!(out, Value::Array(vec![Value::from("x")]));
///
/// let out = convert_value(&CellValue::from("x,1,2"), &node, None).unwrap();
/// assert_eq!(
///     out,
///     Value::Array(vec![Value::from("x"), Value::from(1), Value::from(2)])
/// );
/// ```
///
/// # Errors
///
/// - [`Error::MissingRequiredValue`]: empty cell against a non-optional type.
/// - [`Error::InvalidValue`]: non-numeric text for a numeric type, a bool
///   cell other than 0/1, or a scalar where a sequence is required.
/// - [`Error::MissingEnumTable`] / [`Error::UnknownEnumType`] /
///   [`Error::UnknownEnumMember`]: enum resolution failures.
/// - [`Error::InvalidSignature`]: a list or tuple node without element types
///   (cannot be produced by [`crate::compile_signature`], but hand-built
///   trees are checked too).
/// - [`Error::MalformedExpression`]: the cell's textual literal failed to
///   parse.
pub fn convert_value(
    value: &CellValue,
    node: &TypeNode,
    enums: Option<&EnumTable>,
) -> Result<Value> {
    if value.is_empty() {
        if node.optional {
            return Ok(Value::Null);
        }
        return Err(Error::MissingRequiredValue);
    }

    match &node.kind {
        TypeKind::String => Ok(Value::String(value.to_text())),
        TypeKind::Int | TypeKind::Float | TypeKind::Double => {
            let n = value
                .to_number()
                .ok_or_else(|| Error::invalid_value(format!("not a number: {}", value.to_text())))?;
            Ok(Value::Number(Number::from_f64(n)))
        }
        TypeKind::Bool => {
            let n = value
                .to_number()
                .ok_or_else(|| Error::invalid_value(format!("not a number: {}", value.to_text())))?;
            if n != 0.0 && n != 1.0 {
                return Err(Error::invalid_value(format!(
                    "bool cell must be 0 or 1, got {}",
                    n
                )));
            }
            Ok(Value::Number(Number::Integer(n as i64)))
        }
        TypeKind::Enum(name) => {
            let table = match enums {
                Some(table) if !table.is_empty() => table,
                _ => return Err(Error::MissingEnumTable),
            };
            let members = table
                .get(name)
                .ok_or_else(|| Error::UnknownEnumType(name.clone()))?;
            let key = value.to_text();
            members
                .get(&key)
                .cloned()
                .ok_or_else(|| Error::unknown_enum_member(name.clone(), key))
        }
        TypeKind::List => {
            let parsed;
            let elements: &[CellValue] = match value {
                CellValue::Text(text) => {
                    parsed = parse_expression(text)?;
                    &parsed
                }
                CellValue::Parsed(seq) => seq,
                CellValue::Number(_) | CellValue::Empty => {
                    return Err(Error::invalid_value("expected a sequence"));
                }
            };
            let element_type = node
                .children
                .first()
                .ok_or_else(|| Error::invalid_signature("list type without element type"))?;
            let out = elements
                .iter()
                .map(|element| convert_value(element, element_type, enums))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Array(out))
        }
        TypeKind::Tuple => {
            if node.children.is_empty() {
                return Err(Error::invalid_signature("tuple type without slot types"));
            }
            let parsed;
            let elements: Option<&[CellValue]> = match value {
                CellValue::Text(text) => {
                    parsed = parse_expression(text)?;
                    Some(&parsed)
                }
                CellValue::Parsed(seq) => Some(seq),
                CellValue::Number(_) | CellValue::Empty => None,
            };
            let single_allowed = node.children.iter().skip(1).all(|slot| slot.optional);
            match elements {
                // A bare numeric cell supplies only the first slot.
                None => {
                    if single_allowed {
                        let first = convert_value(value, &node.children[0], enums)?;
                        return Ok(Value::Array(vec![first]));
                    }
                    Err(Error::invalid_value("expected a sequence"))
                }
                Some(seq) => {
                    // A literal that parsed to one scalar is still a bare value.
                    if single_allowed && seq.len() == 1 && seq[0].is_scalar() {
                        let first = convert_value(&seq[0], &node.children[0], enums)?;
                        return Ok(Value::Array(vec![first]));
                    }
                    let out = node
                        .children
                        .iter()
                        .enumerate()
                        .map(|(i, slot)| {
                            let element = seq.get(i).unwrap_or(&CellValue::Empty);
                            convert_value(element, slot, enums)
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Ok(Value::Array(out))
                }
            }
        }
        // Custom types are opaque to the converter; comment cells are
        // normally filtered out before conversion. Both pass through.
        TypeKind::Custom(_) | TypeKind::Comment => Ok(passthrough(value)),
    }
}

fn passthrough(value: &CellValue) -> Value {
    match value {
        CellValue::Empty => Value::Null,
        CellValue::Text(s) => Value::String(s.clone()),
        CellValue::Number(n) => Value::Number(Number::from_f64(*n)),
        CellValue::Parsed(seq) => Value::Array(seq.iter().map(passthrough).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compile_signature, EnumMembers, Registry};

    fn node(signature: &str) -> TypeNode {
        compile_signature(signature, &Registry::new()).unwrap()
    }

    fn rarity_table() -> EnumTable {
        let mut members = EnumMembers::new();
        members.insert("common".to_string(), Value::from(0));
        members.insert("rare".to_string(), Value::from(1));
        let mut table = EnumTable::new();
        table.insert("Rarity".to_string(), members);
        table
    }

    #[test]
    fn test_optional_empty_is_null() {
        let out = convert_value(&CellValue::Empty, &node("int?"), None).unwrap();
        assert_eq!(out, Value::Null);

        let out = convert_value(&CellValue::Text(String::new()), &node("string?"), None).unwrap();
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn test_required_empty_fails() {
        assert_eq!(
            convert_value(&CellValue::Empty, &node("int"), None),
            Err(Error::MissingRequiredValue)
        );
    }

    #[test]
    fn test_string_coercion() {
        let out = convert_value(&CellValue::from(" padded "), &node("string"), None).unwrap();
        assert_eq!(out, Value::from("padded"));

        let out = convert_value(&CellValue::from(3.0), &node("string"), None).unwrap();
        assert_eq!(out, Value::from("3"));
    }

    #[test]
    fn test_numeric_coercion() {
        let out = convert_value(&CellValue::from("42"), &node("int"), None).unwrap();
        assert_eq!(out, Value::from(42));

        let out = convert_value(&CellValue::from("2.5"), &node("float"), None).unwrap();
        assert_eq!(out, Value::from(2.5));

        assert!(matches!(
            convert_value(&CellValue::from("abc"), &node("double"), None),
            Err(Error::InvalidValue(_))
        ));
    }

    #[test]
    fn test_bool_is_strict_zero_or_one() {
        let out = convert_value(&CellValue::from("1"), &node("bool"), None).unwrap();
        assert_eq!(out, Value::from(1));

        let out = convert_value(&CellValue::from(0.0), &node("bool"), None).unwrap();
        assert_eq!(out, Value::from(0));

        assert!(matches!(
            convert_value(&CellValue::from("2"), &node("bool"), None),
            Err(Error::InvalidValue(_))
        ));
    }

    #[test]
    fn test_enum_resolution() {
        let registry = Registry::new().with_enums(["Rarity"]);
        let node = compile_signature("e<Rarity>", &registry).unwrap();
        let table = rarity_table();

        let out = convert_value(&CellValue::from("rare"), &node, Some(&table)).unwrap();
        assert_eq!(out, Value::from(1));

        // Lookup is presence-based, so a member mapped to 0 still resolves.
        let out = convert_value(&CellValue::from("common"), &node, Some(&table)).unwrap();
        assert_eq!(out, Value::from(0));

        assert_eq!(
            convert_value(&CellValue::from("epic"), &node, Some(&table)),
            Err(Error::unknown_enum_member("Rarity", "epic"))
        );
        assert_eq!(
            convert_value(&CellValue::from("rare"), &node, None),
            Err(Error::MissingEnumTable)
        );
        assert_eq!(
            convert_value(&CellValue::from("rare"), &node, Some(&EnumTable::new())),
            Err(Error::MissingEnumTable)
        );
    }

    #[test]
    fn test_unknown_enum_type() {
        let table = rarity_table();
        let node = compile_signature("e<Quality>", &Registry::new()).unwrap();
        assert_eq!(
            convert_value(&CellValue::from("x"), &node, Some(&table)),
            Err(Error::UnknownEnumType("Quality".to_string()))
        );
    }

    #[test]
    fn test_list_from_text() {
        let out = convert_value(&CellValue::from("1,2,3"), &node("int[]"), None).unwrap();
        assert_eq!(
            out,
            Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)])
        );
    }

    #[test]
    fn test_nested_list() {
        let out = convert_value(&CellValue::from("[1,2],[3,4]"), &node("int[][]"), None).unwrap();
        assert_eq!(
            out,
            Value::Array(vec![
                Value::Array(vec![Value::from(1), Value::from(2)]),
                Value::Array(vec![Value::from(3), Value::from(4)]),
            ])
        );
    }

    #[test]
    fn test_list_reuses_parsed_sequence() {
        let parsed = CellValue::Parsed(vec![CellValue::from("1"), CellValue::from("2")]);
        let out = convert_value(&parsed, &node("int[]"), None).unwrap();
        assert_eq!(out, Value::Array(vec![Value::from(1), Value::from(2)]));
    }

    #[test]
    fn test_list_rejects_scalar() {
        assert!(matches!(
            convert_value(&CellValue::from(5.0), &node("int[]"), None),
            Err(Error::InvalidValue(_))
        ));
    }

    #[test]
    fn test_list_of_optional_elements() {
        let out = convert_value(&CellValue::from(",1"), &node("int?[]"), None).unwrap();
        assert_eq!(out, Value::Array(vec![Value::Null, Value::from(1)]));
    }

    #[test]
    fn test_tuple_positional_zip() {
        let out = convert_value(&CellValue::from("x,1"), &node("string,int"), None).unwrap();
        assert_eq!(out, Value::Array(vec![Value::from("x"), Value::from(1)]));
    }

    #[test]
    fn test_tuple_missing_trailing_optional() {
        let out = convert_value(&CellValue::from("x,1"), &node("string,int,int?"), None).unwrap();
        assert_eq!(
            out,
            Value::Array(vec![Value::from("x"), Value::from(1), Value::Null])
        );
    }

    #[test]
    fn test_tuple_missing_trailing_required_fails() {
        assert_eq!(
            convert_value(&CellValue::from("x"), &node("string,int"), None),
            Err(Error::MissingRequiredValue)
        );
    }

    #[test]
    fn test_tuple_single_value_shortcut() {
        let tuple = node("string,int?,int?");

        let out = convert_value(&CellValue::from("x"), &tuple, None).unwrap();
        assert_eq!(out, Value::Array(vec![Value::from("x")]));

        let out = convert_value(&CellValue::from("x,1,2"), &tuple, None).unwrap();
        assert_eq!(
            out,
            Value::Array(vec![Value::from("x"), Value::from(1), Value::from(2)])
        );
    }

    #[test]
    fn test_tuple_single_value_shortcut_numeric_cell() {
        let tuple = node("int,int?");
        let out = convert_value(&CellValue::from(7.0), &tuple, None).unwrap();
        assert_eq!(out, Value::Array(vec![Value::from(7)]));
    }

    #[test]
    fn test_tuple_rejects_bare_scalar_without_optional_tail() {
        assert!(matches!(
            convert_value(&CellValue::from(7.0), &node("int,int"), None),
            Err(Error::InvalidValue(_))
        ));
    }

    // Known gap carried over on purpose: a flat literal zipped against fewer
    // slots silently drops the surplus elements.
    #[test]
    fn test_tuple_surplus_elements_truncated() {
        let out = convert_value(&CellValue::from("x,1,2"), &node("string,int[]"), None).unwrap();
        assert_eq!(out, Value::Array(vec![Value::from("x"), Value::Array(vec![Value::from(1)])]));
    }

    #[test]
    fn test_custom_type_passthrough() {
        let n = node("t<Vector>");
        let out = convert_value(&CellValue::from("0,1"), &n, None).unwrap();
        assert_eq!(out, Value::from("0,1"));

        let parsed = CellValue::Parsed(vec![CellValue::from("0"), CellValue::from("1")]);
        let out = convert_value(&parsed, &n, None).unwrap();
        assert_eq!(out, Value::Array(vec![Value::from("0"), Value::from("1")]));
    }
}
