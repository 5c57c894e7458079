//! Per-sheet schema: field names mapped to compiled column types.
//!
//! A data sheet declares its fields in one header row and their type
//! signatures in the next. [`build_schema`] walks the two rows in column
//! order and compiles each signature once; the resulting [`Schema`] is then
//! reused for every data row of the sheet.

use indexmap::IndexMap;
use serde::Serialize;

use crate::signature::{compile_signature, Registry, TypeNode};
use crate::{CellValue, Error, Result};

/// One column's declaration: the raw signature text and its compiled type.
///
/// The raw text is kept alongside the tree so conversion errors can quote
/// the signature the sheet author actually wrote.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Field {
    pub signature: String,
    #[serde(rename = "type")]
    pub node: TypeNode,
}

/// Field name to [`Field`], in column order.
pub type Schema = IndexMap<String, Field>;

/// Builds a [`Schema`] from a field-name row and a signature row.
///
/// Columns with a blank field cell are skipped; field names must be unique
/// within the sheet.
///
/// # Examples
///
/// ```rust
/// use gridcast::{build_schema, CellValue, Registry, TypeKind};
///
/// let fields = vec![CellValue::from("id"), CellValue::from("tags")];
/// let signatures = vec![CellValue::from("int"), CellValue::from("string[]")];
///
/// let schema = build_schema(&fields, &signatures, &Registry::new()).unwrap();
/// assert_eq!(schema["id"].node.kind, TypeKind::Int);
/// assert_eq!(schema["tags"].signature, "string[]");
/// ```
///
/// # Errors
///
/// - [`Error::DuplicateField`] when two columns declare the same field name.
/// - Any [`crate::Error`] raised while compiling a signature.
pub fn build_schema(
    fields: &[CellValue],
    signatures: &[CellValue],
    registry: &Registry,
) -> Result<Schema> {
    let mut schema = Schema::new();
    for (col, cell) in fields.iter().enumerate() {
        let field = cell.to_text();
        if field.is_empty() {
            continue;
        }
        if schema.contains_key(&field) {
            return Err(Error::DuplicateField(field));
        }
        let signature = signatures.get(col).map_or_else(String::new, CellValue::to_text);
        let node = compile_signature(&signature, registry)?;
        schema.insert(field, Field { signature, node });
    }
    Ok(schema)
}
