//! In-memory sheet model and whole-sheet record conversion.
//!
//! The crate performs no workbook I/O; the surrounding layer reads a file
//! and hands over a [`Sheet`], an ordered grid of [`CellValue`]s. A data
//! sheet follows a fixed header layout:
//!
//! | row | content                         |
//! |-----|---------------------------------|
//! | 1   | human-readable titles (ignored) |
//! | 2   | field names                     |
//! | 3   | type signatures                 |
//! | 4+  | data rows                       |
//!
//! [`sheet_to_records`] compiles the schema from rows 2 and 3 and converts
//! every data row into a [`Record`]. Columns typed `comment` are dropped
//! from the output. The first failing cell aborts the whole sheet, wrapped
//! with its A1 address and the column's signature text.
//!
//! ## Examples
//!
//! ```rust
//! use gridcast::{sheet_to_records, CellValue, Sheet, Value};
//!
//! let sheet = Sheet::from_rows(vec![
//!     vec![CellValue::from("名字"), CellValue::from("等级")],
//!     vec![CellValue::from("name"), CellValue::from("level")],
//!     vec![CellValue::from("string"), CellValue::from("int")],
//!     vec![CellValue::from("slime"), CellValue::from("3")],
//! ]);
//!
//! let output = sheet_to_records(&sheet, None).unwrap();
//! assert_eq!(output.records.len(), 1);
//! assert_eq!(output.records[0]["level"], Value::from(3));
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::enums::EnumTable;
use crate::schema::{build_schema, Schema};
use crate::signature::{Registry, TypeKind};
use crate::{convert_value, CellValue, Result, Value};

/// Row index of the human-readable title row.
pub const TITLE_ROW: usize = 0;
/// Row index of the field-name row.
pub const FIELD_ROW: usize = 1;
/// Row index of the signature row.
pub const SIGNATURE_ROW: usize = 2;
/// Index of the first data row.
pub const DATA_START_ROW: usize = 3;

/// Row index of the enum-name row on an enum sheet.
pub const ENUM_NAME_ROW: usize = 1;
/// Row index of the value-kind row on an enum sheet.
pub const ENUM_KIND_ROW: usize = 2;
/// Index of the first member row on an enum sheet.
pub const MEMBER_START_ROW: usize = 3;

/// An ordered grid of raw cell values. Rows may be ragged; missing cells
/// read as [`CellValue::Empty`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sheet {
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Creates an empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sheet from its rows, top to bottom.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Sheet { rows }
    }

    /// Appends a row at the bottom.
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the widest row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns a row by 0-based index, or `None` past the bottom.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Returns the cell at the 0-based position, or [`CellValue::Empty`]
    /// outside the grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }
}

/// Formats a 0-based (row, column) position as an A1-style address.
///
/// # Examples
///
/// ```rust
/// use gridcast::cell_address;
///
/// assert_eq!(cell_address(0, 0), "A1");
/// assert_eq!(cell_address(4, 2), "C5");
/// assert_eq!(cell_address(0, 27), "AB1");
/// ```
#[must_use]
pub fn cell_address(row: usize, col: usize) -> String {
    let mut letters = String::new();
    let mut c = col + 1;
    while c > 0 {
        let rem = (c - 1) % 26;
        letters.insert(0, (b'A' + rem as u8) as char);
        c = (c - 1) / 26;
    }
    format!("{}{}", letters, row + 1)
}

/// One converted data row: field name to converted value, in column order.
pub type Record = IndexMap<String, Value>;

/// The result of converting one data sheet: the compiled schema and the
/// converted records, both serializable.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SheetOutput {
    pub schema: Schema,
    pub records: Vec<Record>,
}

/// Converts a data sheet into records.
///
/// The enum registry for signature compilation is derived from the supplied
/// [`EnumTable`]'s keys, so an `e<Name>` column whose enum the table lacks
/// fails already at schema-compilation time. Custom-type names are left
/// unchecked at this layer.
///
/// # Examples
///
/// ```rust
/// use gridcast::{sheet_to_records, CellValue, Sheet};
///
/// let sheet = Sheet::from_rows(vec![
///     vec![CellValue::from("备注"), CellValue::from("坐标")],
///     vec![CellValue::from("note"), CellValue::from("pos")],
///     vec![CellValue::from("comment"), CellValue::from("int,int")],
///     vec![CellValue::from("ignore me"), CellValue::from("3,4")],
/// ]);
///
/// let output = sheet_to_records(&sheet, None).unwrap();
/// // comment columns never reach the output
/// assert!(!output.records[0].contains_key("note"));
/// assert!(output.records[0].contains_key("pos"));
/// ```
///
/// # Errors
///
/// Schema errors propagate bare; cell conversion errors arrive wrapped in
/// [`crate::Error::Cell`] with the failing cell's address and signature.
pub fn sheet_to_records(sheet: &Sheet, enums: Option<&EnumTable>) -> Result<SheetOutput> {
    let fields = sheet.row(FIELD_ROW).unwrap_or(&[]);
    let signatures = sheet.row(SIGNATURE_ROW).unwrap_or(&[]);
    let registry = match enums {
        Some(table) => Registry::new().with_enums(table.keys().cloned()),
        None => Registry::new(),
    };
    let schema = build_schema(fields, signatures, &registry)?;

    let mut records = Vec::new();
    for row_index in DATA_START_ROW..sheet.row_count() {
        let mut record = Record::new();
        for (col, field_cell) in fields.iter().enumerate() {
            let field = field_cell.to_text();
            if field.is_empty() {
                continue;
            }
            // Every named column is in the schema; build_schema walked the
            // same row.
            let Some(def) = schema.get(&field) else {
                continue;
            };
            if def.node.kind == TypeKind::Comment {
                continue;
            }
            let cell = sheet.cell(row_index, col);
            let value = convert_value(cell, &def.node, enums)
                .map_err(|e| e.at_cell(cell_address(row_index, col), &def.signature))?;
            record.insert(field, value);
        }
        records.push(record);
    }

    Ok(SheetOutput { schema, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_cell_address() {
        assert_eq!(cell_address(0, 0), "A1");
        assert_eq!(cell_address(3, 1), "B4");
        assert_eq!(cell_address(0, 25), "Z1");
        assert_eq!(cell_address(0, 26), "AA1");
        assert_eq!(cell_address(9, 701), "ZZ10");
    }

    #[test]
    fn test_ragged_rows_read_empty() {
        let sheet = Sheet::from_rows(vec![vec![CellValue::from("a")]]);
        assert_eq!(sheet.cell(0, 5), &CellValue::Empty);
        assert_eq!(sheet.cell(7, 0), &CellValue::Empty);
    }

    fn monster_sheet() -> Sheet {
        Sheet::from_rows(vec![
            vec![
                CellValue::from("名字"),
                CellValue::from("等级"),
                CellValue::from("掉落"),
                CellValue::from("备注"),
            ],
            vec![
                CellValue::from("name"),
                CellValue::from("level"),
                CellValue::from("drops"),
                CellValue::from("note"),
            ],
            vec![
                CellValue::from("string"),
                CellValue::from("int"),
                CellValue::from("int[]?"),
                CellValue::from("comment"),
            ],
            vec![
                CellValue::from("slime"),
                CellValue::from("1"),
                CellValue::from("101,102"),
                CellValue::from("starter enemy"),
            ],
            vec![
                CellValue::from("bat"),
                CellValue::from(2.0),
                CellValue::Empty,
                CellValue::Empty,
            ],
        ])
    }

    #[test]
    fn test_sheet_to_records() {
        let output = sheet_to_records(&monster_sheet(), None).unwrap();
        assert_eq!(output.records.len(), 2);

        let first = &output.records[0];
        assert_eq!(first["name"], Value::from("slime"));
        assert_eq!(first["level"], Value::from(1));
        assert_eq!(
            first["drops"],
            Value::Array(vec![Value::from(101), Value::from(102)])
        );
        assert!(!first.contains_key("note"));

        let second = &output.records[1];
        assert_eq!(second["level"], Value::from(2));
        assert_eq!(second["drops"], Value::Null);
    }

    #[test]
    fn test_conversion_error_carries_position() {
        let mut sheet = monster_sheet();
        sheet.push_row(vec![
            CellValue::from("ghost"),
            CellValue::from("lots"),
            CellValue::Empty,
            CellValue::Empty,
        ]);
        let err = sheet_to_records(&sheet, None).unwrap_err();
        match err {
            Error::Cell {
                address,
                signature,
                source,
            } => {
                assert_eq!(address, "B6");
                assert_eq!(signature, "int");
                assert!(matches!(*source, Error::InvalidValue(_)));
            }
            other => panic!("expected wrapped cell error, got {:?}", other),
        }
    }

    #[test]
    fn test_enum_registry_derived_from_table() {
        let sheet = Sheet::from_rows(vec![
            vec![CellValue::from("t")],
            vec![CellValue::from("rarity")],
            vec![CellValue::from("e<Missing>")],
            vec![CellValue::from("common")],
        ]);
        let mut table = EnumTable::new();
        table.insert("Rarity".to_string(), Default::default());
        assert!(matches!(
            sheet_to_records(&sheet, Some(&table)),
            Err(Error::UnregisteredType { .. })
        ));
    }

    #[test]
    fn test_output_serializes() {
        let output = sheet_to_records(&monster_sheet(), None).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["records"][0]["name"], "slime");
        assert_eq!(json["records"][1]["drops"], serde_json::Value::Null);
        assert_eq!(json["schema"]["drops"]["signature"], "int[]?");
    }
}
