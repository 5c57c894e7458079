//! Enum table extraction from a dedicated enum sheet.
//!
//! An enum sheet declares one enum per column:
//!
//! | row | content                                      |
//! |-----|----------------------------------------------|
//! | 1   | human-readable title (ignored)               |
//! | 2   | enum name                                    |
//! | 3   | value kind: `int` (default) or `string`      |
//! | 4+  | member keys, one per row                     |
//!
//! With the `int` kind each member maps to its row-derived ordinal starting
//! at 1 (the first member row); with `string` each member maps to its own
//! key. Blank member rows are skipped, but ordinals stay tied to row
//! position, so a gap in the sheet leaves a gap in the numbering.
//!
//! The resulting [`EnumTable`] is what [`crate::convert_value`] resolves
//! `e<Name>` cells against, and its keys double as the enum registry for
//! signature compilation.

use indexmap::IndexMap;

use crate::sheet::{cell_address, Sheet, ENUM_KIND_ROW, ENUM_NAME_ROW, MEMBER_START_ROW};
use crate::{Error, Result, Value};

/// Member key to member value, in declaration order.
pub type EnumMembers = IndexMap<String, Value>;

/// Enum name to its member map, in column order.
pub type EnumTable = IndexMap<String, EnumMembers>;

/// Builds an [`EnumTable`] from an enum sheet.
///
/// Columns whose first cell is empty are skipped entirely; a non-blank
/// column with no enum name in row 2 is a hard error.
///
/// # Examples
///
/// ```rust
/// use gridcast::{sheet_to_enums, CellValue, Sheet, Value};
///
/// let sheet = Sheet::from_rows(vec![
///     vec![CellValue::from("稀有度")],
///     vec![CellValue::from("Rarity")],
///     vec![CellValue::from("int")],
///     vec![CellValue::from("common")],
///     vec![CellValue::from("rare")],
/// ]);
///
/// let table = sheet_to_enums(&sheet).unwrap();
/// assert_eq!(table["Rarity"]["common"], Value::from(1));
/// assert_eq!(table["Rarity"]["rare"], Value::from(2));
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidEnumSheet`] when a column is missing its enum
/// name or declares an unsupported value kind.
pub fn sheet_to_enums(sheet: &Sheet) -> Result<EnumTable> {
    let mut table = EnumTable::new();
    for col in 0..sheet.column_count() {
        if sheet.cell(0, col).is_empty() {
            continue;
        }
        let name = sheet.cell(ENUM_NAME_ROW, col).to_text();
        if name.is_empty() {
            return Err(Error::invalid_enum_sheet(format!(
                "enum name missing at {}",
                cell_address(ENUM_NAME_ROW, col)
            )));
        }

        let kind = sheet.cell(ENUM_KIND_ROW, col).to_text();
        let string_values = match kind.as_str() {
            "" | "int" => false,
            "string" => true,
            other => {
                return Err(Error::invalid_enum_sheet(format!(
                    "unsupported enum value kind \"{}\" at {}",
                    other,
                    cell_address(ENUM_KIND_ROW, col)
                )));
            }
        };

        let mut members = EnumMembers::new();
        for row in MEMBER_START_ROW..sheet.row_count() {
            let key = sheet.cell(row, col).to_text();
            if key.is_empty() {
                continue;
            }
            let value = if string_values {
                Value::String(key.clone())
            } else {
                // Ordinals start at 1 and follow row position.
                Value::from((row - MEMBER_START_ROW + 1) as i64)
            };
            members.insert(key, value);
        }
        table.insert(name, members);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellValue;

    fn enum_sheet() -> Sheet {
        Sheet::from_rows(vec![
            vec![CellValue::from("品质"), CellValue::from("元素")],
            vec![CellValue::from("Rarity"), CellValue::from("Element")],
            vec![CellValue::from("int"), CellValue::from("string")],
            vec![CellValue::from("common"), CellValue::from("fire")],
            vec![CellValue::from("rare"), CellValue::from("water")],
            vec![CellValue::from("epic"), CellValue::Empty],
        ])
    }

    #[test]
    fn test_int_enum_ordinals() {
        let table = sheet_to_enums(&enum_sheet()).unwrap();
        let rarity = &table["Rarity"];
        assert_eq!(rarity["common"], Value::from(1));
        assert_eq!(rarity["rare"], Value::from(2));
        assert_eq!(rarity["epic"], Value::from(3));
    }

    #[test]
    fn test_string_enum_identity() {
        let table = sheet_to_enums(&enum_sheet()).unwrap();
        let element = &table["Element"];
        assert_eq!(element["fire"], Value::from("fire"));
        assert_eq!(element["water"], Value::from("water"));
        assert_eq!(element.len(), 2);
    }

    #[test]
    fn test_gap_in_member_rows_leaves_ordinal_gap() {
        let sheet = Sheet::from_rows(vec![
            vec![CellValue::from("t")],
            vec![CellValue::from("Slot")],
            vec![CellValue::Empty],
            vec![CellValue::from("head")],
            vec![CellValue::Empty],
            vec![CellValue::from("body")],
        ]);
        let table = sheet_to_enums(&sheet).unwrap();
        assert_eq!(table["Slot"]["head"], Value::from(1));
        assert_eq!(table["Slot"]["body"], Value::from(3));
    }

    #[test]
    fn test_blank_first_cell_skips_column() {
        let sheet = Sheet::from_rows(vec![
            vec![CellValue::Empty, CellValue::from("t")],
            vec![CellValue::from("Ghost"), CellValue::from("Real")],
            vec![CellValue::Empty, CellValue::Empty],
            vec![CellValue::from("a"), CellValue::from("b")],
        ]);
        let table = sheet_to_enums(&sheet).unwrap();
        assert!(!table.contains_key("Ghost"));
        assert!(table.contains_key("Real"));
    }

    #[test]
    fn test_missing_name_fails() {
        let sheet = Sheet::from_rows(vec![
            vec![CellValue::from("t")],
            vec![CellValue::Empty],
            vec![CellValue::from("int")],
            vec![CellValue::from("a")],
        ]);
        assert!(matches!(
            sheet_to_enums(&sheet),
            Err(Error::InvalidEnumSheet(_))
        ));
    }

    #[test]
    fn test_unsupported_kind_fails() {
        let sheet = Sheet::from_rows(vec![
            vec![CellValue::from("t")],
            vec![CellValue::from("Bad")],
            vec![CellValue::from("float")],
            vec![CellValue::from("a")],
        ]);
        assert!(matches!(
            sheet_to_enums(&sheet),
            Err(Error::InvalidEnumSheet(_))
        ));
    }
}
