//! # gridcast
//!
//! Convert tabular spreadsheet data into structured JSON records according
//! to a per-column type-signature DSL.
//!
//! ## The signature DSL
//!
//! Each worksheet column declares a field name and a compact type signature:
//!
//! - base scalars: `int`, `float`, `double`, `string`, `bool`, `comment`
//! - lists: `int[]`, nestable as `int[][]` (cells use `[...]` nesting markers)
//! - tuples: `string,int,bool[]` (cells are comma-delimited)
//! - custom types `t<Vector>` and enums `e<Rarity>`, validated against a
//!   [`Registry`] and resolved through an [`EnumTable`]
//! - a trailing `?` makes any type optional, letting an empty cell resolve
//!   to `null` instead of failing
//!
//! ## Pipeline
//!
//! Two stages run in sequence, per column and then per cell:
//!
//! 1. **Schema compilation**: [`compile_signature`] turns a signature
//!    string into an immutable [`TypeNode`] tree, once per column.
//! 2. **Value conversion**: [`convert_value`] walks a raw [`CellValue`]
//!    against that tree (parsing delimited literals via
//!    [`parse_expression`]) and produces a JSON-shaped [`Value`].
//!
//! On top of the core sit the sheet helpers: [`build_schema`],
//! [`sheet_to_enums`], and [`sheet_to_records`], which apply the two stages
//! to a whole in-memory [`Sheet`]. Reading workbook files and writing JSON
//! to disk stay outside this crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use gridcast::{sheet_to_records, CellValue, Sheet, Value};
//!
//! let sheet = Sheet::from_rows(vec![
//!     // row 1: titles (ignored), row 2: fields, row 3: signatures
//!     vec![CellValue::from("技能"), CellValue::from("伤害")],
//!     vec![CellValue::from("skill"), CellValue::from("damage")],
//!     vec![CellValue::from("string"), CellValue::from("int[]")],
//!     vec![CellValue::from("fireball"), CellValue::from("10,20,40")],
//! ]);
//!
//! let output = sheet_to_records(&sheet, None).unwrap();
//! assert_eq!(output.records[0]["skill"], Value::from("fireball"));
//! assert_eq!(
//!     serde_json::to_string(&output.records[0]["damage"]).unwrap(),
//!     "[10,20,40]"
//! );
//! ```
//!
//! ## Using the core directly
//!
//! ```rust
//! use gridcast::{compile_signature, convert_value, CellValue, Registry, Value};
//!
//! let registry = Registry::new().with_custom_types(["Vector"]);
//! let node = compile_signature("string,?", &registry).unwrap();
//! // Two parts where the last is `?` collapse to one optional type.
//! let out = convert_value(&CellValue::Empty, &node, None).unwrap();
//! assert_eq!(out, Value::Null);
//! ```
//!
//! ## Failure model
//!
//! Every error is terminal and typed ([`Error`]): a single malformed
//! signature or cell aborts the sheet. The core raises bare semantic
//! errors; [`sheet_to_records`] wraps them with the failing cell's A1
//! address and signature text.
//!
//! ## Concurrency
//!
//! All functions are pure and synchronous. A compiled [`TypeNode`] tree and
//! an [`EnumTable`] are immutable after construction, so one schema may
//! convert arbitrarily many rows, from multiple threads, without
//! synchronization.

pub mod cell;
pub mod convert;
pub mod enums;
pub mod error;
pub mod expr;
pub mod schema;
pub mod sheet;
pub mod signature;
pub mod value;

pub use cell::CellValue;
pub use convert::convert_value;
pub use enums::{sheet_to_enums, EnumMembers, EnumTable};
pub use error::{Error, Result};
pub use expr::parse_expression;
pub use schema::{build_schema, Field, Schema};
pub use sheet::{cell_address, sheet_to_records, Record, Sheet, SheetOutput};
pub use signature::{compile_signature, Registry, TypeKind, TypeNode};
pub use value::{Number, Value};
