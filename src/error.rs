//! Error types for signature compilation and value conversion.
//!
//! Every failure in this crate is terminal: the core never retries, skips, or
//! substitutes defaults. The core raises a bare semantic error; the sheet layer
//! wraps it with positional context (A1 cell address and the column's signature
//! text) via [`Error::Cell`] before it reaches the caller.
//!
//! ## Error Categories
//!
//! - **Syntax**: [`Error::MalformedExpression`], [`Error::InvalidSignature`]
//! - **Registration**: [`Error::UnregisteredType`], [`Error::UnknownEnumType`],
//!   [`Error::UnknownEnumMember`], [`Error::MissingEnumTable`]
//! - **Data**: [`Error::MissingRequiredValue`], [`Error::InvalidValue`]
//! - **Sheet layout**: [`Error::DuplicateField`], [`Error::InvalidEnumSheet`]
//!
//! ## Examples
//!
//! ```rust
//! use gridcast::{compile_signature, Registry, Error};
//!
//! let err = compile_signature("not a type", &Registry::new()).unwrap_err();
//! assert!(matches!(err, Error::InvalidSignature(_)));
//! ```

use thiserror::Error;

/// Represents all possible errors raised while compiling signatures,
/// parsing cell expressions, or converting cell values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// An array/tuple literal closed a bracket that was never opened.
    #[error("malformed expression: {0}")]
    MalformedExpression(String),

    /// A type signature matched none of the grammar rules, or a composite
    /// node was structurally unusable (e.g. a list with no element type).
    #[error("invalid type signature: {0}")]
    InvalidSignature(String),

    /// An `e<Name>` or `t<Name>` signature referenced a name absent from the
    /// supplied registry.
    #[error("unregistered {kind} type: {name}")]
    UnregisteredType { kind: &'static str, name: String },

    /// A non-optional field received an empty cell.
    #[error("value must not be empty")]
    MissingRequiredValue,

    /// A cell value did not satisfy its declared type.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// An enum-typed cell was converted without an enum table.
    #[error("no enum table supplied")]
    MissingEnumTable,

    /// The enum table has no entry for the declared enum name.
    #[error("unknown enum type: {0}")]
    UnknownEnumType(String),

    /// The enum exists but has no member with the given key.
    #[error("unknown enum member: {enum_name}.{member}")]
    UnknownEnumMember { enum_name: String, member: String },

    /// Two columns of one sheet declared the same field name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// The enum sheet violated its layout conventions.
    #[error("invalid enum sheet: {0}")]
    InvalidEnumSheet(String),

    /// A conversion failure wrapped with the cell address and column
    /// signature it occurred at. Only the sheet layer produces this.
    #[error("cell {address}, signature \"{signature}\": {source}")]
    Cell {
        address: String,
        signature: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Creates a malformed-expression error.
    pub fn malformed_expression(msg: impl Into<String>) -> Self {
        Error::MalformedExpression(msg.into())
    }

    /// Creates an invalid-signature error carrying the offending signature text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gridcast::Error;
    ///
    /// let err = Error::invalid_signature("wat");
    /// assert!(err.to_string().contains("wat"));
    /// ```
    pub fn invalid_signature(signature: impl Into<String>) -> Self {
        Error::InvalidSignature(signature.into())
    }

    /// Creates an unregistered-type error. `kind` is `"enum"` or `"custom"`.
    pub fn unregistered(kind: &'static str, name: impl Into<String>) -> Self {
        Error::UnregisteredType {
            kind,
            name: name.into(),
        }
    }

    /// Creates an invalid-value error with a description of the mismatch.
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Error::InvalidValue(msg.into())
    }

    /// Creates an unknown-enum-member error.
    pub fn unknown_enum_member(enum_name: impl Into<String>, member: impl Into<String>) -> Self {
        Error::UnknownEnumMember {
            enum_name: enum_name.into(),
            member: member.into(),
        }
    }

    /// Creates an invalid-enum-sheet error.
    pub fn invalid_enum_sheet(msg: impl Into<String>) -> Self {
        Error::InvalidEnumSheet(msg.into())
    }

    /// Wraps an error with the cell address and signature it was raised at.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gridcast::Error;
    ///
    /// let err = Error::MissingRequiredValue.at_cell("B5", "int");
    /// assert!(err.to_string().contains("B5"));
    /// ```
    #[must_use]
    pub fn at_cell(self, address: impl Into<String>, signature: impl Into<String>) -> Self {
        Error::Cell {
            address: address.into(),
            signature: signature.into(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
