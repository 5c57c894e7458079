//! Raw cell values as supplied by the spreadsheet layer.
//!
//! The conversion core never touches a workbook file; the surrounding I/O
//! layer extracts each cell into a [`CellValue`] before invoking the core.
//! A cell is either absent, text, a number, or an already-parsed sequence
//! ([`CellValue::Parsed`]) produced by [`crate::parse_expression`] on an
//! earlier pass and reused as-is.
//!
//! ## Examples
//!
//! ```rust
//! use gridcast::CellValue;
//!
//! assert!(CellValue::Empty.is_empty());
//! assert!(CellValue::Text(String::new()).is_empty());
//! assert!(!CellValue::Text("0".to_string()).is_empty());
//! assert!(!CellValue::Number(0.0).is_empty());
//! ```

/// One raw cell value, already extracted from the spreadsheet's native types.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum CellValue {
    /// The cell holds nothing.
    #[default]
    Empty,
    /// A textual cell. The empty string counts as an empty cell.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// A sequence produced by [`crate::parse_expression`], reusable across
    /// rows without re-parsing.
    Parsed(Vec<CellValue>),
}

impl CellValue {
    /// Returns `true` if the cell is absent. Absence means [`CellValue::Empty`]
    /// or empty text; the string `"0"` and the number `0` are present values.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` if the cell is a bare scalar (text or number).
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, CellValue::Text(_) | CellValue::Number(_))
    }

    /// Coerces the cell to a trimmed string. Text is trimmed, numbers are
    /// formatted (whole values without a decimal point), everything else
    /// coerces to the empty string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gridcast::CellValue;
    ///
    /// assert_eq!(CellValue::Text(" hi ".to_string()).to_text(), "hi");
    /// assert_eq!(CellValue::Number(3.0).to_text(), "3");
    /// assert_eq!(CellValue::Number(1.5).to_text(), "1.5");
    /// assert_eq!(CellValue::Empty.to_text(), "");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Empty | CellValue::Parsed(_) => String::new(),
        }
    }

    /// Coerces the cell to a number: numeric cells directly, textual cells by
    /// trimming and parsing. Returns `None` for non-numeric text and for
    /// sequences.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Empty | CellValue::Parsed(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<Vec<CellValue>> for CellValue {
    fn from(value: Vec<CellValue>) -> Self {
        CellValue::Parsed(value)
    }
}
