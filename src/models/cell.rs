//! Cell and row table types.
//!
//! A statement arrives as a rectangular table of loosely typed scalars. This
//! module defines [`Cell`], the scalar, plus the [`Row`] and [`RowTable`]
//! aliases the structuring pass consumes.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A single scalar read from a statement table.
///
/// Blank cells, missing cells and NaN numbers are all treated as empty. A JSON
/// boolean is read as the text `TRUE` or `FALSE`, the way spreadsheet
/// decoders render it.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Cell;
///
/// assert!(Cell::Empty.is_blank());
/// assert!(Cell::from("   ").is_blank());
/// assert!(Cell::Number(f64::NAN).is_blank());
/// assert_eq!(Cell::from(7.0).text(), "7");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "RawCell")]
pub enum Cell {
    /// A numeric value, as produced by spreadsheet decoders.
    Number(f64),
    /// Free text.
    Text(String),
    /// No value.
    #[default]
    Empty,
}

/// Wire form of a cell, before booleans are folded into text.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Number(f64),
    Bool(bool),
    Text(String),
    Empty,
}

impl From<RawCell> for Cell {
    fn from(raw: RawCell) -> Self {
        match raw {
            RawCell::Number(value) => Cell::Number(value),
            RawCell::Bool(value) => Cell::Text(if value { "TRUE" } else { "FALSE" }.to_string()),
            RawCell::Text(text) => Cell::Text(text),
            RawCell::Empty => Cell::Empty,
        }
    }
}

impl Cell {
    /// Returns true when the cell carries no usable content.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(text) => text.trim().is_empty(),
            Cell::Number(value) => value.is_nan(),
        }
    }

    /// Returns the trimmed textual form of the cell.
    ///
    /// Whole numbers render without a fractional part so that an employee id
    /// or event code stored as a float reads as `"7"`, not `"7.0"`.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Cell::Empty => Cow::Borrowed(""),
            Cell::Text(text) => Cow::Borrowed(text.trim()),
            Cell::Number(value) if value.is_nan() => Cow::Borrowed(""),
            Cell::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                Cow::Owned(format!("{}", *value as i64))
            }
            Cell::Number(value) => Cow::Owned(value.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Empty, Into::into)
    }
}

/// An ordered sequence of cells.
pub type Row = Vec<Cell>;

/// An ordered sequence of rows, as decoded from a statement file.
pub type RowTable = Vec<Row>;

/// Returns true when every cell of the row is blank.
pub fn is_blank_row(row: &[Cell]) -> bool {
    row.iter().all(Cell::is_blank)
}

/// Builds a row from anything convertible into cells.
///
/// ```
/// use payroll_engine::models::{row, Cell};
///
/// let r = row(["1", "", "HORAS NORMAIS"]);
/// assert_eq!(r[2], Cell::from("HORAS NORMAIS"));
/// ```
pub fn row<I, T>(cells: I) -> Row
where
    I: IntoIterator<Item = T>,
    T: Into<Cell>,
{
    cells.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_mixed_row() {
        let json = r#"["7 - ALEX MELO", 4077.32, null, ""]"#;
        let row: Row = serde_json::from_str(json).unwrap();
        assert_eq!(row[0], Cell::Text("7 - ALEX MELO".to_string()));
        assert_eq!(row[1], Cell::Number(4077.32));
        assert_eq!(row[2], Cell::Empty);
        assert!(row[3].is_blank());
    }

    #[test]
    fn test_deserialize_booleans_as_text() {
        let row: Row = serde_json::from_str("[true, false, null]").unwrap();
        assert_eq!(row, vec![Cell::from("TRUE"), Cell::from("FALSE"), Cell::Empty]);
    }

    #[test]
    fn test_serialize_is_untagged() {
        let json = serde_json::to_string(&row(["7 - ALEX MELO"])).unwrap();
        assert_eq!(json, r#"["7 - ALEX MELO"]"#);
        assert_eq!(serde_json::to_string(&Cell::Empty).unwrap(), "null");
    }

    #[test]
    fn test_text_trims_whitespace() {
        assert_eq!(Cell::from("  10/2025 ").text(), "10/2025");
    }

    #[test]
    fn test_text_renders_whole_numbers_without_fraction() {
        assert_eq!(Cell::Number(1.0).text(), "1");
        assert_eq!(Cell::Number(626.63).text(), "626.63");
    }

    #[test]
    fn test_nan_is_blank_and_empty_text() {
        let cell = Cell::Number(f64::NAN);
        assert!(cell.is_blank());
        assert_eq!(cell.text(), "");
    }

    #[test]
    fn test_blank_row_detection() {
        assert!(is_blank_row(&row(["", " ", "\t"])));
        assert!(is_blank_row(&[]));
        assert!(!is_blank_row(&row(["", "x"])));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Cell::from(None::<&str>), Cell::Empty);
        assert_eq!(Cell::from(Some(2.5)), Cell::Number(2.5));
    }
}
