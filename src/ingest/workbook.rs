//! Excel workbook decoding.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::error::{IngestError, IngestResult};
use crate::models::{Cell, Row, RowTable};

use super::{PREFERRED_SHEET, UploadFormat};

/// Reads the preferred worksheet of a workbook into rows.
///
/// The sheet's leading empty rows and columns are kept, so column positions
/// match what the user sees in Excel.
pub(super) fn decode_workbook(bytes: &[u8], format: UploadFormat) -> IngestResult<RowTable> {
    let read_error = |message: String| match format {
        UploadFormat::Xls => IngestError::CorruptedFile { message },
        _ => IngestError::XlsxRead { message },
    };

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| read_error(e.to_string()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let sheet_name = select_sheet(&sheet_names).ok_or(IngestError::EmptySheets)?.to_string();
    debug!(sheet = %sheet_name, sheets = sheet_names.len(), "Reading worksheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| read_error(format!("sheet '{}': {}", sheet_name, e)))?;

    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: RowTable = vec![Vec::new(); start_row as usize];

    for source in range.rows() {
        let mut row: Row = vec![Cell::Empty; start_col as usize];
        row.extend(source.iter().map(cell_from_data));
        rows.push(row);
    }

    if rows.iter().all(Vec::is_empty) {
        rows.clear();
    }

    Ok(rows)
}

/// Picks `Movimentos` when present, otherwise the first sheet.
pub(super) fn select_sheet(sheet_names: &[String]) -> Option<&str> {
    sheet_names
        .iter()
        .find(|name| name.as_str() == PREFERRED_SHEET)
        .or_else(|| sheet_names.first())
        .map(String::as_str)
}

pub(super) fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) => Cell::Text(text.clone()),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Text(if *value { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(error) => Cell::Text(format!("#{:?}", error)),
        // serial date, as Excel stores it
        Data::DateTime(date) => Cell::Number(date.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_preferred_sheet_is_selected() {
        let sheets = names(&["Resumo", "Movimentos", "Outros"]);
        assert_eq!(select_sheet(&sheets), Some("Movimentos"));
    }

    #[test]
    fn test_first_sheet_without_preferred() {
        let sheets = names(&["Plan1", "Plan2"]);
        assert_eq!(select_sheet(&sheets), Some("Plan1"));
        assert_eq!(select_sheet(&[]), None);
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(cell_from_data(&Data::Float(4077.32)), Cell::Number(4077.32));
        assert_eq!(cell_from_data(&Data::String("10/2025".to_string())), Cell::from("10/2025"));
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::from("TRUE"));
    }

    #[test]
    fn test_garbage_xlsx_is_read_error() {
        let result = decode_workbook(b"not a workbook", UploadFormat::Xlsx);
        assert_eq!(result.unwrap_err().code(), "XLSX_READ_ERROR");
    }

    #[test]
    fn test_garbage_xls_is_corrupted() {
        let result = decode_workbook(b"not a workbook", UploadFormat::Xls);
        assert_eq!(result.unwrap_err().code(), "CORRUPTED_FILE");
    }
}
