//! Upload decoding for the Payroll Structuring Engine.
//!
//! Statements arrive as CSV exports or Excel workbooks. This module turns the
//! uploaded bytes into a rectangular [`RowTable`] the structurer can consume,
//! or an [`IngestError`] carrying a stable error code.
//!
//! # Example
//!
//! ```
//! use payroll_engine::ingest::decode_upload;
//! use payroll_engine::models::Cell;
//!
//! let bytes = "Código;Descrição\n7 - ALEX MELO\n1;HORAS NORMAIS\n".as_bytes();
//! let rows = decode_upload("folha.csv", bytes, 1024).unwrap();
//! assert_eq!(rows.len(), 3);
//! assert_eq!(rows[1], vec![Cell::from("7 - ALEX MELO"), Cell::Empty]);
//! ```

mod delimited;
mod workbook;

use std::path::Path;

use tracing::debug;

use crate::error::{IngestError, IngestResult};
use crate::models::{Cell, RowTable};

/// Name of the worksheet preferred when a workbook has several.
pub const PREFERRED_SHEET: &str = "Movimentos";

/// Upload formats the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    /// Delimited text (`.csv`, `.txt`).
    Csv,
    /// Office Open XML workbook (`.xlsx`).
    Xlsx,
    /// Legacy binary workbook (`.xls`).
    Xls,
}

impl UploadFormat {
    /// Picks the format from a file name's extension, case-insensitively.
    pub fn from_filename(filename: &str) -> IngestResult<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();

        match extension.as_str() {
            "csv" | "txt" => Ok(UploadFormat::Csv),
            "xlsx" => Ok(UploadFormat::Xlsx),
            "xls" => Ok(UploadFormat::Xls),
            _ => Err(IngestError::UnsupportedFormat { extension }),
        }
    }
}

/// Decodes an uploaded statement into a rectangular row table.
///
/// # Errors
///
/// - [`IngestError::NoFile`] if the file name is blank
/// - [`IngestError::FileTooLarge`] if `bytes` exceeds `max_upload_bytes`
/// - [`IngestError::UnsupportedFormat`] for anything but csv, txt, xlsx, xls
/// - the workbook errors from the spreadsheet decoder
/// - [`IngestError::ParsingFailed`] if nothing could be read
pub fn decode_upload(filename: &str, bytes: &[u8], max_upload_bytes: usize) -> IngestResult<RowTable> {
    if filename.trim().is_empty() {
        return Err(IngestError::NoFile);
    }

    if bytes.len() > max_upload_bytes {
        return Err(IngestError::FileTooLarge {
            size: bytes.len(),
            max_size: max_upload_bytes,
        });
    }

    let format = UploadFormat::from_filename(filename)?;
    debug!(filename, size = bytes.len(), ?format, "Decoding upload");

    let mut rows = match format {
        UploadFormat::Csv => delimited::decode_csv(bytes)?,
        UploadFormat::Xlsx | UploadFormat::Xls => workbook::decode_workbook(bytes, format)?,
    };

    if rows.is_empty() {
        return Err(IngestError::ParsingFailed {
            message: "the file contains no rows".to_string(),
        });
    }

    pad_to_rectangle(&mut rows);
    debug!(rows = rows.len(), columns = rows[0].len(), "Upload decoded");
    Ok(rows)
}

/// Extends every row with empty cells to the width of the widest row.
pub fn pad_to_rectangle(rows: &mut RowTable) {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in rows.iter_mut() {
        row.resize(width, Cell::Empty);
    }
}
