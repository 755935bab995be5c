//! Error types for the Payroll Structuring Engine.
//!
//! The structuring core never fails: malformed values degrade to zero and
//! malformed rows are dropped. Errors only exist at the edges, when loading
//! configuration ([`EngineError`]) or decoding an uploaded file ([`IngestError`]).

use thiserror::Error;

/// Errors raised while loading or validating engine configuration.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/server.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/server.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value parsed but is not usable.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while decoding an uploaded statement into a row table.
///
/// Every variant maps to a stable error code and a remediation hint that
/// the HTTP layer forwards to the user.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The request carried no file, or the file had no name.
    #[error("No file was uploaded")]
    NoFile,

    /// The upload exceeds the configured size limit.
    #[error("File is too large: {size} bytes (limit {max_size} bytes)")]
    FileTooLarge {
        /// Size of the upload in bytes.
        size: usize,
        /// Configured maximum in bytes.
        max_size: usize,
    },

    /// The file extension is not one the decoder understands.
    #[error("Unsupported file format: '{extension}'")]
    UnsupportedFormat {
        /// The extension that was rejected (lower-cased, may be empty).
        extension: String,
    },

    /// The workbook opened but contains no worksheets.
    #[error("Workbook has no worksheets")]
    EmptySheets,

    /// An XLSX workbook could not be read.
    #[error("Could not read XLSX file: {message}")]
    XlsxRead {
        /// Underlying decoder message.
        message: String,
    },

    /// A legacy XLS workbook is corrupt or unreadable.
    #[error("XLS file is corrupted or unreadable: {message}")]
    CorruptedFile {
        /// Underlying decoder message.
        message: String,
    },

    /// Decoding succeeded but produced no rows, or the CSV reader failed.
    #[error("Could not read the file: {message}")]
    ParsingFailed {
        /// What went wrong.
        message: String,
    },
}

impl IngestError {
    /// Returns the stable error code reported to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            IngestError::NoFile => "NO_FILE",
            IngestError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            IngestError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            IngestError::EmptySheets => "EMPTY_SHEETS",
            IngestError::XlsxRead { .. } => "XLSX_READ_ERROR",
            IngestError::CorruptedFile { .. } => "CORRUPTED_FILE",
            IngestError::ParsingFailed { .. } => "PARSING_FAILED",
        }
    }

    /// Returns a remediation hint for the user, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            IngestError::NoFile => Some("Select a .csv, .xlsx or .xls file and send it in the 'file' field"),
            IngestError::FileTooLarge { .. } => {
                Some("Split the statement into smaller files or export only the needed period")
            }
            IngestError::UnsupportedFormat { .. } => Some("Export the statement as .csv, .xlsx or .xls"),
            IngestError::EmptySheets
            | IngestError::XlsxRead { .. }
            | IngestError::CorruptedFile { .. } => {
                Some("Open the file in Excel and use File > Save As > CSV UTF-8")
            }
            IngestError::ParsingFailed { .. } => None,
        }
    }
}

/// A type alias for Results that return IngestError.
pub type IngestResult<T> = Result<T, IngestError>;
