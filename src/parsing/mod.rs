//! Statement structuring for the Payroll Structuring Engine.
//!
//! This module turns a raw row table, as exported by payroll systems into
//! spreadsheets, into per-employee records. It covers value normalization
//! (mixed number formats, hours, percentages), column role detection, the
//! single-pass employee/event structurer, transposition of events across
//! reference periods, and the per-employee and global totals.
//!
//! Structuring never fails: unreadable values become zero and rows that do not
//! describe an event are dropped.
//!
//! # Example
//!
//! ```
//! use payroll_engine::models::row;
//! use payroll_engine::parsing::structure_payroll;
//!
//! let rows = vec![
//!     row(["Código", "Descrição", "Referência", "Calculado", "Informado"]),
//!     row(["7 - ALEX MELO"]),
//!     row(["1", "HORAS NORMAIS", "10/2025", "4.077,32", "220:00"]),
//! ];
//!
//! let payroll = structure_payroll(&rows);
//! let employee = payroll.employee("7").unwrap();
//! assert_eq!(employee.name, "ALEX MELO");
//! assert_eq!(payroll.summary.total_events, 1);
//! ```

mod aggregate;
mod columns;
mod company;
mod patterns;
mod structurer;
mod transpose;
mod value;

pub use aggregate::global_summary;
pub use columns::{ColumnMapper, DetectedRoles};
pub use company::extract_company_info;
pub use patterns::{
    EMPLOYEE_HEADER, REFERENCE, TOTAL, contains_marker, extract_reference, parse_employee_header,
};
pub use structurer::{RowKind, Structurer, classify_row};
pub use transpose::{employee_totals, transpose};
pub use value::{
    ValueKind, apply_sign_override, classify, format_currency, format_value, normalize,
    normalize_str,
};

use crate::config::StructuringConfig;
use crate::models::{Cell, StructuredPayroll};

/// Structures a row table with the built-in heuristics.
pub fn structure_payroll<R: AsRef<[Cell]>>(rows: &[R]) -> StructuredPayroll {
    structure_payroll_with(rows, &StructuringConfig::default())
}

/// Structures a row table with the given heuristics.
pub fn structure_payroll_with<R: AsRef<[Cell]>>(
    rows: &[R],
    config: &StructuringConfig,
) -> StructuredPayroll {
    Structurer::new(config).structure(rows)
}
