//! Core data models for the Payroll Structuring Engine.
//!
//! This module contains the row-table input types and every shape the
//! structuring pass produces.

mod cell;
mod columns;
mod employee;
mod structured;
mod value_pair;

pub use cell::{Cell, Row, RowTable, is_blank_row, row};
pub use columns::{ColumnRole, ColumnRoleMap};
pub use employee::{Employee, Event};
pub use structured::{CompanyInfo, GlobalSummary, ReferenceSummary, StructuredPayroll};
pub use value_pair::{AMOUNT_SCALE, ValuePair, amount_from_f64, round_amount};
