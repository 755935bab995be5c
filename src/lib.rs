//! Payroll Statement Structuring Engine
//!
//! This crate turns an irregular tabular extract of a payroll statement into a
//! comparable structure: one record per employee, one row per pay event and one
//! column per pay period, with calculated and informed values reconciled.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod parsing;
