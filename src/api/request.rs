//! Request types for the Payroll Structuring Engine API.

use serde::{Deserialize, Serialize};

use crate::models::RowTable;

/// Request body for the `/structure` endpoint.
///
/// Carries an already decoded row table, for clients that read the
/// spreadsheet themselves.
///
/// ```
/// use payroll_engine::api::StructureRequest;
///
/// let request: StructureRequest =
///     serde_json::from_str(r#"{"rows": [["7 - ALEX MELO"], ["1", 4077.32, null]]}"#).unwrap();
/// assert_eq!(request.rows.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRequest {
    /// The statement rows, header row first.
    pub rows: RowTable,
}
