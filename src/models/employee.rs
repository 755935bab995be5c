//! Employee and pay event models.
//!
//! These are the transposed shapes produced by the structuring pass: one
//! [`Employee`] per person, each with one [`Event`] per pay-event code and one
//! value pair per reference period.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ValuePair;

/// A pay event of one employee, with a value pair for every reference.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Event, ValuePair};
/// use std::collections::BTreeMap;
///
/// let event = Event {
///     code: "1".to_string(),
///     description: "HORAS NORMAIS".to_string(),
///     values: BTreeMap::from([("10/2025".to_string(), ValuePair::from_f64(4077.32, 220.0))]),
/// };
/// assert!(event.value("10/2025").is_some());
/// assert!(event.value("11/2025").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event code as it appears in the statement (usually numeric).
    pub code: String,
    /// Event description.
    pub description: String,
    /// Values keyed by reference period.
    pub values: BTreeMap<String, ValuePair>,
}

impl Event {
    /// Returns the value pair for a reference, if present.
    pub fn value(&self, reference: &str) -> Option<&ValuePair> {
        self.values.get(reference)
    }

    /// Sort key placing numeric codes first, in numeric order.
    ///
    /// Codes that are not made only of ASCII digits sort after every numeric code.
    pub fn code_sort_key(&self) -> u64 {
        code_sort_key(&self.code)
    }
}

fn code_sort_key(code: &str) -> u64 {
    if !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()) {
        code.parse().unwrap_or(u64::MAX)
    } else {
        u64::MAX
    }
}

/// A structured employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Numeric employee id, as text.
    pub id: String,
    /// Employee name.
    pub name: String,
    /// Reference periods observed for this employee, sorted.
    pub references: Vec<String>,
    /// Events ordered by numeric code.
    pub events: Vec<Event>,
    /// Per-reference totals across all events.
    pub totals: BTreeMap<String, ValuePair>,
}

impl Employee {
    /// Returns the totals for a reference, if the employee has it.
    pub fn total(&self, reference: &str) -> Option<&ValuePair> {
        self.totals.get(reference)
    }

    /// Returns true when the employee has at least one event for the reference.
    pub fn has_reference(&self, reference: &str) -> bool {
        self.references.iter().any(|r| r == reference)
    }
}
