//! The structured payroll result and its summaries.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Employee;

/// Employer details found in the statement's leading rows. Advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Employer name, e.g. `"12 - ACME COMERCIO LTDA"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registration id (CNPJ).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
    /// Period label, e.g. `"10/2025 até 11/2025"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl CompanyInfo {
    /// Returns true when nothing was found.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.registration_id.is_none() && self.period.is_none()
    }
}

/// Totals of one reference period across all employees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSummary {
    /// Sum of employee calculated totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_calculated: Decimal,
    /// Sum of employee informed totals.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_informed: Decimal,
    /// `total_calculated - total_informed`.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_difference: Decimal,
}

/// Counts and per-reference totals across the whole statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSummary {
    /// Number of employees.
    pub total_employees: usize,
    /// Number of events across all employees.
    pub total_events: usize,
    /// Totals keyed by reference period.
    pub by_reference: BTreeMap<String, ReferenceSummary>,
}

/// The complete output of one structuring pass.
///
/// # Example
///
/// ```
/// use payroll_engine::models::StructuredPayroll;
///
/// let empty = StructuredPayroll::default();
/// let json = serde_json::to_value(&empty).unwrap();
/// assert!(json["allReferences"].as_array().unwrap().is_empty());
/// assert_eq!(json["summary"]["total_employees"], 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredPayroll {
    /// Employees in order of first appearance.
    pub employees: Vec<Employee>,
    /// Every reference observed in the statement, sorted.
    #[serde(rename = "allReferences")]
    pub all_references: Vec<String>,
    /// Global counts and totals.
    pub summary: GlobalSummary,
    /// Employer details, when found.
    #[serde(rename = "companyInfo")]
    pub company_info: CompanyInfo,
}

impl StructuredPayroll {
    /// Looks up an employee by id.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_info_omits_missing_fields() {
        let info = CompanyInfo {
            name: Some("1 - ACME LTDA".to_string()),
            ..CompanyInfo::default()
        };
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"name":"1 - ACME LTDA"}"#);
        assert!(!info.is_empty());
        assert!(CompanyInfo::default().is_empty());
    }

    #[test]
    fn test_structured_payroll_uses_camel_case_top_level_keys() {
        let json = serde_json::to_value(StructuredPayroll::default()).unwrap();
        assert!(json.get("allReferences").is_some());
        assert!(json.get("companyInfo").is_some());
        assert!(json.get("all_references").is_none());
    }
}
