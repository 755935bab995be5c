//! Employer details from the statement's title rows.

use crate::models::{Cell, CompanyInfo};

use super::patterns::REFERENCE;

const REGISTRATION_MIN_CHARS: usize = 14;

/// Scans the first `scan_rows` rows for employer name, CNPJ and period.
///
/// A row is inspected for a field only when its joined text carries the
/// field's label (`Empresa:`, `CNPJ:`, `Competência:`), compared
/// case-insensitively. Later rows overwrite earlier findings.
///
/// # Example
///
/// ```
/// use payroll_engine::models::row;
/// use payroll_engine::parsing::extract_company_info;
///
/// let rows = vec![
///     row(["Empresa:", "12 - ACME COMERCIO LTDA"]),
///     row(["CNPJ:", "12.345.678/0001-90"]),
///     row(["Competência:", "10/2025", "11/2025"]),
/// ];
/// let info = extract_company_info(&rows, 5);
/// assert_eq!(info.name.as_deref(), Some("12 - ACME COMERCIO LTDA"));
/// assert_eq!(info.registration_id.as_deref(), Some("12.345.678/0001-90"));
/// assert_eq!(info.period.as_deref(), Some("10/2025 até 11/2025"));
/// ```
pub fn extract_company_info<R: AsRef<[Cell]>>(rows: &[R], scan_rows: usize) -> CompanyInfo {
    let mut info = CompanyInfo::default();

    for row in rows.iter().take(scan_rows) {
        let cells: Vec<String> = row.as_ref().iter().map(|cell| cell.text().into_owned()).collect();
        let label_text = cells
            .iter()
            .filter(|text| !text.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        if label_text.contains("empresa:") {
            if let Some(name) = cells.iter().find(|c| c.contains(" - ") && !c.contains("Empresa")) {
                info.name = Some(name.clone());
            }
        }

        if label_text.contains("cnpj:") {
            if let Some(id) = cells.iter().find(|c| is_registration_id(c)) {
                info.registration_id = Some(id.clone());
            }
        }

        if label_text.contains("competência:") || label_text.contains("competencia:") {
            let periods: Vec<&str> = cells
                .iter()
                .filter(|c| REFERENCE.is_match(c))
                .map(String::as_str)
                .collect();
            if !periods.is_empty() {
                info.period = Some(periods.join(" até "));
            }
        }
    }

    info
}

fn is_registration_id(text: &str) -> bool {
    text.contains('/') && text.contains('-') && text.chars().count() >= REGISTRATION_MIN_CHARS
}
