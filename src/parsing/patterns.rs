//! Row recognition patterns.

use std::sync::LazyLock;

use regex::Regex;

/// `<digits> - <name>`, the first line of an employee block.
pub static EMPLOYEE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*-\s*(.+)$").expect("Invalid employee header regex"));

/// A competency token, `M/YYYY` or `MM/YYYY`.
pub static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2}/\d{4})").expect("Invalid reference regex"));

/// Subtotal and grand-total rows.
pub static TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)total").expect("Invalid total regex"));

/// Splits an employee-header cell into `(id, name)`.
///
/// ```
/// use payroll_engine::parsing::parse_employee_header;
///
/// assert_eq!(parse_employee_header("7 - ALEX MELO"), Some(("7", "ALEX MELO")));
/// assert_eq!(parse_employee_header("HORAS NORMAIS"), None);
/// ```
pub fn parse_employee_header(text: &str) -> Option<(&str, &str)> {
    let captures = EMPLOYEE_HEADER.captures(text.trim())?;
    let id = captures.get(1)?.as_str().trim();
    let name = captures.get(2)?.as_str().trim();
    (!name.is_empty()).then_some((id, name))
}

/// Returns the first competency token in the text.
///
/// ```
/// use payroll_engine::parsing::extract_reference;
///
/// assert_eq!(extract_reference("Competência 10/2025 a 11/2025"), Some("10/2025"));
/// assert_eq!(extract_reference("10-2025"), None);
/// ```
pub fn extract_reference(text: &str) -> Option<&str> {
    REFERENCE.find(text).map(|m| m.as_str())
}

/// Returns true when `marker` occurs in `name` as a whole token.
///
/// Both sides are compared upper-cased. A token boundary is the start or end
/// of the name or any character that is not alphanumeric, so `ME` matches
/// `COMERCIO ME` but not `ALEX MELO`.
pub fn contains_marker(name: &str, marker: &str) -> bool {
    let name = name.to_uppercase();
    let marker = marker.trim().to_uppercase();
    if marker.is_empty() {
        return false;
    }

    name.match_indices(&marker).any(|(start, matched)| {
        let before = name[..start].chars().next_back();
        let after = name[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
