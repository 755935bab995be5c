//! Statement-wide summary.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Employee, GlobalSummary, ReferenceSummary, ValuePair};

/// Builds the global summary from finalized employees.
///
/// For every reference, employee totals are summed over the employees that
/// have that reference.
pub fn global_summary(employees: &[Employee], references: &[String]) -> GlobalSummary {
    let by_reference: BTreeMap<String, ReferenceSummary> = references
        .iter()
        .map(|reference| {
            let (calculated, informed) = employees
                .iter()
                .filter(|employee| employee.has_reference(reference))
                .filter_map(|employee| employee.total(reference))
                .fold((Decimal::ZERO, Decimal::ZERO), |(calc, inf), pair| {
                    (calc + pair.calculated, inf + pair.informed)
                });
            let pair = ValuePair::new(calculated, informed);
            (
                reference.clone(),
                ReferenceSummary {
                    total_calculated: pair.calculated,
                    total_informed: pair.informed,
                    total_difference: pair.difference,
                },
            )
        })
        .collect();

    GlobalSummary {
        total_employees: employees.len(),
        total_events: employees.iter().map(|employee| employee.events.len()).sum(),
        by_reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn employee(id: &str, totals: &[(&str, f64, f64)], event_count: usize) -> Employee {
        let events = (0..event_count)
            .map(|i| crate::models::Event {
                code: i.to_string(),
                description: String::new(),
                values: BTreeMap::new(),
            })
            .collect();
        Employee {
            id: id.to_string(),
            name: format!("EMPLOYEE {}", id),
            references: totals.iter().map(|(r, _, _)| r.to_string()).collect(),
            events,
            totals: totals
                .iter()
                .map(|(r, c, i)| (r.to_string(), ValuePair::from_f64(*c, *i)))
                .collect(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let employees = vec![employee("1", &[], 3), employee("2", &[], 2)];
        let summary = global_summary(&employees, &[]);
        assert_eq!(summary.total_employees, 2);
        assert_eq!(summary.total_events, 5);
        assert!(summary.by_reference.is_empty());
    }

    #[test]
    fn test_summary_only_counts_employees_with_reference() {
        let employees = vec![
            employee("1", &[("10/2025", 100.0, 80.0)], 1),
            employee("2", &[("10/2025", 50.5, 50.5), ("11/2025", 10.0, 0.0)], 1),
        ];
        let references = vec!["10/2025".to_string(), "11/2025".to_string()];
        let summary = global_summary(&employees, &references);

        let october = summary.by_reference["10/2025"];
        assert_eq!(october.total_calculated, Decimal::from_str("150.50").unwrap());
        assert_eq!(october.total_informed, Decimal::from_str("130.50").unwrap());
        assert_eq!(october.total_difference, Decimal::from_str("20.00").unwrap());

        let november = summary.by_reference["11/2025"];
        assert_eq!(november.total_calculated, Decimal::from_str("10.00").unwrap());
        assert_eq!(november.total_difference, Decimal::from_str("10.00").unwrap());
    }
}
