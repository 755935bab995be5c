//! Event transposition and per-employee totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{Event, ValuePair};

/// Turns sparse accumulated events into dense, ordered events.
///
/// Every returned event carries a value pair for each of `references`, zero
/// where the event had no value for that period. Events are ordered by numeric
/// code; codes that are not numeric come last, and ties keep their input order.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Event, ValuePair};
/// use payroll_engine::parsing::transpose;
/// use std::collections::BTreeMap;
///
/// let sparse = vec![
///     Event {
///         code: "10".to_string(),
///         description: "INSS".to_string(),
///         values: BTreeMap::from([("11/2025".to_string(), ValuePair::from_f64(1.0, 1.0))]),
///     },
///     Event {
///         code: "2".to_string(),
///         description: "HORAS EXTRAS".to_string(),
///         values: BTreeMap::from([("10/2025".to_string(), ValuePair::from_f64(5.0, 5.0))]),
///     },
/// ];
/// let references = vec!["10/2025".to_string(), "11/2025".to_string()];
///
/// let events = transpose(sparse, &references);
/// assert_eq!(events[0].code, "2");
/// assert!(events[0].value("11/2025").unwrap().is_zero());
/// ```
pub fn transpose(events: Vec<Event>, references: &[String]) -> Vec<Event> {
    let mut dense: Vec<Event> = events
        .into_iter()
        .map(|mut event| {
            let values = references
                .iter()
                .map(|reference| {
                    let pair = event.values.remove(reference).unwrap_or_default();
                    (reference.clone(), pair)
                })
                .collect();
            Event { values, ..event }
        })
        .collect();

    // sort_by_key is stable
    dense.sort_by_key(Event::code_sort_key);
    dense
}

/// Sums the events' values per reference.
///
/// Sums are taken over the already rounded pair values; the difference of the
/// total is recomputed from the summed sides.
pub fn employee_totals(events: &[Event], references: &[String]) -> BTreeMap<String, ValuePair> {
    references
        .iter()
        .map(|reference| {
            let (calculated, informed) = events
                .iter()
                .filter_map(|event| event.value(reference))
                .fold((Decimal::ZERO, Decimal::ZERO), |(calc, inf), pair| {
                    (calc + pair.calculated, inf + pair.informed)
                });
            (reference.clone(), ValuePair::new(calculated, informed))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn event(code: &str, values: &[(&str, f64, f64)]) -> Event {
        Event {
            code: code.to_string(),
            description: format!("EVENT {}", code),
            values: values
                .iter()
                .map(|(r, c, i)| (r.to_string(), ValuePair::from_f64(*c, *i)))
                .collect(),
        }
    }

    fn refs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_references_are_zero_filled() {
        let references = refs(&["09/2025", "10/2025", "11/2025"]);
        let events = transpose(vec![event("1", &[("10/2025", 100.0, 90.0)])], &references);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].values.len(), 3);
        assert!(events[0].value("09/2025").unwrap().is_zero());
        assert_eq!(events[0].value("10/2025").unwrap().difference, dec("10.00"));
    }

    #[test]
    fn test_sort_is_numeric_then_stable() {
        let events = transpose(
            vec![
                event("B", &[]),
                event("100", &[]),
                event("9", &[]),
                event("A", &[]),
                event("09", &[]),
            ],
            &[],
        );
        let codes: Vec<&str> = events.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["9", "09", "100", "B", "A"]);
    }

    #[test]
    fn test_totals_sum_rounded_values() {
        let references = refs(&["10/2025", "11/2025"]);
        let events = transpose(
            vec![
                event("1", &[("10/2025", 0.005, 0.0), ("11/2025", 10.0, 5.0)]),
                event("2", &[("10/2025", 0.005, 0.0)]),
            ],
            &references,
        );
        let totals = employee_totals(&events, &references);

        // each 0.005 rounds to 0.01 before summing
        assert_eq!(totals["10/2025"].calculated, dec("0.02"));
        assert_eq!(totals["11/2025"], ValuePair::new(dec("10"), dec("5")));
    }

    #[test]
    fn test_totals_with_no_events_are_zero() {
        let references = refs(&["10/2025"]);
        let totals = employee_totals(&[], &references);
        assert!(totals["10/2025"].is_zero());
    }
}
