//! The single-pass statement structurer.
//!
//! Rows are read top to bottom. Employee-header rows (`<id> - <name>`) open or
//! resume an employee block; event rows that follow are accumulated into the
//! active employee, keyed by `(code, description)` and reference period.
//! Blocks of the same employee split by a page break are merged, and every
//! employee is finalized once, after the pass.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use crate::config::StructuringConfig;
use crate::models::{Cell, ColumnRoleMap, Employee, Event, StructuredPayroll, ValuePair, is_blank_row};

use super::aggregate::global_summary;
use super::columns::ColumnMapper;
use super::company::extract_company_info;
use super::patterns::{TOTAL, contains_marker, extract_reference, parse_employee_header};
use super::transpose::{employee_totals, transpose};
use super::value::{apply_sign_override, normalize};

/// What a row means to the structurer, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind<'r> {
    /// Every cell is blank.
    Blank,
    /// An employee (or company) header, `<id> - <name>`.
    Header {
        /// Numeric id, as text.
        id: &'r str,
        /// Name after the dash.
        name: &'r str,
    },
    /// A subtotal or total line.
    Total,
    /// Anything else; an event candidate.
    Data,
}

/// Classifies a row.
///
/// The first cell matching the employee-header pattern makes the row a
/// header, regardless of the other cells. A row whose first cell mentions
/// `total` is a total row.
pub fn classify_row(row: &[Cell]) -> RowKind<'_> {
    if is_blank_row(row) {
        return RowKind::Blank;
    }

    let header = row.iter().find_map(|cell| match cell {
        Cell::Text(text) => parse_employee_header(text),
        _ => None,
    });
    if let Some((id, name)) = header {
        return RowKind::Header { id, name };
    }

    if row.first().is_some_and(|cell| TOTAL.is_match(&cell.text())) {
        return RowKind::Total;
    }

    RowKind::Data
}

/// An employee while the pass is running.
#[derive(Debug)]
struct EmployeeAccumulator {
    id: String,
    name: String,
    references: BTreeSet<String>,
    events: Vec<Event>,
    event_index: HashMap<(String, String), usize>,
}

impl EmployeeAccumulator {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            references: BTreeSet::new(),
            events: Vec::new(),
            event_index: HashMap::new(),
        }
    }

    /// Stores a value, returning the pair it replaced.
    fn record(&mut self, code: String, description: String, reference: String, pair: ValuePair) -> Option<ValuePair> {
        self.references.insert(reference.clone());

        let key = (code, description);
        let slot = match self.event_index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.events.len();
                self.events.push(Event {
                    code: key.0.clone(),
                    description: key.1.clone(),
                    values: Default::default(),
                });
                self.event_index.insert(key, slot);
                slot
            }
        };

        self.events[slot].values.insert(reference, pair)
    }

    fn finalize(self) -> Employee {
        let references: Vec<String> = self.references.into_iter().collect();
        let events = transpose(self.events, &references);
        let totals = employee_totals(&events, &references);

        Employee {
            id: self.id,
            name: self.name,
            references,
            events,
            totals,
        }
    }
}

/// A parsed event row, ready to be recorded.
#[derive(Debug, Clone, PartialEq)]
struct EventRow {
    code: String,
    description: String,
    reference: String,
    pair: ValuePair,
}

/// State threaded through the row loop.
#[derive(Debug, Default)]
struct StructuringContext {
    active: Option<usize>,
    lookup: HashMap<String, usize>,
    employees: Vec<EmployeeAccumulator>,
    references: BTreeSet<String>,
    events_recorded: usize,
    rows_dropped: usize,
}

impl StructuringContext {
    fn open_block(&mut self, id: &str, name: &str) {
        if let Some(&existing) = self.lookup.get(id) {
            debug!(employee_id = id, employee_name = name, "Resuming employee block");
            self.active = Some(existing);
            return;
        }

        let slot = self.employees.len();
        self.employees.push(EmployeeAccumulator::new(id, name));
        self.lookup.insert(id.to_string(), slot);
        self.active = Some(slot);
        debug!(employee_id = id, employee_name = name, position = slot + 1, "Employee block opened");
    }

    fn record(&mut self, event: EventRow) {
        let Some(slot) = self.active else {
            return;
        };
        let employee = &mut self.employees[slot];

        self.references.insert(event.reference.clone());
        self.events_recorded += 1;

        let code = event.code.clone();
        let reference = event.reference.clone();
        if let Some(previous) = employee.record(event.code, event.description, event.reference, event.pair) {
            debug!(
                employee_id = %employee.id,
                code = %code,
                reference = %reference,
                previous_calculated = %previous.calculated,
                calculated = %event.pair.calculated,
                "Event value overwritten"
            );
        }
    }
}

/// Structures a row table into employees, events and summaries.
///
/// # Example
///
/// ```
/// use payroll_engine::config::StructuringConfig;
/// use payroll_engine::models::row;
/// use payroll_engine::parsing::Structurer;
///
/// let config = StructuringConfig::default();
/// let rows = vec![
///     row(["Código", "Descrição", "Referência", "Calculado", "Informado"]),
///     row(["7 - ALEX MELO"]),
///     row(["1", "HORAS NORMAIS", "10/2025", "4.077,32", "220:00"]),
/// ];
///
/// let result = Structurer::new(&config).structure(&rows);
/// assert_eq!(result.employees.len(), 1);
/// assert_eq!(result.employees[0].events[0].code, "1");
/// assert_eq!(result.all_references, vec!["10/2025"]);
/// ```
#[derive(Debug, Clone)]
pub struct Structurer<'a> {
    config: &'a StructuringConfig,
}

impl<'a> Structurer<'a> {
    /// Creates a structurer with the given heuristics.
    pub fn new(config: &'a StructuringConfig) -> Self {
        Self { config }
    }

    /// Runs the pass over `rows`. Never fails; unusable rows are dropped.
    pub fn structure<R: AsRef<[Cell]>>(&self, rows: &[R]) -> StructuredPayroll {
        let company_info = extract_company_info(rows, self.config.company_scan_rows);
        let columns = ColumnMapper::new(self.config).map_table(rows);

        let mut context = StructuringContext::default();

        // row 0 is the sheet header
        for row in rows.iter().skip(1) {
            let row = row.as_ref();
            match classify_row(row) {
                RowKind::Blank | RowKind::Total => {}
                RowKind::Header { id, name } => {
                    if self.is_organization(name) {
                        debug!(company_id = id, company_name = name, "Skipping company block");
                        context.active = None;
                    } else {
                        context.open_block(id, name);
                    }
                }
                RowKind::Data => {
                    if context.active.is_none() {
                        continue;
                    }
                    match read_event(row, &columns) {
                        Some(event) => context.record(event),
                        None => context.rows_dropped += 1,
                    }
                }
            }
        }

        let employees: Vec<Employee> = context
            .employees
            .into_iter()
            .map(EmployeeAccumulator::finalize)
            .collect();
        let all_references: Vec<String> = context.references.into_iter().collect();
        let summary = global_summary(&employees, &all_references);

        info!(
            rows = rows.len(),
            employees = summary.total_employees,
            events = summary.total_events,
            values = context.events_recorded,
            dropped = context.rows_dropped,
            references = all_references.len(),
            "Statement structured"
        );

        StructuredPayroll {
            employees,
            all_references,
            summary,
            company_info,
        }
    }

    fn is_organization(&self, name: &str) -> bool {
        self.config
            .organization_markers
            .iter()
            .any(|marker| contains_marker(name, marker))
    }
}

/// Reads an event from a data row, or `None` when code or reference is missing.
fn read_event(row: &[Cell], columns: &ColumnRoleMap) -> Option<EventRow> {
    let cell = |index: usize| row.get(index).unwrap_or(&Cell::Empty);

    let code = cell(columns.code).text();
    if code.is_empty() {
        return None;
    }
    let reference = extract_reference(&cell(columns.reference).text())?.to_string();
    let description = cell(columns.description).text().into_owned();

    let calculated = normalize(cell(columns.calculated));
    let informed = normalize(cell(columns.informed));
    let type_flag = columns.type_column.and_then(|index| row.get(index));
    let (calculated, informed) = apply_sign_override(calculated, informed, type_flag);

    Some(EventRow {
        code: code.into_owned(),
        description,
        reference,
        pair: ValuePair::from_f64(calculated, informed),
    })
}
