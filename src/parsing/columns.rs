//! Column role detection.
//!
//! Statement templates place the event columns at different positions. The
//! mapper looks for a header-like row among the first rows of the table and
//! falls back to the legacy export layout when none is found.

use tracing::debug;

use crate::config::StructuringConfig;
use crate::models::{Cell, ColumnRole, ColumnRoleMap};

/// Roles recognised in a single row, before defaults are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedRoles {
    indices: [Option<usize>; 6],
}

impl DetectedRoles {
    /// Returns the column detected for a role.
    pub fn get(&self, role: ColumnRole) -> Option<usize> {
        self.indices[slot(role)]
    }

    /// Number of roles that were recognised.
    pub fn count(&self) -> usize {
        self.indices.iter().filter(|index| index.is_some()).count()
    }

    /// Completes the detection with `defaults` for every role that was not found.
    ///
    /// The type role never takes a default: if it was not detected here it
    /// keeps whatever `defaults` has.
    pub fn resolve(&self, defaults: ColumnRoleMap) -> ColumnRoleMap {
        let mut map = defaults;
        for role in ColumnRole::ALL {
            if let Some(index) = self.get(role) {
                map.set(role, index);
            }
        }
        map
    }
}

fn slot(role: ColumnRole) -> usize {
    match role {
        ColumnRole::Code => 0,
        ColumnRole::Description => 1,
        ColumnRole::Reference => 2,
        ColumnRole::Calculated => 3,
        ColumnRole::Informed => 4,
        ColumnRole::Type => 5,
    }
}

/// Infers column roles from header keywords.
#[derive(Debug, Clone)]
pub struct ColumnMapper<'a> {
    config: &'a StructuringConfig,
}

impl<'a> ColumnMapper<'a> {
    /// Creates a mapper using the keywords and fallback of `config`.
    pub fn new(config: &'a StructuringConfig) -> Self {
        Self { config }
    }

    /// Detects the roles named by the cells of one row.
    ///
    /// Each cell is lower-cased and claimed by the first role (in
    /// [`ColumnRole::ALL`] order) with a keyword it contains. When two cells
    /// claim the same role, the rightmost wins.
    pub fn detect_roles(&self, row: &[Cell]) -> DetectedRoles {
        let mut detected = DetectedRoles::default();

        for (index, cell) in row.iter().enumerate() {
            let header = cell.text().to_lowercase();
            if header.is_empty() {
                continue;
            }

            let role = ColumnRole::ALL.into_iter().find(|role| {
                self.config
                    .keywords
                    .for_role(*role)
                    .iter()
                    .any(|keyword| header.contains(keyword.as_str()))
            });

            if let Some(role) = role {
                detected.indices[slot(role)] = Some(index);
            }
        }

        detected
    }

    /// Chooses the role map for a whole table.
    ///
    /// The first of the leading `header_scan_rows` rows that resolves at least
    /// `min_detected_roles` roles wins; roles it misses take the fallback index.
    /// With no such row the fallback mapping is used as is.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::StructuringConfig;
    /// use payroll_engine::models::{row, ColumnRoleMap};
    /// use payroll_engine::parsing::ColumnMapper;
    ///
    /// let config = StructuringConfig::default();
    /// let mapper = ColumnMapper::new(&config);
    ///
    /// let rows = vec![row(["Código", "Descrição", "Competência", "Calculado", "Informado"])];
    /// let map = mapper.map_table(&rows);
    /// assert_eq!((map.code, map.reference, map.informed), (0, 2, 4));
    ///
    /// let no_header = vec![row(["1", "HORAS NORMAIS"])];
    /// assert_eq!(mapper.map_table(&no_header), ColumnRoleMap::legacy());
    /// ```
    pub fn map_table<R: AsRef<[Cell]>>(&self, rows: &[R]) -> ColumnRoleMap {
        let fallback = self.config.fallback;

        for (row_index, row) in rows.iter().take(self.config.header_scan_rows).enumerate() {
            let detected = self.detect_roles(row.as_ref());
            if detected.count() >= self.config.min_detected_roles {
                let map = detected.resolve(fallback);
                debug!(row = row_index, roles = detected.count(), ?map, "Column header detected");
                return map;
            }
        }

        debug!(?fallback, "No header row found, using fallback column mapping");
        fallback
    }
}
