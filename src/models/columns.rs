//! Column roles and the role-to-index map.

use serde::{Deserialize, Serialize};

/// A logical column of an event row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Event code.
    Code,
    /// Event description.
    Description,
    /// Reference (competency) period.
    Reference,
    /// Value computed by the payroll system.
    Calculated,
    /// Value reported by the employer.
    Informed,
    /// Provento/desconto flag driving the sign override.
    Type,
}

impl ColumnRole {
    /// All roles, in keyword-matching priority order.
    pub const ALL: [ColumnRole; 6] = [
        ColumnRole::Code,
        ColumnRole::Description,
        ColumnRole::Reference,
        ColumnRole::Calculated,
        ColumnRole::Informed,
        ColumnRole::Type,
    ];
}

/// Which column index holds each logical role.
///
/// `type_column` is optional; when it is `None` the sign override is disabled.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{ColumnRole, ColumnRoleMap};
///
/// let map = ColumnRoleMap::legacy();
/// assert_eq!(map.index(ColumnRole::Reference), Some(17));
/// assert_eq!(map.index(ColumnRole::Type), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRoleMap {
    /// Column of the event code.
    pub code: usize,
    /// Column of the event description.
    pub description: usize,
    /// Column of the reference period.
    pub reference: usize,
    /// Column of the calculated value.
    pub calculated: usize,
    /// Column of the informed value.
    pub informed: usize,
    /// Column of the type flag, if the layout has one.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_column: Option<usize>,
}

impl ColumnRoleMap {
    /// The fixed mapping of the one known legacy export layout.
    pub const fn legacy() -> Self {
        Self {
            code: 0,
            description: 4,
            reference: 17,
            calculated: 20,
            informed: 23,
            type_column: None,
        }
    }

    /// Returns the column index for a role.
    pub fn index(&self, role: ColumnRole) -> Option<usize> {
        match role {
            ColumnRole::Code => Some(self.code),
            ColumnRole::Description => Some(self.description),
            ColumnRole::Reference => Some(self.reference),
            ColumnRole::Calculated => Some(self.calculated),
            ColumnRole::Informed => Some(self.informed),
            ColumnRole::Type => self.type_column,
        }
    }

    /// Assigns a column index to a role.
    pub fn set(&mut self, role: ColumnRole, index: usize) {
        match role {
            ColumnRole::Code => self.code = index,
            ColumnRole::Description => self.description = index,
            ColumnRole::Reference => self.reference = index,
            ColumnRole::Calculated => self.calculated = index,
            ColumnRole::Informed => self.informed = index,
            ColumnRole::Type => self.type_column = Some(index),
        }
    }
}

impl Default for ColumnRoleMap {
    fn default() -> Self {
        Self::legacy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_index_round_trip_per_role() {
        let mut map = ColumnRoleMap::legacy();
        for (offset, role) in ColumnRole::ALL.into_iter().enumerate() {
            map.set(role, 100 + offset);
        }
        for (offset, role) in ColumnRole::ALL.into_iter().enumerate() {
            assert_eq!(map.index(role), Some(100 + offset));
        }
    }

    #[test]
    fn test_type_column_serializes_as_type() {
        let mut map = ColumnRoleMap::legacy();
        let json = serde_json::to_value(map).unwrap();
        assert!(json.get("type").is_none());

        map.set(ColumnRole::Type, 5);
        let json = serde_json::to_value(map).unwrap();
        assert_eq!(json["type"], 5);
    }
}
