//! Configuration types for payroll structuring.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every field has a default
//! matching the built-in behaviour, so partial files are accepted.

use serde::Deserialize;

use crate::models::{ColumnRole, ColumnRoleMap};

/// Default upload limit: 50 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// HTTP server settings from `server.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// Header keywords for each column role, matched as lower-case substrings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoleKeywords {
    /// Keywords of the event code column.
    pub code: Vec<String>,
    /// Keywords of the description column.
    pub description: Vec<String>,
    /// Keywords of the reference column.
    pub reference: Vec<String>,
    /// Keywords of the calculated value column.
    pub calculated: Vec<String>,
    /// Keywords of the informed value column.
    pub informed: Vec<String>,
    /// Keywords of the type (provento/desconto) column.
    #[serde(rename = "type")]
    pub type_flag: Vec<String>,
}

impl RoleKeywords {
    /// Returns the keyword list of a role.
    pub fn for_role(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Code => &self.code,
            ColumnRole::Description => &self.description,
            ColumnRole::Reference => &self.reference,
            ColumnRole::Calculated => &self.calculated,
            ColumnRole::Informed => &self.informed,
            ColumnRole::Type => &self.type_flag,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for RoleKeywords {
    fn default() -> Self {
        Self {
            code: strings(&["codigo", "código", "cod", "cód"]),
            description: strings(&[
                "nome",
                "descrição",
                "descricao",
                "historico",
                "descrição do evento",
            ]),
            reference: strings(&["referencia", "referência", "ref", "competencia", "competência"]),
            calculated: strings(&["calculado", "valor calculado", "calc", "vlr calc"]),
            informed: strings(&["informado", "valor informado", "inf", "vlr inf"]),
            type_flag: strings(&["tipo", "tp", "p/d", "pd", "natureza"]),
        }
    }
}

/// Structuring heuristics from `structuring.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StructuringConfig {
    /// How many leading rows are searched for a header row.
    pub header_scan_rows: usize,
    /// Minimum number of roles a row must resolve to be taken as the header.
    pub min_detected_roles: usize,
    /// Header keywords per role.
    pub keywords: RoleKeywords,
    /// Mapping used when no header row qualifies.
    pub fallback: ColumnRoleMap,
    /// Name tokens that mark a company block rather than an employee.
    pub organization_markers: Vec<String>,
    /// How many leading rows are searched for employer details.
    pub company_scan_rows: usize,
}

impl Default for StructuringConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 10,
            min_detected_roles: 3,
            keywords: RoleKeywords::default(),
            fallback: ColumnRoleMap::legacy(),
            organization_markers: strings(&["LTDA", "ME", "EPP", "EIRELI", "S.A", "S/A", "CIA"]),
            company_scan_rows: 5,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    server: ServerConfig,
    structuring: StructuringConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(server: ServerConfig, structuring: StructuringConfig) -> Self {
        Self { server, structuring }
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Returns the structuring heuristics.
    pub fn structuring(&self) -> &StructuringConfig {
        &self.structuring
    }
}
