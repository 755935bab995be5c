//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, ServerConfig, StructuringConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── server.yaml       # Bind address and upload limit
/// └── structuring.yaml  # Header keywords, fallback columns, company markers
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Listening on port {}", loader.server().port);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A value is out of range (see [`ConfigLoader::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let server = Self::load_yaml::<ServerConfig>(&path.join("server.yaml"))?;
        let structuring = Self::load_yaml::<StructuringConfig>(&path.join("structuring.yaml"))?;

        let loader = Self {
            config: EngineConfig::new(server, structuring),
        };
        loader.validate()?;
        Ok(loader)
    }

    /// Builds a loader holding the built-in defaults, without touching the filesystem.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let loader = Self { config };
        loader.validate()?;
        Ok(loader)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Checks values that parse correctly but cannot work.
    ///
    /// - `min_detected_roles` must be between 1 and 6
    /// - `header_scan_rows` must be at least 1
    /// - every role must have at least one keyword, and keywords must not be blank
    /// - `max_upload_bytes` must be non-zero
    pub fn validate(&self) -> EngineResult<()> {
        let structuring = self.config.structuring();

        if !(1..=6).contains(&structuring.min_detected_roles) {
            return Err(EngineError::InvalidConfig {
                field: "min_detected_roles".to_string(),
                message: format!("must be between 1 and 6, got {}", structuring.min_detected_roles),
            });
        }

        if structuring.header_scan_rows == 0 {
            return Err(EngineError::InvalidConfig {
                field: "header_scan_rows".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        for role in crate::models::ColumnRole::ALL {
            let keywords = structuring.keywords.for_role(role);
            if keywords.is_empty() || keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(EngineError::InvalidConfig {
                    field: format!("keywords.{}", role_name(role)),
                    message: "must list at least one non-blank keyword".to_string(),
                });
            }
        }

        if self.config.server().max_upload_bytes == 0 {
            return Err(EngineError::InvalidConfig {
                field: "max_upload_bytes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        self.config.server()
    }

    /// Returns the structuring heuristics.
    pub fn structuring(&self) -> &StructuringConfig {
        self.config.structuring()
    }
}

fn role_name(role: crate::models::ColumnRole) -> &'static str {
    use crate::models::ColumnRole;
    match role {
        ColumnRole::Code => "code",
        ColumnRole::Description => "description",
        ColumnRole::Reference => "reference",
        ColumnRole::Calculated => "calculated",
        ColumnRole::Informed => "informed",
        ColumnRole::Type => "type",
    }
}
