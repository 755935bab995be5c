//! Configuration loading and management for the Payroll Structuring Engine.
//!
//! This module loads server settings and the structuring heuristics (header
//! keywords, legacy fallback columns, company markers) from YAML files. All
//! values default to the built-in behaviour, so the engine also runs with no
//! configuration directory at all.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Header scan window: {}", config.structuring().header_scan_rows);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_MAX_UPLOAD_BYTES, EngineConfig, RoleKeywords, ServerConfig, StructuringConfig,
};
