//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI command.

mod config;
mod diff;

pub use config::{init_config, run_config, run_config_schema, ConfigAction};
pub use diff::run_diff;

// Re-export config types used by handlers
pub use crate::config::DiffConfig;
