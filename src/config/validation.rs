//! Configuration validation for flow-diff.

use super::types::{AppConfig, BehaviorConfig, DiffConfig, OutputConfig, ReportOptions};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.output.validate());
        errors.extend(self.report.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        if self.file.as_deref().is_some_and(|f| f.is_dir()) {
            errors.push(ConfigError {
                field: "output.file".to_string(),
                message: "Output path is a directory".to_string(),
            });
        }

        errors
    }
}

impl Validatable for ReportOptions {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, path) in [
            ("paths.before", &self.paths.before),
            ("paths.after", &self.paths.after),
        ] {
            if !path.exists() {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: format!("Snapshot file not found: {}", path.display()),
                });
            } else if path.is_dir() {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: format!("Snapshot path is a directory: {}", path.display()),
                });
            }
        }

        errors.extend(self.output.validate());
        errors
    }
}
