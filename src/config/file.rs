//! `.flow-diff.yaml` discovery, loading and merging with CLI flags.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Discovery
// ============================================================================

/// File names checked in each search directory, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".flow-diff.yaml",
    ".flow-diff.yml",
    "flow-diff.yaml",
    "flow-diff.yml",
];

/// Locate the config file to use, if any.
///
/// An explicit path must exist; it is never replaced by a discovered file.
/// Without one the search order is:
/// 1. Current directory
/// 2. Git repository root (if in a repo)
/// 3. User config directory (~/.config/flow-diff/)
/// 4. Home directory
pub fn discover_config_file(
    explicit_path: Option<&Path>,
) -> Result<Option<PathBuf>, ConfigFileError> {
    match explicit_path {
        Some(path) if path.exists() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigFileError::NotFound(path.to_path_buf())),
        None => Ok(search_config_file()),
    }
}

fn search_config_file() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    if let Some(path) = cwd.as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(path) = cwd
        .as_deref()
        .and_then(find_git_root)
        .and_then(|root| find_config_in_dir(&root))
    {
        return Some(path);
    }

    if let Some(path) = dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("flow-diff")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// First config file name present in `dir`.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Loading
// ============================================================================

/// Failure to read or decode a config file.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Read and decode a YAML config file. An empty file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load the explicit config file, or the discovered one, or the defaults.
///
/// Any failure on an explicit path is returned. A discovered file that fails
/// to load is skipped with a warning.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        let config = load_config_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }

    Ok(search_config_file().map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    ))
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override.
    pub fn merge(&mut self, other: &Self) {
        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if !other.report.sort_differences {
            self.report.sort_differences = false;
        }

        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }

    /// File config with `cli_overrides` merged on top.
    ///
    /// `format` is the format named on the command line, if any. It always
    /// wins, including when it names the default format.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
        format: Option<ReportFormat>,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(cli_overrides);
        if let Some(format) = format {
            config.output.format = format;
        }
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config
// ============================================================================

/// Commented YAML listing every option at its default.
#[must_use]
pub fn generate_example_config() -> String {
    r"# Flow Diff Configuration File
# ============================
#
# Place it at:
#   - .flow-diff.yaml in your project root
#   - ~/.config/flow-diff/flow-diff.yaml for global config
#
# CLI arguments always override file settings.

# Output configuration
output:
  # Format: markdown, summary
  format: markdown
  # Output file path (omit for stdout)
  # file: flow-diff.md
  # Disable colored output
  no_color: false

# Report assembly
report:
  # Order differences by kind, component identifier and field name
  sort_differences: true

# Behavior flags
behavior:
  # Exit with code 1 if any changes detected
  fail_on_change: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
