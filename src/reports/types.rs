//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Rendered difference lines under the report header
    #[default]
    #[value(alias = "md")]
    Markdown,
    /// Per-kind difference counts
    Summary,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_match_cli_values() {
        for format in ReportFormat::value_variants() {
            let parsed = ReportFormat::from_str(&format.to_string(), true).expect("parse");
            assert_eq!(parsed, *format);
        }
        assert_eq!(
            ReportFormat::from_str("md", true).expect("alias"),
            ReportFormat::Markdown
        );
    }
}
