//! Unified error types for flow-diff.
//!
//! Errors are grouped by the stage that raised them (load, compare, render)
//! so callers can report which part of a run failed.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for flow-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FlowDiffError {
    /// Errors while reading or decoding a flow snapshot
    #[error("Failed to load flow snapshot: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors raised by the flow comparator
    #[error("Flow comparison failed: {context}")]
    Compare {
        context: String,
        #[source]
        source: CompareErrorKind,
    },

    /// Errors while rendering a single difference
    #[error("Rendering failed: {context}")]
    Render {
        context: String,
        #[source]
        source: RenderErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("Parameter context '{0}' is defined more than once")]
    DuplicateParameterContext(String),
}

/// Specific comparison error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CompareErrorKind {
    #[error("Duplicate {component} identifier '{identifier}' in {flow}")]
    DuplicateIdentifier {
        component: String,
        identifier: String,
        flow: String,
    },

    #[error("Irreconcilable flow structure: {0}")]
    Irreconcilable(String),
}

/// Specific render error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RenderErrorKind {
    /// A join target named by a difference cannot be found on either side.
    #[error("Malformed {kind} difference: {reason}")]
    MalformedDifference { kind: String, reason: String },

    /// A property or parameter has neither a value nor a descriptor.
    #[error("Missing field '{field}' on {owner}")]
    MissingField { field: String, owner: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for flow-diff operations
pub type Result<T> = std::result::Result<T, FlowDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl FlowDiffError {
    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create a load error for a missing required field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::load(
            "missing required field",
            LoadErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create a comparison error with context
    pub fn compare(context: impl Into<String>, source: CompareErrorKind) -> Self {
        Self::Compare {
            context: context.into(),
            source,
        }
    }

    /// Create a render error with context
    pub fn render(context: impl Into<String>, source: RenderErrorKind) -> Self {
        Self::Render {
            context: context.into(),
            source,
        }
    }

    /// Create a malformed difference error
    pub fn malformed(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::render(
            "malformed difference",
            RenderErrorKind::MalformedDifference {
                kind: kind.into(),
                reason: reason.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error came from the load stage.
    #[must_use]
    pub const fn is_load(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::Io { .. })
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for FlowDiffError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for FlowDiffError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The new context is prepended to whatever context the error already
/// carries, so a failure deep in the loader reads
/// `"loading before snapshot: decoding flowContents: ..."`.
///
/// # Example
///
/// ```ignore
/// use flow_diff::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<FlowSnapshot> {
///     let content = std::fs::read_to_string(path)
///         .context("reading snapshot file")?;
///
///     parse_snapshot_str(&content)
///         .with_context(|| format!("parsing snapshot from {}", path.display()))
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<FlowDiffError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: FlowDiffError, new_ctx: &str) -> FlowDiffError {
    match err {
        FlowDiffError::Load {
            context: existing,
            source,
        } => FlowDiffError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FlowDiffError::Compare {
            context: existing,
            source,
        } => FlowDiffError::Compare {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FlowDiffError::Render {
            context: existing,
            source,
        } => FlowDiffError::Render {
            context: chain_context(new_ctx, &existing),
            source,
        },
        FlowDiffError::Io {
            path,
            message,
            source,
        } => FlowDiffError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        FlowDiffError::Config(msg) => FlowDiffError::Config(chain_context(new_ctx, &msg)),
        FlowDiffError::Validation(msg) => FlowDiffError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Chain two context strings as `"new: existing"`.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FlowDiffError::missing_field("flowContents", "snapshot");
        let display = err.to_string();
        assert!(
            display.contains("load"),
            "Error message should name the load stage: {display}"
        );

        let err = FlowDiffError::malformed("PARAMETER_VALUE_CHANGED", "no such parameter");
        assert!(err.to_string().contains("Rendering failed"));
    }

    #[test]
    fn test_io_error_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = FlowDiffError::io("/path/to/flow.json", io_err);

        assert!(err.to_string().contains("/path/to/flow.json"));
        assert!(err.is_load());
    }

    #[test]
    fn test_render_context_accumulates_outermost_first() {
        let rendered: Result<()> = Err(FlowDiffError::malformed(
            "PARAMETER_ADDED",
            "parameter `port` not found",
        ));
        let err = rendered
            .context("rendering parameter block")
            .context("assembling report for Ingest")
            .unwrap_err();

        match err {
            FlowDiffError::Render {
                context,
                source: RenderErrorKind::MalformedDifference { kind, .. },
            } => {
                assert_eq!(kind, "PARAMETER_ADDED");
                assert!(context.starts_with("assembling report for Ingest: rendering parameter block"));
            }
            other => panic!("Expected Render error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_only_builds_message_on_error() {
        let mut built = 0;

        let loaded: Result<usize> = Ok(3);
        assert!(loaded
            .with_context(|| {
                built += 1;
                "decoding before.json"
            })
            .is_ok());
        assert_eq!(built, 0);

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let loaded: std::result::Result<usize, std::io::Error> = Err(io_err);
        let err = loaded
            .with_context(|| {
                built += 1;
                "decoding after.json"
            })
            .unwrap_err();
        assert_eq!(built, 1);
        assert!(matches!(err, FlowDiffError::Io { ref message, .. } if message.starts_with("decoding after.json")));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(
            chain_context("outer", "middle: inner"),
            "outer: middle: inner"
        );
    }
}
