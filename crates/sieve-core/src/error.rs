//! Error types for core type construction.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building core types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("label '{label}' is not a JSON list of rules: {source}")]
    InvalidRuleLabel {
        label: String,
        #[source]
        source: serde_json::Error,
    },
}
