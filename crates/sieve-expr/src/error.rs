//! Rule parsing errors.

use thiserror::Error;

/// Result type alias for rule parsing.
pub type ExprResult<T> = Result<T, ExprError>;

/// Errors raised while parsing a placement rule.
#[derive(Debug, Error)]
pub enum ExprError {
    #[error("one of operator ==, != is expected: '{0}'")]
    UnsupportedOperator(String),

    #[error("key '{0}' is invalid")]
    InvalidKey(String),

    #[error("invalid pattern '{value}': {source}")]
    InvalidRegex {
        value: String,
        #[source]
        source: regex::Error,
    },
}
