//! Filter error types.

use sieve_expr::ExprError;
use thiserror::Error;

/// Errors that can occur while filtering nodes.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("filter not supported: {0}")]
    NotSupported(String),

    #[error("no healthy node available in the cluster")]
    NoHealthyNodeAvailable,

    #[error("no node matched the {0} filter")]
    NoNodeMatched(&'static str),

    #[error("rule expression error: {0}")]
    Expr(#[from] ExprError),
}

pub type FilterResult<T> = Result<T, FilterError>;
