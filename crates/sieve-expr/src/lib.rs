//! sieve-expr — the placement rule language.
//!
//! Rules are short `key<op>value` strings supplied by users when they
//! submit a workload:
//!
//! ```text
//! region==us-*            glob, hard
//! node!=/node-[01]/       regular expression, hard
//! storage==~ssd           glob, soft (a miss never eliminates a node)
//! ```
//!
//! This crate only parses rules and matches them against candidate strings.
//! Deciding *which* strings a key is matched against is the job of the
//! filters in `sieve-filter`.

pub mod error;
pub mod expr;

pub use error::{ExprError, ExprResult};
pub use expr::{Expr, Operator, parse_exprs};
