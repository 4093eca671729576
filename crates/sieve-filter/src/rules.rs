//! Evaluation shared by the rule-driven filters.

use sieve_core::CandidateNode;
use sieve_expr::{Expr, parse_exprs};
use tracing::{debug, error};

/// Logical AND over `exprs` in declaration order.
///
/// The first failing hard rule stops evaluation. A failing soft rule is
/// logged and skipped.
pub(crate) fn all_satisfied<F>(filter: &str, node: &CandidateNode, exprs: &[Expr], mut check: F) -> bool
where
    F: FnMut(&Expr) -> bool,
{
    for expr in exprs {
        let matched = check(expr);
        debug!(
            filter,
            node = %node.id,
            rule = %expr,
            soft = expr.is_soft,
            regex = expr.is_regex(),
            matched,
            "matching rule"
        );

        if !matched && !expr.is_soft {
            return false;
        }
    }
    true
}

/// `-e <prefix>key<op>value` tokens for a rule set, or empty on parse failure.
pub(crate) fn render_rules(filter: &str, raws: &[String], prefix: &str) -> String {
    match parse_exprs(raws) {
        Ok(exprs) => exprs
            .iter()
            .map(|expr| format!("-e {prefix}{expr}"))
            .collect::<Vec<_>>()
            .join(" "),
        Err(err) => {
            error!(filter, error = %err, "unable to parse rule expression");
            String::new()
        }
    }
}
