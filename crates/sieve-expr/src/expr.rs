//! Rule parsing and matching.
//!
//! A value delimited by slashes (`/…/`) is an unanchored regular
//! expression; anything else is a glob where `*` matches any run of
//! characters and the whole candidate must match. Both are case-sensitive
//! unless the regex carries an inline `(?i)` flag.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::{ExprError, ExprResult};

/// Marks a rule as soft when it directly follows the operator.
const SOFT_MARKER: char = '~';

/// Comparison operator of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
}

impl Operator {
    const ALL: [Operator; 2] = [Operator::Equals, Operator::NotEquals];

    /// The operator as written in a rule.
    pub fn token(self) -> &'static str {
        match self {
            Operator::Equals => "==",
            Operator::NotEquals => "!=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A parsed placement rule.
#[derive(Debug, Clone)]
pub struct Expr {
    pub key: String,
    pub operator: Operator,
    /// The value as written, soft marker removed, regex delimiters kept.
    pub value: String,
    /// A soft rule that fails does not eliminate a node.
    pub is_soft: bool,
    pattern: Regex,
}

impl Expr {
    /// Parse a single `key<op>[~]value` rule.
    pub fn parse(raw: &str) -> ExprResult<Self> {
        // The leftmost operator wins, so `a!==b` is `a != "=b"`.
        let (idx, operator) = Operator::ALL
            .iter()
            .filter_map(|op| raw.find(op.token()).map(|idx| (idx, *op)))
            .min_by_key(|(idx, _)| *idx)
            .ok_or_else(|| ExprError::UnsupportedOperator(raw.to_string()))?;

        let key = &raw[..idx];
        validate_key(key)?;

        let rest = &raw[idx + operator.token().len()..];
        let (value, is_soft) = match rest.strip_prefix(SOFT_MARKER) {
            Some(value) => (value, true),
            None => (rest, false),
        };

        Ok(Self {
            key: key.to_string(),
            operator,
            value: value.to_string(),
            is_soft,
            pattern: compile(value)?,
        })
    }

    /// Returns true when the rule is satisfied by the candidate set.
    ///
    /// `==` needs at least one matching candidate, `!=` needs none. An empty
    /// candidate set therefore fails `==` and passes `!=`.
    pub fn matches<I, S>(&self, candidates: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let found = candidates
            .into_iter()
            .any(|candidate| self.pattern.is_match(candidate.as_ref()));

        match self.operator {
            Operator::Equals => found,
            Operator::NotEquals => !found,
        }
    }

    /// Whether the value is a `/…/` regular expression rather than a glob.
    pub fn is_regex(&self) -> bool {
        regex_body(&self.value).is_some()
    }
}

impl FromStr for Expr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Expr::parse(s)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, self.operator, self.value)
    }
}

/// Parse a whole rule set, failing on the first invalid rule.
pub fn parse_exprs<S: AsRef<str>>(raws: &[S]) -> ExprResult<Vec<Expr>> {
    raws.iter().map(|raw| Expr::parse(raw.as_ref())).collect()
}

fn validate_key(key: &str) -> ExprResult<()> {
    let mut chars = key.chars();
    let valid_head = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_tail = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid_head && valid_tail {
        Ok(())
    } else {
        Err(ExprError::InvalidKey(key.to_string()))
    }
}

fn regex_body(value: &str) -> Option<&str> {
    if value.len() >= 2 && value.starts_with('/') && value.ends_with('/') {
        Some(&value[1..value.len() - 1])
    } else {
        None
    }
}

fn compile(value: &str) -> ExprResult<Regex> {
    let source = match regex_body(value) {
        Some(body) => body.to_string(),
        None => glob_to_regex(value),
    };

    Regex::new(&source).map_err(|source| ExprError::InvalidRegex {
        value: value.to_string(),
        source,
    })
}

/// `us-*` becomes `(?s)^us\-.*$`. `*` also spans newlines.
fn glob_to_regex(glob: &str) -> String {
    let parts: Vec<String> = glob.split('*').map(regex::escape).collect();
    format!("(?s)^{}$", parts.join(".*"))
}
