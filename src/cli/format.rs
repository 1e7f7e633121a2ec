//! Canonical form and token listings for queries

use super::CliError;
use crate::{QueryError, compile, tokenize};

/// Render a query in canonical form, or as a tree when `tree` is set.
///
/// An empty query renders as an empty string.
pub fn format_query(query: &str, tree: bool) -> Result<String, CliError> {
    let rendered = match compile(query)? {
        Some(expr) if tree => expr.tree(),
        Some(expr) => format!("{}\n", expr),
        None => String::new(),
    };
    Ok(rendered)
}

/// List the tokens of a query, one `Kind "text"` per line.
pub fn list_tokens(query: &str) -> Result<Vec<String>, CliError> {
    let tokens = tokenize(query).map_err(QueryError::from)?;
    Ok(tokens.iter().map(ToString::to_string).collect())
}
