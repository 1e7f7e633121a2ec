//! Execute queries against a graph given as JSON

use super::{CliError, graph_from_json};
use crate::{Evaluator, compile, output};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to execute
    pub query: String,
    /// Graph JSON string
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
    /// Fail on literal packages that match no node
    pub strict: bool,
    /// Make test variants visible without a `test=1(...)` call
    pub tests: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// The query was empty, nothing to evaluate
    Empty,
    /// Query executed successfully; the selected node ids as a JSON array
    Success(serde_json::Value),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expr = compile(&options.query)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let Some(expr) = expr else {
        return Ok(CheckResult::Empty);
    };

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;
    let graph = graph_from_json(&json_value)?;

    let nodes = Evaluator::new(&graph)
        .strict(options.strict)
        .include_tests(options.tests)
        .evaluate(&expr)?;

    log::debug!("query {} selected {} node(s)", expr, nodes.len());
    Ok(CheckResult::Success(output::to_value(&nodes)))
}
