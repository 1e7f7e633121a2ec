//! CLI support for depquery
//!
//! Provides programmatic access to the depq CLI functionality for embedding
//! in other tools.

mod check;
mod convert;
mod docs;
mod format;

pub use check::{CheckOptions, CheckResult, execute_check};
pub use convert::graph_from_json;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use format::{format_query, list_tokens};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Query(#[from] crate::QueryError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("Graph error: {0}")]
    Graph(#[from] crate::GraphError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON that parses but does not describe a graph
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No graph provided. Use --graph or pipe graph JSON to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'depq docs' to see available categories.")]
    UnknownCategory(String),
}
