//! Rendering for query expressions and evaluation results.
//!
//! # Features
//!
//! - **Canonical form** via `Display` - deterministic prefix notation that
//!   re-parses to the same rendering, suitable as a cache key
//! - **Tree dump** via [`Expr::tree()`] - one node per line, indented by depth
//! - **Result output** via [`to_json()`], [`to_json_pretty()`] and [`to_value()`] - node sets
//!   as JSON arrays of identifiers
//!
//! # Examples
//!
//! ```
//! use depquery::compile;
//!
//! let expr = compile("std - (std - unsafe:all)").unwrap().unwrap();
//! assert_eq!(expr.to_string(), "-(std, -(std, unsafe:all))");
//! ```

use std::fmt::{self, Display, Write};

use crate::{ast::Expr, graph::NodeSet};

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Package(pattern) => f.write_str(pattern),
            Expr::Selected { base, tags } => {
                write!(f, "{}", base)?;
                for tag in tags {
                    write!(f, ":{}", tag)?;
                }
                Ok(())
            }
            // Prefix notation needs no extra parentheses around operands
            Expr::BinaryOp { op, left, right } => {
                write!(f, "{}({}, {})", op.symbol(), left, right)
            }
            Expr::Call { name, args } => {
                write!(f, "{}(", name)?;
                write_joined(f, args, ", ")?;
                f.write_str(")")
            }
            Expr::Assignment { name, value } => write!(f, "{} := {}", name, value),
            Expr::Program(statements) => write_joined(f, statements, "; "),
        }
    }
}

impl Expr {
    /// Renders the expression as an indented tree, one node per line.
    ///
    /// # Examples
    ///
    /// ```
    /// use depquery::compile;
    ///
    /// let expr = compile("a + b:all").unwrap().unwrap();
    /// assert_eq!(expr.tree(), "Union\n  Package a\n  Selected :all\n    Package b\n");
    /// ```
    pub fn tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        // Writing into a String cannot fail
        let _ = match self {
            Expr::Package(pattern) => writeln!(out, "{}Package {}", indent, pattern),
            Expr::Selected { tags, .. } => {
                let chain: String = tags.iter().map(|t| format!(":{}", t)).collect();
                writeln!(out, "{}Selected {}", indent, chain)
            }
            Expr::BinaryOp { op, .. } => writeln!(out, "{}{:?}", indent, op),
            Expr::Call { name, .. } if name.is_empty() => writeln!(out, "{}List", indent),
            Expr::Call { name, .. } => writeln!(out, "{}Call {}", indent, name),
            Expr::Assignment { name, .. } => writeln!(out, "{}Assign {}", indent, name),
            Expr::Program(_) => writeln!(out, "{}Program", indent),
        };

        match self {
            Expr::Package(_) => {}
            Expr::Selected { base, .. } => base.write_tree(out, depth + 1),
            Expr::BinaryOp { left, right, .. } => {
                left.write_tree(out, depth + 1);
                right.write_tree(out, depth + 1);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.write_tree(out, depth + 1);
                }
            }
            Expr::Assignment { value, .. } => value.write_tree(out, depth + 1),
            Expr::Program(statements) => {
                for statement in statements {
                    statement.write_tree(out, depth + 1);
                }
            }
        }
    }
}

/// Converts a node set to a JSON array value of identifiers.
pub fn to_value(nodes: &NodeSet) -> serde_json::Value {
    serde_json::Value::Array(
        nodes
            .iter()
            .map(|id| serde_json::Value::String(id.clone()))
            .collect(),
    )
}

/// Converts a node set to a compact JSON array of identifiers.
///
/// Identifiers appear in sorted order, so the output is deterministic.
///
/// # Examples
///
/// ```
/// use depquery::{NodeSet, output::to_json};
///
/// let nodes: NodeSet = ["b", "a"].into_iter().map(String::from).collect();
/// assert_eq!(to_json(&nodes), r#"["a","b"]"#);
/// ```
pub fn to_json(nodes: &NodeSet) -> String {
    to_value(nodes).to_string()
}

/// Converts a node set to a pretty-printed JSON array, one identifier per line.
pub fn to_json_pretty(nodes: &NodeSet) -> String {
    // Serializing a Value built from strings cannot fail
    serde_json::to_string_pretty(&to_value(nodes)).unwrap_or_default()
}
