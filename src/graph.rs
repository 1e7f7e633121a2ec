use std::collections::{BTreeMap, BTreeSet, HashMap};

use regex::Regex;

/// Ordered set of node identifiers produced by evaluating a query.
///
/// Ordering keeps results deterministic for rendering and tests.
pub type NodeSet = BTreeSet<String>;

/// A package in the dependency graph.
///
/// # Examples
///
/// ```
/// use depquery::Node;
///
/// let lib = Node::new("example.com/app/lib");
/// let cmd = Node::new("example.com/app/cmd").main();
/// let test = Node::new("example.com/app/lib.test").test_for("example.com/app/lib");
/// assert!(test.is_test());
/// assert!(cmd.main);
/// # let _ = lib;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique identifier, also used as the external cross-reference key
    pub id: String,

    /// Whether the package builds an executable
    pub main: bool,

    /// For a test variant, the package it tests
    pub test_for: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            main: false,
            test_for: None,
        }
    }

    pub fn main(mut self) -> Self {
        self.main = true;
        self
    }

    pub fn test_for(mut self, package: impl Into<String>) -> Self {
        self.test_for = Some(package.into());
        self
    }

    pub fn is_test(&self) -> bool {
        self.test_for.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("Node {0} not found in graph")]
    UnknownNode(String),

    #[error("Node {0} already exists in graph")]
    DuplicateNode(String),
}

/// Read-only view of a dependency graph, as seen by the evaluator.
///
/// Edges point from importer to imported package. Views are shared across
/// concurrent evaluations, hence the `Sync` bound.
pub trait GraphView: Sync {
    fn node(&self, id: &str) -> Option<&Node>;

    /// All node identifiers, in a stable order.
    fn ids(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Packages directly imported by `id`.
    fn imports(&self, id: &str) -> Vec<&str>;

    /// Packages that directly import `id`.
    fn importers(&self, id: &str) -> Vec<&str>;

    /// Test variants of the package `id`.
    fn test_variants(&self, id: &str) -> Vec<&str>;

    fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }
}

/// In-memory dependency graph.
///
/// Node lookups are O(log n) and edge lookups O(1); reverse edges and test
/// variants are indexed on insert.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<String, Node>,
    imports: HashMap<String, BTreeSet<String>>,
    importers: HashMap<String, BTreeSet<String>>,
    tests: HashMap<String, BTreeSet<String>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        if let Some(package) = &node.test_for {
            self.tests
                .entry(package.clone())
                .or_default()
                .insert(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Adds an import edge `from -> to`. Both nodes must already exist.
    pub fn add_import(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        for id in [from, to] {
            if !self.nodes.contains_key(id) {
                return Err(GraphError::UnknownNode(id.to_string()));
            }
        }
        self.imports
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string());
        self.importers
            .entry(to.to_string())
            .or_default()
            .insert(from.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn collect(edges: Option<&BTreeSet<String>>) -> Vec<&str> {
    edges
        .map(|set| set.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

impl GraphView for Graph {
    fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn ids(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.nodes.keys().map(String::as_str))
    }

    fn imports(&self, id: &str) -> Vec<&str> {
        collect(self.imports.get(id))
    }

    fn importers(&self, id: &str) -> Vec<&str> {
        collect(self.importers.get(id))
    }

    fn test_variants(&self, id: &str) -> Vec<&str> {
        collect(self.tests.get(id))
    }
}

/// Compiled package pattern.
///
/// - a plain path matches exactly that identifier
/// - `...` matches any string, including `/`
/// - a trailing `/...` also matches the bare prefix, so `x/...` matches `x`
/// - `std` matches identifiers whose first path element has no `.`
#[derive(Debug, Clone)]
pub enum Pattern {
    Exact(String),
    Std,
    Wildcard(Regex),
}

pub const WILDCARD: &str = "...";

fn wildcard_regex(text: &str) -> String {
    text.split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*")
}

impl Pattern {
    pub fn new(text: &str) -> Result<Self, regex::Error> {
        if text == "std" {
            return Ok(Pattern::Std);
        }
        if !text.contains(WILDCARD) {
            return Ok(Pattern::Exact(text.to_string()));
        }

        let source = match text.strip_suffix("/...") {
            Some(prefix) => format!("^{}(/.*)?$", wildcard_regex(prefix)),
            None => format!("^{}$", wildcard_regex(text)),
        };
        Ok(Pattern::Wildcard(Regex::new(&source)?))
    }

    /// Whether the pattern names a single package rather than a family.
    pub fn is_literal(&self) -> bool {
        matches!(self, Pattern::Exact(_))
    }

    pub fn matches(&self, id: &str) -> bool {
        match self {
            Pattern::Exact(text) => text == id,
            Pattern::Std => id.split('/').next().is_some_and(|first| !first.contains('.')),
            Pattern::Wildcard(regex) => regex.is_match(id),
        }
    }
}
