//! JSON to graph conversion

use serde_json::Value;

use super::CliError;
use crate::{Graph, Node};

fn string_field<'a>(node: &'a Value, key: &str) -> Result<Option<&'a str>, CliError> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(CliError::InvalidGraph(format!(
            "field '{}' must be a string, got {}",
            key, other
        ))),
    }
}

/// Build a graph from `{"nodes": [{"id", "imports", "main", "test_for"}]}`.
///
/// Nodes are added before edges, so imports may refer to nodes listed later.
pub fn graph_from_json(v: &Value) -> Result<Graph, CliError> {
    let nodes = v
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| CliError::InvalidGraph("expected an object with a \"nodes\" array".to_string()))?;

    let mut graph = Graph::new();
    let mut edges = Vec::new();

    for entry in nodes {
        let id = string_field(entry, "id")?
            .ok_or_else(|| CliError::InvalidGraph(format!("node without id: {}", entry)))?;

        let mut node = Node::new(id);
        node.main = entry.get("main").and_then(Value::as_bool).unwrap_or(false);
        node.test_for = string_field(entry, "test_for")?.map(str::to_string);
        graph.add_node(node)?;

        match entry.get("imports") {
            None | Some(Value::Null) => {}
            Some(Value::Array(imports)) => {
                for import in imports {
                    let target = import.as_str().ok_or_else(|| {
                        CliError::InvalidGraph(format!("import of {} must be a string, got {}", id, import))
                    })?;
                    edges.push((id.to_string(), target.to_string()));
                }
            }
            Some(other) => {
                return Err(CliError::InvalidGraph(format!(
                    "imports of {} must be an array, got {}",
                    id, other
                )));
            }
        }
    }

    for (from, to) in &edges {
        graph.add_import(from, to)?;
    }

    log::debug!("loaded graph with {} node(s), {} import(s)", graph.len(), edges.len());
    Ok(graph)
}
