use std::collections::VecDeque;

use crate::{
    evaluator::{EvalContext, EvalError},
    graph::{GraphView, NodeSet},
};

/// How a selector tag combines with the running set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// `:tag` - replace the set with the matching nodes
    Replace,
    /// `:+tag` - add the matching nodes
    Add,
    /// `:-tag` - remove the matching nodes
    Remove,
}

/// A selector tag split into its sign and name.
///
/// # Examples
/// - `all` → `Tag { sign: Replace, name: "all" }`
/// - `-test` → `Tag { sign: Remove, name: "test" }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'a> {
    pub sign: Sign,
    pub name: &'a str,
}

impl<'a> Tag<'a> {
    pub fn parse(text: &'a str) -> Self {
        if let Some(name) = text.strip_prefix('+') {
            Tag { sign: Sign::Add, name }
        } else if let Some(name) = text.strip_prefix('-') {
            Tag {
                sign: Sign::Remove,
                name,
            }
        } else {
            Tag {
                sign: Sign::Replace,
                name: text,
            }
        }
    }
}

type Matcher = fn(&dyn GraphView, &NodeSet, &EvalContext) -> NodeSet;

/// Entry of the selector registry.
pub struct SelectorDef {
    pub name: &'static str,
    pub summary: &'static str,
    matcher: Matcher,
}

/// Every selector tag the evaluator understands.
pub const SELECTORS: &[SelectorDef] = &[
    SelectorDef {
        name: "all",
        summary: "the set plus everything it transitively imports",
        matcher: select_all,
    },
    SelectorDef {
        name: "import",
        summary: "packages directly imported by the set",
        matcher: select_import,
    },
    SelectorDef {
        name: "importer",
        summary: "packages directly importing a member of the set",
        matcher: select_importer,
    },
    SelectorDef {
        name: "main",
        summary: "members that build an executable",
        matcher: select_main,
    },
    SelectorDef {
        name: "test",
        summary: "test variants in the set or belonging to its members",
        matcher: select_test,
    },
    SelectorDef {
        name: "source",
        summary: "members that no other package imports",
        matcher: select_source,
    },
];

pub fn lookup(name: &str) -> Option<&'static SelectorDef> {
    SELECTORS.iter().find(|def| def.name == name)
}

/// Applies one tag to `set`.
pub fn apply(
    graph: &dyn GraphView,
    set: NodeSet,
    text: &str,
    ctx: &EvalContext,
) -> Result<NodeSet, EvalError> {
    let tag = Tag::parse(text);
    let def = lookup(tag.name).ok_or_else(|| EvalError::UnknownSelector(text.to_string()))?;
    let matching = (def.matcher)(graph, &set, ctx);

    log::debug!(
        "selector :{} matched {} of {} node(s)",
        text,
        matching.len(),
        set.len()
    );

    Ok(match tag.sign {
        Sign::Replace => matching,
        Sign::Add => set.union(&matching).cloned().collect(),
        Sign::Remove => set.difference(&matching).cloned().collect(),
    })
}

fn visible(graph: &dyn GraphView, id: &str, ctx: &EvalContext) -> bool {
    ctx.include_tests || graph.node(id).is_some_and(|node| !node.is_test())
}

/// Everything reachable from `start` over import edges, excluding `start`
/// unless a cycle leads back to it.
pub(crate) fn dependencies(graph: &dyn GraphView, start: &NodeSet, ctx: &EvalContext) -> NodeSet {
    let mut found = NodeSet::new();
    let mut queue: VecDeque<&str> = start.iter().map(String::as_str).collect();

    while let Some(current) = queue.pop_front() {
        for dep in graph.imports(current) {
            if visible(graph, dep, ctx) && found.insert(dep.to_string()) {
                queue.push_back(dep);
            }
        }
    }
    found
}

/// Members of `sources` that reach any node of `targets`. A node reaches itself.
pub(crate) fn reaching(
    graph: &dyn GraphView,
    sources: &NodeSet,
    targets: &NodeSet,
    ctx: &EvalContext,
) -> NodeSet {
    // Walk importer edges back from the targets once instead of searching per source
    let mut reached: NodeSet = targets.clone();
    let mut queue: VecDeque<String> = targets.iter().cloned().collect();

    while let Some(current) = queue.pop_front() {
        for importer in graph.importers(&current) {
            if visible(graph, importer, ctx) && reached.insert(importer.to_string()) {
                queue.push_back(importer.to_string());
            }
        }
    }

    sources.intersection(&reached).cloned().collect()
}

fn select_all(graph: &dyn GraphView, set: &NodeSet, ctx: &EvalContext) -> NodeSet {
    let mut result = set.clone();
    result.extend(dependencies(graph, set, ctx));
    result
}

fn select_import(graph: &dyn GraphView, set: &NodeSet, ctx: &EvalContext) -> NodeSet {
    set.iter()
        .flat_map(|id| graph.imports(id))
        .filter(|id| visible(graph, id, ctx))
        .map(str::to_string)
        .collect()
}

fn select_importer(graph: &dyn GraphView, set: &NodeSet, ctx: &EvalContext) -> NodeSet {
    set.iter()
        .flat_map(|id| graph.importers(id))
        .filter(|id| visible(graph, id, ctx))
        .map(str::to_string)
        .collect()
}

fn select_main(graph: &dyn GraphView, set: &NodeSet, _ctx: &EvalContext) -> NodeSet {
    set.iter()
        .filter(|id| graph.node(id).is_some_and(|node| node.main))
        .cloned()
        .collect()
}

fn select_test(graph: &dyn GraphView, set: &NodeSet, _ctx: &EvalContext) -> NodeSet {
    let mut result: NodeSet = set
        .iter()
        .filter(|id| graph.node(id).is_some_and(|node| node.is_test()))
        .cloned()
        .collect();
    for id in set {
        result.extend(graph.test_variants(id).into_iter().map(str::to_string));
    }
    result
}

fn select_source(graph: &dyn GraphView, set: &NodeSet, ctx: &EvalContext) -> NodeSet {
    set.iter()
        .filter(|id| {
            !graph
                .importers(id)
                .into_iter()
                .any(|importer| visible(graph, importer, ctx))
        })
        .cloned()
        .collect()
}
