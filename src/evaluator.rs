use std::collections::HashMap;

use crate::{
    ast::{Expr, SetOp},
    graph::{GraphView, NodeSet, Pattern},
    selectors,
};

/// Settings in effect while evaluating an expression.
///
/// Changed for a sub-expression by `key=value(...)` calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalContext {
    /// Whether test variants take part in pattern matching and traversal
    pub include_tests: bool,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the context with `key` set to `value`.
    pub fn with_setting(&self, key: &str, value: &str) -> Result<Self, EvalError> {
        let invalid = || EvalError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "test" => {
                let include_tests = match value {
                    "1" | "true" => true,
                    "0" | "false" => false,
                    _ => return Err(invalid()),
                };
                Ok(EvalContext { include_tests })
            }
            _ => Err(EvalError::UnknownSetting(key.to_string())),
        }
    }
}

/// Variable bindings for one program evaluation.
///
/// Values are node sets computed where the assignment appears, under the
/// settings in effect there. A scope must not be shared between concurrent
/// evaluations.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    bindings: HashMap<String, NodeSet>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&NodeSet> {
        self.bindings.get(name)
    }

    /// Binds `name`, replacing any earlier binding.
    pub fn bind(&mut self, name: impl Into<String>, nodes: NodeSet) {
        self.bindings.insert(name.into(), nodes);
    }
}

/// Expected argument count of a graph function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// Errors that can occur during query evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Call to a name missing from the function registry
    #[error("Undefined function: {0}")]
    UndefinedFunction(String),

    /// Selector tag missing from the selector registry
    #[error("Unknown selector: :{0}")]
    UnknownSelector(String),

    /// Function called with the wrong number of arguments
    #[error("Function {function} expects {expected} argument(s), got {found}")]
    Arity {
        function: String,
        expected: Arity,
        found: usize,
    },

    /// `key=value(...)` with an unknown key
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    /// `key=value(...)` with a value the key does not accept
    #[error("Invalid value '{value}' for setting {key}")]
    InvalidSetting { key: String, value: String },

    /// Literal package that matches no node, reported in strict mode only
    #[error("Unresolved package or variable: {0}")]
    UnresolvedPackage(String),

    #[error("Invalid package pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// The main query evaluator.
///
/// Holds a shared reference to the graph and immutable options only, so one
/// evaluator can serve concurrent evaluations that each bring their own
/// [`Scope`].
pub struct Evaluator<'g> {
    graph: &'g dyn GraphView,
    context: EvalContext,
    strict: bool,
}

impl<'g> Evaluator<'g> {
    pub fn new(graph: &'g dyn GraphView) -> Self {
        Evaluator {
            graph,
            context: EvalContext::default(),
            strict: false,
        }
    }

    /// In strict mode a literal package that matches nothing is an error
    /// instead of an empty set.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets whether test variants are visible outside of `test=...` calls.
    pub fn include_tests(mut self, include_tests: bool) -> Self {
        self.context.include_tests = include_tests;
        self
    }

    /// Evaluates an expression or program with a fresh scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use depquery::{Evaluator, Graph, Node, compile};
    ///
    /// let mut graph = Graph::new();
    /// graph.add_node(Node::new("app")).unwrap();
    /// graph.add_node(Node::new("lib")).unwrap();
    /// graph.add_import("app", "lib").unwrap();
    ///
    /// let expr = compile("app:all").unwrap().unwrap();
    /// let nodes = Evaluator::new(&graph).evaluate(&expr).unwrap();
    /// assert_eq!(nodes.into_iter().collect::<Vec<_>>(), vec!["app", "lib"]);
    /// ```
    pub fn evaluate(&self, expr: &Expr) -> Result<NodeSet, EvalError> {
        let mut scope = Scope::new();
        self.eval(expr, &mut scope)
    }

    /// Evaluates `expr`, reading and extending `scope`.
    pub fn eval(&self, expr: &Expr, scope: &mut Scope) -> Result<NodeSet, EvalError> {
        self.eval_expr(expr, scope, &self.context)
    }

    fn eval_expr(
        &self,
        expr: &Expr,
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<NodeSet, EvalError> {
        match expr {
            Expr::Package(pattern) => self.resolve_package(pattern, scope, ctx),
            Expr::Selected { base, tags } => {
                let mut nodes = self.eval_expr(base, scope, ctx)?;
                for tag in tags {
                    nodes = selectors::apply(self.graph, nodes, tag, ctx)?;
                }
                Ok(nodes)
            }
            Expr::BinaryOp { op, left, right } => {
                let left = self.eval_expr(left, scope, ctx)?;
                let right = self.eval_expr(right, scope, ctx)?;
                Ok(match op {
                    SetOp::Union => left.union(&right).cloned().collect(),
                    SetOp::Difference => left.difference(&right).cloned().collect(),
                })
            }
            Expr::Call { name, args } => self.eval_call(name, args, scope, ctx),
            Expr::Assignment { name, value } => {
                let nodes = self.eval_expr(value, scope, ctx)?;
                log::debug!("bound {} to {} node(s)", name, nodes.len());
                scope.bind(name.clone(), nodes.clone());
                Ok(nodes)
            }
            Expr::Program(statements) => {
                let mut result = NodeSet::new();
                for statement in statements {
                    result = self.eval_expr(statement, scope, ctx)?;
                }
                Ok(result)
            }
        }
    }

    /// Variables first, graph second.
    fn resolve_package(
        &self,
        pattern: &str,
        scope: &Scope,
        ctx: &EvalContext,
    ) -> Result<NodeSet, EvalError> {
        if let Some(bound) = scope.get(pattern) {
            return Ok(bound.clone());
        }

        let compiled = Pattern::new(pattern).map_err(|e| EvalError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        if compiled.is_literal() {
            if self.graph.contains(pattern) {
                return Ok(NodeSet::from([pattern.to_string()]));
            }
            if self.strict {
                return Err(EvalError::UnresolvedPackage(pattern.to_string()));
            }
            log::warn!("package {} matches no node", pattern);
            return Ok(NodeSet::new());
        }

        Ok(self
            .graph
            .ids()
            .filter(|id| compiled.matches(id))
            .filter(|id| {
                ctx.include_tests || self.graph.node(id).is_some_and(|node| !node.is_test())
            })
            .map(str::to_string)
            .collect())
    }

    fn eval_args(
        &self,
        args: &[Expr],
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<Vec<NodeSet>, EvalError> {
        args.iter()
            .map(|arg| self.eval_expr(arg, scope, ctx))
            .collect()
    }

    fn eval_call(
        &self,
        name: &str,
        args: &[Expr],
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<NodeSet, EvalError> {
        // `key=value(...)` evaluates its arguments under a changed setting
        if let Some((key, value)) = name.split_once('=') {
            check_arity(name, Arity::AtLeast(1), args.len())?;
            let inner = ctx.with_setting(key, value)?;
            log::debug!("evaluating {} argument(s) with {}={}", args.len(), key, value);
            let sets = self.eval_args(args, scope, &inner)?;
            return Ok(union_all(sets));
        }

        log::debug!("calling {}() with {} argument(s)", name, args.len());
        let lowered = name.to_ascii_lowercase();
        match lowered.as_str() {
            "" => Ok(union_all(self.eval_args(args, scope, ctx)?)),
            "reach" | "reaches" => self.func_reach(name, args, scope, ctx),
            "incoming" => self.func_incoming(name, args, scope, ctx),
            "deps" => self.func_deps(name, args, scope, ctx),
            "shared" => self.func_shared(name, args, scope, ctx),
            "xor" => self.func_xor(name, args, scope, ctx),
            _ => Err(EvalError::UndefinedFunction(name.to_string())),
        }
    }

    fn two_args(
        &self,
        name: &str,
        args: &[Expr],
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<(NodeSet, NodeSet), EvalError> {
        check_arity(name, Arity::Exact(2), args.len())?;
        let first = self.eval_expr(&args[0], scope, ctx)?;
        let second = self.eval_expr(&args[1], scope, ctx)?;
        Ok((first, second))
    }

    /// reach(a, b) - members of a that can reach any member of b
    fn func_reach(
        &self,
        name: &str,
        args: &[Expr],
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<NodeSet, EvalError> {
        let (sources, targets) = self.two_args(name, args, scope, ctx)?;
        Ok(selectors::reaching(self.graph, &sources, &targets, ctx))
    }

    /// incoming(a, b) - members of a that directly import a member of b
    fn func_incoming(
        &self,
        name: &str,
        args: &[Expr],
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<NodeSet, EvalError> {
        let (sources, targets) = self.two_args(name, args, scope, ctx)?;
        Ok(sources
            .iter()
            .filter(|id| {
                self.graph
                    .imports(id)
                    .into_iter()
                    .any(|dep| targets.contains(dep))
            })
            .cloned()
            .collect())
    }

    /// deps(a) - everything a transitively imports
    fn func_deps(
        &self,
        name: &str,
        args: &[Expr],
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<NodeSet, EvalError> {
        check_arity(name, Arity::Exact(1), args.len())?;
        let start = self.eval_expr(&args[0], scope, ctx)?;
        Ok(selectors::dependencies(self.graph, &start, ctx))
    }

    /// shared(a, b, ...) - nodes present in every argument
    fn func_shared(
        &self,
        name: &str,
        args: &[Expr],
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<NodeSet, EvalError> {
        check_arity(name, Arity::AtLeast(2), args.len())?;
        let mut sets = self.eval_args(args, scope, ctx)?.into_iter();
        let first = sets.next().unwrap_or_default();
        Ok(sets.fold(first, |acc, set| acc.intersection(&set).cloned().collect()))
    }

    /// xor(a, b) - nodes in exactly one of the arguments
    fn func_xor(
        &self,
        name: &str,
        args: &[Expr],
        scope: &mut Scope,
        ctx: &EvalContext,
    ) -> Result<NodeSet, EvalError> {
        let (a, b) = self.two_args(name, args, scope, ctx)?;
        Ok(a.symmetric_difference(&b).cloned().collect())
    }
}

fn check_arity(name: &str, expected: Arity, found: usize) -> Result<(), EvalError> {
    let ok = match expected {
        Arity::Exact(n) => found == n,
        Arity::AtLeast(n) => found >= n,
    };
    if ok {
        Ok(())
    } else {
        Err(EvalError::Arity {
            function: name.to_string(),
            expected,
            found,
        })
    }
}

fn union_all(sets: Vec<NodeSet>) -> NodeSet {
    sets.into_iter().flatten().collect()
}
