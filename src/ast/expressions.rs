use crate::ast::SetOp;

/// Abstract Syntax Tree node representing a parsed query expression.
///
/// The variant set is closed: the printer and the evaluator both dispatch on
/// it with an exhaustive `match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Package path or pattern
    ///
    /// # Examples
    /// ```text
    /// std
    /// golang.org/x/tools/...
    /// ```
    Package(String),

    /// Base expression with an ordered chain of selector tags
    ///
    /// Tags keep their sign verbatim.
    ///
    /// # Examples
    /// ```text
    /// x:all
    /// x:-test:+test
    /// (x + y):import
    /// ```
    Selected { base: Box<Expr>, tags: Vec<String> },

    /// Binary set operation
    ///
    /// # Examples
    /// ```text
    /// a + b
    /// std - unsafe:all
    /// ```
    BinaryOp {
        op: SetOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Function call
    ///
    /// An empty `name` is the anonymous list produced by juxtaposition
    /// (`a b`) or a parenthesized comma list (`(a, b)`).
    ///
    /// # Examples
    /// ```text
    /// reach(a, b)
    /// test=1(a)
    /// ```
    Call { name: String, args: Vec<Expr> },

    /// Variable binding
    ///
    /// # Example
    /// ```text
    /// q := x:all
    /// ```
    Assignment { name: String, value: Box<Expr> },

    /// Statements separated by `;`; all but the last are assignments.
    Program(Vec<Expr>),
}

impl Expr {
    pub fn package(pattern: impl Into<String>) -> Self {
        Expr::Package(pattern.into())
    }

    pub fn selected(base: Expr, tags: Vec<String>) -> Self {
        Expr::Selected {
            base: Box::new(base),
            tags,
        }
    }

    pub fn binary(op: SetOp, left: Expr, right: Expr) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    pub fn assignment(name: impl Into<String>, value: Expr) -> Self {
        Expr::Assignment {
            name: name.into(),
            value: Box::new(value),
        }
    }

    pub fn is_assignment(&self) -> bool {
        matches!(self, Expr::Assignment { .. })
    }

    /// Number of levels in the tree, counting this node.
    ///
    /// Walks with an explicit stack, so it is safe on trees of any depth.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 1)];

        while let Some((expr, level)) = stack.pop() {
            height = height.max(level);
            match expr {
                Expr::Package(_) => {}
                Expr::Selected { base, .. } => stack.push((base, level + 1)),
                Expr::BinaryOp { left, right, .. } => {
                    stack.push((left, level + 1));
                    stack.push((right, level + 1));
                }
                Expr::Call { args, .. } | Expr::Program(args) => {
                    stack.extend(args.iter().map(|arg| (arg, level + 1)));
                }
                Expr::Assignment { value, .. } => stack.push((value, level + 1)),
            }
        }
        height
    }
}
