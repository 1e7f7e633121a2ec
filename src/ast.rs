//! # Dependency Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for the
//! dependency query language, a small set algebra over the packages of a
//! dependency graph.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (packages, selectors, calls, statements)
//! - **[operators]** - Set operators (union, difference)
//!
//! ## Quick Start
//!
//! ```text
//! std - (std - unsafe:all)
//! ```
//!
//! This selects the standard library packages that `unsafe` depends on.
//!
//! ## Core Concepts
//!
//! ### Packages and Patterns
//!
//! A bare word names a package. `...` is a multi-level wildcard, so
//! `golang.org/x/tools/...` selects the whole tools tree.
//!
//! ### Set Algebra
//!
//! - `a + b` - union
//! - `a - b` - difference
//!
//! Both operators share one precedence level and associate to the left:
//! `a - b - c` is `(a - b) - c`.
//!
//! ### Selectors
//!
//! A `:tag` chain follows a package, call or parenthesized group and
//! transforms its set: `x:all` adds all dependencies of `x`. Signed tags add
//! (`:+test`) or remove (`:-test`) matching nodes instead of replacing the set.
//!
//! ### Functions
//!
//! `reach(a, b)` and friends take full expressions as arguments. Names of the
//! form `key=value` evaluate their arguments under a setting, e.g. `test=1(x)`.
//!
//! ### Programs
//!
//! ```text
//! q := x:+test; y + q
//! ```
//!
//! Statements are separated by `;`. Every statement but the last is an
//! assignment, and the last statement is the result.
//!
//! ## Canonical Form
//!
//! `Display` renders a prefix form that re-parses to the same tree:
//!
//! ```text
//! q:=x:+test;y+q      =>  q := x:+test; +(y, q)
//! a b                 =>  (a, b)
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::SetOp;
pub use tokens::{Token, TokenKind};
