pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod graph;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod selectors;

pub use ast::{Expr, SetOp, Token, TokenKind};
pub use evaluator::{EvalContext, EvalError, Evaluator, Scope};
pub use graph::{Graph, GraphError, GraphView, Node, NodeSet, Pattern};
pub use lexer::{LexError, Lexer, Position, tokenize};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser, QueryError, compile, parse};
