use crate::{
    ast::{Expr, SetOp, Token, TokenKind},
    lexer::{LexError, tokenize},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Expected {expected}, found '{}' at token {index}", found.text)]
    UnexpectedToken {
        expected: &'static str,
        found: Token,
        index: usize,
    },

    #[error("Expected {expected}, found end of input at token {index}")]
    UnexpectedEnd { expected: &'static str, index: usize },

    #[error("Assignment ':=' at token {index} is only allowed at the start of a statement")]
    MisplacedAssignment { index: usize },

    #[error("Prefix operator '{op}' at token {index} takes exactly two operands, found {found}")]
    OperandCount { op: char, found: usize, index: usize },

    #[error("Statement {statement} is not an assignment; only the last statement may be an expression")]
    NonFinalExpression { statement: usize },

    #[error("Query nests deeper than {limit} levels at token {index}")]
    TooDeep { limit: usize, index: usize },
}

/// Deepest nesting of groups, calls and operator chains a query may use.
pub const MAX_DEPTH: usize = 128;

/// Tokenizing or parsing failure for a whole query string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_token(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token().is_some_and(|t| t.is(kind))
    }

    fn error(&self, expected: &'static str) -> ParseError {
        match self.current_token() {
            Some(token) if token.is(TokenKind::Assign) => ParseError::MisplacedAssignment {
                index: self.position,
            },
            Some(token) => ParseError::UnexpectedToken {
                expected,
                found: token.clone(),
                index: self.position,
            },
            None => ParseError::UnexpectedEnd {
                expected,
                index: self.position,
            },
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), ParseError> {
        if !self.check(kind) {
            return Err(self.error(expected));
        }
        self.advance();
        Ok(())
    }

    fn too_deep(&self) -> ParseError {
        ParseError::TooDeep {
            limit: MAX_DEPTH,
            index: self.position,
        }
    }

    /// Enter a parenthesized construct
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn take_text(&mut self) -> String {
        let text = self.tokens[self.position].text.clone();
        self.advance();
        text
    }

    fn starts_primary(&self) -> bool {
        self.check(TokenKind::Package) || self.check(TokenKind::Func) || self.check(TokenKind::LeftParen)
    }

    /// Parse primary expressions: package, function call, parenthesized group
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current_token().map(|t| t.kind) {
            Some(TokenKind::Package) => Ok(Expr::Package(self.take_text())),
            Some(TokenKind::Func) => {
                let name = self.take_text();
                self.expect(TokenKind::LeftParen, "'(' after function name")?;
                self.enter()?;
                let args = if self.check(TokenKind::RightParen) {
                    Vec::new()
                } else {
                    self.parse_arguments()?
                };
                self.expect(TokenKind::RightParen, "',' or ')' after function argument")?;
                self.leave();
                Ok(Expr::call(name, args))
            }
            // Prefix form `+(a, b)`, as written by the canonical printer
            Some(TokenKind::Op) if self.peek_token(1).is_some_and(|t| t.is(TokenKind::LeftParen)) => {
                let index = self.position;
                let op = match SetOp::from_symbol(&self.take_text()) {
                    Some(op) => op,
                    None => return Err(self.error("'+' or '-'")),
                };
                self.advance(); // consume '('
                self.enter()?;
                let mut operands = self.parse_arguments()?;
                self.expect(TokenKind::RightParen, "',' or ')' after operand")?;
                self.leave();

                if operands.len() != 2 {
                    return Err(ParseError::OperandCount {
                        op: op.symbol(),
                        found: operands.len(),
                        index,
                    });
                }
                let right = operands.remove(1);
                let left = operands.remove(0);
                Ok(Expr::binary(op, left, right))
            }
            Some(TokenKind::LeftParen) => {
                self.advance();
                self.enter()?;
                let mut items = self.parse_arguments()?;
                self.expect(TokenKind::RightParen, "',' or ')' to close group")?;
                self.leave();

                if items.len() == 1 {
                    Ok(items.remove(0))
                } else {
                    Ok(Expr::call("", items))
                }
            }
            _ => Err(self.error("expression")),
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = vec![self.parse_list()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            args.push(self.parse_list()?);
        }
        Ok(args)
    }

    /// Parse a primary followed by its selector chain
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_primary()?;

        let mut tags = Vec::new();
        while self.check(TokenKind::Selector) {
            tags.push(self.take_text());
        }

        if tags.is_empty() {
            Ok(base)
        } else {
            Ok(Expr::selected(base, tags))
        }
    }

    /// Chains are parsed in a loop, but each operator still adds a level to the
    /// tree, so the chain's height counts against the depth limit.
    fn parse_binary(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        let mut height = left.height();

        loop {
            let op = match self.current_token() {
                Some(token) if token.is(TokenKind::Op) => match SetOp::from_symbol(&token.text) {
                    Some(op) => op,
                    None => return Err(self.error("'+' or '-'")),
                },
                _ => break,
            };

            self.advance();
            let right = self.parse_term()?;
            height = height.max(right.height()) + 1;
            if self.depth + height > MAX_DEPTH {
                return Err(self.too_deep());
            }
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// Parse juxtaposed expressions (`a b c`) into an anonymous list
    fn parse_list(&mut self) -> Result<Expr, ParseError> {
        let first = self.parse_binary()?;
        if !self.starts_primary() {
            return Ok(first);
        }

        let mut items = vec![first];
        while self.starts_primary() {
            items.push(self.parse_binary()?);
        }
        Ok(Expr::call("", items))
    }

    fn parse_statement(&mut self) -> Result<Expr, ParseError> {
        let is_assignment = self.check(TokenKind::Package)
            && self.peek_token(1).is_some_and(|t| t.is(TokenKind::Assign));

        if is_assignment {
            let name = self.take_text();
            self.advance(); // consume :=
            let value = self.parse_list()?;
            log::debug!("parsed assignment to {}", name);
            return Ok(Expr::assignment(name, value));
        }

        self.parse_list()
    }

    /// Parse a complete program. An empty token stream gives `None`.
    pub fn parse_program(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let mut statements = vec![self.parse_statement()?];
        while self.check(TokenKind::Semicolon) {
            self.advance();
            statements.push(self.parse_statement()?);
        }

        if self.current_token().is_some() {
            return Err(self.error("';' or end of input"));
        }

        let last = statements.len() - 1;
        if let Some(index) = statements[..last].iter().position(|s| !s.is_assignment()) {
            return Err(ParseError::NonFinalExpression { statement: index + 1 });
        }

        log::debug!("parsed {} statement(s)", statements.len());
        if statements.len() == 1 {
            Ok(statements.pop())
        } else {
            Ok(Some(Expr::Program(statements)))
        }
    }
}

/// Parses a token stream. An empty stream gives `None`.
pub fn parse(tokens: &[Token]) -> Result<Option<Expr>, ParseError> {
    Parser::new(tokens.to_vec()).parse_program()
}

/// Tokenizes and parses `input` in one step.
pub fn compile(input: &str) -> Result<Option<Expr>, QueryError> {
    let tokens = tokenize(input)?;
    Ok(Parser::new(tokens).parse_program()?)
}
