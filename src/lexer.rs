use std::fmt;

use crate::ast::{Token, TokenKind};

/// Location of a character in the query text. `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },

    #[error("Empty selector name after ':' at {position}")]
    EmptySelector { position: Position },
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

fn is_punctuation(ch: char) -> bool {
    matches!(ch, '(' | ')' | ',' | ';' | ':')
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphanumeric()
        || matches!(
            ch,
            '_' | '.' | '/' | '=' | '@' | '~' | '*' | '#' | '!' | '%' | '&' | '?' | '[' | ']'
                | '<' | '>' | '^' | '\'' | '|'
        )
}

// '+' ends a word so that `y+q` splits, while '-' may appear inside paths.
fn is_word_char(ch: char) -> bool {
    ch == '-' || is_word_start(ch)
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.trim().chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn location(&self) -> Position {
        let mut line = 1;
        let mut column = 1;
        for ch in &self.input[..self.position.min(self.input.len())] {
            if *ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Position {
            offset: self.position,
            line,
            column,
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if is_word_char(ch) {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        self.advance();
        Token::new(kind, ch.to_string())
    }

    fn read_selector(&mut self) -> Result<Token, LexError> {
        let start = self.location();
        self.advance(); // consume ':'

        let mut text = String::new();
        if let Some(sign @ ('+' | '-')) = self.current_char() {
            text.push(sign);
            self.advance();
        }

        let name = self.read_word();
        if name.is_empty() {
            return Err(LexError::EmptySelector { position: start });
        }
        text.push_str(&name);
        Ok(Token::new(TokenKind::Selector, text))
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let token = match self.current_char() {
            None => return Ok(None),
            Some(ch @ '(') => self.single(TokenKind::LeftParen, ch),
            Some(ch @ ')') => self.single(TokenKind::RightParen, ch),
            Some(ch @ ',') => self.single(TokenKind::Comma, ch),
            Some(ch @ ';') => self.single(TokenKind::Semicolon, ch),
            Some(ch @ ('+' | '-')) => self.single(TokenKind::Op, ch),
            Some(':') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::new(TokenKind::Assign, ":=")
                } else {
                    self.read_selector()?
                }
            }
            Some(ch) if is_word_start(ch) => {
                let word = self.read_word();
                if self.current_char() == Some('(') {
                    Token::new(TokenKind::Func, word)
                } else {
                    Token::new(TokenKind::Package, word)
                }
            }
            Some(ch) => {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    position: self.location(),
                });
            }
        };

        Ok(Some(token))
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Splits `input` into tokens. Empty or all-whitespace input gives no tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

#[test]
fn test_punctuation_needs_no_spaces() {
    let mut lexer = Lexer::new("f(a,b);c");
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Func, "f")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::LeftParen, "(")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Package, "a")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Comma, ",")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Package, "b")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::RightParen, ")")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Semicolon, ";")));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::new(TokenKind::Package, "c")));
    assert_eq!(lexer.next_token().unwrap(), None);
}

#[test]
fn test_location_tracks_lines() {
    let err = tokenize("a +\n  b $").unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedCharacter {
            ch: '$',
            position: Position {
                offset: 8,
                line: 2,
                column: 5,
            },
        }
    );
}
