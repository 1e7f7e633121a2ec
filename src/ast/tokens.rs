use std::fmt;

/// Lexical category of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Package path or pattern
    ///
    /// # Examples
    /// ```text
    /// std
    /// golang.org/x/tools/...
    /// github.com/loov/goda-cluster
    /// ```
    Package,

    /// Set operator, either `+` (union) or `-` (difference)
    Op,

    /// Left parenthesis for grouping or function calls
    LeftParen,

    /// Right parenthesis
    RightParen,

    /// Comma separating function arguments or list elements
    Comma,

    /// Selector tag, without the leading `:`
    ///
    /// The optional sign is kept as part of the text.
    ///
    /// # Examples
    /// ```text
    /// x:all        // Selector("all")
    /// x:-test      // Selector("-test")
    /// x:+test      // Selector("+test")
    /// ```
    Selector,

    /// Function name, always immediately followed by `(`
    ///
    /// Names may carry characters a package path would not, such as `=`.
    ///
    /// # Examples
    /// ```text
    /// reach(a, b)
    /// test=1(a)
    /// ```
    Func,

    /// Assignment operator
    ///
    /// # Examples
    /// ```text
    /// q := x:all
    /// ```
    Assign,

    /// Statement separator
    ///
    /// # Examples
    /// ```text
    /// q := x:all; q - y
    /// ```
    Semicolon,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Package => "Package",
            TokenKind::Op => "Op",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::Comma => "Comma",
            TokenKind::Selector => "Selector",
            TokenKind::Func => "Func",
            TokenKind::Assign => "Assign",
            TokenKind::Semicolon => "Semicolon",
        };
        f.write_str(name)
    }
}

/// A single lexical token: its kind plus the source text needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.text)
    }
}
