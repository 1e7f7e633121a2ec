// Canonical Form Tests
//
// Each case is an input query, its expected token stream, and its expected
// canonical rendering. Every rendering must also survive a second round of
// tokenizing and parsing unchanged.

use depquery::ast::{Token, TokenKind};
use depquery::{compile, parse, tokenize};

use TokenKind::*;

struct Case {
    input: &'static str,
    clean: &'static str,
    tokens: Vec<(TokenKind, &'static str)>,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            input: "",
            clean: "",
            tokens: vec![],
        },
        Case {
            input: "golang.org/x/tools/...",
            clean: "golang.org/x/tools/...",
            tokens: vec![(Package, "golang.org/x/tools/...")],
        },
        Case {
            input: "  github.com/pratikiran/goda-cluster    golang.org/x/tools/...  ",
            clean: "(github.com/pratikiran/goda-cluster, golang.org/x/tools/...)",
            tokens: vec![
                (Package, "github.com/pratikiran/goda-cluster"),
                (Package, "golang.org/x/tools/..."),
            ],
        },
        Case {
            input: "  github.com/pratikiran/goda-cluster  +  golang.org/x/tools/...  ",
            clean: "+(github.com/pratikiran/goda-cluster, golang.org/x/tools/...)",
            tokens: vec![
                (Package, "github.com/pratikiran/goda-cluster"),
                (Op, "+"),
                (Package, "golang.org/x/tools/..."),
            ],
        },
        Case {
            input: "std - (std - unsafe:all)",
            clean: "-(std, -(std, unsafe:all))",
            tokens: vec![
                (Package, "std"),
                (Op, "-"),
                (LeftParen, "("),
                (Package, "std"),
                (Op, "-"),
                (Package, "unsafe"),
                (Selector, "all"),
                (RightParen, ")"),
            ],
        },
        Case {
            input: "  github.com/pratikiran/goda-cluster:all - golang.org/x/tools/...  ",
            clean: "-(github.com/pratikiran/goda-cluster:all, golang.org/x/tools/...)",
            tokens: vec![
                (Package, "github.com/pratikiran/goda-cluster"),
                (Selector, "all"),
                (Op, "-"),
                (Package, "golang.org/x/tools/..."),
            ],
        },
        Case {
            input: "Reaches(github.com/pratikiran/goda-cluster +   github.com/loov/qloc, golang.org/x/tools/...:all)",
            clean: "Reaches(+(github.com/pratikiran/goda-cluster, github.com/loov/qloc), golang.org/x/tools/...:all)",
            tokens: vec![
                (Func, "Reaches"),
                (LeftParen, "("),
                (Package, "github.com/pratikiran/goda-cluster"),
                (Op, "+"),
                (Package, "github.com/loov/qloc"),
                (Comma, ","),
                (Package, "golang.org/x/tools/..."),
                (Selector, "all"),
                (RightParen, ")"),
            ],
        },
        Case {
            input: "Reaches(github.com/pratikiran/goda-cluster, golang.org/x/tools/...:all):import:all",
            clean: "Reaches(github.com/pratikiran/goda-cluster, golang.org/x/tools/...:all):import:all",
            tokens: vec![
                (Func, "Reaches"),
                (LeftParen, "("),
                (Package, "github.com/pratikiran/goda-cluster"),
                (Comma, ","),
                (Package, "golang.org/x/tools/..."),
                (Selector, "all"),
                (RightParen, ")"),
                (Selector, "import"),
                (Selector, "all"),
            ],
        },
        Case {
            input: "test=1(github.com/pratikiran/goda-cluster)",
            clean: "test=1(github.com/pratikiran/goda-cluster)",
            tokens: vec![
                (Func, "test=1"),
                (LeftParen, "("),
                (Package, "github.com/pratikiran/goda-cluster"),
                (RightParen, ")"),
            ],
        },
        Case {
            input: "test=1(github.com/pratikiran/goda-cluster) - test=0(github.com/pratikiran/goda-cluster)",
            clean: "-(test=1(github.com/pratikiran/goda-cluster), test=0(github.com/pratikiran/goda-cluster))",
            tokens: vec![
                (Func, "test=1"),
                (LeftParen, "("),
                (Package, "github.com/pratikiran/goda-cluster"),
                (RightParen, ")"),
                (Op, "-"),
                (Func, "test=0"),
                (LeftParen, "("),
                (Package, "github.com/pratikiran/goda-cluster"),
                (RightParen, ")"),
            ],
        },
        Case {
            input: "x:-test:+test",
            clean: "x:-test:+test",
            tokens: vec![(Package, "x"), (Selector, "-test"), (Selector, "+test")],
        },
        Case {
            input: "(x + y):+test",
            clean: "+(x, y):+test",
            tokens: vec![
                (LeftParen, "("),
                (Package, "x"),
                (Op, "+"),
                (Package, "y"),
                (RightParen, ")"),
                (Selector, "+test"),
            ],
        },
        Case {
            input: "q:=x:+test;y+q",
            clean: "q := x:+test; +(y, q)",
            tokens: vec![
                (Package, "q"),
                (Assign, ":="),
                (Package, "x"),
                (Selector, "+test"),
                (Semicolon, ";"),
                (Package, "y"),
                (Op, "+"),
                (Package, "q"),
            ],
        },
    ]
}

fn canonical(input: &str) -> String {
    compile(input)
        .unwrap_or_else(|e| panic!("compile {:?}: {}", input, e))
        .map(|expr| expr.to_string())
        .unwrap_or_default()
}

#[test]
fn test_corpus_tokens() {
    for case in cases() {
        let expected: Vec<Token> = case
            .tokens
            .iter()
            .map(|(kind, text)| Token::new(*kind, *text))
            .collect();
        let tokens = tokenize(case.input).unwrap();
        assert_eq!(tokens, expected, "lex {:?}", case.input);
    }
}

#[test]
fn test_corpus_canonical_form() {
    for case in cases() {
        let tokens = tokenize(case.input).unwrap();
        let clean = parse(&tokens)
            .unwrap()
            .map(|expr| expr.to_string())
            .unwrap_or_default();
        assert_eq!(clean, case.clean, "parse {:?}", case.input);
    }
}

#[test]
fn test_corpus_canonical_form_is_idempotent() {
    for case in cases() {
        let once = canonical(case.input);
        let twice = canonical(&once);
        assert_eq!(once, twice, "reparse {:?}", once);
    }
}

#[test]
fn test_more_shapes_are_idempotent() {
    let inputs = [
        "a - b - c",
        "a - (b - c)",
        "(a b, c) - d",
        "reach(a b, c:all):-test",
        "shared(a, b, c)",
        "f()",
        "q := (a, b); r := q:import; r - q",
        "(x:all):-test",
        "test=1(x:all - y)",
        "a -(b, c)",
    ];
    for input in inputs {
        let once = canonical(input);
        assert_eq!(canonical(&once), once, "reparse {:?}", once);
    }
}

#[test]
fn test_juxtaposition_renders_as_list() {
    assert_eq!(canonical("a  b"), "(a, b)");
}
