//! Documentation content for the depq CLI

use super::CliError;
use crate::selectors::SELECTORS;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Selectors,
    Functions,
    Programs,
    Graphs,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "operators" | "ops" => Some(Self::Syntax),
            "selectors" | "selector" | "tags" => Some(Self::Selectors),
            "functions" | "function" | "funcs" => Some(Self::Functions),
            "programs" | "program" | "variables" => Some(Self::Programs),
            "graphs" | "graph" | "input" => Some(Self::Graphs),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"DEPQ DOCUMENTATION

depq selects, combines, and filters the packages of a dependency graph with a
small set-algebra query language.

DOCUMENTATION CATEGORIES

  syntax            Packages, patterns, set operators, and grouping
  selectors         The :tag chain that expands or filters a set
  functions         Graph functions such as reach(a, b)
  programs          Variables and multi-statement queries
  graphs            The JSON graph format read by 'depq check'

QUICK REFERENCE

  pkg               A single package
  pkg/...           A package and everything below it
  a + b             Union
  a - b             Difference
  a:all             A package and its dependencies
  reach(a, b)       Packages of a that depend on b
  q := a; q - b     Variables

Run 'depq doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<String, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC.to_string()),
        Some(DocCategory::Selectors) => Ok(selectors_doc()),
        Some(DocCategory::Functions) => Ok(FUNCTIONS_DOC.to_string()),
        Some(DocCategory::Programs) => Ok(PROGRAMS_DOC.to_string()),
        Some(DocCategory::Graphs) => Ok(GRAPHS_DOC.to_string()),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

fn selectors_doc() -> String {
    let mut doc = String::from(SELECTORS_DOC_HEADER);
    for def in SELECTORS {
        doc.push_str(&format!("  :{:<14}{}\n", def.name, def.summary));
    }
    doc.push_str(SELECTORS_DOC_FOOTER);
    doc
}

const SYNTAX_DOC: &str = r#"SYNTAX - Packages, Patterns, and Set Operators

PACKAGES
  golang.org/x/tools
    A bare word names one package by its exact identifier.

PATTERNS
  golang.org/x/tools/...
    '...' matches any string. A trailing '/...' also matches the prefix
    itself, so the example includes golang.org/x/tools.

  std
    Standard library packages: identifiers whose first path element has
    no dot.

SET OPERATORS
  a + b     Union
  a - b     Difference (left minus right)

  Both operators share one precedence level and group to the left:
    a - b - c       is  -(-(a, b), c)
    a - (b - c)     is  -(a, -(b, c))

LISTS
  a b          Juxtaposed expressions form a list, the union of its items.
  (a, b)       The same list written with commas.

CANONICAL FORM
  'depq fmt' prints queries in prefix form:
    std - (std - unsafe:all)   =>  -(std, -(std, unsafe:all))
"#;

const SELECTORS_DOC_HEADER: &str = r#"SELECTORS - Expanding and Filtering Sets

A selector chain follows a package, a call, or a parenthesized group and is
applied left to right:

  x:import:all      everything x depends on, without x itself
  (a + b):main      main packages among a and b
  a + b:main        a, plus b only if b is a main package

TAGS
"#;

const SELECTORS_DOC_FOOTER: &str = r#"
SIGNS
  :tag      Replace the set with the matching nodes
  :+tag     Add the matching nodes to the set
  :-tag     Remove the matching nodes from the set

  Examples:
    x:all:-test     x and its dependencies without test variants
    x:+test         x plus its test variants
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS - Graph Functions

  reach(a, b)       Packages of a that reach any package of b through
                    imports (a package reaches itself). Alias: reaches.
  incoming(a, b)    Packages of a that directly import a package of b.
  deps(a)           Everything a transitively imports.
  shared(a, b, ...) Packages present in every argument.
  xor(a, b)         Packages in exactly one of a and b.

  Names are case-insensitive. Arguments are full expressions:
    reach(cmd/... + tools/..., golang.org/x/net/...:all)

SETTINGS
  key=value(a, ...) Evaluates the arguments with a setting changed and
                    returns their union.

  test=1(x:all)     Include test variants while expanding x:all
  test=0(x:all)     Exclude them (the default)
"#;

const PROGRAMS_DOC: &str = r#"PROGRAMS - Variables and Statements

  name := expr
    Binds name to the result of expr. The name is visible to every later
    statement and shadows a package with the same identifier.

    The value is computed once, where it is defined. A setting applied to
    a later use does not reach inside it:

      q := x:importer; test=1(q)      q keeps its test-free importers
      q := test=1(x:importer); q      q includes test variants

  stmt; stmt; ...; expr
    Statements run in order. Every statement but the last must be an
    assignment; the last one is the result.

  Example:
    q := x:+test; y + q       =>  q := x:+test; +(y, q)
"#;

const GRAPHS_DOC: &str = r#"GRAPHS - Input Format

'depq check' reads a graph as JSON from --graph or stdin:

  {
    "nodes": [
      {"id": "example.com/app", "imports": ["example.com/lib"], "main": true},
      {"id": "example.com/lib"},
      {"id": "example.com/lib.test", "imports": ["example.com/lib"],
       "test_for": "example.com/lib"}
    ]
  }

  id          Unique identifier (required)
  imports     Identifiers this node imports (optional)
  main        Whether the package builds an executable (optional)
  test_for    For a test variant, the package it tests (optional)

The result is a JSON array of the selected identifiers, sorted.
"#;
