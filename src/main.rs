use clap::{Parser as ClapParser, Subcommand};
use depquery::cli::{self, CheckOptions, CheckResult, CliError};
use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

#[derive(ClapParser)]
#[command(name = "depq")]
#[command(about = "depq - Select, combine, and filter packages of a dependency graph")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and evaluate a query against a graph
    Check {
        /// The query to evaluate
        query: String,

        /// Graph JSON file (reads from stdin if not provided)
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,

        /// Fail when a literal package matches no node
        #[arg(long)]
        strict: bool,

        /// Include test variants by default
        #[arg(long)]
        tests: bool,
    },

    /// Print a query in canonical form
    Fmt {
        /// The query to format
        query: String,

        /// Print the syntax tree instead
        #[arg(long)]
        tree: bool,
    },

    /// List the tokens of a query
    Tokens {
        /// The query to tokenize
        query: String,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'depq docs' to list categories)
        category: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            query,
            graph,
            pretty,
            syntax_only,
            strict,
            tests,
        } => run_check(query, graph, pretty, syntax_only, strict, tests),
        Commands::Fmt { query, tree } => cli::format_query(&query, tree).map(|text| print!("{}", text)),
        Commands::Tokens { query } => cli::list_tokens(&query).map(|lines| {
            for line in lines {
                println!("{}", line);
            }
        }),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    query: String,
    graph: Option<PathBuf>,
    pretty: bool,
    syntax_only: bool,
    strict: bool,
    tests: bool,
) -> Result<(), CliError> {
    let input = match graph {
        Some(path) => Some(fs::read_to_string(path)?),
        None if !syntax_only && !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let options = CheckOptions {
        query,
        input,
        pretty,
        syntax_only,
        strict,
        tests,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Empty => println!("[]"),
        CheckResult::Success(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
