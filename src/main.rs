use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use odata_cst::{parse_with, ParseOptions, Rule};

/// Parses OData URLs, expressions and headers and prints the syntax tree.
#[derive(Parser, Debug)]
#[command(name = "odata-cst", version)]
struct Cli {
    /// Grammar rule to parse the input as, spelled as in the ABNF
    #[arg(long, short = 'r', default_value = "odataRelativeUri")]
    rule: String,

    /// Print the tree as JSON instead of debug output
    #[arg(long)]
    json: bool,

    /// Log every rule attempt to stderr
    #[arg(long)]
    trace: bool,

    /// Maximum nesting depth of recursive rules
    #[arg(long, default_value_t = ParseOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Number of segments a key-as-segment predicate takes
    #[arg(long, default_value_t = 1)]
    key_segments: usize,

    /// Expected service root, e.g. https://host/service/
    #[arg(long, value_name = "URL")]
    service_root: Option<String>,

    /// List the rule names and exit
    #[arg(long)]
    rules: bool,

    /// Text to parse
    #[arg(required_unless_present = "rules")]
    input: Option<String>,
}

fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("odata_cst=trace")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Column of a byte offset, counted in characters.
fn caret_column(input: &str, offset: usize) -> usize {
    input.get(..offset).map_or(offset, |head| head.chars().count())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.trace);

    if cli.rules {
        for rule in Rule::ALL {
            println!("{rule}");
        }
        return ExitCode::SUCCESS;
    }

    let rule: Rule = match cli.rule.parse() {
        Ok(rule) => rule,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };

    let mut options = ParseOptions::new()
        .with_max_depth(cli.max_depth)
        .with_key_segments(cli.key_segments);
    if let Some(root) = cli.service_root {
        options = options.with_service_root(root);
    }

    let input = cli.input.unwrap_or_default();
    match parse_with(rule, &input, &options) {
        Ok(node) if cli.json => match serde_json::to_string_pretty(&node) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("{error}");
                ExitCode::FAILURE
            }
        },
        Ok(node) => {
            println!("{node:#?}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error}");
            if let Some(offset) = error.offset() {
                eprintln!("  {input}");
                eprintln!("  {:>width$}", "^", width = caret_column(&input, offset) + 1);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_counts_characters() {
        assert_eq!(caret_column("$top=x", 5), 5);
        assert_eq!(caret_column("Name eq 'äö' and", 13), 11);
        assert_eq!(caret_column("abc", 10), 10);
    }
}
