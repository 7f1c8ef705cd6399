//! Parser for the OData 4.01 URL grammar.
//!
//! Each rule of the OData ABNF (resource paths, query options, expressions,
//! literals, context URLs and the OData headers) has a parser function in
//! [`parser`] and a node type in [`cst`]. The tree is lossless: every node
//! keeps the text it matched, so [`cst::Syntax::to_source`] gives the input
//! back.
//!
//! ```
//! use odata_cst::{parse, Node, Rule};
//!
//! let node = parse(Rule::OdataRelativeUri, "users/myid?$filter=id eq 'x'").unwrap();
//! assert!(matches!(node, Node::OdataRelativeUri(_)));
//! ```
#![recursion_limit = "256"]

#[macro_use]
pub mod combinator;
#[macro_use]
pub mod cst;

pub mod error;
pub mod expr;
pub mod input;
pub mod options;
pub mod parser;
pub mod result;
pub mod rules;

use tracing::debug;

pub use crate::error::Error;
pub use crate::expr::Expr;
pub use crate::input::Input;
pub use crate::options::ParseOptions;
pub use crate::result::ParseResult;
pub use crate::rules::{Node, Rule};

use crate::combinator::PResult;

/// Parses the whole of `text` as `rule`, with the default options.
pub fn parse(rule: Rule, text: &str) -> Result<Node<'_>, Error> {
    parse_prefix(rule, text).finish(rule.name())
}

/// Parses the whole of `text` as `rule`.
pub fn parse_with<'a>(
    rule: Rule,
    text: &'a str,
    options: &'a ParseOptions,
) -> Result<Node<'a>, Error> {
    run(rule, Input::with_options(text, options)).finish(rule.name())
}

/// Parses the longest prefix of `text` that `rule` matches.
pub fn parse_prefix(rule: Rule, text: &str) -> ParseResult<'_, Node<'_>> {
    run(rule, Input::new(text))
}

/// Parses a resource path with its query options, as in `users/myid?$top=1`.
pub fn parse_uri<'a>(
    text: &'a str,
    options: &'a ParseOptions,
) -> Result<cst::resource::OdataRelativeUri<'a>, Error> {
    whole("odataRelativeUri", parser::odataRelativeUri, text, options)
}

/// Parses a `$filter` style expression.
pub fn parse_expr<'a>(
    text: &'a str,
    options: &'a ParseOptions,
) -> Result<cst::expr::CommonExpr<'a>, Error> {
    whole("commonExpr", parser::commonExpr, text, options)
}

fn run(rule: Rule, input: Input<'_>) -> ParseResult<'_, Node<'_>> {
    debug!(rule = rule.name(), len = input.len(), "parse");
    ParseResult::from_nom(input, rule.run(input))
}

fn whole<'a, T>(
    name: &'static str,
    parser: fn(Input<'a>) -> PResult<'a, T>,
    text: &'a str,
    options: &'a ParseOptions,
) -> Result<T, Error> {
    let input = Input::with_options(text, options);
    debug!(rule = name, len = input.len(), "parse");
    ParseResult::from_nom(input, parser(input)).finish(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::Syntax;

    #[test]
    fn whole_input_is_required() {
        assert!(parse(Rule::EntitySetName, "users").is_ok());
        assert_eq!(
            parse(Rule::EntitySetName, "users/1").unwrap_err(),
            Error::TrailingInput {
                rule: "entitySetName",
                offset: 5
            }
        );
    }

    #[test]
    fn prefix_parse_reports_the_rest() {
        let result = parse_prefix(Rule::EntitySetName, "users/1");
        assert!(result.is_success());
        assert_eq!(result.rest.as_str(), "/1");
    }

    #[test]
    fn options_reach_the_rules() {
        let options = ParseOptions::new().with_max_depth(2);
        let error = parse_expr("((((1))))", &options).unwrap_err();
        assert!(matches!(error, Error::RecursionLimit { limit: 2, .. }));
        assert!(parse_expr("((((1))))", &ParseOptions::new()).is_ok());
    }

    #[test]
    fn typed_entry_points() {
        let options = ParseOptions::new();
        let uri = parse_uri("users?$top=1", &options).unwrap();
        assert_eq!(uri.to_source(), "users?$top=1");
        let node = parse_with(Rule::Top, "$top=1", &options).unwrap();
        assert_eq!(node.rule(), Rule::Top);
    }
}
