use proptest::prelude::*;

use odata_cst::cst::Syntax;
use odata_cst::{parse, parse_prefix, Rule};

const RULES: &[Rule] = &[
    Rule::OdataRelativeUri,
    Rule::QueryOptions,
    Rule::CommonExpr,
    Rule::PrimitiveLiteral,
    Rule::SearchExpr,
    Rule::Expand,
    Rule::Select,
    Rule::ContextFragment,
    Rule::Header,
];

fn rule() -> impl Strategy<Value = Rule> {
    prop::sample::select(RULES)
}

/// Text built from pieces of URLs, so that rules get past their first token.
fn url_like() -> impl Strategy<Value = String> {
    let piece = prop::sample::select(vec![
        "users", "/", "(", ")", "'a'", "1", "2.5", " ", "%20", "eq", "and", "not", "-", ",",
        "$filter=", "$select=", "$expand=", "$top=", "?", "&", "=", "@p", "*", "Ns.Type",
        "$count", "$ref", "any(d:d/x", "true", "null", "#", "Collection(", "OData-Version:",
        "4.01", "$it", "/$count", ";", "$levels=max",
    ]);
    prop::collection::vec(piece, 0..10).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn failure_consumes_nothing(rule in rule(), text in url_like()) {
        let result = parse_prefix(rule, &text);
        if !result.is_success() {
            prop_assert_eq!(result.rest.offset(), 0);
            prop_assert_eq!(result.rest.as_str(), text.as_str());
            prop_assert!(result.error.is_some());
        }
    }

    #[test]
    fn tokens_cover_the_consumed_text(rule in rule(), text in url_like()) {
        let result = parse_prefix(rule, &text);
        if let Some(node) = &result.value {
            let consumed = result.rest.offset();
            prop_assert_eq!(node.to_source(), &text[..consumed]);
            prop_assert_eq!(result.rest.as_str(), &text[consumed..]);
        }
    }

    #[test]
    fn full_parse_agrees_with_prefix_parse(rule in rule(), text in url_like()) {
        let prefix = parse_prefix(rule, &text);
        let whole = parse(rule, &text);
        prop_assert_eq!(whole.is_ok(), prefix.is_success() && prefix.rest.is_empty());
    }

    #[test]
    fn identifiers_round_trip(text in "[A-Za-z_][A-Za-z0-9_]{0,20}") {
        let node = parse(Rule::OdataIdentifier, &text).unwrap();
        prop_assert_eq!(node.to_source(), text);
    }

    #[test]
    fn integers_parse_within_their_width(value in any::<i32>()) {
        let text = value.to_string();
        let node = parse(Rule::Int32Value, &text).unwrap();
        prop_assert_eq!(node.to_source(), text);
    }
}
