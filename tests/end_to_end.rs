use pretty_assertions::assert_eq;

use odata_cst::cst::expr::{ComparisonExpr, FirstMemberExpr, Member, PrimaryExpr, PropertyPathExpr};
use odata_cst::cst::literal::PrimitiveLiteral;
use odata_cst::cst::query::{QueryOption, SystemQueryOption};
use odata_cst::cst::resource::{
    CollectionNavPath, CollectionNavigation, KeyPredicate, OdataRelativeUri, PropertyPath,
    ResourcePath, SingleNavigation, SingleNavigationPath,
};
use odata_cst::cst::{Chain, Syntax};
use odata_cst::{parse, parse_prefix, Error, Expr, Node, ParseOptions, Rule};

fn property_name<'a>(primary: &PrimaryExpr<'a>) -> Option<&'a str> {
    match primary {
        PrimaryExpr::FirstMember(FirstMemberExpr::Member(member)) => match &member.member {
            Member::PropertyPath(PropertyPathExpr::PrimitiveProperty(Chain { head, .. })) => {
                Some(head.name())
            }
            _ => None,
        },
        _ => None,
    }
}

#[test]
fn entity_set_name() {
    let result = parse_prefix(Rule::EntitySetName, "users");
    assert!(result.is_success());
    assert!(result.rest.is_empty());
    assert_eq!(result.rest.offset(), 5);
}

#[test]
fn relative_uri_with_key_navigation_and_filter() {
    let text = "users/myid/calendar/events?$filter=id eq 'thisisatest'";
    let node = parse(Rule::OdataRelativeUri, text).unwrap();
    assert_eq!(node.to_source(), text);

    let uri = match node {
        Node::OdataRelativeUri(OdataRelativeUri::Resource(uri)) => uri,
        other => panic!("unexpected {other:?}"),
    };

    let (entity_set, navigation) = match &uri.path {
        ResourcePath::EntitySet(Chain {
            head,
            tail: Some(CollectionNavigation { path: Some(path), .. }),
        }) => (head, path),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(entity_set.name(), "users");

    let (key, mut navigation) = match navigation {
        CollectionNavPath::Key(Chain {
            head: KeyPredicate::Segments(key),
            tail,
        }) => (key, tail.as_ref()),
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(key.segments.len(), 1);
    assert_eq!(key.segments[0].value.as_str(), "myid");

    let mut names = Vec::new();
    while let Some(SingleNavigation {
        path: Some(SingleNavigationPath::Property(property)),
        ..
    }) = navigation
    {
        match &*property.value {
            PropertyPath::EntityNavigation(Chain { head, tail }) => {
                names.push(head.name());
                navigation = tail.as_ref();
            }
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(names, vec!["calendar", "events"]);

    let options = uri.options.as_ref().map(|options| &options.value);
    let options: Vec<&QueryOption> = options.into_iter().flat_map(|list| list.iter()).collect();
    assert_eq!(options.len(), 1);
    let filter = match options[0].as_system() {
        Some(SystemQueryOption::Filter(filter)) => filter,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(filter.name(), "filter");

    let expr = &filter.value;
    assert_eq!(property_name(&expr.operand), Some("id"));
    match &expr.comparison {
        Some(ComparisonExpr::Eq(eq)) => match &eq.right.operand {
            PrimaryExpr::Literal(PrimitiveLiteral::String(string)) => {
                assert_eq!(string.value(), "thisisatest")
            }
            other => panic!("unexpected {other:?}"),
        },
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn guid_value() {
    let text = "12345678-1234-1234-1234-123456789012";
    let node = parse(Rule::GuidValue, text).unwrap();
    let groups: Vec<usize> = node.to_source().split('-').map(str::len).collect();
    assert_eq!(groups, vec![8, 4, 4, 4, 12]);
    match node {
        Node::GuidValue(guid) => assert_eq!(guid.to_uuid().unwrap().to_string(), text),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn eq_expr_needs_leading_whitespace() {
    let error = parse(Rule::EqExpr, "eq").unwrap_err();
    assert!(matches!(error, Error::Syntax { rule: "eqExpr", offset: 0, .. }));
    let result = parse_prefix(Rule::EqExpr, "eq");
    assert!(!result.is_success());
    assert_eq!(result.rest.offset(), 0);
}

#[test]
fn empty_identifier() {
    assert!(parse(Rule::OdataIdentifier, "").is_err());
    assert!(!parse_prefix(Rule::OdataIdentifier, "").is_success());
}

#[test]
fn contains_method_call() {
    let node = parse(Rule::ContainsMethodCallExpr, "contains(Name,'A')").unwrap();
    let call = match &node {
        Node::ContainsMethodCallExpr(call) => call,
        other => panic!("unexpected {other:?}"),
    };
    let texts: Vec<&str> = node.tokens().iter().map(|token| token.text()).collect();
    assert_eq!(texts.first(), Some(&"contains"));
    assert_eq!(texts.last(), Some(&")"));
    assert_eq!(call.open.token().text(), "(");
    assert_eq!(call.comma.token().text(), ",");
    assert_eq!(property_name(&call.first.expr.operand), Some("Name"));
    assert_eq!(call.second.expr.to_source(), "'A'");
}

#[test]
fn errors_point_at_the_furthest_failure() {
    let error = parse(Rule::Top, "$top=x").unwrap_err();
    assert_eq!(error.offset(), Some(5));

    let error = parse(Rule::QueryOptions, "$top=1&").unwrap_err();
    assert_eq!(error.offset(), Some(6));
}

#[test]
fn deep_nesting_is_cut_off() {
    let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    let error = parse(Rule::CommonExpr, &deep).unwrap_err();
    assert!(matches!(
        error,
        Error::RecursionLimit {
            limit: ParseOptions::DEFAULT_MAX_DEPTH,
            ..
        }
    ));

    let options = ParseOptions::new().with_max_depth(512);
    assert!(odata_cst::parse_with(Rule::CommonExpr, &deep, &options).is_ok());
}

#[test]
fn unknown_rule_names() {
    assert_eq!(
        "notARule".parse::<Rule>().unwrap_err(),
        Error::UnknownRule("notARule".to_string())
    );
}

#[test]
fn filter_precedence_view() {
    let node = parse(Rule::CommonExpr, "Price add 2 mul Tax gt 10 and not Sold").unwrap();
    let expr = match &node {
        Node::CommonExpr(expr) => expr,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(
        format!("{:#}", Expr::new(expr)),
        "(((Price add (2 mul Tax)) gt 10) and (not Sold))"
    );
}

#[test]
fn trees_serialize_as_text() {
    let node = parse(Rule::Top, "$top=10").unwrap();
    let json = serde_json::to_value(&node).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "Top": { "keyword": "$top", "eq": "=", "value": "10" } })
    );
}

#[test]
fn keywords_fold_ascii_case_only() {
    assert!(parse(Rule::OdataRelativeUri, "users?$SkipToken=abc").is_ok());

    // KELVIN SIGN lowercases to `k` but is three bytes long.
    assert!(parse(Rule::OdataRelativeUri, "users?$s\u{212A}ipto\u{212A}en=x").is_err());
    assert!(!parse_prefix(Rule::QueryOptions, "$S\u{212A}IPTOKEN=x").is_success());
    assert!(parse(Rule::CommonExpr, "Name eq 'caf\u{E9}' \u{212A}nd true").is_err());
}

#[test]
fn deep_operator_chains_on_a_small_stack() {
    let lambdas = (0..100).fold("true".to_string(), |inner, _| format!("a/any(d:{inner})"));
    let deep = vec![
        format!("{}a", "not ".repeat(100)),
        format!("{}a", "-".repeat(100)),
        format!("{}a", "a eq ".repeat(100)),
        lambdas,
    ];
    let shallow = format!("{}a", "not ".repeat(30));

    let outcome = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(move || {
            for text in &deep {
                let error = parse(Rule::CommonExpr, text).unwrap_err();
                assert!(matches!(error, Error::RecursionLimit { .. }), "{text}: {error:?}");
            }
            assert!(parse(Rule::CommonExpr, &shallow).is_ok());
        })
        .unwrap()
        .join();
    assert!(outcome.is_ok());
}
