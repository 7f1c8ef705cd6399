//! The named entry points of the grammar.

use std::fmt;
use std::str::FromStr;

use nom::combinator::map;
use serde::Serialize;

use crate::combinator::PResult;
use crate::cst::{self, Syntax, Token};
use crate::error::Error;
use crate::input::Input;
use crate::parser;

macro_rules! registry {
    (
        <$lt:lifetime>
        $( $variant:ident = $name:literal => $parser:path : $node:ty ),* $(,)?
    ) => {
        /// A rule that can be parsed on its own, named as in the ABNF.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Rule {
            $( $variant ),*
        }

        impl Rule {
            pub const ALL: &'static [Rule] = &[ $( Rule::$variant ),* ];

            /// The ABNF name of the rule.
            pub fn name(self) -> &'static str {
                match self {
                    $( Rule::$variant => $name ),*
                }
            }

            pub(crate) fn run<$lt>(self, input: Input<$lt>) -> PResult<$lt, Node<$lt>> {
                match self {
                    $( Rule::$variant => map($parser, Node::$variant)(input) ),*
                }
            }
        }

        impl FromStr for Rule {
            type Err = Error;

            fn from_str(name: &str) -> Result<Self, Error> {
                match name {
                    $( $name => Ok(Rule::$variant), )*
                    _ => Err(Error::UnknownRule(name.to_string())),
                }
            }
        }

        /// The tree produced by a [`Rule`].
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub enum Node<$lt> {
            $( $variant($node) ),*
        }

        impl<$lt> Node<$lt> {
            pub fn rule(&self) -> Rule {
                match self {
                    $( Node::$variant(_) => Rule::$variant ),*
                }
            }
        }

        impl<$lt> Syntax<$lt> for Node<$lt> {
            fn tokens_into(&self, out: &mut Vec<Token<$lt>>) {
                match self {
                    $( Node::$variant(node) => node.tokens_into(out) ),*
                }
            }
        }
    };
}

registry! {
    <'a>
    OdataUri = "odataUri" => parser::odataUri : cst::resource::OdataUri<'a>,
    ServiceRoot = "serviceRoot" => parser::serviceRoot : cst::resource::ServiceRoot<'a>,
    OdataRelativeUri = "odataRelativeUri" => parser::odataRelativeUri : cst::resource::OdataRelativeUri<'a>,
    ResourcePath = "resourcePath" => parser::resourcePath : cst::resource::ResourcePath<'a>,
    CollectionNavigation = "collectionNavigation" => parser::collectionNavigation : cst::resource::CollectionNavigation<'a>,
    SingleNavigation = "singleNavigation" => parser::singleNavigation : cst::resource::SingleNavigation<'a>,
    KeyPredicate = "keyPredicate" => parser::keyPredicate : cst::resource::KeyPredicate<'a>,
    KeyPathSegments = "keyPathSegments" => parser::keyPathSegments : cst::resource::KeyPathSegments<'a>,

    QueryOptions = "queryOptions" => parser::queryOptions : cst::query::QueryOptions<'a>,
    QueryOption = "queryOption" => parser::queryOption : cst::query::QueryOption<'a>,
    SystemQueryOption = "systemQueryOption" => parser::systemQueryOption : cst::query::SystemQueryOption<'a>,
    AliasAndValue = "aliasAndValue" => parser::aliasAndValue : cst::query::AliasAndValue<'a>,
    CustomQueryOption = "customQueryOption" => parser::customQueryOption : cst::query::CustomQueryOption<'a>,
    BatchOptions = "batchOptions" => parser::batchOptions : cst::query::BatchOptions<'a>,
    MetadataOptions = "metadataOptions" => parser::metadataOptions : cst::query::MetadataOptions<'a>,
    EntityOptions = "entityOptions" => parser::entityOptions : cst::query::EntityOptions<'a>,
    Compute = "compute" => parser::compute : cst::query::Compute<'a>,
    Expand = "expand" => parser::expand : cst::query::Expand<'a>,
    ExpandItem = "expandItem" => parser::expandItem : cst::query::ExpandItem<'a>,
    Filter = "filter" => parser::filter : cst::query::Filter<'a>,
    Orderby = "orderby" => parser::orderby : cst::query::Orderby<'a>,
    Skip = "skip" => parser::skip : cst::query::Skip<'a>,
    Top = "top" => parser::top : cst::query::Top<'a>,
    Levels = "levels" => parser::levels : cst::query::Levels<'a>,
    Format = "format" => parser::format : cst::query::Format<'a>,
    Search = "search" => parser::search : cst::query::Search<'a>,
    SearchExpr = "searchExpr" => parser::searchExpr : cst::query::SearchExpr<'a>,
    Select = "select" => parser::select : cst::query::Select<'a>,
    SelectItem = "selectItem" => parser::selectItem : cst::query::SelectItem<'a>,

    Context = "context" => parser::context : cst::context::Context<'a>,
    ContextFragment = "contextFragment" => parser::contextFragment : cst::context::ContextFragment<'a>,
    SelectList = "selectList" => parser::selectList : cst::context::SelectList<'a>,

    CommonExpr = "commonExpr" => parser::commonExpr : cst::expr::CommonExpr<'a>,
    BoolCommonExpr = "boolCommonExpr" => parser::boolCommonExpr : cst::expr::BoolCommonExpr<'a>,
    RootExpr = "rootExpr" => parser::rootExpr : cst::expr::RootExpr<'a>,
    FirstMemberExpr = "firstMemberExpr" => parser::firstMemberExpr : cst::expr::FirstMemberExpr<'a>,
    MemberExpr = "memberExpr" => parser::memberExpr : cst::expr::MemberExpr<'a>,
    FunctionExpr = "functionExpr" => parser::functionExpr : cst::expr::FunctionExpr<'a>,
    MethodCallExpr = "methodCallExpr" => parser::methodCallExpr : cst::expr::MethodCallExpr<'a>,
    ContainsMethodCallExpr = "containsMethodCallExpr" => parser::containsMethodCallExpr : cst::expr::ContainsMethodCallExpr<'a>,
    AnyExpr = "anyExpr" => parser::anyExpr : cst::expr::AnyExpr<'a>,
    EqExpr = "eqExpr" => parser::eqExpr : cst::expr::EqExpr<'a>,

    ArrayOrObject = "arrayOrObject" => parser::arrayOrObject : cst::json::ArrayOrObject<'a>,
    ComplexInUri = "complexInUri" => parser::complexInUri : cst::json::ComplexInUri<'a>,

    PrimitiveLiteral = "primitiveLiteral" => parser::primitiveLiteral : cst::literal::PrimitiveLiteral<'a>,
    String = "string" => parser::string : cst::literal::OdataString<'a>,
    GuidValue = "guidValue" => parser::guidValue : cst::literal::GuidValue<'a>,
    DateValue = "dateValue" => parser::dateValue : cst::literal::DateValue<'a>,
    DateTimeOffsetValue = "dateTimeOffsetValue" => parser::dateTimeOffsetValue : cst::literal::DateTimeOffsetValue<'a>,
    Duration = "duration" => parser::duration : cst::literal::Duration<'a>,
    DecimalValue = "decimalValue" => parser::decimalValue : cst::literal::DecimalValue<'a>,
    Int32Value = "int32Value" => parser::int32Value : cst::literal::Int32Value<'a>,
    Int64Value = "int64Value" => parser::int64Value : cst::literal::Int64Value<'a>,
    Enum = "enum" => parser::enum_ : cst::literal::Enum<'a>,

    OdataIdentifier = "odataIdentifier" => parser::odataIdentifier : cst::names::OdataIdentifier<'a>,
    Namespace = "namespace" => parser::namespace : cst::names::Namespace<'a>,
    EntitySetName = "entitySetName" => parser::entitySetName : cst::names::EntitySetName<'a>,
    QualifiedTypeName = "qualifiedTypeName" => parser::qualifiedTypeName : cst::names::QualifiedTypeName<'a>,

    Header = "header" => parser::header : cst::header::Header<'a>,
    Prefer = "prefer" => parser::prefer : cst::header::Prefer<'a>,
    Preference = "preference" => parser::preference : cst::header::Preference<'a>,

    Uri = "URI" => parser::URI : cst::uri::Uri<'a>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn names_round_trip() {
        for rule in Rule::ALL {
            assert_eq!(rule.name().parse::<Rule>(), Ok(*rule));
        }
        assert_eq!("enum".parse::<Rule>(), Ok(Rule::Enum));
    }

    #[test]
    fn unknown_names_are_reported() {
        assert_eq!(
            "entitySet_Name".parse::<Rule>(),
            Err(Error::UnknownRule("entitySet_Name".to_string()))
        );
        assert!("EntitySetName".parse::<Rule>().is_err());
    }

    #[test]
    fn nodes_know_their_rule() {
        let (_, node) = Rule::GuidValue
            .run(Input::new("12345678-1234-1234-1234-123456789012"))
            .unwrap();
        assert_eq!(node.rule(), Rule::GuidValue);
        assert_eq!(node.to_source(), "12345678-1234-1234-1234-123456789012");
    }
}
