//! Query options (section 2).

use nom::branch::alt;
use nom::combinator::{map, not, opt, peek, verify};
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::Parser;

use crate::combinator::{
    chain, chain_some, class, end_of_input, keyword, keyword_ci, lexeme, list, lit, lit_ci, many,
    prefixed, some, suffixed, PResult,
};
use crate::cst::query::*;
use crate::cst::Token;
use crate::error::SyntaxError;
use crate::input::Input;

use super::*;

//* ;------------------------------------------------------------------------------
//* ; 2. Query Options
//* ;------------------------------------------------------------------------------
//*
//* queryOptions = queryOption *( "&" queryOption )
rule! {
    pub fn queryOptions<'a>(input) -> QueryOptions<'a> {
        list(queryOption, lit("&"))(input)
    }
}

//* queryOption  = systemQueryOption
//*              / aliasAndValue
//*              / nameAndValue
//*              / customQueryOption
//
// `name=value` is only a `nameAndValue` when the value is an expression up to
// the end of the option; anything else is left to `customQueryOption`.
rule! {
    pub fn queryOption<'a>(input) -> QueryOption<'a> {
        alt((
            map(systemQueryOption, QueryOption::System),
            map(aliasAndValue, QueryOption::AliasAndValue),
            map(terminated(nameAndValue, option_end), QueryOption::NameAndValue),
            map(customQueryOption, QueryOption::Custom),
        ))(input)
    }
}

fn option_end(input: Input<'_>) -> PResult<'_, ()> {
    peek(alt((map(lit("&"), |_| ()), end_of_input)))(input)
}

//* batchOptions = batchOption *( "&" batchOption )
rule! {
    pub fn batchOptions<'a>(input) -> BatchOptions<'a> {
        list(batchOption, lit("&"))(input)
    }
}

//* batchOption  = format
//*              /customQueryOption
rule! {
    pub fn batchOption<'a>(input) -> BatchOption<'a> {
        format_or_custom(input)
    }
}

//* metadataOptions = metadataOption *( "&" metadataOption )
rule! {
    pub fn metadataOptions<'a>(input) -> MetadataOptions<'a> {
        list(metadataOption, lit("&"))(input)
    }
}

//* metadataOption  = format
//*                 /customQueryOption
rule! {
    pub fn metadataOption<'a>(input) -> MetadataOption<'a> {
        format_or_custom(input)
    }
}

fn format_or_custom(input: Input<'_>) -> PResult<'_, FormatOrCustom<'_>> {
    alt((
        map(format, FormatOrCustom::Format),
        map(customQueryOption, FormatOrCustom::Custom),
    ))(input)
}

//* entityOptions  = *( entityIdOption "&" ) id *( "&" entityIdOption )
rule! {
    pub fn entityOptions<'a>(input) -> EntityOptions<'a> {
        id_options(entityIdOption)(input)
    }
}

//* entityIdOption = format
//*                / customQueryOption
rule! {
    pub fn entityIdOption<'a>(input) -> EntityIdOption<'a> {
        format_or_custom(input)
    }
}

//* entityCastOptions = *( entityCastOption "&" ) id *( "&" entityCastOption )
rule! {
    pub fn entityCastOptions<'a>(input) -> EntityCastOptions<'a> {
        id_options(entityCastOption)(input)
    }
}

//* entityCastOption  = entityIdOption
//*                   / expand
//*                   / select
//
// A custom query option matches `expand=...` too, so the system options go
// first.
rule! {
    pub fn entityCastOption<'a>(input) -> EntityCastOption<'a> {
        alt((
            map(expand, EntityCastOption::Expand),
            map(select, EntityCastOption::Select),
            map(entityIdOption, EntityCastOption::IdOption),
        ))(input)
    }
}

/// `*( option "&" ) id *( "&" option )`. An option in front of the id may not
/// be the id itself, which a custom option spelled `id=...` would be.
fn id_options<'a, T>(
    option: impl Fn(Input<'a>) -> PResult<'a, T>,
) -> impl Fn(Input<'a>) -> PResult<'a, IdOptions<'a, T>> {
    move |input: Input<'a>| {
        let (input, before) = many(suffixed(preceded(not(id), &option), "&"))(input)?;
        let (input, id) = id(input)?;
        let (input, after) = many(prefixed("&", &option))(input)?;
        Ok((input, IdOptions { before, id, after }))
    }
}

/// `( "$name" / "name" ) EQ value`, for `name` spelled with its dollar.
fn system<'a, T, F>(
    name: &'static str,
    value: F,
) -> impl FnMut(Input<'a>) -> PResult<'a, SystemOption<'a, T>>
where
    F: Parser<Input<'a>, T, SyntaxError>,
{
    named(alt((lit_ci(name), lit_ci(&name[1..]))), value)
}

/// `keyword EQ value`
fn named<'a, T, K, F>(
    mut keyword: K,
    mut value: F,
) -> impl FnMut(Input<'a>) -> PResult<'a, SystemOption<'a, T>>
where
    K: Parser<Input<'a>, Token<'a>, SyntaxError>,
    F: Parser<Input<'a>, T, SyntaxError>,
{
    move |input: Input<'a>| {
        let (input, keyword) = keyword.parse(input)?;
        let (input, eq) = EQ(input)?;
        let (input, value) = value.parse(input)?;
        Ok((input, SystemOption { keyword, eq, value }))
    }
}

/// `OPEN option *( SEMI option ) CLOSE`
pub(crate) fn option_list<'a, T>(
    option: impl Fn(Input<'a>) -> PResult<'a, T>,
) -> impl Fn(Input<'a>) -> PResult<'a, OptionList<'a, T>> {
    move |input: Input<'a>| {
        let (input, (open, options, close)) = tuple((OPEN, list(&option, SEMI), CLOSE))(input)?;
        Ok((input, OptionList { open, options, close }))
    }
}

//* id = ( "$id" / "id" ) EQ IRI-in-query
rule! {
    pub fn id<'a>(input) -> Id<'a> {
        system("$id", IRI_in_query)(input)
    }
}

//* systemQueryOption = compute
//*                   / deltatoken
//*                   / expand
//*                   / filter
//*                   / format
//*                   / id
//*                   / inlinecount
//*                   / orderby
//*                   / schemaversion
//*                   / search
//*                   / select
//*                   / skip
//*                   / skiptoken
//*                   / top
//*                   / index
rule! {
    pub fn systemQueryOption<'a>(input) -> SystemQueryOption<'a> {
        alt((
            map(compute, SystemQueryOption::Compute),
            map(deltatoken, SystemQueryOption::Deltatoken),
            map(expand, SystemQueryOption::Expand),
            map(filter, SystemQueryOption::Filter),
            map(format, SystemQueryOption::Format),
            map(id, SystemQueryOption::Id),
            map(inlinecount, SystemQueryOption::Inlinecount),
            map(orderby, SystemQueryOption::Orderby),
            map(schemaversion, SystemQueryOption::Schemaversion),
            map(search, SystemQueryOption::Search),
            map(select, SystemQueryOption::Select),
            map(skip, SystemQueryOption::Skip),
            map(skiptoken, SystemQueryOption::Skiptoken),
            map(top, SystemQueryOption::Top),
            map(index, SystemQueryOption::Index),
        ))(input)
    }
}

//* compute          = ( "$compute" / "compute" ) EQ computeItem *( COMMA computeItem )
rule! {
    pub fn compute<'a>(input) -> Compute<'a> {
        system("$compute", list(computeItem, COMMA))(input)
    }
}

//* computeItem      = commonExpr RWS "as" RWS computedProperty
rule! {
    pub fn computeItem<'a>(input) -> ComputeItem<'a> {
        let (input, (expression, before, keyword, after, property)) =
            tuple((commonExpr, RWS, lit_ci("as"), RWS, computedProperty))(input)?;
        Ok((
            input,
            ComputeItem {
                expression,
                before,
                keyword,
                after,
                property,
            },
        ))
    }
}

//* computedProperty = odataIdentifier
rule! {
    pub fn computedProperty<'a>(input) -> ComputedProperty<'a> {
        let (input, identifier) = odataIdentifier(input)?;
        Ok((input, ComputedProperty { identifier }))
    }
}

//* expand            = ( "$expand" / "expand" ) EQ expandItem *( COMMA expandItem )
rule! {
    pub fn expand<'a>(input) -> Expand<'a> {
        system("$expand", list(expandItem, COMMA))(input)
    }
}

//* expandItem        = STAR [ ref / OPEN levels CLOSE ]
//*                   / "$value"
//*                   / expandPath
//*                     [ ref   [ OPEN expandRefOption   *( SEMI expandRefOption   ) CLOSE ]
//*                     / count [ OPEN expandCountOption *( SEMI expandCountOption ) CLOSE ]
//*                     /         OPEN expandOption      *( SEMI expandOption      ) CLOSE
//*                     ]
rule! {
    pub recursive fn expandItem<'a>(input) -> ExpandItem<'a> {
        alt((
            map(
                pair(
                    STAR,
                    opt(alt((
                        map(ref_, ExpandStarTail::Ref),
                        map(tuple((OPEN, levels, CLOSE)), |(open, levels, close)| {
                            ExpandStarTail::Levels(StarLevels { open, levels, close })
                        }),
                    ))),
                ),
                |(star, tail)| ExpandItem::Star(ExpandStar { star, tail }),
            ),
            map(lit_ci("$value"), ExpandItem::Value),
            map(
                pair(
                    expandPath,
                    opt(alt((
                        map(chain(ref_, option_list(expandRefOption)), ExpandPathTail::Ref),
                        map(chain(count, option_list(expandCountOption)), ExpandPathTail::Count),
                        map(option_list(expandOption), ExpandPathTail::Options),
                    ))),
                ),
                |(path, tail)| ExpandItem::Path(ExpandPathItem { path, tail }),
            ),
        ))(input)
    }
}

//* expandPath        = [ ( qualifiedEntityTypeName / qualifiedComplexTypeName ) "/" ]
//*                     *( ( complexProperty / complexColProperty ) "/" [ qualifiedComplexTypeName "/" ] )
//*                     ( STAR / streamProperty / navigationProperty [ "/" qualifiedEntityTypeName ] )
//
// The navigation property is tried before the stream property, which would
// otherwise take every name.
rule! {
    pub fn expandPath<'a>(input) -> ExpandPath<'a> {
        let (input, type_cast) = opt(suffixed(entity_or_complex_type, "/"))(input)?;
        let (input, segments) = many(expand_path_segment)(input)?;
        let (input, last) = alt((
            map(STAR, ExpandPathEnd::Star),
            map(
                chain(navigationProperty, prefixed("/", qualifiedEntityTypeName)),
                ExpandPathEnd::Navigation,
            ),
            map(streamProperty, ExpandPathEnd::Stream),
        ))(input)?;
        Ok((
            input,
            ExpandPath {
                type_cast,
                segments,
                last,
            },
        ))
    }
}

fn entity_or_complex_type(input: Input<'_>) -> PResult<'_, EntityOrComplexType<'_>> {
    alt((
        map(qualifiedEntityTypeName, EntityOrComplexType::Entity),
        map(qualifiedComplexTypeName, EntityOrComplexType::Complex),
    ))(input)
}

fn complex_or_col_property(input: Input<'_>) -> PResult<'_, ComplexOrColProperty<'_>> {
    alt((
        map(complexProperty, ComplexOrColProperty::Complex),
        map(complexColProperty, ComplexOrColProperty::ComplexCol),
    ))(input)
}

// A segment is only taken when the path goes on with a name or a star after
// it. `Orders/$ref` and `Orders/Model.Special` end at `Orders`.
fn expand_path_segment(input: Input<'_>) -> PResult<'_, ExpandPathSegment<'_>> {
    let (input, (property, slash, cast)) = tuple((
        complex_or_col_property,
        lit("/"),
        opt(suffixed(qualifiedComplexTypeName, "/")),
    ))(input)?;
    let (input, _) = peek(alt((
        map(STAR, |_| ()),
        map(terminated(odataIdentifier, not(lit("."))), |_| ()),
    )))(input)?;
    Ok((
        input,
        ExpandPathSegment {
            property,
            slash,
            cast,
        },
    ))
}

//* expandCountOption = filter
//*                   / search
rule! {
    pub fn expandCountOption<'a>(input) -> ExpandCountOption<'a> {
        alt((
            map(filter, ExpandCountOption::Filter),
            map(search, ExpandCountOption::Search),
        ))(input)
    }
}

//* expandRefOption   = expandCountOption
//*                   / orderby
//*                   / skip
//*                   / top
//*                   / inlinecount
rule! {
    pub fn expandRefOption<'a>(input) -> ExpandRefOption<'a> {
        alt((
            map(expandCountOption, ExpandRefOption::Count),
            map(orderby, ExpandRefOption::Orderby),
            map(skip, ExpandRefOption::Skip),
            map(top, ExpandRefOption::Top),
            map(inlinecount, ExpandRefOption::Inlinecount),
        ))(input)
    }
}

//* expandOption      = expandRefOption
//*                   / select
//*                   / expand
//*                   / compute
//*                   / levels
//*                   / aliasAndValue
rule! {
    pub fn expandOption<'a>(input) -> ExpandOption<'a> {
        alt((
            map(expandRefOption, ExpandOption::Ref),
            map(select, |select| ExpandOption::Select(Box::new(select))),
            map(expand, |expand| ExpandOption::Expand(Box::new(expand))),
            map(compute, ExpandOption::Compute),
            map(levels, ExpandOption::Levels),
            map(aliasAndValue, ExpandOption::AliasAndValue),
        ))(input)
    }
}

//* levels = ( "$levels" / "levels" ) EQ ( oneToNine *DIGIT / "max" )
rule! {
    pub fn levels<'a>(input) -> Levels<'a> {
        system(
            "$levels",
            alt((
                map(lexeme(pair(oneToNine, many(DIGIT))), LevelsValue::Number),
                map(lit_ci("max"), LevelsValue::Max),
            )),
        )(input)
    }
}

//* filter = ( "$filter" / "filter" ) EQ boolCommonExpr
rule! {
    pub fn filter<'a>(input) -> Filter<'a> {
        system("$filter", boolCommonExpr)(input)
    }
}

//* orderby     = ( "$orderby" / "orderby" ) EQ orderbyItem *( COMMA orderbyItem )
rule! {
    pub fn orderby<'a>(input) -> Orderby<'a> {
        system("$orderby", list(orderbyItem, COMMA))(input)
    }
}

//* orderbyItem = commonExpr [ RWS ( "asc" / "desc" ) ]
rule! {
    pub fn orderbyItem<'a>(input) -> OrderbyItem<'a> {
        let (input, (expression, direction)) = pair(
            commonExpr,
            opt(map(
                pair(RWS, alt((keyword_ci("asc"), keyword_ci("desc")))),
                |(rws, keyword)| OrderDirection { rws, keyword },
            )),
        )(input)?;
        Ok((input, OrderbyItem { expression, direction }))
    }
}

//* skip = ( "$skip" / "skip" ) EQ 1*DIGIT
rule! {
    pub fn skip<'a>(input) -> Skip<'a> {
        system("$skip", digits(1, None))(input)
    }
}

//* top  = ( "$top"  / "top"  ) EQ 1*DIGIT
rule! {
    pub fn top<'a>(input) -> Top<'a> {
        system("$top", digits(1, None))(input)
    }
}

//* index  = ( "$index" / "index" ) EQ 1*DIGIT
rule! {
    pub fn index<'a>(input) -> Index<'a> {
        system("$index", digits(1, None))(input)
    }
}

//* format = ( "$format" / "format" ) EQ
//*          ( "atom"
//*          / "json"
//*          / "xml"
//*          / 1*pchar "/" 1*pchar ; <a data service specific value indicating a
//*          )                     ; format specific to the specific data service> or
//*                                ; <An IANA-defined [IANA-MMT] content type>
//
// Media types go first so that `json` does not stop short of `json/x`.
rule! {
    pub fn format<'a>(input) -> Format<'a> {
        system(
            "$format",
            alt((
                map(
                    lexeme(tuple((some(media_type_char), lit("/"), some(media_type_char)))),
                    FormatValue::MediaType,
                ),
                map(lit_ci("atom"), FormatValue::Atom),
                map(lit_ci("json"), FormatValue::Json),
                map(lit_ci("xml"), FormatValue::Xml),
            )),
        )(input)
    }
}

// `pchar` without the `&` that ends the option.
fn media_type_char(input: Input<'_>) -> PResult<'_, Token<'_>> {
    preceded(not(lit("&")), pchar)(input)
}

//* inlinecount = ( "$count" / "count" ) EQ booleanValue
rule! {
    pub fn inlinecount<'a>(input) -> Inlinecount<'a> {
        system("$count", booleanValue)(input)
    }
}

//* schemaversion   = ( "$schemaversion" / "schemaversion" ) EQ ( STAR / 1*unreserved )
rule! {
    pub fn schemaversion<'a>(input) -> Schemaversion<'a> {
        system(
            "$schemaversion",
            alt((
                map(STAR, SchemaVersionValue::Star),
                map(lexeme(some(unreserved)), SchemaVersionValue::Version),
            )),
        )(input)
    }
}

//* search     = ( "$search" / "search" ) EQ BWS searchExpr
rule! {
    pub fn search<'a>(input) -> Search<'a> {
        system(
            "$search",
            map(pair(BWS, searchExpr), |(bws, expr)| SearchValue { bws, expr }),
        )(input)
    }
}

//* searchExpr = ( OPEN BWS searchExpr BWS CLOSE
//*              / searchTerm
//*              ) [ searchOrExpr
//*                / searchAndExpr
//*                ]
rule! {
    pub recursive fn searchExpr<'a>(input) -> SearchExpr<'a> {
        let (input, operand) = alt((
            map(
                tuple((OPEN, BWS, searchExpr, BWS, CLOSE)),
                |(open, before, expr, after, close)| {
                    SearchOperand::Parenthesized(Box::new(SearchParens {
                        open,
                        before,
                        expr,
                        after,
                        close,
                    }))
                },
            ),
            map(searchTerm, SearchOperand::Term),
        ))(input)?;
        let (input, tail) = opt(alt((
            map(searchOrExpr, SearchTail::Or),
            map(searchAndExpr, SearchTail::And),
        )))(input)?;
        Ok((input, SearchExpr { operand, tail }))
    }
}

//* searchOrExpr  = RWS 'OR'  RWS searchExpr
rule! {
    pub fn searchOrExpr<'a>(input) -> SearchOrExpr<'a> {
        let (input, (before, keyword, after, expr)) =
            tuple((RWS, lit("OR"), RWS, searchExpr))(input)?;
        Ok((
            input,
            SearchOrExpr {
                before,
                keyword,
                after,
                expr: Box::new(expr),
            },
        ))
    }
}

//* searchAndExpr = RWS [ 'AND' RWS ] searchExpr
rule! {
    pub fn searchAndExpr<'a>(input) -> SearchAndExpr<'a> {
        let (input, (before, keyword, expr)) =
            tuple((RWS, opt(search_keyword("AND")), searchExpr))(input)?;
        Ok((
            input,
            SearchAndExpr {
                before,
                keyword,
                expr: Box::new(expr),
            },
        ))
    }
}

fn search_keyword<'a>(word: &'static str) -> impl FnMut(Input<'a>) -> PResult<'a, SearchKeyword<'a>> {
    map(pair(lit(word), RWS), |(keyword, rws)| SearchKeyword { keyword, rws })
}

//* searchTerm   = [ 'NOT' RWS ] ( searchPhrase / searchWord )
rule! {
    pub fn searchTerm<'a>(input) -> SearchTerm<'a> {
        let (input, (not, value)) = pair(
            opt(search_keyword("NOT")),
            alt((
                map(searchPhrase, SearchTermValue::Phrase),
                map(searchWord, SearchTermValue::Word),
            )),
        )(input)?;
        Ok((input, SearchTerm { not, value }))
    }
}

//* searchPhrase = quotation-mark 1*qchar-no-AMP-DQUOTE quotation-mark
rule! {
    pub fn searchPhrase<'a>(input) -> SearchPhrase<'a> {
        let (input, (open, text, close)) = tuple((
            quotation_mark,
            lexeme(some(qchar_no_AMP_DQUOTE)),
            quotation_mark,
        ))(input)?;
        Ok((input, SearchPhrase { open, text, close }))
    }
}

//* ; A searchWord is a sequence of one or more letters, digits, commas, or dots.
//* ; This includes Unicode characters of categories L or N using UTF-8 and percent-encoding.
//* ; The words AND, OR, and NOT are not a valid searchWord.
//* ; Expressing this in ABNF is somewhat clumsy, so the following rule is overly generous.
//* searchWord   = 1*( ALPHA / DIGIT / COMMA / "." / pct-encoded )
//
// The operators are excluded as the comment asks. Encoded whitespace,
// parentheses and quotation marks delimit words rather than belong to them.
rule! {
    pub fn searchWord<'a>(input) -> SearchWord<'a> {
        let (input, _) = not(alt((keyword("AND"), keyword("OR"), keyword("NOT"))))(input)?;
        let (input, text) = lexeme(some(alt((
            class(char::is_alphanumeric),
            lexeme(COMMA),
            lit("."),
            verify(pct_encoded, |token: &Token<'_>| {
                !["%20", "%09", "%22", "%28", "%29"]
                    .iter()
                    .any(|delimiter| token.text().eq_ignore_ascii_case(delimiter))
            }),
        ))))(input)?;
        Ok((input, SearchWord { text }))
    }
}

//* select         = ( "$select" / "select" ) EQ selectItem *( COMMA selectItem )
rule! {
    pub fn select<'a>(input) -> Select<'a> {
        system("$select", list(selectItem, COMMA))(input)
    }
}

//* selectItem     = STAR
//*                / allOperationsInSchema
//*                / [ ( qualifiedEntityTypeName / qualifiedComplexTypeName ) "/" ]
//*                  ( selectProperty
//*                  / qualifiedActionName
//*                  / qualifiedFunctionName
//*                  )
//
// A property would stop at the first dot of a qualified name, so operations
// are tried first. A qualified name followed by parameters is a function,
// without them an action.
rule! {
    pub recursive fn selectItem<'a>(input) -> SelectItem<'a> {
        alt((
            map(STAR, SelectItem::Star),
            map(allOperationsInSchema, SelectItem::AllOperations),
            map(
                pair(
                    opt(suffixed(entity_or_complex_type, "/")),
                    alt((
                        map(terminated(qualifiedActionName, not(OPEN)), SelectTarget::Action),
                        map(qualifiedFunctionName, SelectTarget::Function),
                        map(selectProperty, SelectTarget::Property),
                    )),
                ),
                |(type_cast, target)| SelectItem::Path(SelectPathItem { type_cast, target }),
            ),
        ))(input)
    }
}

//* selectProperty = primitiveProperty
//*                / primitiveColProperty [ OPEN selectOptionPC *( SEMI selectOptionPC ) CLOSE ]
//*                / navigationProperty
//*                / selectPath [ OPEN selectOption *( SEMI selectOption ) CLOSE
//*                             / "/" selectProperty
//*                             ]
//
// Every alternative starts with a plain name. The ones that go on with
// options or a sub-path are tried first; a bare name is a primitive property.
rule! {
    pub recursive fn selectProperty<'a>(input) -> SelectProperty<'a> {
        alt((
            map(
                chain_some(primitiveColProperty, option_list(selectOptionPC)),
                SelectProperty::PrimitiveCol,
            ),
            map(
                chain_some(
                    selectPath,
                    alt((
                        map(option_list(selectOption), SelectPathTail::Options),
                        map(
                            prefixed("/", map(selectProperty, Box::new)),
                            SelectPathTail::Property,
                        ),
                    )),
                ),
                SelectProperty::Path,
            ),
            map(primitiveProperty, SelectProperty::Primitive),
            map(navigationProperty, SelectProperty::Navigation),
        ))(input)
    }
}

//* selectPath     = ( complexProperty / complexColProperty ) [ "/" qualifiedComplexTypeName ]
rule! {
    pub fn selectPath<'a>(input) -> SelectPath<'a> {
        let (input, (property, cast)) = pair(
            complex_or_col_property,
            opt(prefixed("/", qualifiedComplexTypeName)),
        )(input)?;
        Ok((input, SelectPath { property, cast }))
    }
}

//* selectOptionPC = filter / search / inlinecount / orderby / skip / top
rule! {
    pub fn selectOptionPC<'a>(input) -> SelectOptionPc<'a> {
        alt((
            map(filter, SelectOptionPc::Filter),
            map(search, SelectOptionPc::Search),
            map(inlinecount, SelectOptionPc::Inlinecount),
            map(orderby, SelectOptionPc::Orderby),
            map(skip, SelectOptionPc::Skip),
            map(top, SelectOptionPc::Top),
        ))(input)
    }
}

//* selectOption   = selectOptionPC
//*                / compute / select / expand / aliasAndValue
rule! {
    pub fn selectOption<'a>(input) -> SelectOption<'a> {
        alt((
            map(selectOptionPC, SelectOption::Pc),
            map(compute, SelectOption::Compute),
            map(select, |select| SelectOption::Select(Box::new(select))),
            map(expand, |expand| SelectOption::Expand(Box::new(expand))),
            map(aliasAndValue, SelectOption::AliasAndValue),
        ))(input)
    }
}

//* allOperationsInSchema = namespace "." STAR
rule! {
    pub fn allOperationsInSchema<'a>(input) -> AllOperationsInSchema<'a> {
        let (input, (namespace, dot, star)) = tuple((namespace, lit("."), STAR))(input)?;
        Ok((input, AllOperationsInSchema { namespace, dot, star }))
    }
}

//* ; The parameterNames uniquely identify the bound function overload
//* ; only if it has overloads.
//* qualifiedActionName   = namespace "." action
rule! {
    pub fn qualifiedActionName<'a>(input) -> QualifiedActionName<'a> {
        qualified(action)(input)
    }
}

//* qualifiedFunctionName = namespace "." function [ OPEN parameterNames CLOSE ]
rule! {
    pub fn qualifiedFunctionName<'a>(input) -> QualifiedFunctionName<'a> {
        let (input, (name, parameters)) = pair(
            qualified(function),
            opt(map(
                tuple((OPEN, parameterNames, CLOSE)),
                |(open, names, close)| ParameterNameList { open, names, close },
            )),
        )(input)?;
        Ok((input, QualifiedFunctionName { name, parameters }))
    }
}

//* ; The names of all non-binding parameters, separated by commas
//* parameterNames = parameterName *( COMMA parameterName )
rule! {
    pub fn parameterNames<'a>(input) -> ParameterNames<'a> {
        let (input, names) = list(parameterName, COMMA)(input)?;
        Ok((input, ParameterNames { names }))
    }
}

//* deltatoken = "$deltatoken" EQ 1*( qchar-no-AMP )
rule! {
    pub fn deltatoken<'a>(input) -> Deltatoken<'a> {
        named(lit_ci("$deltatoken"), lexeme(some(qchar_no_AMP)))(input)
    }
}

//* skiptoken = "$skiptoken" EQ 1*( qchar-no-AMP )
rule! {
    pub fn skiptoken<'a>(input) -> Skiptoken<'a> {
        named(lit_ci("$skiptoken"), lexeme(some(qchar_no_AMP)))(input)
    }
}

//* aliasAndValue = parameterAlias EQ parameterValue
rule! {
    pub fn aliasAndValue<'a>(input) -> AliasAndValue<'a> {
        let (input, (alias, eq, value)) = tuple((parameterAlias, EQ, parameterValue))(input)?;
        Ok((input, AliasAndValue { alias, eq, value }))
    }
}

//* nameAndValue = parameterName EQ parameterValue
rule! {
    pub fn nameAndValue<'a>(input) -> NameAndValue<'a> {
        let (input, (name, eq, value)) = tuple((parameterName, EQ, parameterValue))(input)?;
        Ok((input, NameAndValue { name, eq, value }))
    }
}

//* parameterValue = arrayOrObject
//*                / commonExpr
rule! {
    pub fn parameterValue<'a>(input) -> ParameterValue<'a> {
        alt((
            map(arrayOrObject, ParameterValue::ArrayOrObject),
            map(commonExpr, ParameterValue::CommonExpr),
        ))(input)
    }
}

//* customQueryOption = customName [ EQ customValue ]
rule! {
    pub fn customQueryOption<'a>(input) -> CustomQueryOption<'a> {
        let (input, (name, value)) = pair(
            customName,
            opt(map(pair(EQ, customValue), |(eq, value)| CustomValue { eq, value })),
        )(input)?;
        Ok((input, CustomQueryOption { name, value }))
    }
}

//* customName        = qchar-no-AMP-EQ-AT-DOLLAR *( qchar-no-AMP-EQ )
rule! {
    pub fn customName<'a>(input) -> CustomName<'a> {
        let (input, text) =
            lexeme(pair(qchar_no_AMP_EQ_AT_DOLLAR, many(qchar_no_AMP_EQ)))(input)?;
        Ok((input, CustomName { text }))
    }
}

//* customValue       = *( qchar-no-AMP )
pub fn customValue(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(many(qchar_no_AMP))(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::{Chain, Syntax};

    fn options(text: &str) -> QueryOptions<'_> {
        let (rest, options) = queryOptions(Input::new(text)).unwrap();
        assert!(rest.is_empty(), "unparsed {:?}", rest.as_str());
        assert_eq!(options.to_source(), text);
        options
    }

    fn system_names(options: &QueryOptions<'_>) -> Vec<String> {
        options
            .iter()
            .filter_map(QueryOption::as_system)
            .map(|option| option.name().to_owned())
            .collect()
    }

    #[test]
    fn system_options_with_and_without_dollar() {
        let options = options("$top=10&skip=5&$count=true&$format=json");
        assert_eq!(system_names(&options), vec!["top", "skip", "count", "format"]);
        match options.first {
            QueryOption::System(SystemQueryOption::Top(top)) => {
                assert!(top.has_dollar());
                assert_eq!(top.value.text(), "10");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn system_option_names_ignore_case() {
        let options = options("$TOP=1&$Select=Name");
        assert_eq!(system_names(&options), vec!["TOP", "Select"]);
    }

    #[test]
    fn aliases_names_and_custom_options() {
        let options = options("@p=5&answer=42&debug&x=a%20b");
        let kinds: Vec<_> = options
            .iter()
            .map(|option| match option {
                QueryOption::System(_) => "system",
                QueryOption::AliasAndValue(_) => "alias",
                QueryOption::NameAndValue(_) => "name",
                QueryOption::Custom(_) => "custom",
            })
            .collect();
        assert_eq!(kinds, vec!["alias", "name", "custom", "custom"]);
    }

    #[test]
    fn dollar_options_are_never_custom() {
        let (rest, options) = queryOptions(Input::new("$top=1&$unknown=2")).unwrap();
        assert_eq!(options.len(), 1);
        assert_eq!(rest.as_str(), "&$unknown=2");
    }

    #[test]
    fn format_values() {
        let (_, format) = format(Input::new("$format=application/json;odata.metadata=none")).unwrap();
        assert!(matches!(format.value, FormatValue::MediaType(_)));
        let (_, format) = super::format(Input::new("$format=XML")).unwrap();
        assert!(matches!(format.value, FormatValue::Xml(_)));
    }

    #[test]
    fn select_items() {
        let (rest, select) =
            select(Input::new("$select=Name,Address/City,NS.*,NS.Rate,NS.Func(a,b),*")).unwrap();
        assert!(rest.is_empty());
        let items: Vec<_> = select.value.iter().collect();
        assert_eq!(items.len(), 6);
        assert!(matches!(
            items[0],
            SelectItem::Path(SelectPathItem {
                target: SelectTarget::Property(SelectProperty::Primitive(_)),
                ..
            })
        ));
        assert!(matches!(
            items[1],
            SelectItem::Path(SelectPathItem {
                target: SelectTarget::Property(SelectProperty::Path(_)),
                ..
            })
        ));
        assert!(matches!(items[2], SelectItem::AllOperations(_)));
        assert!(matches!(
            items[3],
            SelectItem::Path(SelectPathItem { target: SelectTarget::Action(_), .. })
        ));
        match items[4] {
            SelectItem::Path(SelectPathItem {
                target: SelectTarget::Function(function),
                ..
            }) => assert_eq!(function.parameters.as_ref().map(|list| list.names.names.len()), Some(2)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(items[5], SelectItem::Star(_)));
    }

    #[test]
    fn select_with_type_cast_and_nested_options() {
        let (rest, select) =
            select(Input::new("$select=Model.Manager/Reports($select=Name;$top=2)")).unwrap();
        assert!(rest.is_empty());
        match &select.value.first {
            SelectItem::Path(SelectPathItem {
                type_cast: Some(_),
                target: SelectTarget::Property(SelectProperty::Path(path)),
            }) => match &path.tail {
                Some(SelectPathTail::Options(options)) => assert_eq!(options.options.len(), 2),
                other => panic!("unexpected {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn expand_items() {
        let (rest, expand) = expand(Input::new(
            "$expand=*($levels=max),Orders/$ref,Orders/Items/$count,Friends($expand=Friends;$top=5),Orders/Model.Big",
        ))
        .unwrap();
        assert!(rest.is_empty());
        let items: Vec<_> = expand.value.iter().collect();
        assert!(matches!(
            items[0],
            ExpandItem::Star(ExpandStar {
                tail: Some(ExpandStarTail::Levels(_)),
                ..
            })
        ));
        match items[1] {
            ExpandItem::Path(ExpandPathItem { path, tail: Some(ExpandPathTail::Ref(_)) }) => {
                assert!(path.segments.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
        match items[2] {
            ExpandItem::Path(ExpandPathItem { path, tail: Some(ExpandPathTail::Count(_)) }) => {
                assert_eq!(path.segments.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            items[3],
            ExpandItem::Path(ExpandPathItem { tail: Some(ExpandPathTail::Options(_)), .. })
        ));
        match items[4] {
            ExpandItem::Path(ExpandPathItem { path, tail: None }) => assert!(matches!(
                path.last,
                ExpandPathEnd::Navigation(Chain { tail: Some(_), .. })
            )),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn search_expressions() {
        let (rest, search) = search(Input::new("$search=(blue OR green) NOT red %22a%20b%22")).unwrap();
        assert!(rest.is_empty());
        let expr = &search.value.expr;
        assert!(matches!(expr.operand, SearchOperand::Parenthesized(_)));
        match &expr.tail {
            Some(SearchTail::And(and)) => {
                assert!(and.keyword.is_none());
                match &and.expr.operand {
                    SearchOperand::Term(term) => assert!(term.not.is_some()),
                    other => panic!("unexpected {other:?}"),
                }
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn search_words_exclude_operators() {
        assert!(searchWord(Input::new("AND")).is_err());
        assert!(searchWord(Input::new("OR")).is_err());
        assert_eq!(searchWord(Input::new("ANDROID")).unwrap().1.as_str(), "ANDROID");
        assert_eq!(searchWord(Input::new("m%C3%BCller%20x")).unwrap().1.as_str(), "m%C3%BCller");
    }

    #[test]
    fn entity_options_need_an_id() {
        let (rest, options) =
            entityOptions(Input::new("$format=json&$id=Products(0)&foo=bar")).unwrap();
        assert!(rest.is_empty());
        assert_eq!(options.before.len(), 1);
        assert_eq!(options.id.value.text(), "Products(0)");
        assert_eq!(options.after.len(), 1);

        let (_, options) = entityOptions(Input::new("id=People(1)")).unwrap();
        assert!(options.before.is_empty());

        assert!(entityOptions(Input::new("$format=json")).is_err());
    }

    #[test]
    fn levels_and_orderby() {
        let (_, levels) = levels(Input::new("$levels=12")).unwrap();
        assert!(matches!(levels.value, LevelsValue::Number(token) if token.text() == "12"));
        assert!(super::levels(Input::new("$levels=0")).is_err());

        let (rest, orderby) = orderby(Input::new("$orderby=Name desc,Age")).unwrap();
        assert!(rest.is_empty());
        let items: Vec<_> = orderby.value.iter().collect();
        assert!(items[0].is_descending());
        assert!(!items[1].is_descending());
    }
}
