//! JSON format for function parameters (section 5).

use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::sequence::{pair, tuple};

use crate::combinator::{class, exactly, lexeme, list, lit, lit_ci, many, punct, PResult};
use crate::cst::json::*;
use crate::cst::punct::{Punct, QuotationMark};
use crate::cst::Token;
use crate::input::Input;

use super::*;

//* ;------------------------------------------------------------------------------
//* ; 5. JSON format for function parameters
//* ;------------------------------------------------------------------------------
//* ; Note: the query part of a URI needs to be partially percent-decoded before
//* ; applying these rules, see comment at the top of this file
//* ;------------------------------------------------------------------------------
//*
//* arrayOrObject = complexColInUri
//*               / complexInUri
//*               / rootExprCol
//*               / primitiveColInUri
//
// An empty array is always a `complexColInUri`.
rule! {
    pub recursive fn arrayOrObject<'a>(input) -> ArrayOrObject<'a> {
        alt((
            map(complexColInUri, ArrayOrObject::ComplexCol),
            map(complexInUri, ArrayOrObject::Complex),
            map(rootExprCol, ArrayOrObject::RootExprCol),
            map(primitiveColInUri, ArrayOrObject::PrimitiveCol),
        ))(input)
    }
}

/// `begin-array [ item *( value-separator item ) ] end-array`
fn array<'a, T>(
    item: impl Fn(Input<'a>) -> PResult<'a, T>,
) -> impl Fn(Input<'a>) -> PResult<'a, JsonArray<'a, T>> {
    move |input: Input<'a>| {
        let (input, (open, items, close)) =
            tuple((begin_array, opt(list(&item, value_separator)), end_array))(input)?;
        Ok((input, JsonArray { open, items, close }))
    }
}

/// `quotation-mark name quotation-mark name-separator value`
fn member<'a, N, V>(
    mut name: impl FnMut(Input<'a>) -> PResult<'a, N>,
    mut value: impl FnMut(Input<'a>) -> PResult<'a, V>,
) -> impl FnMut(Input<'a>) -> PResult<'a, JsonMember<'a, N, V>> {
    move |input: Input<'a>| {
        let (input, (open_quote, name, close_quote, separator, value)) = tuple((
            quotation_mark,
            &mut name,
            quotation_mark,
            name_separator,
            &mut value,
        ))(input)?;
        Ok((
            input,
            JsonMember {
                open_quote,
                name,
                close_quote,
                separator,
                value,
            },
        ))
    }
}

//* complexColInUri = begin-array
//*                   [ complexInUri *( value-separator complexInUri ) ]
//*                   end-array
rule! {
    pub fn complexColInUri<'a>(input) -> ComplexColInUri<'a> {
        array(complexInUri)(input)
    }
}

//* complexInUri = begin-object
//*                [ ( annotationInUri
//*                  / primitivePropertyInUri
//*                  / complexPropertyInUri
//*                  / collectionPropertyInUri
//*                  / navigationPropertyInUri
//*                  )
//*                  *( value-separator
//*                     ( annotationInUri
//*                     / primitivePropertyInUri
//*                     / complexPropertyInUri
//*                     / collectionPropertyInUri
//*                     / navigationPropertyInUri
//*                     )
//*                   )
//*                ]
//*                end-object
rule! {
    pub recursive fn complexInUri<'a>(input) -> ComplexInUri<'a> {
        let (input, (open, members, close)) = tuple((
            begin_object,
            opt(list(complexMember, value_separator)),
            end_object,
        ))(input)?;
        Ok((input, ComplexInUri { open, members, close }))
    }
}

fn complexMember(input: Input<'_>) -> PResult<'_, ComplexMember<'_>> {
    alt((
        map(annotationInUri, ComplexMember::Annotation),
        map(primitivePropertyInUri, ComplexMember::PrimitiveProperty),
        map(complexPropertyInUri, ComplexMember::ComplexProperty),
        map(collectionPropertyInUri, ComplexMember::CollectionProperty),
        map(navigationPropertyInUri, ComplexMember::NavigationProperty),
    ))(input)
}

//* collectionPropertyInUri = ( quotation-mark primitiveColProperty quotation-mark
//*                             name-separator
//*                             primitiveColInUri
//*                           )
//*                         / ( quotation-mark complexColProperty quotation-mark
//*                             name-separator
//*                             complexColInUri
//*                           )
rule! {
    pub fn collectionPropertyInUri<'a>(input) -> CollectionPropertyInUri<'a> {
        alt((
            map(
                member(primitiveColProperty, primitiveColInUri),
                CollectionPropertyInUri::Primitive,
            ),
            map(
                member(complexColProperty, map(complexColInUri, Box::new)),
                CollectionPropertyInUri::Complex,
            ),
        ))(input)
    }
}

//* primitiveColInUri = begin-array
//*                     [ primitiveLiteralInJSON *( value-separator primitiveLiteralInJSON ) ]
//*                     end-array
rule! {
    pub fn primitiveColInUri<'a>(input) -> PrimitiveColInUri<'a> {
        array(primitiveLiteralInJSON)(input)
    }
}

//* complexPropertyInUri = quotation-mark complexProperty quotation-mark
//*                        name-separator
//*                        complexInUri
rule! {
    pub fn complexPropertyInUri<'a>(input) -> ComplexPropertyInUri<'a> {
        member(complexProperty, map(complexInUri, Box::new))(input)
    }
}

//* annotationInUri = quotation-mark AT namespace "." termName quotation-mark
//*                   name-separator
//*                   ( complexInUri / complexColInUri / primitiveLiteralInJSON / primitiveColInUri )
rule! {
    pub fn annotationInUri<'a>(input) -> AnnotationInUri<'a> {
        member(annotationName, annotationValue)(input)
    }
}

fn annotationName(input: Input<'_>) -> PResult<'_, AnnotationName<'_>> {
    let (input, (at, term)) = pair(AT, qualified(termName))(input)?;
    Ok((input, AnnotationName { at, term }))
}

fn annotationValue(input: Input<'_>) -> PResult<'_, AnnotationValue<'_>> {
    alt((
        map(complexInUri, |value| AnnotationValue::Complex(Box::new(value))),
        map(complexColInUri, |value| AnnotationValue::ComplexCol(Box::new(value))),
        map(primitiveLiteralInJSON, AnnotationValue::Primitive),
        map(primitiveColInUri, AnnotationValue::PrimitiveCol),
    ))(input)
}

//* primitivePropertyInUri = quotation-mark primitiveProperty quotation-mark
//*                          name-separator
//*                          primitiveLiteralInJSON
rule! {
    pub fn primitivePropertyInUri<'a>(input) -> PrimitivePropertyInUri<'a> {
        member(primitiveProperty, primitiveLiteralInJSON)(input)
    }
}

//* navigationPropertyInUri = singleNavPropInJSON
//*                         / collectionNavPropInJSON
rule! {
    pub fn navigationPropertyInUri<'a>(input) -> NavigationPropertyInUri<'a> {
        alt((
            map(singleNavPropInJSON, NavigationPropertyInUri::Single),
            map(collectionNavPropInJSON, NavigationPropertyInUri::Collection),
        ))(input)
    }
}

//* singleNavPropInJSON     = quotation-mark entityNavigationProperty quotation-mark
//* 													name-separator
//* 													rootExpr
rule! {
    pub fn singleNavPropInJSON<'a>(input) -> SingleNavPropInJson<'a> {
        member(entityNavigationProperty, rootExpr)(input)
    }
}

//* collectionNavPropInJSON = quotation-mark entityColNavigationProperty quotation-mark
//* 													name-separator
//* 													rootExprCol
rule! {
    pub fn collectionNavPropInJSON<'a>(input) -> CollectionNavPropInJson<'a> {
        member(entityColNavigationProperty, rootExprCol)(input)
    }
}

//* rootExprCol = begin-array
//*               [ rootExpr *( value-separator rootExpr ) ]
//*               end-array
rule! {
    pub fn rootExprCol<'a>(input) -> RootExprCol<'a> {
        array(rootExpr)(input)
    }
}

fn delimiter<'a>(
    literal: &'static str,
    encoded: &'static str,
) -> impl Fn(Input<'a>) -> PResult<'a, JsonDelimiter<'a>> {
    move |input: Input<'a>| {
        let (input, (before, punct, after)) = tuple((BWS, punct(literal, encoded), BWS))(input)?;
        Ok((input, JsonDelimiter { before, punct, after }))
    }
}

fn closing<'a>(
    literal: &'static str,
    encoded: &'static str,
) -> impl Fn(Input<'a>) -> PResult<'a, JsonClose<'a>> {
    move |input: Input<'a>| {
        let (input, (before, punct)) = pair(BWS, punct(literal, encoded))(input)?;
        Ok((input, JsonClose { before, punct }))
    }
}

//* ; JSON syntax: adapted to URI restrictions from [RFC4627]
//* begin-object = BWS ( "{" / "%7B" ) BWS
rule! {
    pub fn begin_object<'a>(input) -> BeginObject<'a> {
        delimiter("{", "%7B")(input)
    }
}

//* end-object   = BWS ( "}" / "%7D" )
rule! {
    pub fn end_object<'a>(input) -> EndObject<'a> {
        closing("}", "%7D")(input)
    }
}

//* begin-array = BWS ( "[" / "%5B" ) BWS
rule! {
    pub fn begin_array<'a>(input) -> BeginArray<'a> {
        delimiter("[", "%5B")(input)
    }
}

//* end-array   = BWS ( "]" / "%5D" )
rule! {
    pub fn end_array<'a>(input) -> EndArray<'a> {
        closing("]", "%5D")(input)
    }
}

//* quotation-mark  = DQUOTE / "%22"
rule! {
    pub fn quotation_mark<'a>(input) -> QuotationMark<'a> {
        punct("\"", "%22")(input)
    }
}

//* name-separator  = BWS COLON BWS
rule! {
    pub fn name_separator<'a>(input) -> NameSeparator<'a> {
        delimiter(":", "%3A")(input)
    }
}

//* value-separator = BWS COMMA BWS
rule! {
    pub fn value_separator<'a>(input) -> ValueSeparator<'a> {
        delimiter(",", "%2C")(input)
    }
}

//* primitiveLiteralInJSON = stringInJSON
//*                        / numberInJSON
//*                        / 'true'
//*                        / 'false'
//*                        / 'null'
rule! {
    pub fn primitiveLiteralInJSON<'a>(input) -> PrimitiveLiteralInJson<'a> {
        alt((
            map(stringInJSON, PrimitiveLiteralInJson::String),
            map(numberInJSON, PrimitiveLiteralInJson::Number),
            map(lit("true"), PrimitiveLiteralInJson::True),
            map(lit("false"), PrimitiveLiteralInJson::False),
            map(lit("null"), PrimitiveLiteralInJson::Null),
        ))(input)
    }
}

//* stringInJSON = quotation-mark *charInJSON quotation-mark
rule! {
    pub fn stringInJSON<'a>(input) -> StringInJson<'a> {
        let (input, (open, content, close)) =
            tuple((quotation_mark, lexeme(many(charInJSON)), quotation_mark))(input)?;
        Ok((input, StringInJson { open, content, close }))
    }
}

//* charInJSON   = qchar-unescaped
//*              / qchar-JSON-special
//*              / escape ( quotation-mark
//*                       / escape
//*                       / ( "/" / "%2F" ) ; solidus         U+002F - literal form is allowed in the query part of a URL
//*                       / 'b'             ; backspace       U+0008
//*                       / 'f'             ; form feed       U+000C
//*                       / 'n'             ; line feed       U+000A
//*                       / 'r'             ; carriage return U+000D
//*                       / 't'             ; tab             U+0009
//*                       / 'u' 4HEXDIG     ;                 U+XXXX
//*                       )
pub fn charInJSON(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        qchar_unescaped,
        qchar_JSON_special,
        lexeme(pair(
            escape,
            alt((
                lexeme(quotation_mark),
                lexeme(escape),
                lit("/"),
                lit_ci("%2F"),
                lit("b"),
                lit("f"),
                lit("n"),
                lit("r"),
                lit("t"),
                lexeme(pair(lit("u"), exactly(4, HEXDIG))),
            )),
        )),
    ))(input)
}

//* qchar-JSON-special = SP / ":" / "{" / "}" / "[" / "]" ; some agents put these unencoded into the query part of a URL
pub fn qchar_JSON_special(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(|c| matches!(c, ' ' | ':' | '{' | '}' | '[' | ']'))(input)
}

//* escape = "\" / "%5C"     ; reverse solidus U+005C
rule! {
    pub fn escape<'a>(input) -> Punct<'a> {
        punct("\\", "%5C")(input)
    }
}

//* numberInJSON = [ "-" ] int [ frac ] [ exp ]
rule! {
    pub fn numberInJSON<'a>(input) -> NumberInJson<'a> {
        let (input, text) = lexeme(tuple((opt(lit("-")), int, opt(frac), opt(exp))))(input)?;
        Ok((input, NumberInJson { text }))
    }
}

//* int          = "0" / ( oneToNine *DIGIT )
pub fn int(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((lit("0"), lexeme(pair(oneToNine, digits(0, None)))))(input)
}

//* frac         = "." 1*DIGIT
pub fn frac(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(pair(lit("."), digits(1, None)))(input)
}

//* exp          = "e" [ "-" / "+" ] 1*DIGIT
pub fn exp(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(tuple((lit_ci("e"), opt(alt((lit("-"), lit("+")))), digits(1, None))))(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::Syntax;

    #[test]
    fn complex_value_with_mixed_members() {
        let text = r#"{"Street":"Main St","Number":12,"@Core.Description":"home","Tags":["a","b"]}"#;
        let (rest, value) = complexInUri(Input::new(text)).unwrap();
        assert!(rest.is_empty());
        assert_eq!(value.to_source(), text);

        let members = value.members.unwrap();
        assert_eq!(members.len(), 4);
        assert!(matches!(members.first, ComplexMember::PrimitiveProperty(_)));
        let kinds: Vec<_> = members
            .iter()
            .map(|member| match member {
                ComplexMember::Annotation(_) => "annotation",
                ComplexMember::PrimitiveProperty(_) => "primitive",
                ComplexMember::ComplexProperty(_) => "complex",
                ComplexMember::CollectionProperty(_) => "collection",
                ComplexMember::NavigationProperty(_) => "navigation",
            })
            .collect();
        assert_eq!(kinds, vec!["primitive", "primitive", "annotation", "collection"]);
    }

    #[test]
    fn encoded_brackets_and_whitespace() {
        let (rest, value) = arrayOrObject(Input::new("%5B 1, 2.5e3 ,-3%5D")).unwrap();
        assert!(rest.is_empty());
        match value {
            ArrayOrObject::PrimitiveCol(items) => assert_eq!(items.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn empty_array_is_a_complex_collection() {
        let (_, value) = arrayOrObject(Input::new("[]")).unwrap();
        match value {
            ArrayOrObject::ComplexCol(items) => assert!(items.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn json_strings_unescape() {
        let (_, string) = stringInJSON(Input::new(r#""a\"b%5CnA%5C%22""#)).unwrap();
        assert_eq!(string.value(), "a\"b\nA\"");

        assert!(stringInJSON(Input::new(r#""\x""#)).is_err());
    }

    #[test]
    fn json_numbers() {
        let (rest, number) = numberInJSON(Input::new("-0.5E+10,")).unwrap();
        assert_eq!(number.as_str(), "-0.5E+10");
        assert_eq!(rest.as_str(), ",");

        let (rest, number) = numberInJSON(Input::new("0123")).unwrap();
        assert_eq!(number.as_str(), "0");
        assert_eq!(rest.as_str(), "123");
    }

    #[test]
    fn nesting_is_bounded() {
        let options = crate::options::ParseOptions::default().with_max_depth(8);
        let text = format!("{}{}", r#"{"a":"#.repeat(10), format!("{{}}{}", "}".repeat(10)));
        let result = complexInUri(Input::with_options(&text, &options));
        assert!(matches!(result, Err(nom::Err::Failure(_))));
    }
}
