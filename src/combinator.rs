//! Building blocks of the rule parsers.
//!
//! Rule parsers are plain functions from an [`Input`] to a [`PResult`]. They
//! are combined with the usual nom combinators; this module adds the pieces the
//! grammar needs on top of them: literal terminals, bounded repetition,
//! separated lists, per-rule tracing and the nesting guard.

use nom::bytes::complete::{tag, tag_no_case};
use nom::character::complete::satisfy;
use nom::combinator::recognize;
use nom::error::ContextError;
use nom::sequence::pair;
use nom::{Err, IResult, Parser};
use tracing::trace;

use crate::cst::punct::Punct;
use crate::cst::{Chain, Item, List, Prefixed, Suffixed, Token};
use crate::error::SyntaxError;
use crate::input::Input;

pub type PResult<'a, O> = IResult<Input<'a>, O, SyntaxError>;

// Remaining stack below which a nested rule grows the stack, and by how much.
// One level of expression nesting (operator tail, primary alternatives, the
// nested commonExpr) takes well over 100 KiB in unoptimized builds, so the red
// zone has to cover several of them.
const RED_ZONE: usize = 1024 * 1024;
const STACK_PER_RECURSION: usize = 8 * 1024 * 1024;

/// Defines a rule parser.
///
/// `rule! { fn name<'a>(input) -> Node<'a> { ... } }` expands to a function
/// `name<'a>(Input<'a>) -> PResult<'a, Node<'a>>` that traces its attempts and
/// records its name on failure. Rules marked `recursive` additionally count one
/// level of nesting.
macro_rules! rule {
    (
        $(#[$meta:meta])*
        $vis:vis recursive fn $name:ident<$lt:lifetime>($input:ident) -> $out:ty $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name<$lt>($input: $crate::input::Input<$lt>) -> $crate::combinator::PResult<$lt, $out> {
            $crate::combinator::traced(stringify!($name), $input, |$input| {
                $crate::combinator::nested($input, |$input: $crate::input::Input<$lt>| -> $crate::combinator::PResult<$lt, $out> { $body })
            })
        }
    };
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident<$lt:lifetime>($input:ident) -> $out:ty $body:block
    ) => {
        $(#[$meta])*
        $vis fn $name<$lt>($input: $crate::input::Input<$lt>) -> $crate::combinator::PResult<$lt, $out> {
            $crate::combinator::traced(stringify!($name), $input, |$input: $crate::input::Input<$lt>| -> $crate::combinator::PResult<$lt, $out> { $body })
        }
    };
}

/// Runs one rule: traces the attempt and names the rule in the error.
pub fn traced<'a, O>(
    name: &'static str,
    input: Input<'a>,
    parser: impl FnOnce(Input<'a>) -> PResult<'a, O>,
) -> PResult<'a, O> {
    trace!(rule = name, offset = input.offset(), "enter");
    match parser(input) {
        Ok((rest, value)) => {
            trace!(rule = name, from = input.offset(), to = rest.offset(), "match");
            Ok((rest, value))
        }
        Err(Err::Error(error)) => {
            trace!(rule = name, offset = input.offset(), furthest = error.offset, "mismatch");
            Err(Err::Error(SyntaxError::add_context(input, name, error)))
        }
        Err(Err::Failure(error)) => Err(Err::Failure(SyntaxError::add_context(input, name, error))),
        Err(incomplete) => Err(incomplete),
    }
}

/// Counts one level of nesting around `parser`.
///
/// Past the configured maximum depth the parse fails for good, the error is not
/// recoverable by trying another alternative. The stack is grown on demand so
/// the maximum depth, not the thread stack size, is what limits nesting.
pub fn nested<'a, O>(
    input: Input<'a>,
    parser: impl FnOnce(Input<'a>) -> PResult<'a, O>,
) -> PResult<'a, O> {
    let depth = input.depth();
    if depth >= input.options().max_depth {
        trace!(depth, offset = input.offset(), "recursion limit");
        return Err(Err::Failure(SyntaxError::recursion_limit(input.offset())));
    }
    let result = stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
        parser(input.with_depth(depth + 1))
    });
    result.map(|(rest, value)| (rest.with_depth(depth), value))
}

/// A case-sensitive literal.
pub fn lit<'a>(literal: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, Token<'a>> {
    move |input: Input<'a>| {
        let (rest, matched) = tag::<_, _, SyntaxError>(literal)(input)?;
        Ok((rest, matched.token()))
    }
}

/// A literal matched without regard to ASCII case.
pub fn lit_ci<'a>(literal: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, Token<'a>> {
    move |input: Input<'a>| {
        let (rest, matched) = tag_no_case::<_, _, SyntaxError>(literal)(input)?;
        Ok((rest, matched.token()))
    }
}

/// One character satisfying `predicate`.
pub fn class<'a>(predicate: fn(char) -> bool) -> impl Fn(Input<'a>) -> PResult<'a, Token<'a>> {
    move |input: Input<'a>| {
        let (rest, matched) = recognize(satisfy::<_, _, SyntaxError>(predicate))(input)?;
        Ok((rest, matched.token()))
    }
}

/// One character in `low..=high`.
pub fn range<'a>(low: char, high: char) -> impl Fn(Input<'a>) -> PResult<'a, Token<'a>> {
    move |input: Input<'a>| {
        let (rest, matched) =
            recognize(satisfy::<_, _, SyntaxError>(move |c| low <= c && c <= high))(input)?;
        Ok((rest, matched.token()))
    }
}

/// A terminal with a literal and a percent-encoded spelling. Percent-encoding
/// is matched regardless of the case of its hex digits.
pub fn punct<'a>(
    literal: &'static str,
    encoded: &'static str,
) -> impl Fn(Input<'a>) -> PResult<'a, Punct<'a>> {
    move |input: Input<'a>| match lit(literal)(input) {
        Ok((rest, token)) => Ok((rest, Punct::Literal(token))),
        Err(Err::Error(first)) => match lit_ci(encoded)(input) {
            Ok((rest, token)) => Ok((rest, Punct::Encoded(token))),
            Err(Err::Error(second)) => Err(Err::Error(nom::error::ParseError::or(first, second))),
            Err(other) => Err(other),
        },
        Err(other) => Err(other),
    }
}

/// Everything `parser` matched, as one token.
pub fn lexeme<'a, O, F>(parser: F) -> impl FnMut(Input<'a>) -> PResult<'a, Token<'a>>
where
    F: Parser<Input<'a>, O, SyntaxError>,
{
    let mut parser = recognize(parser);
    move |input: Input<'a>| {
        let (rest, matched) = parser(input)?;
        Ok((rest, matched.token()))
    }
}

/// `min*max parser`: between `min` and `max` (unbounded when `None`) matches,
/// as many as possible.
///
/// A match that consumes nothing ends the repetition, so a repeated rule that
/// can match the empty string cannot loop forever.
pub fn repeat<'a, O, F>(
    min: usize,
    max: Option<usize>,
    mut parser: F,
) -> impl FnMut(Input<'a>) -> PResult<'a, Vec<O>>
where
    F: Parser<Input<'a>, O, SyntaxError>,
{
    move |input: Input<'a>| {
        let mut items = Vec::new();
        let mut rest = input;
        let mut last_error = None;
        while max.map_or(true, |max| items.len() < max) {
            match parser.parse(rest) {
                Ok((next, _)) if next.offset() == rest.offset() => break,
                Ok((next, item)) => {
                    items.push(item);
                    rest = next;
                }
                Err(Err::Error(error)) => {
                    last_error = Some(error);
                    break;
                }
                Err(error) => return Err(error),
            }
        }
        if items.len() < min {
            let error = last_error.unwrap_or_else(|| SyntaxError::at(rest.offset()));
            return Err(Err::Error(error));
        }
        Ok((rest, items))
    }
}

/// `*parser`
pub fn many<'a, O, F>(parser: F) -> impl FnMut(Input<'a>) -> PResult<'a, Vec<O>>
where
    F: Parser<Input<'a>, O, SyntaxError>,
{
    repeat(0, None, parser)
}

/// `1*parser`
pub fn some<'a, O, F>(parser: F) -> impl FnMut(Input<'a>) -> PResult<'a, Vec<O>>
where
    F: Parser<Input<'a>, O, SyntaxError>,
{
    repeat(1, None, parser)
}

/// `<count>parser`
pub fn exactly<'a, O, F>(count: usize, parser: F) -> impl FnMut(Input<'a>) -> PResult<'a, Vec<O>>
where
    F: Parser<Input<'a>, O, SyntaxError>,
{
    repeat(count, Some(count), parser)
}

/// `item *( separator item )`, with at least `min_rest` separated items.
pub fn list_of<'a, S, T>(
    min_rest: usize,
    item: impl Fn(Input<'a>) -> PResult<'a, T>,
    separator: impl Fn(Input<'a>) -> PResult<'a, S>,
) -> impl Fn(Input<'a>) -> PResult<'a, List<S, T>> {
    move |input: Input<'a>| {
        let (input, first) = item(input)?;
        let (input, rest) = repeat(min_rest, None, pair(&separator, &item))(input)?;
        let rest = rest
            .into_iter()
            .map(|(separator, value)| Item { separator, value })
            .collect();
        Ok((input, List { first, rest }))
    }
}

/// `item *( separator item )`
pub fn list<'a, S, T>(
    item: impl Fn(Input<'a>) -> PResult<'a, T>,
    separator: impl Fn(Input<'a>) -> PResult<'a, S>,
) -> impl Fn(Input<'a>) -> PResult<'a, List<S, T>> {
    list_of(0, item, separator)
}

/// `literal value`
pub fn prefixed<'a, T, F>(
    literal: &'static str,
    mut value: F,
) -> impl FnMut(Input<'a>) -> PResult<'a, Prefixed<'a, T>>
where
    F: Parser<Input<'a>, T, SyntaxError>,
{
    move |input: Input<'a>| {
        let (input, prefix) = lit(literal)(input)?;
        let (input, value) = value.parse(input)?;
        Ok((input, Prefixed { prefix, value }))
    }
}

/// `value literal`
pub fn suffixed<'a, T, F>(
    mut value: F,
    literal: &'static str,
) -> impl FnMut(Input<'a>) -> PResult<'a, Suffixed<'a, T>>
where
    F: Parser<Input<'a>, T, SyntaxError>,
{
    move |input: Input<'a>| {
        let (input, value) = value.parse(input)?;
        let (input, suffix) = lit(literal)(input)?;
        Ok((input, Suffixed { value, suffix }))
    }
}

/// `head [ tail ]`. A tail that matches nothing counts as absent.
pub fn chain<'a, H, T, F, G>(mut head: F, mut tail: G) -> impl FnMut(Input<'a>) -> PResult<'a, Chain<H, T>>
where
    F: Parser<Input<'a>, H, SyntaxError>,
    G: Parser<Input<'a>, T, SyntaxError>,
{
    move |input: Input<'a>| {
        let (input, head) = head.parse(input)?;
        match tail.parse(input) {
            Ok((rest, tail)) if rest.offset() > input.offset() => {
                Ok((rest, Chain { head, tail: Some(tail) }))
            }
            Ok(_) | Err(Err::Error(_)) => Ok((input, Chain { head, tail: None })),
            Err(error) => Err(error),
        }
    }
}

/// `[ parser ]`, where a match of nothing counts as absent.
pub fn opt_some<'a, O, F>(mut parser: F) -> impl FnMut(Input<'a>) -> PResult<'a, Option<O>>
where
    F: Parser<Input<'a>, O, SyntaxError>,
{
    move |input: Input<'a>| match parser.parse(input) {
        Ok((rest, value)) if rest.offset() > input.offset() => Ok((rest, Some(value))),
        Ok(_) | Err(Err::Error(_)) => Ok((input, None)),
        Err(error) => Err(error),
    }
}

/// `head tail` where the tail is required.
pub fn chain_some<'a, H, T, F, G>(
    mut head: F,
    mut tail: G,
) -> impl FnMut(Input<'a>) -> PResult<'a, Chain<H, T>>
where
    F: Parser<Input<'a>, H, SyntaxError>,
    G: Parser<Input<'a>, T, SyntaxError>,
{
    move |input: Input<'a>| {
        let (input, head) = head.parse(input)?;
        let (input, tail) = tail.parse(input)?;
        Ok((input, Chain { head, tail: Some(tail) }))
    }
}

/// A word of the grammar that must not run on into an identifier.
pub fn keyword<'a>(word: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, Token<'a>> {
    move |input: Input<'a>| {
        let (rest, token) = lit(word)(input)?;
        match rest.peek() {
            Some(c) if c == '_' || c.is_alphanumeric() => {
                Err(Err::Error(SyntaxError::at(rest.offset())))
            }
            _ => Ok((rest, token)),
        }
    }
}

/// Same as [`keyword`], ignoring ASCII case.
pub fn keyword_ci<'a>(word: &'static str) -> impl Fn(Input<'a>) -> PResult<'a, Token<'a>> {
    move |input: Input<'a>| {
        let (rest, token) = lit_ci(word)(input)?;
        match rest.peek() {
            Some(c) if c == '_' || c.is_alphanumeric() => {
                Err(Err::Error(SyntaxError::at(rest.offset())))
            }
            _ => Ok((rest, token)),
        }
    }
}

/// Succeeds, consuming nothing, when the text continues with one of `texts`
/// (compared without regard to ASCII case).
pub fn lookahead<'a>(texts: &'static [&'static str]) -> impl Fn(Input<'a>) -> PResult<'a, ()> {
    move |input: Input<'a>| {
        let rest = input.as_str();
        let found = texts.iter().any(|text| {
            rest.get(..text.len())
                .map_or(false, |head| head.eq_ignore_ascii_case(text))
        });
        if found {
            Ok((input, ()))
        } else {
            Err(Err::Error(SyntaxError::at(input.offset())))
        }
    }
}

/// Succeeds, consuming nothing, at the end of the input.
pub fn end_of_input(input: Input<'_>) -> PResult<'_, ()> {
    if input.is_empty() {
        Ok((input, ()))
    } else {
        Err(Err::Error(SyntaxError::at(input.offset())))
    }
}

#[cfg(test)]
mod tests {
    use nom::branch::alt;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::error::FailureKind;
    use crate::options::ParseOptions;

    fn digit(input: Input<'_>) -> PResult<'_, Token<'_>> {
        range('0', '9')(input)
    }

    #[test]
    fn literal_is_case_sensitive() {
        let input = Input::new("eq 1");
        let (rest, token) = lit("eq")(input).unwrap();
        assert_eq!(token.text(), "eq");
        assert_eq!(rest.offset(), 2);

        assert!(lit("eq")(Input::new("EQ 1")).is_err());
        assert!(lit_ci("eq")(Input::new("EQ 1")).is_ok());
    }

    #[test]
    fn literal_at_end_of_input_mismatches() {
        assert!(lit("$filter")(Input::new("$fil")).is_err());
        assert!(lit("a")(Input::new("")).is_err());
    }

    #[test]
    fn punct_accepts_both_spellings() {
        let open = punct("(", "%28");

        assert!(!open(Input::new("(")).unwrap().1.is_encoded());
        assert!(open(Input::new("%28")).unwrap().1.is_encoded());
        assert_eq!(open(Input::new("%28")).unwrap().0.offset(), 3);
        assert!(open(Input::new("%29")).is_err());
    }

    #[test]
    fn alternation_takes_the_first_match() {
        let input = Input::new("abc");
        let (rest, token) = alt((lit("a"), lit("ab")))(input).unwrap();
        assert_eq!(token.text(), "a");
        assert_eq!(rest.as_str(), "bc");
    }

    #[test]
    fn repeat_honors_bounds() {
        let input = Input::new("12345x");

        let (rest, digits) = repeat(1, Some(3), digit)(input).unwrap();
        assert_eq!(digits.len(), 3);
        assert_eq!(rest.as_str(), "45x");

        let (rest, digits) = many(digit)(input).unwrap();
        assert_eq!(digits.len(), 5);
        assert_eq!(rest.as_str(), "x");

        assert!(repeat(6, None, digit)(input).is_err());
        assert!(exactly(4, digit)(Input::new("123")).is_err());
    }

    #[test]
    fn repeat_stops_on_empty_matches() {
        let input = Input::new("abc");
        let (rest, items) = many(many(digit))(input).unwrap();
        assert!(items.is_empty());
        assert_eq!(rest, input);
    }

    #[test]
    fn some_needs_one_match() {
        let error = some(digit)(Input::new("abc")).unwrap_err();
        assert!(matches!(error, Err::Error(ref error) if error.offset == 0));

        let (rest, digits) = some(digit)(Input::new("1a")).unwrap();
        assert_eq!(digits.len(), 1);
        assert_eq!(rest.as_str(), "a");
        assert_eq!(rest.offset(), 1);
    }

    #[test]
    fn optional_parts_leave_the_cursor_when_absent() {
        let input = Input::new("abc");

        let (rest, value) = opt_some(digit)(input).unwrap();
        assert!(value.is_none());
        assert_eq!(rest, input);

        let (rest, value) = opt_some(many(digit))(input).unwrap();
        assert!(value.is_none());
        assert_eq!(rest, input);

        let (rest, value) = opt_some(digit)(Input::new("7c")).unwrap();
        assert_eq!(value.map(|token| token.text()), Some("7"));
        assert_eq!(rest.offset(), 1);

        let (rest, chained) = chain(digit, digit)(Input::new("1a")).unwrap();
        assert_eq!(chained.head.text(), "1");
        assert!(chained.tail.is_none());
        assert_eq!(rest.offset(), 1);

        let (rest, chained) = chain(digit, many(digit))(Input::new("1a")).unwrap();
        assert!(chained.tail.is_none());
        assert_eq!(rest.as_str(), "a");
    }

    #[test]
    fn list_keeps_separators() {
        let input = Input::new("1,2,3)");
        let (rest, items) = list(digit, punct(",", "%2C"))(input).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(
            items.iter().map(|token| token.text()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        assert_eq!(rest.as_str(), ")");
    }

    #[test]
    fn list_does_not_eat_a_dangling_separator() {
        let (rest, items) = list(digit, punct(",", "%2C"))(Input::new("1,x")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(rest.as_str(), ",x");
    }

    #[test]
    fn keyword_needs_a_boundary() {
        assert!(keyword("null")(Input::new("null)")).is_ok());
        assert!(keyword("null")(Input::new("nullable")).is_err());
    }

    #[test]
    fn nesting_limit_is_a_failure() {
        fn parens(input: Input<'_>) -> PResult<'_, usize> {
            nested(input, |input| {
                let (input, _) = lit("(")(input)?;
                let (input, inner) = nom::combinator::opt(parens)(input)?;
                let (input, _) = lit(")")(input)?;
                Ok((input, inner.unwrap_or(0) + 1))
            })
        }

        let options = ParseOptions::default().with_max_depth(4);
        let (rest, depth) = parens(Input::with_options("((()))", &options)).unwrap();
        assert_eq!(depth, 3);
        assert_eq!(rest.depth(), 0);

        let options = ParseOptions::default().with_max_depth(3);
        match parens(Input::with_options("(((())))", &options)) {
            Err(Err::Failure(error)) => {
                assert_eq!(error.kind, FailureKind::RecursionLimit);
                assert_eq!(error.offset, 3);
            }
            other => panic!("expected a recursion failure, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn failure_leaves_no_trace(text in "[a-z0-9]{0,8}") {
            let input = Input::new(&text);
            if let Err(Err::Error(error)) = lit("$")(input) {
                prop_assert_eq!(error.offset, 0);
            }
            let (rest, items) = many(lit("$"))(input).unwrap();
            prop_assert!(items.is_empty());
            prop_assert_eq!(rest, input);
        }

        #[test]
        fn repeat_never_exceeds_its_maximum(text in "[0-9]{0,12}", max in 0usize..6) {
            let (rest, items) = repeat(0, Some(max), digit)(Input::new(&text)).unwrap();
            prop_assert_eq!(items.len(), text.len().min(max));
            prop_assert_eq!(rest.offset(), items.len());
        }
    }
}
