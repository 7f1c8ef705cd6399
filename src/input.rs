use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use std::str::{CharIndices, Chars};

use nom::{
    Compare, CompareResult, InputIter, InputLength, InputTake, Needed, Offset, Slice,
    UnspecializedInput,
};

use crate::cst::Token;
use crate::options::ParseOptions;

static DEFAULT_OPTIONS: ParseOptions = ParseOptions::DEFAULT;

/// An immutable cursor over the text being parsed.
///
/// `data` is the not yet consumed part of the source and `offset` its byte
/// position inside the whole source. Every advance produces a new value that
/// borrows the same buffer, so any number of cursors (one per alternative being
/// tried) can coexist.
///
/// Besides the text the cursor carries the options of the parse and the current
/// nesting depth; both are plain values, there is no shared mutable state.
#[derive(Clone, Copy)]
pub struct Input<'a> {
    data: &'a str,
    offset: usize,
    depth: usize,
    options: &'a ParseOptions,
}

impl<'a> Input<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_options(text, &DEFAULT_OPTIONS)
    }

    pub fn with_options(text: &'a str, options: &'a ParseOptions) -> Self {
        Input {
            data: text,
            offset: 0,
            depth: 0,
            options,
        }
    }

    /// The remaining text.
    pub fn as_str(&self) -> &'a str {
        self.data
    }

    /// Byte offset of the cursor inside the original text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The next character, `None` at the end of the input.
    pub fn peek(&self) -> Option<char> {
        self.data.chars().next()
    }

    /// A new cursor `count` characters further. Advancing past the end stops at
    /// the end: running out of input is a mismatch for the caller, not an error.
    pub fn advance(&self, count: usize) -> Self {
        let bytes = self
            .data
            .char_indices()
            .nth(count)
            .map(|(index, _)| index)
            .unwrap_or(self.data.len());
        self.slice(bytes..)
    }

    pub fn options(&self) -> &'a ParseOptions {
        self.options
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn with_depth(self, depth: usize) -> Self {
        Input { depth, ..self }
    }

    /// Turns a recognized slice of the input into a terminal node.
    pub(crate) fn token(self) -> Token<'a> {
        Token::new(self.data, self.offset)
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input({}, {:?})", self.offset, self.data)
    }
}

impl PartialEq for Input<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.data == other.data && self.depth == other.depth
    }
}

impl Eq for Input<'_> {}

impl UnspecializedInput for Input<'_> {}

impl InputLength for Input<'_> {
    fn input_len(&self) -> usize {
        self.data.len()
    }
}

impl InputTake for Input<'_> {
    fn take(&self, count: usize) -> Self {
        Input {
            data: &self.data[..count],
            ..*self
        }
    }

    fn take_split(&self, count: usize) -> (Self, Self) {
        let (prefix, suffix) = self.data.split_at(count);
        (
            Input {
                data: suffix,
                offset: self.offset + count,
                ..*self
            },
            Input {
                data: prefix,
                ..*self
            },
        )
    }
}

impl<'a> InputIter for Input<'a> {
    type Item = char;
    type Iter = CharIndices<'a>;
    type IterElem = Chars<'a>;

    fn iter_indices(&self) -> Self::Iter {
        self.data.char_indices()
    }

    fn iter_elements(&self) -> Self::IterElem {
        self.data.chars()
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        InputIter::position(&self.data, predicate)
    }

    fn slice_index(&self, count: usize) -> Result<usize, Needed> {
        InputIter::slice_index(&self.data, count)
    }
}

impl<'b> Compare<&'b str> for Input<'_> {
    fn compare(&self, t: &'b str) -> CompareResult {
        Compare::compare(&self.data, t)
    }

    /// ASCII case folding only. Grammar literals are ASCII, and a match then
    /// always ends on a character boundary.
    fn compare_no_case(&self, t: &'b str) -> CompareResult {
        let data = self.data.as_bytes();
        let literal = t.as_bytes();
        let common = data.len().min(literal.len());
        if !data[..common].eq_ignore_ascii_case(&literal[..common]) {
            CompareResult::Error
        } else if data.len() < literal.len() {
            CompareResult::Incomplete
        } else {
            CompareResult::Ok
        }
    }
}

impl Slice<Range<usize>> for Input<'_> {
    fn slice(&self, range: Range<usize>) -> Self {
        Input {
            data: &self.data[range.start..range.end],
            offset: self.offset + range.start,
            ..*self
        }
    }
}

impl Slice<RangeTo<usize>> for Input<'_> {
    fn slice(&self, range: RangeTo<usize>) -> Self {
        Input {
            data: &self.data[..range.end],
            ..*self
        }
    }
}

impl Slice<RangeFrom<usize>> for Input<'_> {
    fn slice(&self, range: RangeFrom<usize>) -> Self {
        Input {
            data: &self.data[range.start..],
            offset: self.offset + range.start,
            ..*self
        }
    }
}

impl Slice<RangeFull> for Input<'_> {
    fn slice(&self, _: RangeFull) -> Self {
        *self
    }
}

impl Offset for Input<'_> {
    fn offset(&self, second: &Self) -> usize {
        second.offset - self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_and_advance_do_not_touch_the_original() {
        let input = Input::new("users");
        let next = input.advance(2);

        assert_eq!(input.peek(), Some('u'));
        assert_eq!(next.peek(), Some('e'));
        assert_eq!(next.offset(), 2);
        assert_eq!(input.offset(), 0);
    }

    #[test]
    fn advance_past_the_end_stops_at_the_end() {
        let input = Input::new("ab").advance(10);

        assert!(input.is_empty());
        assert_eq!(input.offset(), 2);
        assert_eq!(input.peek(), None);
    }

    #[test]
    fn advance_counts_characters_not_bytes() {
        let input = Input::new("äb").advance(1);

        assert_eq!(input.peek(), Some('b'));
        assert_eq!(input.offset(), 2);
    }

    #[test]
    fn take_split_keeps_absolute_offsets() {
        let input = Input::new("$filter=x").advance(1);
        let (rest, taken) = input.take_split(6);

        assert_eq!(taken.as_str(), "filter");
        assert_eq!(taken.offset(), 1);
        assert_eq!(rest.as_str(), "=x");
        assert_eq!(rest.offset(), 7);
        assert_eq!(Offset::offset(&input, &rest), 6);
    }

    #[test]
    fn token_reports_its_position() {
        let input = Input::new("a/b").slice(2..);
        let token = input.token();

        assert_eq!(token.text(), "b");
        assert_eq!(token.offset(), 2);
    }

    #[test]
    fn case_folding_is_ascii_only() {
        let input = Input::new("$s\u{212A}iptoken=x");

        assert_eq!(input.compare_no_case("$skiptoken"), CompareResult::Error);
        assert_eq!(Input::new("$SKIPTOKEN=").compare_no_case("$skiptoken"), CompareResult::Ok);
        assert_eq!(Input::new("$SKIP").compare_no_case("$skiptoken"), CompareResult::Incomplete);
        assert_eq!(Input::new("\u{212A}").compare_no_case("kk"), CompareResult::Error);
    }
}
