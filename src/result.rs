use nom::Err;

use crate::combinator::PResult;
use crate::error::{Error, SyntaxError};
use crate::input::Input;

/// Outcome of running a rule on a prefix of the input.
///
/// The value is present exactly when the rule matched. The remainder is the
/// cursor after the match, or the input cursor itself when the rule failed.
#[derive(Debug, Clone)]
pub struct ParseResult<'a, T> {
    pub value: Option<T>,
    pub rest: Input<'a>,
    pub error: Option<SyntaxError>,
}

impl<'a, T> ParseResult<'a, T> {
    pub(crate) fn from_nom(input: Input<'a>, result: PResult<'a, T>) -> Self {
        match result {
            Ok((rest, value)) => ParseResult {
                value: Some(value),
                rest,
                error: None,
            },
            Err(Err::Error(error)) | Err(Err::Failure(error)) => ParseResult {
                value: None,
                rest: input,
                error: Some(error),
            },
            Err(Err::Incomplete(_)) => ParseResult {
                value: None,
                rest: input,
                error: Some(SyntaxError::at(input.offset())),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.value.is_some()
    }

    /// Bytes consumed by the match, zero on failure.
    pub fn consumed(&self, input: Input<'a>) -> usize {
        self.rest.offset() - input.offset()
    }

    /// The value, requiring the whole input to have been consumed.
    pub fn finish(self, rule: &'static str) -> Result<T, Error> {
        let limit = self.rest.options().max_depth;
        match (self.value, self.error) {
            (Some(_), _) if !self.rest.is_empty() => Err(Error::TrailingInput {
                rule,
                offset: self.rest.offset(),
            }),
            (Some(value), _) => Ok(value),
            (None, Some(error)) => Err(Error::from_syntax(rule, error, limit)),
            (None, None) => Err(Error::Syntax {
                rule,
                offset: self.rest.offset(),
                expected: None,
            }),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<'a, U> {
        ParseResult {
            value: self.value.map(f),
            rest: self.rest,
            error: self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::combinator::lit;

    #[test]
    fn failure_keeps_the_input_cursor() {
        let input = Input::new("abc");
        let result = ParseResult::from_nom(input, lit("x")(input));
        assert!(!result.is_success());
        assert_eq!(result.rest, input);
        assert_eq!(result.consumed(input), 0);
    }

    #[test]
    fn finish_rejects_trailing_input() {
        let input = Input::new("abc");
        let result = ParseResult::from_nom(input, lit("ab")(input));
        assert_eq!(result.consumed(input), 2);
        assert_eq!(
            result.finish("ab").unwrap_err(),
            Error::TrailingInput { rule: "ab", offset: 2 }
        );
        let result = ParseResult::from_nom(input, lit("abc")(input));
        assert_eq!(result.finish("abc").unwrap().text(), "abc");
    }
}
