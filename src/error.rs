use nom::error::{ContextError, ErrorKind, ParseError};
use thiserror::Error;

use crate::input::Input;

/// Why a single parse attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The input does not match the rule. Alternatives may still be tried.
    Mismatch,
    /// The nesting limit of the parse was reached. This aborts the whole parse.
    RecursionLimit,
}

/// Error type threaded through the rule parsers.
///
/// Alternatives keep the failure that got furthest into the input, and
/// `expected` names the innermost rule that failed there. That is the failure a
/// reader wants to see when a long URL is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntaxError {
    pub offset: usize,
    pub expected: Option<&'static str>,
    pub kind: FailureKind,
}

impl SyntaxError {
    pub fn at(offset: usize) -> Self {
        SyntaxError {
            offset,
            expected: None,
            kind: FailureKind::Mismatch,
        }
    }

    pub fn recursion_limit(offset: usize) -> Self {
        SyntaxError {
            kind: FailureKind::RecursionLimit,
            ..Self::at(offset)
        }
    }

    pub fn expecting(mut self, rule: &'static str) -> Self {
        if self.expected.is_none() {
            self.expected = Some(rule);
        }
        self
    }
}

impl<'a> ParseError<Input<'a>> for SyntaxError {
    fn from_error_kind(input: Input<'a>, _kind: ErrorKind) -> Self {
        SyntaxError::at(input.offset())
    }

    fn append(_input: Input<'a>, _kind: ErrorKind, other: Self) -> Self {
        other
    }

    fn or(self, other: Self) -> Self {
        if other.offset > self.offset || (other.offset == self.offset && self.expected.is_none())
        {
            other
        } else {
            self
        }
    }
}

impl<'a> ContextError<Input<'a>> for SyntaxError {
    fn add_context(_input: Input<'a>, context: &'static str, other: Self) -> Self {
        other.expecting(context)
    }
}

/// Errors reported by the public parse entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{rule}: syntax error at offset {offset}{}", expected_suffix(.expected))]
    Syntax {
        rule: &'static str,
        offset: usize,
        expected: Option<&'static str>,
    },
    #[error("{rule}: unexpected input at offset {offset}")]
    TrailingInput { rule: &'static str, offset: usize },
    #[error("nesting deeper than {limit} levels at offset {offset}")]
    RecursionLimit { limit: usize, offset: usize },
    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

fn expected_suffix(expected: &Option<&'static str>) -> String {
    match expected {
        Some(rule) => format!(", expected {rule}"),
        None => String::new(),
    }
}

impl Error {
    pub(crate) fn from_syntax(rule: &'static str, error: SyntaxError, limit: usize) -> Self {
        match error.kind {
            FailureKind::RecursionLimit => Error::RecursionLimit {
                limit,
                offset: error.offset,
            },
            FailureKind::Mismatch => Error::Syntax {
                rule,
                offset: error.offset,
                expected: error.expected,
            },
        }
    }

    /// Position of the failure in the parsed text, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Syntax { offset, .. }
            | Error::TrailingInput { offset, .. }
            | Error::RecursionLimit { offset, .. } => Some(*offset),
            Error::UnknownRule(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn alternatives_keep_the_furthest_failure() {
        let near = SyntaxError::at(3).expecting("entitySetName");
        let far = SyntaxError::at(9).expecting("keyPredicate");

        assert_eq!(near.or(far), far);
        assert_eq!(far.or(near), far);
    }

    #[test]
    fn context_keeps_the_innermost_rule() {
        let input = Input::new("x");
        let error = SyntaxError::add_context(input, "primitiveLiteral", SyntaxError::at(0));
        let error = SyntaxError::add_context(input, "commonExpr", error);

        assert_eq!(error.expected, Some("primitiveLiteral"));
    }

    #[test]
    fn display() {
        let error = Error::Syntax {
            rule: "odataUri",
            offset: 12,
            expected: Some("OPEN"),
        };
        assert_eq!(
            error.to_string(),
            "odataUri: syntax error at offset 12, expected OPEN"
        );
        assert_eq!(
            Error::RecursionLimit {
                limit: 64,
                offset: 70
            }
            .to_string(),
            "nesting deeper than 64 levels at offset 70"
        );
    }
}
