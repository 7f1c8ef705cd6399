//! Punctuation (section 9) and the RFC 5234 core rules (appendix C).

use nom::branch::alt;
use nom::combinator::{map, opt};

use crate::combinator::{class, lexeme, lit, lit_ci, punct, range, repeat, some, PResult};
use crate::cst::punct::{
    At, Bws, Close, Colon, Comma, Open, Rws, Semi, Sign, Squote, Star,
};
use crate::cst::Token;
use crate::input::Input;

//* ;------------------------------------------------------------------------------
//* ; 9. Punctuation
//* ;------------------------------------------------------------------------------
//*
//* RWS = 1*( SP / HTAB / "%20" / "%09" )  ; "required" whitespace
rule! {
    pub fn RWS<'a>(input) -> Rws<'a> {
        let (input, text) = lexeme(some(whitespace))(input)?;
        Ok((input, Rws { text }))
    }
}

//* BWS =  *( SP / HTAB / "%20" / "%09" )  ; "bad" whitespace
pub fn BWS(input: Input<'_>) -> PResult<'_, Bws<'_>> {
    let (input, text) = opt(lexeme(some(whitespace)))(input)?;
    Ok((input, Bws { text }))
}

fn whitespace(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((lit(" "), lit("\t"), lit("%20"), lit("%09")))(input)
}

//* AT     = "@" / "%40"
rule! {
    pub fn AT<'a>(input) -> At<'a> {
        punct("@", "%40")(input)
    }
}

//* COLON  = ":" / "%3A"
rule! {
    pub fn COLON<'a>(input) -> Colon<'a> {
        punct(":", "%3A")(input)
    }
}

//* COMMA  = "," / "%2C"
rule! {
    pub fn COMMA<'a>(input) -> Comma<'a> {
        punct(",", "%2C")(input)
    }
}

//* EQ     = "="
rule! {
    pub fn EQ<'a>(input) -> Token<'a> {
        lit("=")(input)
    }
}

//* SIGN   = "+" / "%2B" / "-"
rule! {
    pub fn SIGN<'a>(input) -> Sign<'a> {
        alt((
            map(lit("+"), Sign::Plus),
            map(lit_ci("%2B"), Sign::EncodedPlus),
            map(lit("-"), Sign::Minus),
        ))(input)
    }
}

//* SEMI   = ";" / "%3B"
rule! {
    pub fn SEMI<'a>(input) -> Semi<'a> {
        punct(";", "%3B")(input)
    }
}

//* STAR   = "*" / "%2A"
rule! {
    pub fn STAR<'a>(input) -> Star<'a> {
        punct("*", "%2A")(input)
    }
}

//* SQUOTE = "'" / "%27"
rule! {
    pub fn SQUOTE<'a>(input) -> Squote<'a> {
        punct("'", "%27")(input)
    }
}

//* OPEN  = "(" / "%28"
rule! {
    pub fn OPEN<'a>(input) -> Open<'a> {
        punct("(", "%28")(input)
    }
}

//* CLOSE = ")" / "%29"
rule! {
    pub fn CLOSE<'a>(input) -> Close<'a> {
        punct(")", "%29")(input)
    }
}

//* ;------------------------------------------------------------------------------
//* ; C. ABNF core definitions [RFC5234]
//* ;------------------------------------------------------------------------------
//*
//* ALPHA  = %x41-5A / %x61-7A
pub fn ALPHA(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(|c| c.is_ascii_alphabetic())(input)
}

//* DIGIT  = %x30-39
pub fn DIGIT(input: Input<'_>) -> PResult<'_, Token<'_>> {
    range('0', '9')(input)
}

// HEXDIG = DIGIT / "A" / "B" / "C" / "D" / "E" / "F"
pub fn HEXDIG(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(|c| c.is_ascii_hexdigit())(input)
}

//* A-to-F = "A" / "B" / "C" / "D" / "E" / "F"
pub fn A_to_F(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(|c| matches!(c, 'A'..='F' | 'a'..='f'))(input)
}

//* DQUOTE = %x22
pub fn DQUOTE(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lit("\"")(input)
}

//* SP     = %x20
pub fn SP(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lit(" ")(input)
}

//* HTAB   = %x09
pub fn HTAB(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lit("\t")(input)
}

//* VCHAR = %x21-7E
pub fn VCHAR(input: Input<'_>) -> PResult<'_, Token<'_>> {
    range('\u{21}', '\u{7e}')(input)
}

//* oneToNine       = "1" / "2" / "3" / "4" / "5" / "6" / "7" / "8" / "9"
pub fn oneToNine(input: Input<'_>) -> PResult<'_, Token<'_>> {
    range('1', '9')(input)
}

/// `min*max DIGIT` as one token.
pub fn digits<'a>(
    min: usize,
    max: Option<usize>,
) -> impl FnMut(Input<'a>) -> PResult<'a, Token<'a>> {
    lexeme(repeat(min, max, DIGIT))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::Syntax;

    #[test]
    fn required_whitespace_mixes_spellings() {
        let (rest, rws) = RWS(Input::new(" %20\t%09x")).unwrap();
        assert_eq!(rws.text.text(), " %20\t%09");
        assert_eq!(rest.as_str(), "x");

        assert!(RWS(Input::new("x")).is_err());
    }

    #[test]
    fn bad_whitespace_may_be_empty() {
        let input = Input::new("x");
        let (rest, bws) = BWS(input).unwrap();
        assert_eq!(bws.text, None);
        assert_eq!(rest, input);
        assert_eq!(bws.span(), None);
    }

    #[test]
    fn sign_records_the_spelling() {
        assert!(matches!(SIGN(Input::new("+1")).unwrap().1, Sign::Plus(_)));
        assert!(matches!(SIGN(Input::new("%2b1")).unwrap().1, Sign::EncodedPlus(_)));
        assert!(matches!(SIGN(Input::new("-1")).unwrap().1, Sign::Minus(_)));
    }

    #[test]
    fn failing_punctuation_names_itself() {
        let error = match CLOSE(Input::new("]")) {
            Err(nom::Err::Error(error)) => error,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(error.expected, Some("CLOSE"));
        assert_eq!(error.offset, 0);
    }
}
