//! URI (RFC 3986) and IRI (RFC 3987) rules, plus the character classes the
//! OData rules build on.

use std::net::Ipv6Addr;

use nom::branch::alt;
use nom::combinator::{map, not, opt, verify};
use nom::sequence::{pair, terminated, tuple};

use super::*;
use crate::combinator::{class, exactly, lexeme, lit, lit_ci, many, range, some, PResult};
use crate::cst::uri::{
    Authority, AuthorityPath, HierPart, Host, IpAddress, IpLiteral, Port, Uri, UriFragment,
    UriQuery, Userinfo,
};
use crate::cst::Token;
use crate::input::Input;

fn is_unreserved(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

fn is_other_delim(c: char) -> bool {
    matches!(c, '!' | '(' | ')' | '*' | '+' | ',' | ';')
}

//* ;------------------------------------------------------------------------------
//* ; A. URI syntax [RFC3986]
//* ;------------------------------------------------------------------------------
//*
//* URI           = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
rule! {
    pub fn URI<'a>(input) -> Uri<'a> {
        let (input, (scheme, colon, hier_part)) = tuple((scheme, lit(":"), hier_part))(input)?;
        let (input, query) = opt(map(pair(lit("?"), query), |(question_mark, query)| UriQuery {
            question_mark,
            query,
        }))(input)?;
        let (input, fragment) = opt(map(pair(lit("#"), fragment), |(hash, fragment)| {
            UriFragment { hash, fragment }
        }))(input)?;
        Ok((
            input,
            Uri {
                scheme,
                colon,
                hier_part,
                query,
                fragment,
            },
        ))
    }
}

//* hier-part     = "//" authority path-abempty
//*               / path-absolute
//*               / path-rootless
//* ;              / path-empty
rule! {
    pub fn hier_part<'a>(input) -> HierPart<'a> {
        alt((
            map(
                tuple((lit("//"), authority, path_abempty)),
                |(slashes, authority, path)| {
                    HierPart::Authority(AuthorityPath {
                        slashes,
                        authority,
                        path,
                    })
                },
            ),
            map(path_absolute, HierPart::Absolute),
            map(path_rootless, HierPart::Rootless),
        ))(input)
    }
}

//* scheme        = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
pub fn scheme(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(pair(
        ALPHA,
        many(class(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))),
    ))(input)
}

//* authority     = [ userinfo "@" ] host [ ":" port ]
rule! {
    pub fn authority<'a>(input) -> Authority<'a> {
        let (input, userinfo) = opt(map(pair(userinfo, lit("@")), |(userinfo, at)| Userinfo {
            userinfo,
            at,
        }))(input)?;
        let (input, host) = host(input)?;
        let (input, port) = opt(map(pair(lit(":"), port), |(colon, digits)| Port {
            colon,
            digits,
        }))(input)?;
        Ok((
            input,
            Authority {
                userinfo,
                host,
                port,
            },
        ))
    }
}

//* userinfo      = *( unreserved / pct-encoded / sub-delims / ":" )
pub fn userinfo(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(many(alt((unreserved, pct_encoded, sub_delims, lit(":")))))(input)
}

//* host          = IP-literal / IPv4address / reg-name
// An IPv4 address only counts as one when the host does not go on as a
// registered name (`10.0.0.1.nip.io`).
rule! {
    pub fn host<'a>(input) -> Host<'a> {
        alt((
            map(IP_literal, Host::IpLiteral),
            map(
                terminated(
                    IPv4address,
                    not(alt((unreserved, pct_encoded, sub_delims))),
                ),
                Host::Ipv4,
            ),
            map(reg_name, Host::RegName),
        ))(input)
    }
}

//* port          = *DIGIT
pub fn port(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(many(DIGIT))(input)
}

//* IP-literal    = "[" ( IPv6address / IPvFuture  ) "]"
rule! {
    pub fn IP_literal<'a>(input) -> IpLiteral<'a> {
        let (input, open) = lit("[")(input)?;
        let (input, address) = alt((
            map(IPv6address, IpAddress::V6),
            map(IPvFuture, IpAddress::Future),
        ))(input)?;
        let (input, close) = lit("]")(input)?;
        Ok((input, IpLiteral { open, address, close }))
    }
}

//* IPvFuture     = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
pub fn IPvFuture(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(tuple((
        lit_ci("v"),
        some(HEXDIG),
        lit("."),
        some(alt((unreserved, sub_delims, lit(":")))),
    )))(input)
}

//* IPv6address   =                            6( h16 ":" ) ls32
//*                  /                       "::" 5( h16 ":" ) ls32
//*                  / [               h16 ] "::" 4( h16 ":" ) ls32
//*                  / [ *1( h16 ":" ) h16 ] "::" 3( h16 ":" ) ls32
//*                  / [ *2( h16 ":" ) h16 ] "::" 2( h16 ":" ) ls32
//*                  / [ *3( h16 ":" ) h16 ] "::"    h16 ":"   ls32
//*                  / [ *4( h16 ":" ) h16 ] "::"              ls32
//*                  / [ *5( h16 ":" ) h16 ] "::"              h16
//*                  / [ *6( h16 ":" ) h16 ] "::"
//* h16           = 1*4HEXDIG
//* ls32          = ( h16 ":" h16 ) / IPv4address
// The alternatives above only differ in where the "::" sits; the run of address
// characters is checked against the same grammar by the standard library.
pub fn IPv6address(input: Input<'_>) -> PResult<'_, Token<'_>> {
    verify(
        lexeme(some(class(|c| c.is_ascii_hexdigit() || c == ':' || c == '.'))),
        |address: &Token<'_>| address.text().parse::<Ipv6Addr>().is_ok(),
    )(input)
}

//* IPv4address   = dec-octet "." dec-octet "." dec-octet "." dec-octet
pub fn IPv4address(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(tuple((
        dec_octet,
        lit("."),
        dec_octet,
        lit("."),
        dec_octet,
        lit("."),
        dec_octet,
    )))(input)
}

//* dec-octet     = "1" 2DIGIT            ; 100-199
//*               / "2" %x30-34 DIGIT     ; 200-249
//*               / "25" %x30-35          ; 250-255
//*               / %x31-39 DIGIT         ; 10-99
//*               / DIGIT                 ; 0-9
pub fn dec_octet(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        lexeme(pair(lit("1"), exactly(2, DIGIT))),
        lexeme(tuple((lit("2"), range('0', '4'), DIGIT))),
        lexeme(pair(lit("25"), range('0', '5'))),
        lexeme(pair(range('1', '9'), DIGIT)),
        DIGIT,
    ))(input)
}

//* reg-name      = *( unreserved / pct-encoded / sub-delims )
pub fn reg_name(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(many(alt((unreserved, pct_encoded, sub_delims))))(input)
}

//* path-abempty  = *( "/" segment )
pub fn path_abempty(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(many(pair(lit("/"), segment)))(input)
}

//* path-absolute = "/" [ segment-nz *( "/" segment ) ]
pub fn path_absolute(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(pair(
        lit("/"),
        opt(pair(segment_nz, many(pair(lit("/"), segment)))),
    ))(input)
}

//* path-rootless = segment-nz *( "/" segment )
pub fn path_rootless(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(pair(segment_nz, many(pair(lit("/"), segment))))(input)
}

//* segment       = *pchar
pub fn segment(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(many(pchar))(input)
}

//* segment-nz    = 1*pchar
pub fn segment_nz(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(some(pchar))(input)
}

//* pchar         = unreserved / pct-encoded / sub-delims / ":" / "@"
pub fn pchar(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        class(|c| {
            is_unreserved(c) || is_other_delim(c) || matches!(c, '$' | '&' | '\'' | '=' | ':' | '@')
        }),
        pct_encoded,
    ))(input)
}

//* query         = *( pchar / "/" / "?" )
pub fn query(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(many(alt((pchar, lit("/"), lit("?")))))(input)
}

//* fragment      = *( pchar / "/" / "?" )
pub fn fragment(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(many(alt((pchar, lit("/"), lit("?")))))(input)
}

//* pct-encoded   = "%" HEXDIG HEXDIG
pub fn pct_encoded(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(tuple((lit("%"), HEXDIG, HEXDIG)))(input)
}

//* unreserved    = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub fn unreserved(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(is_unreserved)(input)
}

//* sub-delims     =       "$" / "&" / "'" /                                     "=" / other-delims
pub fn sub_delims(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(|c| matches!(c, '$' | '&' | '\'' | '=') || is_other_delim(c))(input)
}

//* other-delims   = "!" /                   "(" / ")" / "*" / "+" / "," / ";"
pub fn other_delims(input: Input<'_>) -> PResult<'_, Token<'_>> {
    class(is_other_delim)(input)
}

//* pchar-no-SQUOTE       = unreserved / pct-encoded-no-SQUOTE / other-delims / "$" / "&" / "=" / ":" / "@"
pub fn pchar_no_SQUOTE(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        class(|c| {
            is_unreserved(c) || is_other_delim(c) || matches!(c, '$' | '&' | '=' | ':' | '@')
        }),
        pct_encoded_no_SQUOTE,
    ))(input)
}

//* pct-encoded-no-SQUOTE = "%" ( "0" / "1" /   "3" / "4" / "5" / "6" / "8" / "9" / A-to-F ) HEXDIG
//*                       / "%" "2" ( "0" / "1" / "2" / "3" / "4" / "5" / "6" /   "8" / "9" / A-to-F )
pub fn pct_encoded_no_SQUOTE(input: Input<'_>) -> PResult<'_, Token<'_>> {
    verify(pct_encoded, |escape: &Token<'_>| escape.text() != "%27")(input)
}

//* qchar-no-AMP              = unreserved / pct-encoded / other-delims / ":" / "@" / "/" / "?" / "$" / "'" / "="
pub fn qchar_no_AMP(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        class(|c| {
            is_unreserved(c)
                || is_other_delim(c)
                || matches!(c, ':' | '@' | '/' | '?' | '$' | '\'' | '=')
        }),
        pct_encoded,
    ))(input)
}

//* qchar-no-AMP-EQ           = unreserved / pct-encoded / other-delims / ":" / "@" / "/" / "?" / "$" / "'"
pub fn qchar_no_AMP_EQ(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        class(|c| {
            is_unreserved(c) || is_other_delim(c) || matches!(c, ':' | '@' | '/' | '?' | '$' | '\'')
        }),
        pct_encoded,
    ))(input)
}

//* qchar-no-AMP-EQ-AT-DOLLAR = unreserved / pct-encoded / other-delims / ":" /       "/" / "?" /       "'"
pub fn qchar_no_AMP_EQ_AT_DOLLAR(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        class(|c| is_unreserved(c) || is_other_delim(c) || matches!(c, ':' | '/' | '?' | '\'')),
        pct_encoded,
    ))(input)
}

//* qchar-unescaped       = unreserved / pct-encoded-unescaped / other-delims / ":" / "@" / "/" / "?" / "$" / "'" / "="
pub fn qchar_unescaped(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        class(|c| {
            is_unreserved(c)
                || is_other_delim(c)
                || matches!(c, ':' | '@' | '/' | '?' | '$' | '\'' | '=')
        }),
        pct_encoded_unescaped,
    ))(input)
}

//* pct-encoded-unescaped = "%" ( "0" / "1" /   "3" / "4" /   "6" / "7" / "8" / "9" / A-to-F ) HEXDIG
//*                       / "%" "2" ( "0" / "1" /   "3" / "4" / "5" / "6" / "7" / "8" / "9" / A-to-F )
//*                       / "%" "5" ( DIGIT / "A" / "B" /   "D" / "E" / "F" )
pub fn pct_encoded_unescaped(input: Input<'_>) -> PResult<'_, Token<'_>> {
    verify(pct_encoded, |escape: &Token<'_>| {
        !escape.text().eq_ignore_ascii_case("%22") && !escape.text().eq_ignore_ascii_case("%5C")
    })(input)
}

//* qchar-no-AMP-DQUOTE   = qchar-unescaped
//*                       / escape ( escape / quotation-mark )
pub fn qchar_no_AMP_DQUOTE(input: Input<'_>) -> PResult<'_, Token<'_>> {
    alt((
        qchar_unescaped,
        lexeme(pair(escape, alt((map(escape, |_| ()), map(quotation_mark, |_| ()))))),
    ))(input)
}

//* ;------------------------------------------------------------------------------
//* ; B. IRI syntax [RFC3987]
//* ;------------------------------------------------------------------------------
//* ; Note: these are over-generous stubs, for the actual patterns refer to RFC3987
//* ;------------------------------------------------------------------------------
//*
//* IRI-in-header = 1*( VCHAR / obs-text )
pub fn IRI_in_header(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(some(alt((VCHAR, obs_text))))(input)
}

//* IRI-in-query  = 1*qchar-no-AMP
pub fn IRI_in_query(input: Input<'_>) -> PResult<'_, Token<'_>> {
    lexeme(some(qchar_no_AMP))(input)
}

//* obs-text       = %x80-FF
pub fn obs_text(input: Input<'_>) -> PResult<'_, Token<'_>> {
    range('\u{80}', '\u{ff}')(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cst::Syntax;

    #[test]
    fn uri_with_authority() {
        let text = "https://user@example.com:8080/odata/callback?x=1#frag";
        let (rest, uri) = URI(Input::new(text)).unwrap();
        assert!(rest.is_empty());
        assert_eq!(uri.scheme.text(), "https");

        let HierPart::Authority(path) = &uri.hier_part else {
            panic!("expected an authority, got {:?}", uri.hier_part);
        };
        assert_eq!(path.authority.userinfo.as_ref().unwrap().userinfo.text(), "user");
        assert!(matches!(path.authority.host, Host::RegName(name) if name.text() == "example.com"));
        assert_eq!(path.authority.port.as_ref().unwrap().digits.text(), "8080");
        assert_eq!(path.path.text(), "/odata/callback");
        assert_eq!(uri.query.as_ref().unwrap().query.text(), "x=1");
        assert_eq!(uri.fragment.as_ref().unwrap().fragment.text(), "frag");
        assert_eq!(uri.to_source(), text);
    }

    #[test]
    fn hosts() {
        let host_of = |text: &'static str| host(Input::new(text)).unwrap().1;

        assert!(matches!(host_of("10.0.0.1"), Host::Ipv4(_)));
        assert!(matches!(host_of("10.0.0.1.nip.io"), Host::RegName(_)));
        assert!(matches!(host_of("[::1]"), Host::IpLiteral(_)));
        assert!(matches!(host_of("[v1.fe80]"), Host::IpLiteral(_)));
        assert!(IP_literal(Input::new("[1::2::3]")).is_err());
    }

    #[test]
    fn dec_octet_stays_in_range() {
        assert_eq!(dec_octet(Input::new("255")).unwrap().1.text(), "255");
        assert_eq!(dec_octet(Input::new("256")).unwrap().1.text(), "25");
        assert_eq!(dec_octet(Input::new("7")).unwrap().1.text(), "7");
    }

    #[test]
    fn escaped_single_quote_is_not_a_string_character() {
        assert!(pchar_no_SQUOTE(Input::new("%27")).is_err());
        assert!(pchar_no_SQUOTE(Input::new("'")).is_err());
        assert!(pchar_no_SQUOTE(Input::new("%28")).is_ok());
    }

    #[test]
    fn json_string_characters() {
        assert!(qchar_unescaped(Input::new("%22")).is_err());
        assert!(qchar_unescaped(Input::new("%5c")).is_err());
        assert_eq!(qchar_no_AMP_DQUOTE(Input::new("\\\"")).unwrap().1.text(), "\\\"");
        assert_eq!(qchar_no_AMP_DQUOTE(Input::new("%5C%22")).unwrap().1.text(), "%5C%22");
    }
}
