//! JSON values in URLs: complex and collection parameter values.

use serde::Serialize;

use super::expr::RootExpr;
use super::names::{
    ComplexColProperty, ComplexProperty, EntityColNavigationProperty, EntityNavigationProperty,
    PrimitiveColProperty, PrimitiveProperty, Qualified, TermName,
};
use super::punct::{At, Bws, Punct, QuotationMark};
use super::{List, Syntax, Token};

lexical! {
    /// `numberInJSON = [ "-" ] int [ frac ] [ exp ]`
    NumberInJson,
}

node! {
    /// `arrayOrObject`
    pub enum ArrayOrObject<'a> {
        ComplexCol(ComplexColInUri<'a>),
        Complex(ComplexInUri<'a>),
        RootExprCol(RootExprCol<'a>),
        PrimitiveCol(PrimitiveColInUri<'a>),
    }

    /// `complexInUri = begin-object [ member *( value-separator member ) ] end-object`
    pub struct ComplexInUri<'a> {
        pub open: BeginObject<'a>,
        pub members: Option<List<ValueSeparator<'a>, ComplexMember<'a>>>,
        pub close: EndObject<'a>,
    }

    pub enum ComplexMember<'a> {
        Annotation(AnnotationInUri<'a>),
        PrimitiveProperty(PrimitivePropertyInUri<'a>),
        ComplexProperty(ComplexPropertyInUri<'a>),
        CollectionProperty(CollectionPropertyInUri<'a>),
        NavigationProperty(NavigationPropertyInUri<'a>),
    }

    pub enum CollectionPropertyInUri<'a> {
        Primitive(JsonMember<'a, PrimitiveColProperty<'a>, PrimitiveColInUri<'a>>),
        Complex(JsonMember<'a, ComplexColProperty<'a>, Box<ComplexColInUri<'a>>>),
    }

    /// `AT namespace "." termName` between quotation marks.
    pub struct AnnotationName<'a> {
        pub at: At<'a>,
        pub term: Qualified<'a, TermName<'a>>,
    }

    pub enum AnnotationValue<'a> {
        Complex(Box<ComplexInUri<'a>>),
        ComplexCol(Box<ComplexColInUri<'a>>),
        Primitive(PrimitiveLiteralInJson<'a>),
        PrimitiveCol(PrimitiveColInUri<'a>),
    }

    pub enum NavigationPropertyInUri<'a> {
        Single(SingleNavPropInJson<'a>),
        Collection(CollectionNavPropInJson<'a>),
    }

    /// `BWS punct BWS`
    pub struct JsonDelimiter<'a> {
        pub before: Bws<'a>,
        pub punct: Punct<'a>,
        pub after: Bws<'a>,
    }

    /// `BWS punct`
    pub struct JsonClose<'a> {
        pub before: Bws<'a>,
        pub punct: Punct<'a>,
    }

    pub enum PrimitiveLiteralInJson<'a> {
        String(StringInJson<'a>),
        Number(NumberInJson<'a>),
        True(Token<'a>),
        False(Token<'a>),
        Null(Token<'a>),
    }

    /// `stringInJSON = quotation-mark *charInJSON quotation-mark`
    pub struct StringInJson<'a> {
        pub open: QuotationMark<'a>,
        pub content: Token<'a>,
        pub close: QuotationMark<'a>,
    }
}

pub type BeginObject<'a> = JsonDelimiter<'a>;
pub type BeginArray<'a> = JsonDelimiter<'a>;
pub type NameSeparator<'a> = JsonDelimiter<'a>;
pub type ValueSeparator<'a> = JsonDelimiter<'a>;
pub type EndObject<'a> = JsonClose<'a>;
pub type EndArray<'a> = JsonClose<'a>;

/// `begin-array [ item *( value-separator item ) ] end-array`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonArray<'a, T> {
    pub open: BeginArray<'a>,
    pub items: Option<List<ValueSeparator<'a>, T>>,
    pub close: EndArray<'a>,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for JsonArray<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.open.tokens_into(out);
        self.items.tokens_into(out);
        self.close.tokens_into(out);
    }
}

impl<'a, T> JsonArray<'a, T> {
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().flat_map(|items| items.iter())
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, List::len)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_none()
    }
}

pub type ComplexColInUri<'a> = JsonArray<'a, ComplexInUri<'a>>;
pub type PrimitiveColInUri<'a> = JsonArray<'a, PrimitiveLiteralInJson<'a>>;
pub type RootExprCol<'a> = JsonArray<'a, RootExpr<'a>>;

/// `quotation-mark name quotation-mark name-separator value`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonMember<'a, N, V> {
    pub open_quote: QuotationMark<'a>,
    pub name: N,
    pub close_quote: QuotationMark<'a>,
    pub separator: NameSeparator<'a>,
    pub value: V,
}

impl<'a, N: Syntax<'a>, V: Syntax<'a>> Syntax<'a> for JsonMember<'a, N, V> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.open_quote.tokens_into(out);
        self.name.tokens_into(out);
        self.close_quote.tokens_into(out);
        self.separator.tokens_into(out);
        self.value.tokens_into(out);
    }
}

pub type AnnotationInUri<'a> = JsonMember<'a, AnnotationName<'a>, AnnotationValue<'a>>;
pub type PrimitivePropertyInUri<'a> = JsonMember<'a, PrimitiveProperty<'a>, PrimitiveLiteralInJson<'a>>;
pub type ComplexPropertyInUri<'a> = JsonMember<'a, ComplexProperty<'a>, Box<ComplexInUri<'a>>>;
pub type SingleNavPropInJson<'a> = JsonMember<'a, EntityNavigationProperty<'a>, RootExpr<'a>>;
pub type CollectionNavPropInJson<'a> =
    JsonMember<'a, EntityColNavigationProperty<'a>, RootExprCol<'a>>;

impl StringInJson<'_> {
    /// The string with its JSON escapes resolved. Either spelling of the
    /// quotation mark and reverse solidus is understood; other percent-encoded
    /// characters are left as they are.
    pub fn value(&self) -> String {
        let mut value = String::new();
        let mut rest = self.content.text();
        while let Some(c) = rest.chars().next() {
            match strip_escape(rest) {
                Some(after) => {
                    let (decoded, after) = unescape(after);
                    value.extend(decoded);
                    rest = after;
                }
                None => {
                    value.push(c);
                    rest = &rest[c.len_utf8()..];
                }
            }
        }
        value
    }
}

fn strip_ci<'s>(text: &'s str, prefix: &str) -> Option<&'s str> {
    match text.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&text[prefix.len()..]),
        _ => None,
    }
}

fn strip_escape(text: &str) -> Option<&str> {
    text.strip_prefix('\\').or_else(|| strip_ci(text, "%5C"))
}

// Decodes the character after an escape. The grammar has already checked it.
fn unescape(text: &str) -> (Option<char>, &str) {
    if let Some(rest) = strip_ci(text, "%22").or_else(|| strip_ci(text, "%2F")) {
        let c = if text.as_bytes()[2] == b'2' { '"' } else { '/' };
        return (Some(c), rest);
    }
    if let Some(rest) = strip_escape(text) {
        return (Some('\\'), rest);
    }
    let mut chars = text.chars();
    let decoded = match chars.next() {
        Some('b') => '\u{8}',
        Some('f') => '\u{c}',
        Some('n') => '\n',
        Some('r') => '\r',
        Some('t') => '\t',
        Some('u') => {
            let hex = chars.as_str().get(..4).unwrap_or_default();
            let code = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
            return (code, chars.as_str().get(4..).unwrap_or_default());
        }
        Some(other) => other,
        None => return (None, text),
    };
    (Some(decoded), chars.as_str())
}
