//! Punctuation and whitespace shared by all the other rules.

use super::Token;

node! {
    /// A terminal that may be written literally or percent-encoded, like
    /// `"(" / "%28"`.
    pub enum Punct<'a> {
        Literal(Token<'a>),
        Encoded(Token<'a>),
    }

    /// `SIGN = "+" / "%2B" / "-"`
    pub enum Sign<'a> {
        Plus(Token<'a>),
        EncodedPlus(Token<'a>),
        Minus(Token<'a>),
    }

    /// Required whitespace: one or more spaces or tabs, plain or encoded.
    pub struct Rws<'a> {
        pub text: Token<'a>,
    }

    /// "Bad" whitespace: optional, tolerated around punctuation.
    pub struct Bws<'a> {
        pub text: Option<Token<'a>>,
    }
}

pub type At<'a> = Punct<'a>;
pub type Colon<'a> = Punct<'a>;
pub type Comma<'a> = Punct<'a>;
pub type Semi<'a> = Punct<'a>;
pub type Star<'a> = Punct<'a>;
pub type Squote<'a> = Punct<'a>;
pub type Open<'a> = Punct<'a>;
pub type Close<'a> = Punct<'a>;
pub type QuotationMark<'a> = Punct<'a>;
pub type Escape<'a> = Punct<'a>;

impl<'a> Punct<'a> {
    pub fn token(&self) -> Token<'a> {
        match self {
            Punct::Literal(token) | Punct::Encoded(token) => *token,
        }
    }

    pub fn is_encoded(&self) -> bool {
        matches!(self, Punct::Encoded(_))
    }
}

impl<'a> Sign<'a> {
    pub fn token(&self) -> Token<'a> {
        match self {
            Sign::Plus(token) | Sign::EncodedPlus(token) | Sign::Minus(token) => *token,
        }
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Sign::Minus(_))
    }
}
