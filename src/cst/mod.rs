//! The concrete syntax tree.
//!
//! Every grammar rule has a node type named after it. A node keeps each
//! matched piece of text, separators and punctuation included, so concatenating
//! the tokens of a node gives back exactly the text it was parsed from.
//!
//! Alternations are enums with one variant per alternative, optional parts are
//! `Option`s and repetitions are `Vec`s. Character level rules (`pchar`,
//! `DIGIT`...) are not materialized one character at a time: a run of them is a
//! single [`Token`].

use std::ops::Range;

use serde::Serialize;

mod token;

pub use token::Token;

/// Shared behavior of all tree nodes.
pub trait Syntax<'a> {
    /// Appends the terminals of the node, in source order.
    fn tokens_into(&self, out: &mut Vec<Token<'a>>);

    fn tokens(&self) -> Vec<Token<'a>> {
        let mut out = Vec::new();
        self.tokens_into(&mut out);
        out
    }

    /// The text the node was parsed from.
    fn to_source(&self) -> String {
        self.tokens().iter().map(Token::text).collect()
    }

    /// Byte range covered by the node, `None` for a node that matched nothing.
    fn span(&self) -> Option<Range<usize>> {
        let tokens = self.tokens();
        let first = tokens.iter().find(|token| !token.is_empty())?;
        let last = tokens.iter().rev().find(|token| !token.is_empty())?;
        Some(first.offset()..last.span().end)
    }
}

impl<'a> Syntax<'a> for Token<'a> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        out.push(*self);
    }
}

impl<'a, T: Syntax<'a>> Syntax<'a> for Option<T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        if let Some(node) = self {
            node.tokens_into(out);
        }
    }
}

impl<'a, T: Syntax<'a>> Syntax<'a> for Vec<T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        for node in self {
            node.tokens_into(out);
        }
    }
}

impl<'a, T: Syntax<'a> + ?Sized> Syntax<'a> for Box<T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        (**self).tokens_into(out);
    }
}

/// Declares node types together with their [`Syntax`] implementation.
///
/// Structs list their fields in source order; enums have exactly one payload
/// per variant.
macro_rules! node {
    () => {};
    (
        $(#[$meta:meta])*
        pub struct $name:ident<$lt:lifetime> {
            $( $(#[$field_meta:meta])* pub $field:ident: $ty:ty ),* $(,)?
        }
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        pub struct $name<$lt> {
            $( $(#[$field_meta])* pub $field: $ty ),*
        }

        impl<$lt> $crate::cst::Syntax<$lt> for $name<$lt> {
            fn tokens_into(&self, out: &mut Vec<$crate::cst::Token<$lt>>) {
                $( $crate::cst::Syntax::tokens_into(&self.$field, out); )*
            }
        }

        node! { $($rest)* }
    };
    (
        $(#[$meta:meta])*
        pub enum $name:ident<$lt:lifetime> {
            $( $(#[$variant_meta:meta])* $variant:ident($ty:ty) ),* $(,)?
        }
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        pub enum $name<$lt> {
            $( $(#[$variant_meta])* $variant($ty) ),*
        }

        impl<$lt> $crate::cst::Syntax<$lt> for $name<$lt> {
            fn tokens_into(&self, out: &mut Vec<$crate::cst::Token<$lt>>) {
                match self {
                    $( $name::$variant(inner) => $crate::cst::Syntax::tokens_into(inner, out), )*
                }
            }
        }

        node! { $($rest)* }
    };
}

/// Declares lexical nodes: rules whose whole match is kept as one token.
macro_rules! lexical {
    ($( $(#[$meta:meta])* $name:ident ),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, ::serde::Serialize)]
            #[serde(transparent)]
            pub struct $name<'a> {
                pub text: $crate::cst::Token<'a>,
            }

            impl<'a> $name<'a> {
                pub fn as_str(&self) -> &'a str {
                    self.text.text()
                }
            }

            impl<'a> $crate::cst::Syntax<'a> for $name<'a> {
                fn tokens_into(&self, out: &mut Vec<$crate::cst::Token<'a>>) {
                    out.push(self.text);
                }
            }
        )*
    };
}

/// Declares the rules that are nothing but an `odataIdentifier` naming a
/// particular kind of model element.
macro_rules! identifier {
    ($( $(#[$meta:meta])* $name:ident ),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, ::serde::Serialize)]
            #[serde(transparent)]
            pub struct $name<'a> {
                pub identifier: $crate::cst::names::OdataIdentifier<'a>,
            }

            impl<'a> $name<'a> {
                pub fn name(&self) -> &'a str {
                    self.identifier.as_str()
                }
            }

            impl<'a> $crate::cst::Syntax<'a> for $name<'a> {
                fn tokens_into(&self, out: &mut Vec<$crate::cst::Token<'a>>) {
                    out.push(self.identifier.text);
                }
            }
        )*
    };
}

pub mod context;
pub mod expr;
pub mod header;
pub mod json;
pub mod literal;
pub mod names;
pub mod punct;
pub mod query;
pub mod resource;
pub mod uri;

/// `X *( SEP X )`: one item followed by any number of separated items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List<S, T> {
    pub first: T,
    pub rest: Vec<Item<S, T>>,
}

/// A separator and the item that follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item<S, T> {
    pub separator: S,
    pub value: T,
}

impl<S, T> List<S, T> {
    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|item| &item.value))
    }
}

impl<'a, S: Syntax<'a>, T: Syntax<'a>> Syntax<'a> for List<S, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.first.tokens_into(out);
        self.rest.tokens_into(out);
    }
}

impl<'a, S: Syntax<'a>, T: Syntax<'a>> Syntax<'a> for Item<S, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.separator.tokens_into(out);
        self.value.tokens_into(out);
    }
}

/// A node introduced by a fixed piece of text, as in `"/" propertyPath`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefixed<'a, T> {
    pub prefix: Token<'a>,
    pub value: T,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for Prefixed<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        out.push(self.prefix);
        self.value.tokens_into(out);
    }
}

/// A node closed by a fixed piece of text, as in `qualifiedEntityTypeName "/"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suffixed<'a, T> {
    pub value: T,
    pub suffix: Token<'a>,
}

impl<'a, T: Syntax<'a>> Syntax<'a> for Suffixed<'a, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.value.tokens_into(out);
        out.push(self.suffix);
    }
}

/// `head [ tail ]`, the shape of most path segments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chain<H, T> {
    pub head: H,
    pub tail: Option<T>,
}

impl<'a, H: Syntax<'a>, T: Syntax<'a>> Syntax<'a> for Chain<H, T> {
    fn tokens_into(&self, out: &mut Vec<Token<'a>>) {
        self.head.tokens_into(out);
        self.tail.tokens_into(out);
    }
}
