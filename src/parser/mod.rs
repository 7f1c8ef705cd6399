//! The rule parsers.
//!
//! One function per production of the OData 4.01 ABNF, named after the rule
//! (hyphens become underscores). The production is quoted above each function
//! with a `//*` prefix so the grammar can be read next to the code.
//!
//! Alternatives are tried in order and the first match wins. Where the ABNF
//! relies on a shorter alternative never shadowing a longer one, the order is
//! changed or a lookahead is added; those places say so.
#![allow(non_snake_case)]

pub mod context;
pub mod expr;
pub mod header;
pub mod json;
pub mod literal;
pub mod names;
pub mod query;
pub mod resource;
pub mod terminals;
pub mod uri;

pub use self::context::*;
pub use self::expr::*;
pub use self::header::*;
pub use self::json::*;
pub use self::literal::*;
pub use self::names::*;
pub use self::query::*;
pub use self::resource::*;
pub use self::terminals::*;
pub use self::uri::*;
