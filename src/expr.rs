//! Precedence view of filter expressions.
//!
//! `commonExpr` trees keep the right-nested shape of the grammar: in
//! `a add b mul c` the `add` tail owns everything after it. [`Expr`] flattens
//! those tails into one operator chain and folds it again by operator
//! precedence, borrowing every operand from the tree it was built from.

use std::fmt;
use std::mem;

use crate::cst::expr::{
    ArithmeticExpr, CommonExpr, ComparisonExpr, LogicalExpr, ParenExpr, PrimaryExpr,
};
use crate::cst::literal::Enum;
use crate::cst::{Syntax, Token};

/// Binding power of the prefix operators; only `has` and `in` bind tighter.
const PREFIX: u8 = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Divby,
    Mod,
    Has,
    In,
}

impl BinaryOp {
    pub fn keyword(self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::Eq => "eq",
            BinaryOp::Ne => "ne",
            BinaryOp::Lt => "lt",
            BinaryOp::Le => "le",
            BinaryOp::Gt => "gt",
            BinaryOp::Ge => "ge",
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
            BinaryOp::Divby => "divby",
            BinaryOp::Mod => "mod",
            BinaryOp::Has => "has",
            BinaryOp::In => "in",
        }
    }

    /// Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq | BinaryOp::Ne => 3,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Divby | BinaryOp::Mod => 6,
            BinaryOp::Has | BinaryOp::In => 8,
        }
    }

    // Left binding power below the right one makes every level left-associative.
    fn binding_power(self) -> (u8, u8) {
        let left = self.precedence() * 2 - 1;
        (left, left + 1)
    }
}

/// An expression regrouped by operator precedence.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    /// A primary expression other than a prefix operator or parentheses.
    Operand(&'a PrimaryExpr<'a>),
    Paren {
        paren: &'a ParenExpr<'a>,
        inner: Box<Expr<'a>>,
    },
    /// Right operand of `has`.
    Enum(&'a Enum<'a>),
    Unary {
        op: UnaryOp,
        token: Token<'a>,
        operand: Box<Expr<'a>>,
    },
    Binary {
        op: BinaryOp,
        token: Token<'a>,
        left: Box<Expr<'a>>,
        right: Box<Expr<'a>>,
    },
}

struct Term<'a> {
    prefixes: Vec<(UnaryOp, Token<'a>)>,
    operand: Expr<'a>,
}

#[derive(Default)]
struct Chain<'a> {
    terms: Vec<Term<'a>>,
    operators: Vec<(BinaryOp, Token<'a>)>,
    prefixes: Vec<(UnaryOp, Token<'a>)>,
}

impl<'a> Chain<'a> {
    fn common(&mut self, expr: &'a CommonExpr<'a>) {
        self.primary(&expr.operand);
        if let Some(arithmetic) = &expr.arithmetic {
            let op = match arithmetic {
                ArithmeticExpr::Add(_) => BinaryOp::Add,
                ArithmeticExpr::Sub(_) => BinaryOp::Sub,
                ArithmeticExpr::Mul(_) => BinaryOp::Mul,
                ArithmeticExpr::Div(_) => BinaryOp::Div,
                ArithmeticExpr::Divby(_) => BinaryOp::Divby,
                ArithmeticExpr::Mod(_) => BinaryOp::Mod,
            };
            let tail = arithmetic.operator();
            self.operators.push((op, tail.operator));
            self.common(&tail.right);
        }
        if let Some(comparison) = &expr.comparison {
            let (op, tail) = match comparison {
                ComparisonExpr::Has(tail) => {
                    self.operators.push((BinaryOp::Has, tail.operator));
                    self.operand(Expr::Enum(&tail.right));
                    return self.logical(expr);
                }
                ComparisonExpr::Eq(tail) => (BinaryOp::Eq, tail),
                ComparisonExpr::Ne(tail) => (BinaryOp::Ne, tail),
                ComparisonExpr::Lt(tail) => (BinaryOp::Lt, tail),
                ComparisonExpr::Le(tail) => (BinaryOp::Le, tail),
                ComparisonExpr::Gt(tail) => (BinaryOp::Gt, tail),
                ComparisonExpr::Ge(tail) => (BinaryOp::Ge, tail),
                ComparisonExpr::In(tail) => (BinaryOp::In, tail),
            };
            self.operators.push((op, tail.operator));
            self.common(&tail.right);
        }
        self.logical(expr);
    }

    fn logical(&mut self, expr: &'a CommonExpr<'a>) {
        if let Some(logical) = &expr.logical {
            let op = match logical {
                LogicalExpr::And(_) => BinaryOp::And,
                LogicalExpr::Or(_) => BinaryOp::Or,
            };
            let tail = logical.operator();
            self.operators.push((op, tail.operator));
            self.common(&tail.right);
        }
    }

    fn primary(&mut self, primary: &'a PrimaryExpr<'a>) {
        match primary {
            PrimaryExpr::Negate(negate) => {
                self.prefixes.push((UnaryOp::Negate, negate.minus));
                self.common(&negate.expr);
            }
            PrimaryExpr::Not(not) => {
                self.prefixes.push((UnaryOp::Not, not.keyword));
                self.common(&not.expr);
            }
            PrimaryExpr::Paren(paren) => self.operand(Expr::Paren {
                paren,
                inner: Box::new(Expr::new(&paren.expr.expr)),
            }),
            other => self.operand(Expr::Operand(other)),
        }
    }

    fn operand(&mut self, operand: Expr<'a>) {
        self.terms.push(Term {
            prefixes: mem::take(&mut self.prefixes),
            operand,
        });
    }
}

struct Fold<'a, I: Iterator<Item = ((BinaryOp, Token<'a>), Term<'a>)>> {
    rest: std::iter::Peekable<I>,
}

impl<'a, I: Iterator<Item = ((BinaryOp, Token<'a>), Term<'a>)>> Fold<'a, I> {
    fn term(&mut self, term: Term<'a>) -> Expr<'a> {
        if term.prefixes.is_empty() {
            return term.operand;
        }
        let bound = self.infix(term.operand, PREFIX);
        term.prefixes
            .into_iter()
            .rev()
            .fold(bound, |operand, (op, token)| Expr::Unary {
                op,
                token,
                operand: Box::new(operand),
            })
    }

    fn infix(&mut self, mut left: Expr<'a>, min: u8) -> Expr<'a> {
        while let Some(((op, _), _)) = self.rest.peek() {
            let (left_power, right_power) = op.binding_power();
            if left_power < min {
                break;
            }
            let Some(((op, token), term)) = self.rest.next() else {
                break;
            };
            let right = self.term(term);
            let right = self.infix(right, right_power);
            left = Expr::Binary {
                op,
                token,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        left
    }
}

impl<'a> Expr<'a> {
    pub fn new(expr: &'a CommonExpr<'a>) -> Self {
        let mut chain = Chain::default();
        chain.common(expr);

        let mut terms = chain.terms.into_iter();
        let Some(first) = terms.next() else {
            unreachable!("every commonExpr starts with an operand");
        };
        let mut fold = Fold {
            rest: chain.operators.into_iter().zip(terms).peekable(),
        };
        let first = fold.term(first);
        fold.infix(first, 0)
    }

    /// The operator at the root, if any.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Expr::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for Expr<'_> {
    /// Renders the expression with single spaces around operators. The
    /// alternate form (`{:#}`) parenthesizes every operator application.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Operand(primary) => f.write_str(&primary.to_source()),
            Expr::Enum(value) => f.write_str(&value.to_source()),
            Expr::Paren { inner, .. } if f.alternate() => write!(f, "{inner:#}"),
            Expr::Paren { inner, .. } => write!(f, "({inner})"),
            Expr::Unary { op, token, operand } => {
                let space = if *op == UnaryOp::Not { " " } else { "" };
                if f.alternate() {
                    write!(f, "({}{space}{operand:#})", token.text())
                } else {
                    write!(f, "{}{space}{operand}", token.text())
                }
            }
            Expr::Binary {
                token, left, right, ..
            } => {
                if f.alternate() {
                    write!(f, "({left:#} {} {right:#})", token.text())
                } else {
                    write!(f, "{left} {} {right}", token.text())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::input::Input;
    use crate::parser::commonExpr;

    fn grouped(text: &str) -> String {
        let (rest, expr) = commonExpr(Input::new(text)).unwrap();
        assert!(rest.is_empty(), "{text} left {:?}", rest.as_str());
        format!("{:#}", Expr::new(&expr))
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(grouped("a add b mul c"), "(a add (b mul c))");
        assert_eq!(grouped("a mul b add c"), "((a mul b) add c)");
    }

    #[test]
    fn binary_operators_are_left_associative() {
        assert_eq!(grouped("a sub b sub c"), "((a sub b) sub c)");
        assert_eq!(grouped("a div b mod c"), "((a div b) mod c)");
    }

    #[test]
    fn logical_operators_bind_loosest() {
        assert_eq!(
            grouped("a eq 1 and b lt 2 or c"),
            "(((a eq 1) and (b lt 2)) or c)"
        );
        assert_eq!(grouped("a or b and c"), "(a or (b and c))");
        assert_eq!(grouped("a lt b eq c gt d"), "((a lt b) eq (c gt d))");
    }

    #[test]
    fn prefix_operators_take_one_operand() {
        assert_eq!(grouped("not a eq b"), "((not a) eq b)");
        assert_eq!(grouped("-x add 1"), "((-x) add 1)");
        assert_eq!(
            grouped("-x has Sales.Color'Red'"),
            "(-(x has Sales.Color'Red'))"
        );
    }

    #[test]
    fn in_binds_tighter_than_and() {
        assert_eq!(
            grouped("Name in ('a','b') and Age gt 3"),
            "((Name in ('a','b')) and (Age gt 3))"
        );
    }

    #[test]
    fn parentheses_are_kept() {
        let (_, expr) = commonExpr(Input::new("(a  add b)  mul c")).unwrap();
        let view = Expr::new(&expr);
        assert_eq!(view.binary_op(), Some(BinaryOp::Mul));
        assert_eq!(format!("{view:#}"), "((a add b) mul c)");
        assert_eq!(view.to_string(), "(a add b) mul c");
    }

    #[test]
    fn operator_keywords_keep_their_case() {
        let (_, expr) = commonExpr(Input::new("a ADD b")).unwrap();
        assert_eq!(Expr::new(&expr).to_string(), "a ADD b");
    }

    #[test]
    fn precedence_table() {
        assert!(BinaryOp::Has.precedence() > BinaryOp::Mul.precedence());
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Lt.precedence());
        assert!(BinaryOp::Lt.precedence() > BinaryOp::Eq.precedence());
        assert!(BinaryOp::Eq.precedence() > BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
        assert_eq!(BinaryOp::Divby.keyword(), "divby");
    }
}
