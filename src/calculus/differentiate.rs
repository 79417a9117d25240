//! Symbolic differentiation: a structural recursion producing a raw tree,
//! a cleanup pass stripping unit factors, then a full simplify.

use crate::expr::{self, BinOp, Expr, Func, UnOp};
use crate::number::Number;
use crate::simplify::simplify;

pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    let raw = Differentiator { var }.derive(expr);
    simplify(cleanup(raw))
}

struct Differentiator<'a> {
    var: &'a str,
}

impl<'a> Differentiator<'a> {
    fn derive(&self, expr: &Expr) -> Expr {
        match expr {
            Expr::Number(_) => Expr::integer(0),
            Expr::Symbol(name) if name == self.var => Expr::integer(1),
            Expr::Symbol(_) => Expr::integer(0),
            Expr::Paren(inner) => self.derive(inner),

            Expr::Unary(UnOp::Neg, inner) => expr::neg(self.derive(inner)),
            Expr::Unary(UnOp::Plus, inner) => self.derive(inner),

            Expr::Binary(BinOp::Add, a, b) => expr::add(self.derive(a), self.derive(b)),
            Expr::Binary(BinOp::Sub, a, b) => expr::sub(self.derive(a), self.derive(b)),
            Expr::Binary(BinOp::Mul, a, b) => self.product_rule(a, b),
            Expr::Binary(BinOp::Div, a, b) => self.quotient_rule(a, b),
            Expr::Binary(BinOp::Pow, base, exponent) => self.power_rule(base, exponent),

            Expr::Call(Func::Sin, a) => {
                expr::mul(Expr::Call(Func::Cos, a.clone()), self.derive(a))
            }
            Expr::Call(Func::Cos, a) => {
                expr::neg(expr::mul(Expr::Call(Func::Sin, a.clone()), self.derive(a)))
            }
            Expr::Call(Func::Tan, a) => expr::div(
                self.derive(a),
                expr::pow(Expr::Call(Func::Cos, a.clone()), Expr::integer(2)),
            ),
            Expr::Call(Func::Sqrt, a) => expr::div(
                self.derive(a),
                expr::mul(Expr::integer(2), Expr::Call(Func::Sqrt, a.clone())),
            ),
            Expr::Call(Func::Ln, a) => expr::div(self.derive(a), (**a).clone()),

            // not covered: log and the remaining special forms
            _ => Expr::integer(0),
        }
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        expr::add(
            expr::mul(self.derive(a), b.clone()),
            expr::mul(a.clone(), self.derive(b)),
        )
    }

    fn quotient_rule(&self, a: &Expr, b: &Expr) -> Expr {
        expr::div(
            expr::sub(
                expr::mul(self.derive(a), b.clone()),
                expr::mul(a.clone(), self.derive(b)),
            ),
            expr::pow(b.clone(), Expr::integer(2)),
        )
    }

    fn power_rule(&self, base: &Expr, exponent: &Expr) -> Expr {
        match exponent {
            Expr::Number(n) => expr::mul(
                expr::mul(
                    Expr::Number(n.clone()),
                    expr::pow(base.clone(), Expr::Number(n.sub(&Number::int(1)))),
                ),
                self.derive(base),
            ),
            _ if base.is_number() => expr::mul(
                expr::mul(
                    expr::pow(base.clone(), exponent.clone()),
                    Expr::Call(Func::Ln, base.clone().boxed()),
                ),
                self.derive(exponent),
            ),
            _ => expr::mul(
                expr::pow(base.clone(), exponent.clone()),
                expr::add(
                    expr::mul(
                        self.derive(exponent),
                        Expr::Call(Func::Ln, base.clone().boxed()),
                    ),
                    expr::div(expr::mul(exponent.clone(), self.derive(base)), base.clone()),
                ),
            ),
        }
    }
}

/// Strips `· 1` factors and `^1` powers left behind by the raw recursion.
fn cleanup(expr: Expr) -> Expr {
    match expr {
        Expr::Binary(BinOp::Mul, a, b) => {
            let a = cleanup(*a);
            let b = cleanup(*b);
            if is_one(&a) {
                return b;
            }
            if is_one(&b) {
                return a;
            }
            expr::mul(a, b)
        }
        Expr::Binary(BinOp::Pow, base, exponent) => {
            let base = cleanup(*base);
            let exponent = cleanup(*exponent);
            if is_one(&exponent) {
                return base;
            }
            expr::pow(base, exponent)
        }
        Expr::Binary(op, a, b) => Expr::Binary(op, cleanup(*a).boxed(), cleanup(*b).boxed()),
        Expr::Unary(op, a) => Expr::Unary(op, cleanup(*a).boxed()),
        Expr::Paren(a) => Expr::Paren(cleanup(*a).boxed()),
        Expr::Call(func, a) => Expr::Call(func, cleanup(*a).boxed()),
        other => other,
    }
}

fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Number(n) if n.is_one())
}
