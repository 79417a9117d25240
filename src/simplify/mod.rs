//! Term rewriting: a fixed-point driver applying at most one
//! transformation per node per pass, top-down, until nothing changes.

mod fold;
mod pattern;
mod surd;
mod trig;

pub use pattern::{default_rules, Pattern, RewriteRule};

use crate::expr::{self, BinOp, Expr, Func, UnOp};
use crate::number::Number;

pub struct Simplifier {
    rules: Vec<RewriteRule>,
}

impl Default for Simplifier {
    fn default() -> Self {
        Simplifier::new()
    }
}

impl Simplifier {
    pub fn new() -> Simplifier {
        Simplifier {
            rules: pattern::default_rules(),
        }
    }

    /// The rule set is data supplied at construction; callers may extend
    /// or replace the built-in identities.
    pub fn with_rules(rules: Vec<RewriteRule>) -> Simplifier {
        Simplifier { rules }
    }

    pub fn simplify(&self, expr: Expr) -> Expr {
        let mut current = expr;
        loop {
            let (next, changed) = self.rewrite(current);
            current = next;
            if !changed {
                return current;
            }
        }
    }

    fn rewrite(&self, expr: Expr) -> (Expr, bool) {
        if let Expr::Call(Func::Sqrt, inner) = &expr {
            if let Expr::Number(radicand) = inner.as_ref() {
                if let Some(reduced) = surd::reduce_sqrt(radicand) {
                    return (reduced, true);
                }
            }
        }

        if let Expr::Unary(UnOp::Neg, inner) = &expr {
            if let Expr::Number(value) = inner.as_ref() {
                if value.is_exact() {
                    return (Expr::Number(value.neg()), true);
                }
            }
        }

        if let Expr::Binary(op, left, right) = &expr {
            if let (Expr::Number(a), Expr::Number(b)) = (left.as_ref(), right.as_ref()) {
                if let Some(folded) = fold::fold_binary(*op, a, b) {
                    return (Expr::Number(folded), true);
                }
            }
            if *op == BinOp::Div {
                if let Some(rationalized) = surd::rationalize(left, right) {
                    return (rationalized, true);
                }
                if let Some(reduced) = reduce_numeric_fraction(left, right) {
                    return (reduced, true);
                }
            }
            if *op == BinOp::Mul {
                if let Some(merged) = merge_numeric_factors(left, right) {
                    return (merged, true);
                }
            }
        }

        if let Expr::Call(func, inner) = &expr {
            if matches!(func, Func::Sin | Func::Cos | Func::Tan) {
                if let Expr::Number(argument) = inner.unwrap_parens() {
                    if let Some(value) = trig::eval_trig(*func, argument) {
                        return (value, true);
                    }
                }
            }
        }

        for rule in &self.rules {
            if let Some(replaced) = rule.apply(&expr) {
                return (replaced, true);
            }
        }

        self.rewrite_children(expr)
    }

    fn rewrite_children(&self, expr: Expr) -> (Expr, bool) {
        match expr {
            Expr::Binary(op, left, right) => {
                let (left, left_changed) = self.rewrite(*left);
                let (right, right_changed) = self.rewrite(*right);
                (
                    Expr::Binary(op, left.boxed(), right.boxed()),
                    left_changed || right_changed,
                )
            }
            Expr::Unary(op, inner) => {
                let (inner, changed) = self.rewrite(*inner);
                (Expr::Unary(op, inner.boxed()), changed)
            }
            Expr::Paren(inner) => {
                let (inner, changed) = self.rewrite(*inner);
                (Expr::Paren(inner.boxed()), changed)
            }
            Expr::Call(func, inner) => {
                let (inner, changed) = self.rewrite(*inner);
                (Expr::Call(func, inner.boxed()), changed)
            }
            Expr::Integral {
                integrand,
                var,
                bounds,
            } => {
                let (integrand, mut changed) = self.rewrite(*integrand);
                let bounds = bounds.map(|(lower, upper)| {
                    let (lower, lower_changed) = self.rewrite(*lower);
                    let (upper, upper_changed) = self.rewrite(*upper);
                    changed = changed || lower_changed || upper_changed;
                    (lower.boxed(), upper.boxed())
                });
                (
                    Expr::Integral {
                        integrand: integrand.boxed(),
                        var,
                        bounds,
                    },
                    changed,
                )
            }
            Expr::Integrate {
                integrand,
                var,
                lower,
                upper,
            } => {
                let (integrand, ic) = self.rewrite(*integrand);
                let (lower, lc) = self.rewrite(*lower);
                let (upper, uc) = self.rewrite(*upper);
                (
                    Expr::Integrate {
                        integrand: integrand.boxed(),
                        var,
                        lower: lower.boxed(),
                        upper: upper.boxed(),
                    },
                    ic || lc || uc,
                )
            }
            Expr::Derivative { inner, var } => {
                let (inner, changed) = self.rewrite(*inner);
                (
                    Expr::Derivative {
                        inner: inner.boxed(),
                        var,
                    },
                    changed,
                )
            }
            Expr::Roots { inner, var } => {
                let (inner, changed) = self.rewrite(*inner);
                (
                    Expr::Roots {
                        inner: inner.boxed(),
                        var,
                    },
                    changed,
                )
            }
            Expr::Factor { inner, var } => {
                let (inner, changed) = self.rewrite(*inner);
                (
                    Expr::Factor {
                        inner: inner.boxed(),
                        var,
                    },
                    changed,
                )
            }
            Expr::RootSet(items) => {
                let (items, changed) = self.rewrite_all(items);
                (Expr::RootSet(items), changed)
            }
            Expr::FactorSet(items) => {
                let (items, changed) = self.rewrite_all(items);
                (Expr::FactorSet(items), changed)
            }
            Expr::Limit {
                approaching,
                target,
                operand,
            } => {
                let (operand, changed) = self.rewrite(*operand);
                (
                    Expr::Limit {
                        approaching,
                        target,
                        operand: operand.boxed(),
                    },
                    changed,
                )
            }
            leaf => (leaf, false),
        }
    }

    fn rewrite_all(&self, items: Vec<Expr>) -> (Vec<Expr>, bool) {
        let mut changed = false;
        let items = items
            .into_iter()
            .map(|item| {
                let (item, item_changed) = self.rewrite(item);
                changed = changed || item_changed;
                item
            })
            .collect();
        (items, changed)
    }
}

/// Simplify with the built-in rule set.
pub fn simplify(expr: Expr) -> Expr {
    Simplifier::new().simplify(expr)
}

/// `(c · rest) / d` with exact numeric `c` and `d`: reduce `c/d` to lowest
/// terms, dropping the denominator entirely when the quotient is integral.
fn reduce_numeric_fraction(numerator: &Expr, denominator: &Expr) -> Option<Expr> {
    let den = match denominator.unwrap_parens() {
        Expr::Number(n) if n.is_exact() && !n.is_zero() => n.clone(),
        _ => return None,
    };
    let (coeff, rest) = split_numeric_coefficient(numerator.unwrap_parens())?;
    let quotient = coeff.div(&den).ok()?;

    if quotient.is_integer() {
        if quotient.is_one() {
            return Some(rest);
        }
        return Some(expr::mul(Expr::Number(quotient), rest));
    }

    let (new_num, new_den) = quotient.big_fraction()?;
    let new_num = Number::big(new_num);
    let new_den = Number::big(new_den);
    if Number::numeric_equals(&new_num, &coeff) && Number::numeric_equals(&new_den, &den) {
        return None;
    }
    let numerator = if new_num.is_one() {
        rest
    } else {
        expr::mul(Expr::Number(new_num), rest)
    };
    Some(expr::div(numerator, Expr::Number(new_den)))
}

/// `a · (b · rest)` with exact numeric `a` and `b`: merge the numeric
/// factors so that `2 · (3 · x)` becomes `6 · x`.
fn merge_numeric_factors(left: &Expr, right: &Expr) -> Option<Expr> {
    let (outer, product) = match (left.unwrap_parens(), right.unwrap_parens()) {
        (Expr::Number(n), other @ Expr::Binary(BinOp::Mul, ..)) if n.is_exact() => (n, other),
        (other @ Expr::Binary(BinOp::Mul, ..), Expr::Number(n)) if n.is_exact() => (n, other),
        _ => return None,
    };
    let mut factors = Vec::new();
    flatten_product(product, &mut factors);
    let position = factors
        .iter()
        .position(|factor| matches!(factor, Expr::Number(n) if n.is_exact()))?;
    let Expr::Number(inner) = factors.remove(position) else {
        return None;
    };
    let merged = outer.mul(&inner);
    if factors.is_empty() {
        return Some(Expr::Number(merged));
    }
    let rest = rebuild_product(factors);
    if merged.is_one() {
        Some(rest)
    } else {
        Some(expr::mul(Expr::Number(merged), rest))
    }
}

fn split_numeric_coefficient(numerator: &Expr) -> Option<(Number, Expr)> {
    let mut factors = Vec::new();
    flatten_product(numerator, &mut factors);
    let position = factors
        .iter()
        .position(|factor| matches!(factor, Expr::Number(n) if n.is_exact()))?;
    let Expr::Number(coeff) = factors.remove(position) else {
        return None;
    };
    if factors.is_empty() {
        return None;
    }
    Some((coeff, rebuild_product(factors)))
}

fn flatten_product(expr: &Expr, out: &mut Vec<Expr>) {
    match expr.unwrap_parens() {
        Expr::Binary(BinOp::Mul, left, right) => {
            flatten_product(left, out);
            flatten_product(right, out);
        }
        other => out.push(other.clone()),
    }
}

fn rebuild_product(factors: Vec<Expr>) -> Expr {
    let mut iter = factors.into_iter();
    let first = iter.next().unwrap();
    iter.fold(first, expr::mul)
}
