//! Surd reduction and denominator rationalization.
//!
//! `sqrt(n)` over an exact machine value is factored as `outside² · inside`
//! with a square-free `inside`; negative radicands pull out the imaginary
//! unit as a plain symbol.

use crate::expr::{self, BinOp, Expr, Func};
use crate::number::Number;

/// Reduces `sqrt(n)` for an exact `n`. `None` means no improvement is
/// possible and the node must be left untouched.
pub fn reduce_sqrt(radicand: &Number) -> Option<Expr> {
    match radicand {
        Number::Int(value) => {
            if *value < 0 {
                let magnitude = value.checked_neg()?;
                let inner = reduce_int(magnitude)
                    .unwrap_or_else(|| expr::sqrt(Expr::integer(magnitude)));
                Some(expr::mul(Expr::symbol("i"), inner))
            } else {
                reduce_int(*value)
            }
        }
        Number::Rational(num, den) => {
            if *num < 0 {
                let magnitude = num.checked_neg()?;
                let inner = reduce_rational(magnitude, *den)
                    .unwrap_or_else(|| expr::sqrt(Expr::Number(Number::Rational(magnitude, *den))));
                Some(expr::mul(Expr::symbol("i"), inner))
            } else {
                reduce_rational(*num, *den)
            }
        }
        _ => None,
    }
}

fn reduce_int(value: i64) -> Option<Expr> {
    if value == 0 {
        return Some(Expr::integer(0));
    }
    if value == 1 {
        return Some(Expr::integer(1));
    }
    let (outside, inside) = square_components(value);
    if inside == 1 {
        return Some(Expr::integer(outside));
    }
    if outside == 1 {
        return None;
    }
    Some(expr::mul(
        Expr::integer(outside),
        expr::sqrt(Expr::integer(inside)),
    ))
}

/// `sqrt(p/q)` with p, q > 0: scale so the radicand is a single integer and
/// the coefficient a machine rational. When the coefficient keeps a
/// nontrivial denominator and the radical survives, the result is written
/// as `(num · sqrt(r)) / den`.
fn reduce_rational(num: i64, den: i64) -> Option<Expr> {
    let (num_out, num_in) = square_components(num);
    let (den_out, den_in) = square_components(den);
    let coeff_den = den_out.checked_mul(den_in)?;
    let inside = num_in.checked_mul(den_in)?;
    let coefficient = Number::rational(num_out, coeff_den).ok()?;

    if inside == 1 {
        return Some(Expr::Number(coefficient));
    }

    let radical = reduce_int(inside).unwrap_or_else(|| expr::sqrt(Expr::integer(inside)));
    if coefficient.is_one() {
        return Some(radical);
    }
    if let Number::Rational(coeff_num, coeff_den) = coefficient {
        if matches!(radical, Expr::Call(Func::Sqrt, _)) {
            let numerator = expr::mul(Expr::integer(coeff_num), radical);
            return Some(expr::div(numerator, Expr::integer(coeff_den)));
        }
    }
    Some(expr::mul(Expr::Number(coefficient), radical))
}

/// `outside² · inside` with square-free `inside`, for `value >= 1`.
fn square_components(value: i64) -> (i64, i64) {
    let mut outside = 1i64;
    let mut inside = 1i64;
    let mut remaining = value;
    let mut factor = 2i64;
    while factor * factor <= remaining {
        let mut count = 0u32;
        while remaining % factor == 0 {
            remaining /= factor;
            count += 1;
        }
        for _ in 0..count / 2 {
            outside *= factor;
        }
        if count % 2 == 1 {
            inside *= factor;
        }
        factor += 1;
    }
    (outside, inside * remaining)
}

struct SqrtFactor<'a> {
    coefficient: Option<&'a Expr>,
    sqrt_expr: &'a Expr,
    radical_inner: &'a Expr,
}

fn find_sqrt_factor(expr: &Expr) -> Option<SqrtFactor<'_>> {
    match expr {
        Expr::Call(Func::Sqrt, inner) => Some(SqrtFactor {
            coefficient: None,
            sqrt_expr: expr,
            radical_inner: inner,
        }),
        Expr::Binary(BinOp::Mul, left, right) => {
            if let Expr::Call(Func::Sqrt, inner) = left.as_ref() {
                return Some(SqrtFactor {
                    coefficient: Some(right),
                    sqrt_expr: left,
                    radical_inner: inner,
                });
            }
            if let Expr::Call(Func::Sqrt, inner) = right.as_ref() {
                return Some(SqrtFactor {
                    coefficient: Some(left),
                    sqrt_expr: right,
                    radical_inner: inner,
                });
            }
            None
        }
        _ => None,
    }
}

/// Rewrites `N / (c · sqrt(r))` as `N · sqrt(r) / (c · r)`, with the
/// coefficient absent meaning `N · sqrt(r) / r`.
pub fn rationalize(numerator: &Expr, denominator: &Expr) -> Option<Expr> {
    let factor = find_sqrt_factor(denominator.unwrap_parens())?;
    let new_numerator = expr::mul(numerator.clone(), factor.sqrt_expr.clone());
    let mut new_denominator = factor.radical_inner.clone();
    if let Some(coefficient) = factor.coefficient {
        new_denominator = expr::mul(coefficient.clone(), new_denominator);
    }
    Some(expr::div(new_numerator, new_denominator))
}
