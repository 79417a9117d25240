//! Exact trigonometry at rational multiples of π. Angles are indexed as
//! integer steps of π/12 modulo 24; arguments off the table evaluate
//! numerically.

use crate::expr::{self, Expr, Func};
use crate::number::{Number, EPSILON};

/// Steps beyond this cannot be resolved reliably in `f64`.
const MAX_STEPS: f64 = 1e9;

pub fn eval_trig(func: Func, argument: &Number) -> Option<Expr> {
    let value = argument.to_f64();
    if !value.is_finite() {
        return None;
    }

    let steps = value * 12.0 / std::f64::consts::PI;
    let rounded = steps.round();
    if (steps - rounded).abs() <= EPSILON && rounded.abs() <= MAX_STEPS {
        let k = (rounded as i64).rem_euclid(24);
        let closed = match func {
            Func::Sin => sin_entry(k),
            Func::Cos => cos_entry(k),
            Func::Tan => tan_entry(k),
            _ => None,
        };
        if let Some(expr) = closed {
            return Some(expr);
        }
    }

    let numeric = match func {
        Func::Sin => value.sin(),
        Func::Cos => value.cos(),
        Func::Tan => value.tan(),
        _ => return None,
    };
    Some(Expr::Number(Number::real(numeric)))
}

fn sqrt_over_two(radicand: i64) -> Expr {
    expr::div(expr::sqrt(Expr::integer(radicand)), Expr::integer(2))
}

fn half() -> Expr {
    Expr::Number(Number::Rational(1, 2))
}

fn sin_entry(k: i64) -> Option<Expr> {
    match k {
        0 | 12 => Some(Expr::integer(0)),
        2 => Some(half()),
        3 => Some(sqrt_over_two(2)),
        4 => Some(sqrt_over_two(3)),
        6 => Some(Expr::integer(1)),
        8 => Some(sqrt_over_two(3)),
        9 => Some(sqrt_over_two(2)),
        10 => Some(half()),
        13..=23 => sin_entry(k - 12).map(expr::neg),
        _ => None,
    }
}

fn cos_entry(k: i64) -> Option<Expr> {
    match k {
        0 => Some(Expr::integer(1)),
        2 => Some(sqrt_over_two(3)),
        3 => Some(sqrt_over_two(2)),
        4 => Some(half()),
        6 => Some(Expr::integer(0)),
        8 => Some(expr::neg(half())),
        9 => Some(expr::neg(sqrt_over_two(2))),
        10 => Some(expr::neg(sqrt_over_two(3))),
        12 => Some(Expr::integer(-1)),
        13..=23 => cos_entry(k - 12).map(expr::neg),
        _ => None,
    }
}

/// tan has period π, i.e. 12 steps; odd multiples of π/2 blow up to ∞.
fn tan_entry(k: i64) -> Option<Expr> {
    match k.rem_euclid(12) {
        0 => Some(Expr::integer(0)),
        2 => Some(expr::div(expr::sqrt(Expr::integer(3)), Expr::integer(3))),
        3 => Some(Expr::integer(1)),
        4 => Some(expr::sqrt(Expr::integer(3))),
        6 => Some(Expr::Number(Number::infinity())),
        8 => Some(expr::neg(expr::sqrt(Expr::integer(3)))),
        9 => Some(Expr::integer(-1)),
        10 => Some(expr::neg(expr::div(
            expr::sqrt(Expr::integer(3)),
            Expr::integer(3),
        ))),
        _ => None,
    }
}
