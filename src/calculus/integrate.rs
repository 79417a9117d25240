//! Numeric definite integration by composite Simpson's rule, together with
//! the floating-point evaluation environment it runs over.

use std::collections::HashMap;

use crate::expr::{BinOp, Expr, Func, UnOp};

// must stay even
const DEFAULT_INTERVALS: usize = 1000;

pub fn integrate(expr: &Expr, var: &str, lower: f64, upper: f64) -> f64 {
    let intervals = DEFAULT_INTERVALS;
    let h = (upper - lower) / intervals as f64;
    let mut env = HashMap::new();

    env.insert(var.to_string(), lower);
    let mut sum = evaluate(expr, &env);
    env.insert(var.to_string(), upper);
    sum += evaluate(expr, &env);

    for i in 1..intervals {
        let x = lower + i as f64 * h;
        let weight = if i % 2 == 0 { 2.0 } else { 4.0 };
        env.insert(var.to_string(), x);
        sum += weight * evaluate(expr, &env);
    }
    (h / 3.0) * sum
}

/// Evaluate with no bindings; free symbols read as 0.
pub fn evaluate_constant(expr: &Expr) -> f64 {
    evaluate(expr, &HashMap::new())
}

pub fn evaluate(expr: &Expr, env: &HashMap<String, f64>) -> f64 {
    match expr {
        Expr::Number(n) => n.to_f64(),
        Expr::Symbol(name) => env.get(name).copied().unwrap_or(0.0),
        Expr::Binary(op, left, right) => {
            let l = evaluate(left, env);
            let r = evaluate(right, env);
            match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
                BinOp::Pow => l.powf(r),
                BinOp::Rem => 0.0,
            }
        }
        Expr::Unary(UnOp::Neg, inner) => -evaluate(inner, env),
        Expr::Unary(UnOp::Plus, inner) => evaluate(inner, env),
        Expr::Paren(inner) => evaluate(inner, env),
        Expr::Call(func, inner) => {
            let argument = evaluate(inner, env);
            match func {
                Func::Sqrt => argument.sqrt(),
                Func::Sin => argument.sin(),
                Func::Cos => argument.cos(),
                Func::Tan => argument.tan(),
                Func::Ln => argument.ln(),
                Func::Log => argument.log10(),
            }
        }
        _ => 0.0,
    }
}
