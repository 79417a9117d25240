//! Polynomial factoring by iterated linear-factor extraction.

use crate::expr::{self, Expr};
use crate::number::Number;
use crate::polynomial::Polynomial;
use crate::simplify::simplify;
use crate::solver::find_rational_root;

/// Splits `polynomial` into linear factors `(x − r)`, one per rational
/// root, deflating as it goes. Whatever stops yielding rational roots is
/// emitted as a single polynomial expression; a leading constant ≠ 1 is
/// prepended as its own factor.
pub fn factor(polynomial: &Polynomial, var: &str) -> Vec<Expr> {
    let mut factors = Vec::new();
    if polynomial.is_zero() {
        return factors;
    }

    let mut working = polynomial.clone();
    while working.degree().unwrap_or(0) > 0 {
        let Some(root) = find_rational_root(&working) else {
            break;
        };
        let (quotient, remainder) = working.divide_by_linear(&root);
        if !Number::numeric_equals(&remainder, &Number::int(0)) {
            break;
        }
        factors.push(simplify(linear_factor(var, &root)));
        working = quotient;
    }

    match working.degree() {
        Some(0) | None => {
            let constant = working.coefficient(0);
            if !constant.is_one() || factors.is_empty() {
                factors.insert(0, simplify(Expr::Number(constant)));
            }
        }
        Some(1) => factors.push(simplify(linear_from_coefficients(&working, var))),
        _ => factors.push(simplify(working.to_expr(var))),
    }
    factors
}

fn linear_factor(var: &str, root: &Number) -> Expr {
    expr::sub(Expr::symbol(var), Expr::Number(root.clone()))
}

/// Degree-1 residue whose root escaped the rational search (possible when
/// divisor enumeration overflows): keep it as `a·x + b`.
fn linear_from_coefficients(polynomial: &Polynomial, var: &str) -> Expr {
    let slope = polynomial.coefficient(1);
    let constant = polynomial.coefficient(0);
    let term = expr::mul(Expr::Number(slope), Expr::symbol(var));
    if Number::numeric_equals(&constant, &Number::int(0)) {
        return term;
    }
    expr::add(term, Expr::Number(constant))
}
