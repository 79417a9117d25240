//! Dense univariate polynomials over the exact numeric tower, plus
//! coefficient extraction from expression trees.

use crate::expr::{self, BinOp, Expr, UnOp};
use crate::number::Number;

/// Coefficients in ascending degree order, trailing zeros trimmed on
/// construction. The zero polynomial is stored as `[0]` and has no degree.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coeffs: Vec<Number>,
}

impl Polynomial {
    pub fn new(coeffs: Vec<Number>) -> Polynomial {
        let mut poly = Polynomial { coeffs };
        if poly.coeffs.is_empty() {
            poly.coeffs.push(Number::int(0));
        }
        poly.trim();
        poly
    }

    pub fn zero() -> Polynomial {
        Polynomial {
            coeffs: vec![Number::int(0)],
        }
    }

    pub fn one() -> Polynomial {
        Polynomial {
            coeffs: vec![Number::int(1)],
        }
    }

    fn trim(&mut self) {
        while self.coeffs.len() > 1 && is_zero_coeff(self.coeffs.last().unwrap()) {
            self.coeffs.pop();
        }
    }

    pub fn degree(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|c| !is_zero_coeff(c))
    }

    pub fn is_zero(&self) -> bool {
        self.degree().is_none()
    }

    pub fn leading_coefficient(&self) -> Number {
        self.degree()
            .map(|d| self.coeffs[d].clone())
            .unwrap_or_else(|| Number::int(0))
    }

    pub fn coefficient(&self, power: usize) -> Number {
        self.coeffs
            .get(power)
            .cloned()
            .unwrap_or_else(|| Number::int(0))
    }

    pub fn coefficients(&self) -> &[Number] {
        &self.coeffs
    }

    pub fn add(&self, other: &Polynomial) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);
        for i in 0..len {
            result.push(self.coefficient(i).add(&other.coefficient(i)));
        }
        Polynomial::new(result)
    }

    pub fn sub(&self, other: &Polynomial) -> Polynomial {
        self.add(&other.scale(&Number::int(-1)))
    }

    pub fn scale(&self, scalar: &Number) -> Polynomial {
        Polynomial::new(self.coeffs.iter().map(|c| c.mul(scalar)).collect())
    }

    pub fn mul(&self, other: &Polynomial) -> Polynomial {
        let (Some(da), Some(db)) = (self.degree(), other.degree()) else {
            return Polynomial::zero();
        };
        let mut result = vec![Number::int(0); da + db + 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].add(&a.mul(b));
            }
        }
        Polynomial::new(result)
    }

    pub fn pow(&self, exponent: usize) -> Polynomial {
        let mut result = Polynomial::one();
        let mut base = self.clone();
        let mut power = exponent;
        while power > 0 {
            if power & 1 == 1 {
                result = result.mul(&base);
            }
            if power > 1 {
                base = base.mul(&base);
            }
            power >>= 1;
        }
        result
    }

    /// Horner evaluation in exact arithmetic.
    pub fn evaluate(&self, value: &Number) -> Number {
        let mut acc = Number::int(0);
        for coeff in self.coeffs.iter().rev() {
            acc = acc.mul(value).add(coeff);
        }
        acc
    }

    pub fn evaluate_f64(&self, value: f64) -> f64 {
        let mut acc = 0.0;
        for coeff in self.coeffs.iter().rev() {
            acc = acc * value + coeff.to_f64();
        }
        acc
    }

    /// Synthetic (Horner-form) division by `(x − root)`, producing the
    /// quotient and the single remainder `P(root)` in one pass.
    pub fn divide_by_linear(&self, root: &Number) -> (Polynomial, Number) {
        let degree = match self.degree() {
            Some(d) if d > 0 => d,
            _ => return (Polynomial::zero(), self.coefficient(0)),
        };
        let mut quotient_desc = Vec::with_capacity(degree);
        let mut accumulator = self.coefficient(degree);
        quotient_desc.push(accumulator.clone());
        for i in (1..degree).rev() {
            let term = self.coefficient(i).add(&root.mul(&accumulator));
            quotient_desc.push(term.clone());
            accumulator = term;
        }
        let remainder = self.coefficient(0).add(&root.mul(&accumulator));
        quotient_desc.reverse();
        (Polynomial::new(quotient_desc), remainder)
    }

    /// Coefficient extraction with respect to `var`. Exact numeric leaves,
    /// the variable itself, `+ − *`, non-negative integer powers, parens
    /// and unary sign only; any other shape is not a polynomial and yields
    /// `None`.
    pub fn from_expr(expr: &Expr, var: &str) -> Option<Polynomial> {
        match expr {
            Expr::Number(n) if n.is_exact() => Some(Polynomial::new(vec![n.clone()])),
            Expr::Number(_) => None,
            Expr::Symbol(name) if name == var => {
                Some(Polynomial::new(vec![Number::int(0), Number::int(1)]))
            }
            Expr::Symbol(_) => None,
            Expr::Binary(BinOp::Add, a, b) => {
                Some(Polynomial::from_expr(a, var)?.add(&Polynomial::from_expr(b, var)?))
            }
            Expr::Binary(BinOp::Sub, a, b) => {
                Some(Polynomial::from_expr(a, var)?.sub(&Polynomial::from_expr(b, var)?))
            }
            Expr::Binary(BinOp::Mul, a, b) => {
                Some(Polynomial::from_expr(a, var)?.mul(&Polynomial::from_expr(b, var)?))
            }
            Expr::Binary(BinOp::Pow, base, exponent) => {
                let power = match exponent.as_ref() {
                    Expr::Number(n) if n.is_integer() => n.as_int()?,
                    _ => return None,
                };
                let power = usize::try_from(power).ok()?;
                Some(Polynomial::from_expr(base, var)?.pow(power))
            }
            Expr::Unary(UnOp::Neg, inner) => {
                Some(Polynomial::from_expr(inner, var)?.scale(&Number::int(-1)))
            }
            Expr::Unary(UnOp::Plus, inner) => Polynomial::from_expr(inner, var),
            Expr::Paren(inner) => Polynomial::from_expr(inner, var),
            _ => None,
        }
    }

    /// Rebuilds the polynomial as an expression, terms in descending
    /// degree. Unit coefficients elide, −1 negates.
    pub fn to_expr(&self, var: &str) -> Expr {
        let Some(degree) = self.degree() else {
            return Expr::integer(0);
        };
        let mut sum: Option<Expr> = None;
        for power in (0..=degree).rev() {
            let coeff = self.coefficient(power);
            if is_zero_coeff(&coeff) {
                continue;
            }
            let term = build_term(&coeff, power, var);
            sum = Some(match sum {
                Some(acc) => expr::add(acc, term),
                None => term,
            });
        }
        sum.unwrap_or_else(|| Expr::integer(0))
    }
}

fn build_term(coeff: &Number, power: usize, var: &str) -> Expr {
    if power == 0 {
        return Expr::Number(coeff.clone());
    }
    let base = if power == 1 {
        Expr::symbol(var)
    } else {
        expr::pow(Expr::symbol(var), Expr::integer(power as i64))
    };
    if coeff.is_one() {
        return base;
    }
    if Number::numeric_equals(coeff, &Number::int(-1)) {
        return expr::neg(base);
    }
    expr::mul(Expr::Number(coeff.clone()), base)
}

fn is_zero_coeff(value: &Number) -> bool {
    Number::numeric_equals(value, &Number::int(0))
}
