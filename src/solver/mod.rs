//! Polynomial root finding: rational-root deflation, closed forms for low
//! degrees, and a numeric bisection fallback.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::expr::{self, Expr};
use crate::number::Number;
use crate::polynomial::Polynomial;
use crate::simplify::simplify;

const SCAN_LOWER: f64 = -10.0;
const SCAN_UPPER: f64 = 10.0;
const SCAN_SAMPLES: usize = 400;
const BISECT_ITERATIONS: usize = 60;
const ROOT_TOLERANCE: f64 = 1e-6;

/// Roots of `polynomial`, each as a simplified expression. Rational roots
/// deflate the polynomial first; the residual is solved in closed form
/// when degree permits (linear, quadratic, biquadratic), numerically
/// otherwise.
pub fn solve(polynomial: &Polynomial) -> Vec<Expr> {
    if polynomial.is_zero() {
        return Vec::new();
    }

    let mut roots = Vec::new();
    let mut working = polynomial.clone();

    while let Some(rational_root) = find_rational_root(&working) {
        let (quotient, remainder) = working.divide_by_linear(&rational_root);
        if !is_zero(&remainder) {
            break;
        }
        roots.push(simplify(Expr::Number(rational_root)));
        working = quotient;
        if working.degree().unwrap_or(0) == 0 {
            break;
        }
    }

    let degree = match working.degree() {
        Some(d) if d >= 1 => d,
        _ => return roots,
    };

    match degree {
        1 => roots.push(simplify(solve_linear(&working))),
        2 => roots.extend(solve_quadratic(&working)),
        4 if is_biquadratic(&working) => roots.extend(solve_biquadratic(&working)),
        _ => roots.extend(approximate_roots(&working)),
    }
    roots
}

fn solve_linear(polynomial: &Polynomial) -> Expr {
    let a = polynomial.coefficient(1);
    let b = polynomial.coefficient(0);
    expr::div(expr::neg(Expr::Number(b)), Expr::Number(a))
}

/// `(−b ± sqrt(b² − 4ac)) / 2a`, built symbolically so the simplifier can
/// keep exact surds.
fn solve_quadratic(polynomial: &Polynomial) -> Vec<Expr> {
    let a = polynomial.coefficient(2);
    let b = polynomial.coefficient(1);
    let c = polynomial.coefficient(0);

    let neg_b = expr::neg(Expr::Number(b.clone()));
    let b_squared = expr::mul(Expr::Number(b.clone()), Expr::Number(b));
    let four_ac = expr::mul(
        Expr::integer(4),
        expr::mul(Expr::Number(a.clone()), Expr::Number(c)),
    );
    let sqrt_discriminant = expr::sqrt(expr::sub(b_squared, four_ac));
    let denominator = expr::mul(Expr::integer(2), Expr::Number(a));

    let positive = expr::div(
        expr::add(neg_b.clone(), sqrt_discriminant.clone()),
        denominator.clone(),
    );
    let negative = expr::div(expr::sub(neg_b, sqrt_discriminant), denominator);
    vec![simplify(positive), simplify(negative)]
}

/// Degree-4 polynomials with only even powers: substitute y = x², solve
/// the quadratic, and emit ±sqrt(y) for each root.
fn solve_biquadratic(polynomial: &Polynomial) -> Vec<Expr> {
    let a = polynomial.coefficient(4);
    let b = polynomial.coefficient(2);
    let c = polynomial.coefficient(0);
    let substituted = Polynomial::new(vec![c, b, a]);

    let mut result = Vec::new();
    for y_root in solve_quadratic(&substituted) {
        let sqrt_expr = expr::sqrt(y_root);
        result.push(simplify(sqrt_expr.clone()));
        result.push(simplify(expr::neg(sqrt_expr)));
    }
    result
}

fn is_biquadratic(polynomial: &Polynomial) -> bool {
    polynomial.degree() == Some(4)
        && is_zero(&polynomial.coefficient(1))
        && is_zero(&polynomial.coefficient(3))
}

/// Rational-root search per the rational-root theorem: candidates ±p/q
/// with p dividing the constant term and q the leading coefficient of the
/// integerized polynomial.
pub(crate) fn find_rational_root(polynomial: &Polynomial) -> Option<Number> {
    let integerized = integerize(polynomial)?;
    let degree = integerized.iter().rposition(|c| !c.is_zero())?;
    let leading = &integerized[degree];
    let constant = &integerized[0];
    if constant.is_zero() {
        return Some(Number::int(0));
    }

    let numerators = divisors(constant);
    let mut denominators = divisors(leading);
    if denominators.is_empty() {
        denominators.push(1);
    }

    for &p in &numerators {
        for &q in &denominators {
            if q == 0 {
                continue;
            }
            let candidate = Number::rational(p, q).ok()?;
            if is_zero(&polynomial.evaluate(&candidate)) {
                return Some(candidate);
            }
            let negated = candidate.neg();
            if is_zero(&polynomial.evaluate(&negated)) {
                return Some(negated);
            }
        }
    }
    None
}

/// Scales every coefficient by the lcm of the denominators. `None` when
/// any coefficient is non-exact.
fn integerize(polynomial: &Polynomial) -> Option<Vec<BigInt>> {
    let mut fractions = Vec::new();
    let mut lcm = BigInt::from(1);
    for coeff in polynomial.coefficients() {
        let (num, den) = coeff.big_fraction()?;
        lcm = lcm.lcm(&den);
        fractions.push((num, den));
    }
    Some(
        fractions
            .into_iter()
            .map(|(num, den)| num * (&lcm / den))
            .collect(),
    )
}

/// Positive divisors, enumerated only within machine range: magnitudes
/// beyond `i64` yield no candidates and push the caller to the numeric
/// fallback.
fn divisors(value: &BigInt) -> Vec<i64> {
    let Some(magnitude) = value.abs().to_i64() else {
        return Vec::new();
    };
    let mut result = Vec::new();
    let mut d = 1i64;
    while (d as i128) * (d as i128) <= magnitude as i128 {
        if magnitude % d == 0 {
            result.push(d);
            let other = magnitude / d;
            if other != d {
                result.push(other);
            }
        }
        d += 1;
    }
    result
}

/// Sign-change scan over [−10, 10] at 400 samples, refined by bisection;
/// near-zero samples are reported directly.
fn approximate_roots(polynomial: &Polynomial) -> Vec<Expr> {
    let mut estimates = Vec::new();
    let step = (SCAN_UPPER - SCAN_LOWER) / SCAN_SAMPLES as f64;
    let mut prev_x = SCAN_LOWER;
    let mut prev_val = polynomial.evaluate_f64(prev_x);

    for i in 1..=SCAN_SAMPLES {
        let x = SCAN_LOWER + i as f64 * step;
        let val = polynomial.evaluate_f64(x);
        if val.is_nan() || prev_val.is_nan() {
            prev_x = x;
            prev_val = val;
            continue;
        }
        if val.abs() < 1e-7 {
            estimates.push(x);
        }
        if prev_val * val < 0.0 {
            estimates.push(bisect(polynomial, prev_x, x));
        }
        prev_x = x;
        prev_val = val;
    }

    deduplicate(estimates)
        .into_iter()
        .map(|value| Expr::Number(Number::real(value)))
        .collect()
}

fn bisect(polynomial: &Polynomial, left: f64, right: f64) -> f64 {
    let mut a = left;
    let mut b = right;
    let mut mid = (a + b) / 2.0;
    for _ in 0..BISECT_ITERATIONS {
        let f_mid = polynomial.evaluate_f64(mid);
        let f_a = polynomial.evaluate_f64(a);
        if f_mid.abs() < 1e-9 {
            break;
        }
        if f_a * f_mid < 0.0 {
            b = mid;
        } else {
            a = mid;
        }
        mid = (a + b) / 2.0;
    }
    mid
}

fn deduplicate(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mut unique: Vec<f64> = Vec::new();
    for value in values {
        if unique
            .last()
            .map_or(true, |last| (value - last).abs() > ROOT_TOLERANCE)
        {
            unique.push(value);
        }
    }
    unique
}

fn is_zero(value: &Number) -> bool {
    Number::numeric_equals(value, &Number::int(0))
}
