//! Single-line TeX fragments suitable for display-math typesetting.

use crate::expr::{BinOp, Expr, Func, UnOp};
use crate::number::{Number, EPSILON};

/// Context handed down while compiling: parenthesized groups relax when
/// they sit directly under a fraction bar.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Parent {
    None,
    Frac,
    Other,
}

pub fn tex(expr: &Expr) -> String {
    compile(expr, Parent::None)
}

fn compile(expr: &Expr, parent: Parent) -> String {
    match expr {
        Expr::Number(value) => render_number(value),
        Expr::Symbol(name) => name.clone(),
        Expr::Binary(op, left, right) => render_binary(*op, left, right),
        Expr::Unary(op, inner) => {
            let body = compile(inner, Parent::Other);
            match op {
                UnOp::Neg => format!("-{body}"),
                UnOp::Plus => format!("+{body}"),
            }
        }
        Expr::Paren(inner) => render_parens(inner, parent),
        Expr::Call(Func::Sqrt, inner) => format!("\\sqrt{{{}}}", compile(inner, Parent::Other)),
        Expr::Call(func, inner) => format!(
            "\\{}\\left({}\\right)",
            func.name(),
            compile(inner, Parent::Other)
        ),
        Expr::Integral {
            integrand,
            var,
            bounds,
        } => {
            let body = compile(integrand, Parent::None);
            match bounds {
                None => format!("\\int {body} d{var}"),
                Some((lower, upper)) => format!(
                    "\\int_{{{}}}^{{{}}} {body} d{var}",
                    compile(lower, Parent::Other),
                    compile(upper, Parent::Other)
                ),
            }
        }
        Expr::Integrate {
            integrand,
            var,
            lower,
            upper,
        } => format!(
            "\\int_{{{}}}^{{{}}} {} d{}",
            compile(lower, Parent::Other),
            compile(upper, Parent::Other),
            compile(integrand, Parent::None),
            var
        ),
        Expr::Derivative { inner, var } => format!(
            "\\frac{{d}}{{d{var}}} \\left({}\\right)",
            compile(inner, Parent::Other)
        ),
        Expr::Roots { inner, var } => format!(
            "\\operatorname{{roots}}\\left({}, {var}\\right)",
            compile(inner, Parent::Other)
        ),
        Expr::Factor { inner, var } => format!(
            "\\operatorname{{factor}}\\left({}, {var}\\right)",
            compile(inner, Parent::Other)
        ),
        Expr::RootSet(items) | Expr::FactorSet(items) => {
            let joined = items
                .iter()
                .map(|item| compile(item, Parent::Other))
                .collect::<Vec<_>>()
                .join(", ");
            format!("\\left\\{{{joined}\\right\\}}")
        }
        Expr::Limit {
            approaching,
            target,
            operand,
        } => format!(
            "\\lim_{{{} \\to {}}} {}",
            compile(approaching, Parent::Other),
            compile(target, Parent::Other),
            compile(operand, Parent::Other)
        ),
    }
}

fn render_binary(op: BinOp, left: &Expr, right: &Expr) -> String {
    match op {
        BinOp::Div => format!(
            "\\frac{{{}}}{{{}}}",
            compile(left, Parent::Frac),
            compile(right, Parent::Frac)
        ),
        BinOp::Pow => format!(
            "{}^{{{}}}",
            compile(left, Parent::Other),
            compile(right, Parent::Other)
        ),
        BinOp::Mul => render_product(left, right),
        BinOp::Add => format!(
            "{} + {}",
            compile(left, Parent::Other),
            compile(right, Parent::Other)
        ),
        BinOp::Sub => format!(
            "{} - {}",
            compile(left, Parent::Other),
            compile(right, Parent::Other)
        ),
        BinOp::Rem => format!(
            "{} \\bmod {}",
            compile(left, Parent::Other),
            compile(right, Parent::Other)
        ),
    }
}

/// A rational coefficient spreads over the whole product as a fraction;
/// a plain numeric coefficient juxtaposes (`2x`); everything else takes
/// an explicit `\cdot`.
fn render_product(left: &Expr, right: &Expr) -> String {
    if let Some(rendered) = render_rational_product(left, right) {
        return rendered;
    }
    if left.is_number() && !right.is_number() {
        return format!(
            "{}{}",
            compile(left, Parent::Other),
            compile(right, Parent::Other)
        );
    }
    format!(
        "{} \\cdot {}",
        compile(left, Parent::Other),
        compile(right, Parent::Other)
    )
}

fn render_rational_product(left: &Expr, right: &Expr) -> Option<String> {
    let (num, den, other) = if let Some((num, den)) = rational_parts(left) {
        (num, den, right)
    } else if let Some((num, den)) = rational_parts(right) {
        (num, den, left)
    } else {
        return None;
    };
    if den.is_one() {
        return None;
    }
    let mut numerator = compile(other, Parent::Other);
    if !num.is_one() {
        if Number::numeric_equals(&num, &Number::int(-1)) {
            numerator = format!("-{numerator}");
        } else {
            numerator = format!("{} \\cdot {}", render_number(&num), numerator);
        }
    }
    Some(format!(
        "\\frac{{{numerator}}}{{{}}}",
        render_number(&den)
    ))
}

fn rational_parts(expr: &Expr) -> Option<(Number, Number)> {
    match expr {
        Expr::Number(Number::Rational(n, d)) => Some((Number::int(*n), Number::int(*d))),
        Expr::Number(Number::BigRational(r)) => Some((
            Number::big(r.numer().clone()),
            Number::big(r.denom().clone()),
        )),
        _ => None,
    }
}

fn render_parens(inner: &Expr, parent: Parent) -> String {
    let relax = parent == Parent::Frac
        || matches!(
            inner,
            Expr::Number(_)
                | Expr::Symbol(_)
                | Expr::Unary(..)
                | Expr::Call(..)
                | Expr::Integral { .. }
                | Expr::Integrate { .. }
                | Expr::Derivative { .. }
                | Expr::Roots { .. }
                | Expr::Factor { .. }
                | Expr::RootSet(_)
                | Expr::FactorSet(_)
                | Expr::Limit { .. }
        );
    let body = compile(inner, Parent::Other);
    if relax {
        body
    } else {
        format!("({body})")
    }
}

fn render_number(value: &Number) -> String {
    let numeric = value.to_f64();
    if numeric.is_infinite() {
        return if numeric < 0.0 {
            "-\\infty".into()
        } else {
            "\\infty".into()
        };
    }
    if approx(value, &Number::pi()) {
        return "\\pi".into();
    }
    if approx(value, &Number::e()) {
        return "\\mathrm{e}".into();
    }
    if approx(value, &Number::tau()) {
        return "\\tau".into();
    }
    match value {
        Number::Rational(n, d) => format!("\\frac{{{n}}}{{{d}}}"),
        Number::BigRational(r) => format!("\\frac{{{}}}{{{}}}", r.numer(), r.denom()),
        Number::Real(v) => render_real(*v),
        other => other.to_string(),
    }
}

fn approx(value: &Number, constant: &Number) -> bool {
    (value.to_f64() - constant.to_f64()).abs() < EPSILON
}

fn render_real(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
