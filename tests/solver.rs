use castex::{evaluate_constant, parse_expr, solve, Expr, Number, Polynomial};

fn poly(input: &str) -> Polynomial {
    let expr = parse_expr(input).expect("parse polynomial");
    Polynomial::from_expr(&expr, "x").expect("build polynomial")
}

fn int(value: i64) -> Expr {
    Expr::integer(value)
}

fn contains_symbol(expr: &Expr, name: &str) -> bool {
    match expr {
        Expr::Symbol(s) => s == name,
        Expr::Number(_) => false,
        Expr::Binary(_, a, b) => contains_symbol(a, name) || contains_symbol(b, name),
        Expr::Unary(_, a) | Expr::Paren(a) | Expr::Call(_, a) => contains_symbol(a, name),
        _ => false,
    }
}

#[test]
fn linear_root() {
    let roots = solve(&poly("2x - 5"));
    assert_eq!(roots, vec![Expr::Number(Number::rational(5, 2).unwrap())]);
}

#[test]
fn rational_roots_deflate_in_discovery_order() {
    let roots = solve(&poly("x^2 - 5x + 6"));
    assert_eq!(roots, vec![int(2), int(3)]);
}

#[test]
fn constant_term_zero_yields_root_zero_first() {
    let roots = solve(&poly("x^2 - 5x"));
    assert_eq!(roots, vec![int(0), int(5)]);
}

#[test]
fn quadratic_formula_keeps_exact_surds() {
    // x² − 2x − 1 has roots 1 ± √2
    let roots = solve(&poly("x^2 - 2x - 1"));
    assert_eq!(roots.len(), 2);
    for root in &roots {
        let value = evaluate_constant(root);
        let residual = value * value - 2.0 * value - 1.0;
        assert!(residual.abs() < 1e-9, "|P({value})| = {residual}");
    }
}

#[test]
fn complex_quadratic_roots_emit_the_imaginary_unit() {
    let roots = solve(&poly("x^2 + 1"));
    assert_eq!(roots.len(), 2);
    assert!(roots.iter().all(|r| contains_symbol(r, "i")));
}

#[test]
fn quartic_with_rational_roots_and_complex_residual() {
    let roots = solve(&poly("2x^4 - 4x^3 + x^2 - 2x"));
    assert_eq!(roots.len(), 4);
    assert_eq!(roots[0], int(0));
    assert_eq!(roots[1], int(2));
    assert!(contains_symbol(&roots[2], "i"));
    assert!(contains_symbol(&roots[3], "i"));
}

#[test]
fn biquadratic_substitution() {
    // x⁴ − 3x² + 1: no rational roots, ±sqrt((3 ± √5)/2)
    let roots = solve(&poly("x^4 - 3x^2 + 1"));
    assert_eq!(roots.len(), 4);
    for root in &roots {
        let value = evaluate_constant(root);
        let residual = poly("x^4 - 3x^2 + 1").evaluate_f64(value);
        assert!(residual.abs() < 1e-6, "|P({value})| = {residual}");
    }
}

#[test]
fn higher_degrees_fall_back_to_bisection() {
    // x⁵ − 4x³ + 2 has no rational roots
    let p = poly("x^5 - 4x^3 + 2");
    let roots = solve(&p);
    assert!(!roots.is_empty());
    for root in &roots {
        let Expr::Number(value) = root else {
            panic!("numeric fallback must return real literals");
        };
        let residual = p.evaluate_f64(value.to_f64());
        assert!(residual.abs() < 1e-6, "|P({})| = {residual}", value.to_f64());
    }
    // sorted and deduplicated
    let values: Vec<f64> = roots
        .iter()
        .map(|r| match r {
            Expr::Number(n) => n.to_f64(),
            _ => unreachable!(),
        })
        .collect();
    for pair in values.windows(2) {
        assert!(pair[1] - pair[0] > 1e-6);
    }
}

#[test]
fn rational_coefficients_integerize_before_the_root_search() {
    // x²/2 − x/2 − 1 = (x² − x − 2)/2, roots −1 and 2
    let roots = solve(&poly("1/2 x^2 - 1/2 x - 1"));
    assert_eq!(roots, vec![int(-1), int(2)]);
}

#[test]
fn zero_polynomial_has_no_roots() {
    assert!(solve(&Polynomial::zero()).is_empty());
}
