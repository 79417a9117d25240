use std::collections::HashMap;

use castex::{evaluate, evaluate_constant, integrate, parse_expr, Expr, Number};

fn parsed(input: &str) -> Expr {
    parse_expr(input).expect("parse input")
}

#[test]
fn evaluates_over_an_environment() {
    let expr = parsed("x^2 + 1");
    let mut env = HashMap::new();
    env.insert("x".to_string(), 3.0);
    assert!((evaluate(&expr, &env) - 10.0).abs() < 1e-12);
}

#[test]
fn unbound_symbols_read_as_zero() {
    let expr = parsed("x + y");
    let mut env = HashMap::new();
    env.insert("x".to_string(), 2.0);
    assert!((evaluate(&expr, &env) - 2.0).abs() < 1e-12);
}

#[test]
fn evaluates_functions_and_constants() {
    assert!((evaluate_constant(&parsed("ln(e)")) - 1.0).abs() < 1e-12);
    assert!((evaluate_constant(&parsed("sqrt(9)")) - 3.0).abs() < 1e-12);
    assert!((evaluate_constant(&parsed("cos(0)")) - 1.0).abs() < 1e-12);
    assert!((evaluate_constant(&parsed("log(100)")) - 2.0).abs() < 1e-12);
}

#[test]
fn simpson_rule_on_polynomials_is_exact() {
    let expr = parsed("x^2");
    let result = integrate(&expr, "x", 0.0, 3.0);
    assert!((result - 9.0).abs() < 1e-9);
}

#[test]
fn simpson_rule_on_sine_over_zero_to_pi() {
    let expr = parsed("sin(x)");
    let result = integrate(&expr, "x", 0.0, std::f64::consts::PI);
    assert!((result - 2.0).abs() < 1e-6);
}

#[test]
fn eager_numeric_integral_boxes_a_real_result() {
    let expr = parse_expr("integrate(sin(x), x, 0, pi)").unwrap();
    let Expr::Number(value) = expr else {
        panic!("expected a numeric result");
    };
    assert!(matches!(value, Number::Real(_)));
    assert!((value.to_f64() - 2.0).abs() < 1e-6);
}

#[test]
fn bounds_may_be_expressions() {
    let expr = parse_expr("integrate(x, x, 0, 1 + 1)").unwrap();
    let Expr::Number(value) = expr else {
        panic!("expected a numeric result");
    };
    assert!((value.to_f64() - 2.0).abs() < 1e-9);
}

#[test]
fn pathological_integrands_go_undetected() {
    // ln is undefined left of zero; the core reports what the arithmetic
    // produced instead of detecting the domain error
    let expr = parsed("ln(x)");
    let result = integrate(&expr, "x", -1.0, -0.5);
    assert!(result.is_nan());
}