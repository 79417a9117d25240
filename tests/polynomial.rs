use castex::{parse_expr, Number, Polynomial};

fn poly(input: &str) -> Polynomial {
    let expr = parse_expr(input).expect("parse polynomial");
    Polynomial::from_expr(&expr, "x").expect("build polynomial")
}

fn int(value: i64) -> Number {
    Number::int(value)
}

#[test]
fn construction_trims_trailing_zeros() {
    let p = Polynomial::new(vec![int(1), int(2), int(0), int(0)]);
    assert_eq!(p.coefficients().len(), 2);
    assert_eq!(p.degree(), Some(1));
}

#[test]
fn zero_polynomial_has_no_degree() {
    let p = Polynomial::new(vec![int(0), int(0)]);
    assert!(p.is_zero());
    assert_eq!(p.degree(), None);
    assert_eq!(p.coefficients(), &[int(0)]);
}

#[test]
fn extraction_collects_coefficients_in_ascending_order() {
    let p = poly("2x^3 - x + 1");
    assert_eq!(p.degree(), Some(3));
    assert_eq!(p.coefficient(0), int(1));
    assert_eq!(p.coefficient(1), int(-1));
    assert_eq!(p.coefficient(2), int(0));
    assert_eq!(p.coefficient(3), int(2));
}

#[test]
fn extraction_handles_parens_and_unary_sign() {
    let p = poly("-(x - 1)(x + 1)");
    assert_eq!(p.coefficient(2), int(-1));
    assert_eq!(p.coefficient(0), int(1));
}

#[test]
fn extraction_accepts_rational_coefficients() {
    let expr = parse_expr("1/2 x^2 + 1/3").unwrap();
    let p = Polynomial::from_expr(&expr, "x").unwrap();
    assert_eq!(p.coefficient(2), Number::rational(1, 2).unwrap());
    assert_eq!(p.coefficient(0), Number::rational(1, 3).unwrap());
}

#[test]
fn extraction_rejects_non_polynomial_shapes() {
    for input in ["sin(x)", "x + y", "x/2", "x^(1/2)", "x^y", "2^x", "1.5*x"] {
        let expr = parse_expr(input).unwrap();
        assert!(
            Polynomial::from_expr(&expr, "x").is_none(),
            "{input} should not extract"
        );
    }
}

#[test]
fn addition_and_multiplication() {
    let sum = poly("x^2 + 1").add(&poly("x - 1"));
    assert_eq!(sum, poly("x^2 + x"));

    let product = poly("x + 1").mul(&poly("x - 1"));
    assert_eq!(product, poly("x^2 - 1"));
}

#[test]
fn pow_by_repeated_squaring() {
    assert_eq!(poly("x + 1").pow(2), poly("x^2 + 2x + 1"));
    assert_eq!(poly("x + 1").pow(0), Polynomial::one());
}

#[test]
fn horner_evaluation_is_exact() {
    let p = poly("1/2 x^2 + x");
    let at = Number::rational(1, 3).unwrap();
    // 1/2·(1/9) + 1/3 = 1/18 + 6/18 = 7/18
    assert_eq!(p.evaluate(&at), Number::rational(7, 18).unwrap());
    assert!((poly("x^2 - 2").evaluate_f64(1.5) - 0.25).abs() < 1e-12);
}

#[test]
fn synthetic_division_identity() {
    // P = (x − r)·Q + R with R = P(r), bit-exact
    let p = poly("x^3 - 2x + 5");
    let root = int(7);
    let (quotient, remainder) = p.divide_by_linear(&root);
    assert_eq!(remainder, p.evaluate(&root));

    let linear = Polynomial::new(vec![root.neg(), int(1)]);
    let rebuilt = quotient
        .mul(&linear)
        .add(&Polynomial::new(vec![remainder]));
    assert_eq!(rebuilt, p);
}

#[test]
fn synthetic_division_with_rational_root() {
    let p = poly("2x^2 - x - 1");
    let root = Number::rational(-1, 2).unwrap();
    let (quotient, remainder) = p.divide_by_linear(&root);
    assert_eq!(remainder, int(0));
    assert_eq!(quotient, poly("2x - 2"));
}

#[test]
fn to_expr_rebuilds_descending_terms() {
    let p = poly("2x^2 + 1");
    let rebuilt = Polynomial::from_expr(&p.to_expr("x"), "x").unwrap();
    assert_eq!(rebuilt, p);

    let with_negation = poly("0 - x^2 + 3");
    let rebuilt = Polynomial::from_expr(&with_negation.to_expr("x"), "x").unwrap();
    assert_eq!(rebuilt, with_negation);
}
