//! The numeric tower: machine and big integers, machine and big rationals,
//! and inexact reals, with promotion on overflow and collapse to the
//! smallest exact representation on construction.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{CasError, Result};

/// Tolerance used when comparing values through the inexact path.
pub const EPSILON: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Big(BigInt),
    /// Reduced, denominator > 1 (denominator 1 collapses to `Int`).
    Rational(i64, i64),
    BigRational(BigRational),
    Real(f64),
}

impl Number {
    pub fn int(value: i64) -> Number {
        Number::Int(value)
    }

    pub fn big(value: BigInt) -> Number {
        match value.to_i64() {
            Some(small) => Number::Int(small),
            None => Number::Big(value),
        }
    }

    pub fn real(value: f64) -> Number {
        Number::Real(value)
    }

    /// Reducing, sign-normalizing rational constructor. Fails on a zero
    /// denominator.
    pub fn rational(num: i64, den: i64) -> Result<Number> {
        Number::from_big_fraction(BigInt::from(num), BigInt::from(den))
    }

    pub fn from_big_fraction(num: BigInt, den: BigInt) -> Result<Number> {
        if den.is_zero() {
            return Err(CasError::ZeroDenominator);
        }
        Ok(Number::from_parts(num, den))
    }

    /// Internal constructor for callers that already know the denominator
    /// is nonzero.
    fn from_parts(num: BigInt, den: BigInt) -> Number {
        debug_assert!(!den.is_zero());
        Number::collapse(BigRational::new(num, den))
    }

    fn collapse(value: BigRational) -> Number {
        if value.is_integer() {
            return Number::big(value.to_integer());
        }
        match (value.numer().to_i64(), value.denom().to_i64()) {
            (Some(n), Some(d)) => Number::Rational(n, d),
            _ => Number::BigRational(value),
        }
    }

    pub fn pi() -> Number {
        Number::Real(std::f64::consts::PI)
    }

    pub fn tau() -> Number {
        Number::Real(std::f64::consts::TAU)
    }

    pub fn e() -> Number {
        Number::Real(std::f64::consts::E)
    }

    pub fn infinity() -> Number {
        Number::Real(f64::INFINITY)
    }

    /// Integer literal, promoting to a big integer outside the `i64` range.
    pub fn parse_integer_literal(literal: &str) -> Number {
        match literal.parse::<i64>() {
            Ok(value) => Number::Int(value),
            Err(_) => Number::big(literal.parse::<BigInt>().unwrap()),
        }
    }

    /// Decimal literal. Values outside finite `f64` range promote to the
    /// exact big-rational value of the decimal string.
    pub fn parse_decimal_literal(literal: &str) -> Number {
        if let Ok(value) = literal.parse::<f64>() {
            if value.is_finite() {
                return Number::Real(value);
            }
        }
        let (int_part, frac_part) = match literal.split_once('.') {
            Some((i, f)) => (i, f),
            None => (literal, ""),
        };
        let mut digits = format!("{int_part}{frac_part}");
        if digits.is_empty() {
            digits.push('0');
        }
        let num = digits.parse::<BigInt>().unwrap();
        let den = BigInt::from(10u8).pow(frac_part.len() as u32);
        Number::from_parts(num, den)
    }

    pub fn is_exact(&self) -> bool {
        !matches!(self, Number::Real(_))
    }

    /// True for exact integers (`Int` and `Big`).
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_) | Number::Big(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(v) => *v == 0,
            Number::Big(v) => v.is_zero(),
            // normalized rationals are never integer-valued
            Number::Rational(..) | Number::BigRational(_) => false,
            Number::Real(v) => *v == 0.0,
        }
    }

    pub fn is_one(&self) -> bool {
        match self {
            Number::Int(v) => *v == 1,
            Number::Big(_) => false, // a big holding 1 collapses to Int
            Number::Rational(..) | Number::BigRational(_) => false,
            Number::Real(v) => *v == 1.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Int(v) => *v < 0,
            Number::Big(v) => v.is_negative(),
            Number::Rational(n, _) => *n < 0,
            Number::BigRational(r) => r.is_negative(),
            Number::Real(v) => *v < 0.0,
        }
    }

    /// The value as a machine integer, when it is an exact integer that fits.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Number::Int(v) => Some(*v),
            Number::Big(v) => v.to_i64(),
            _ => None,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Int(v) => *v as f64,
            Number::Big(v) => v.to_f64().unwrap_or(f64::NAN),
            Number::Rational(n, d) => *n as f64 / *d as f64,
            Number::BigRational(r) => r.to_f64().unwrap_or(f64::NAN),
            Number::Real(v) => *v,
        }
    }

    /// Numerator/denominator of an exact value; `None` for reals.
    pub fn big_fraction(&self) -> Option<(BigInt, BigInt)> {
        match self {
            Number::Int(v) => Some((BigInt::from(*v), BigInt::from(1))),
            Number::Big(v) => Some((v.clone(), BigInt::from(1))),
            Number::Rational(n, d) => Some((BigInt::from(*n), BigInt::from(*d))),
            Number::BigRational(r) => Some((r.numer().clone(), r.denom().clone())),
            Number::Real(_) => None,
        }
    }

    pub fn add(&self, other: &Number) -> Number {
        if let (Number::Int(a), Number::Int(b)) = (self, other) {
            if let Some(sum) = a.checked_add(*b) {
                return Number::Int(sum);
            }
        }
        match (self.big_fraction(), other.big_fraction()) {
            (Some((an, ad)), Some((bn, bd))) => {
                Number::from_parts(&an * &bd + &bn * &ad, ad * bd)
            }
            _ => Number::Real(self.to_f64() + other.to_f64()),
        }
    }

    pub fn sub(&self, other: &Number) -> Number {
        if let (Number::Int(a), Number::Int(b)) = (self, other) {
            if let Some(diff) = a.checked_sub(*b) {
                return Number::Int(diff);
            }
        }
        match (self.big_fraction(), other.big_fraction()) {
            (Some((an, ad)), Some((bn, bd))) => {
                Number::from_parts(&an * &bd - &bn * &ad, ad * bd)
            }
            _ => Number::Real(self.to_f64() - other.to_f64()),
        }
    }

    pub fn mul(&self, other: &Number) -> Number {
        if let (Number::Int(a), Number::Int(b)) = (self, other) {
            if let Some(product) = a.checked_mul(*b) {
                return Number::Int(product);
            }
        }
        match (self.big_fraction(), other.big_fraction()) {
            (Some((an, ad)), Some((bn, bd))) => Number::from_parts(an * bn, ad * bd),
            _ => Number::Real(self.to_f64() * other.to_f64()),
        }
    }

    pub fn div(&self, other: &Number) -> Result<Number> {
        match (self.big_fraction(), other.big_fraction()) {
            (Some((an, ad)), Some((bn, bd))) => {
                if bn.is_zero() {
                    return Err(CasError::ZeroDenominator);
                }
                Ok(Number::from_parts(an * bd, ad * bn))
            }
            _ => Ok(Number::Real(self.to_f64() / other.to_f64())),
        }
    }

    pub fn neg(&self) -> Number {
        match self {
            Number::Int(v) => match v.checked_neg() {
                Some(negated) => Number::Int(negated),
                None => Number::Big(-BigInt::from(*v)),
            },
            Number::Big(v) => Number::big(-v),
            Number::Rational(n, d) => Number::from_parts(-BigInt::from(*n), BigInt::from(*d)),
            Number::BigRational(r) => Number::collapse(-r.clone()),
            Number::Real(v) => Number::Real(-v),
        }
    }

    /// Exponentiation as used by constant folding. Exact bases accept only
    /// integer exponents (negative exponents invert after the positive
    /// power); any inexact operand routes through `powf`. `None` means the
    /// operation is not foldable and the node should be left alone.
    pub fn pow(&self, exponent: &Number) -> Option<Number> {
        if !self.is_exact() || !exponent.is_exact() {
            return Some(Number::Real(self.to_f64().powf(exponent.to_f64())));
        }
        if !exponent.is_integer() {
            return None;
        }
        let exp = exponent.as_int()?;
        let power = u32::try_from(exp.unsigned_abs()).ok()?;
        let (num, den) = self.big_fraction()?;
        let (pn, pd) = (num.pow(power), den.pow(power));
        if exp < 0 {
            if pn.is_zero() {
                return None;
            }
            Some(Number::from_parts(pd, pn))
        } else {
            Some(Number::from_parts(pn, pd))
        }
    }

    /// True when `a` and `b` denote the same mathematical value. Exact
    /// operands compare exactly; the tolerance applies only when at least
    /// one side is a real.
    pub fn numeric_equals(a: &Number, b: &Number) -> bool {
        match (a.big_fraction(), b.big_fraction()) {
            (Some((an, ad)), Some((bn, bd))) => an * bd == bn * ad,
            _ => {
                let (x, y) = (a.to_f64(), b.to_f64());
                x == y || (x - y).abs() <= EPSILON
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Big(v) => write!(f, "{v}"),
            Number::Rational(n, d) => write!(f, "{n}/{d}"),
            Number::BigRational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Number::Real(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_reduces_and_normalizes_sign() {
        let r = Number::rational(4, -6).unwrap();
        assert_eq!(r, Number::Rational(-2, 3));
        assert_eq!(Number::rational(-4, -6).unwrap(), Number::Rational(2, 3));
    }

    #[test]
    fn rational_with_unit_denominator_collapses_to_int() {
        assert_eq!(Number::rational(8, 4).unwrap(), Number::Int(2));
        assert_eq!(Number::rational(0, 5).unwrap(), Number::Int(0));
    }

    #[test]
    fn rational_rejects_zero_denominator() {
        assert!(Number::rational(1, 0).is_err());
    }

    #[test]
    fn int_overflow_promotes_to_big() {
        let huge = Number::Int(i64::MAX).add(&Number::Int(1));
        assert!(matches!(huge, Number::Big(_)));
        assert_eq!(
            huge,
            Number::Big(BigInt::from(i64::MAX) + BigInt::from(1))
        );
    }

    #[test]
    fn big_results_collapse_when_small_enough() {
        let a = Number::Int(i64::MAX).add(&Number::Int(1));
        let back = a.add(&Number::Int(-1));
        assert_eq!(back, Number::Int(i64::MAX));
    }

    #[test]
    fn integer_literal_promotion() {
        assert_eq!(Number::parse_integer_literal("42"), Number::Int(42));
        let big = Number::parse_integer_literal("123456789012345678901234567890");
        assert!(matches!(big, Number::Big(_)));
    }

    #[test]
    fn decimal_literal_promotion() {
        assert_eq!(Number::parse_decimal_literal("2.5"), Number::Real(2.5));
        let mut overflow = String::from("1");
        overflow.push_str(&"0".repeat(400));
        overflow.push_str(".5");
        let promoted = Number::parse_decimal_literal(&overflow);
        assert!(promoted.is_exact());
    }

    #[test]
    fn arithmetic_mixes_exact_and_real() {
        let exact = Number::rational(1, 2).unwrap().add(&Number::rational(1, 3).unwrap());
        assert_eq!(exact, Number::Rational(5, 6));
        let real = Number::Real(0.5).add(&Number::Int(1));
        assert_eq!(real, Number::Real(1.5));
    }

    #[test]
    fn pow_integer_exponents_only_for_exact() {
        let base = Number::rational(2, 3).unwrap();
        assert_eq!(base.pow(&Number::Int(2)), Some(Number::Rational(4, 9)));
        assert_eq!(base.pow(&Number::Int(-2)), Some(Number::Rational(9, 4)));
        assert_eq!(base.pow(&Number::rational(1, 2).unwrap()), None);
        assert_eq!(Number::Int(0).pow(&Number::Int(-1)), None);
        let real = Number::Real(2.0).pow(&Number::Real(0.5)).unwrap();
        assert!((real.to_f64() - std::f64::consts::SQRT_2).abs() < EPSILON);
    }

    #[test]
    fn numeric_equals_across_variants() {
        assert!(Number::numeric_equals(
            &Number::Int(2),
            &Number::big(BigInt::from(2))
        ));
        assert!(Number::numeric_equals(
            &Number::rational(1, 2).unwrap(),
            &Number::Real(0.5)
        ));
        assert!(Number::numeric_equals(
            &Number::Real(1.0 + 1e-12),
            &Number::Int(1)
        ));
        assert!(!Number::numeric_equals(
            &Number::rational(1, 3).unwrap(),
            &Number::rational(1, 4).unwrap()
        ));
        assert!(Number::numeric_equals(
            &Number::infinity(),
            &Number::infinity()
        ));
    }

    #[test]
    fn division_by_exact_zero_fails() {
        assert!(Number::Int(1).div(&Number::Int(0)).is_err());
    }
}
