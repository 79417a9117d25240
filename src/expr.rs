//! Expression tree definitions and helpers.

use std::fmt;

use crate::number::Number;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    pub fn from_char(symbol: char) -> Option<BinOp> {
        match symbol {
            '+' => Some(BinOp::Add),
            '-' => Some(BinOp::Sub),
            '*' => Some(BinOp::Mul),
            '/' => Some(BinOp::Div),
            '%' => Some(BinOp::Rem),
            '^' => Some(BinOp::Pow),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Neg,
}

/// Single-argument named functions of the surface language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Func {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Func> {
        match name {
            "sqrt" => Some(Func::Sqrt),
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "ln" => Some(Func::Ln),
            "log" => Some(Func::Log),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Func::Sqrt => "sqrt",
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Ln => "ln",
            Func::Log => "log",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(Number),
    Symbol(String),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Unary(UnOp, Box<Expr>),
    /// Parenthesization written by the user, preserved for rendering.
    Paren(Box<Expr>),
    Call(Func, Box<Expr>),
    /// Symbolic `int(f, x)` / `int(f, x, lo, hi)`.
    Integral {
        integrand: Box<Expr>,
        var: String,
        bounds: Option<(Box<Expr>, Box<Expr>)>,
    },
    /// Unevaluated `integrate(f, x, lo, hi)`.
    Integrate {
        integrand: Box<Expr>,
        var: String,
        lower: Box<Expr>,
        upper: Box<Expr>,
    },
    /// Unevaluated `dd(f, x)`.
    Derivative { inner: Box<Expr>, var: String },
    /// Unevaluated `roots(p, x)` / `factor(p, x)`.
    Roots { inner: Box<Expr>, var: String },
    Factor { inner: Box<Expr>, var: String },
    /// Finite result sets produced by the eager solver/factorizer.
    RootSet(Vec<Expr>),
    FactorSet(Vec<Expr>),
    Limit {
        approaching: Box<Expr>,
        target: Box<Expr>,
        operand: Box<Expr>,
    },
}

impl Expr {
    pub fn number(value: Number) -> Expr {
        Expr::Number(value)
    }

    pub fn integer(value: i64) -> Expr {
        Expr::Number(Number::int(value))
    }

    pub fn symbol(name: impl Into<String>) -> Expr {
        Expr::Symbol(name.into())
    }

    pub fn boxed(self) -> Box<Expr> {
        Box::new(self)
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Expr::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Expr::Number(_))
    }

    /// Strips any outer parenthesization.
    pub fn unwrap_parens(&self) -> &Expr {
        let mut current = self;
        while let Expr::Paren(inner) = current {
            current = inner;
        }
        current
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::tex(self))
    }
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinOp::Add, a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinOp::Sub, a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinOp::Mul, a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinOp::Div, a.boxed(), b.boxed())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Binary(BinOp::Pow, base.boxed(), exp.boxed())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Unary(UnOp::Neg, a.boxed())
}

pub fn sqrt(a: Expr) -> Expr {
    Expr::Call(Func::Sqrt, a.boxed())
}

/// Structural equality as used by the pattern engine: numbers compare by
/// mathematical value, everything else by shape.
pub fn structurally_equal(a: &Expr, b: &Expr) -> bool {
    match (a, b) {
        (Expr::Number(x), Expr::Number(y)) => Number::numeric_equals(x, y),
        (Expr::Symbol(x), Expr::Symbol(y)) => x == y,
        (Expr::Binary(op_a, la, ra), Expr::Binary(op_b, lb, rb)) => {
            op_a == op_b && structurally_equal(la, lb) && structurally_equal(ra, rb)
        }
        (Expr::Unary(op_a, xa), Expr::Unary(op_b, xb)) => {
            op_a == op_b && structurally_equal(xa, xb)
        }
        (Expr::Paren(xa), Expr::Paren(xb)) => structurally_equal(xa, xb),
        (Expr::Call(fa, xa), Expr::Call(fb, xb)) => fa == fb && structurally_equal(xa, xb),
        (
            Expr::Integral {
                integrand: ia,
                var: va,
                bounds: ba,
            },
            Expr::Integral {
                integrand: ib,
                var: vb,
                bounds: bb,
            },
        ) => {
            va == vb
                && structurally_equal(ia, ib)
                && match (ba, bb) {
                    (None, None) => true,
                    (Some((la, ua)), Some((lb, ub))) => {
                        structurally_equal(la, lb) && structurally_equal(ua, ub)
                    }
                    _ => false,
                }
        }
        (
            Expr::Integrate {
                integrand: ia,
                var: va,
                lower: la,
                upper: ua,
            },
            Expr::Integrate {
                integrand: ib,
                var: vb,
                lower: lb,
                upper: ub,
            },
        ) => {
            va == vb
                && structurally_equal(ia, ib)
                && structurally_equal(la, lb)
                && structurally_equal(ua, ub)
        }
        (
            Expr::Derivative { inner: xa, var: va },
            Expr::Derivative { inner: xb, var: vb },
        ) => va == vb && structurally_equal(xa, xb),
        (Expr::Roots { inner: xa, var: va }, Expr::Roots { inner: xb, var: vb }) => {
            va == vb && structurally_equal(xa, xb)
        }
        (Expr::Factor { inner: xa, var: va }, Expr::Factor { inner: xb, var: vb }) => {
            va == vb && structurally_equal(xa, xb)
        }
        (Expr::RootSet(xs), Expr::RootSet(ys)) | (Expr::FactorSet(xs), Expr::FactorSet(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| structurally_equal(x, y))
        }
        (
            Expr::Limit {
                approaching: aa,
                target: ta,
                operand: oa,
            },
            Expr::Limit {
                approaching: ab,
                target: tb,
                operand: ob,
            },
        ) => {
            structurally_equal(aa, ab)
                && structurally_equal(ta, tb)
                && structurally_equal(oa, ob)
        }
        _ => false,
    }
}
