//! Pattern/bindings engine for algebraic identities. Rules are pure data:
//! a pattern tree matched against an expression and a replacement tree
//! instantiated from the captured bindings.

use std::collections::HashMap;

use crate::expr::{structurally_equal, BinOp, Expr};
use crate::number::Number;

#[derive(Clone, Debug)]
pub enum Pattern {
    /// A named hole. A name appearing twice must bind structurally equal
    /// subtrees (numbers compare by value).
    Placeholder(&'static str),
    Number(Number),
    Binary(BinOp, Box<Pattern>, Box<Pattern>),
}

impl Pattern {
    pub fn placeholder(name: &'static str) -> Pattern {
        Pattern::Placeholder(name)
    }

    pub fn number(value: i64) -> Pattern {
        Pattern::Number(Number::int(value))
    }

    pub fn binary(op: BinOp, left: Pattern, right: Pattern) -> Pattern {
        Pattern::Binary(op, Box::new(left), Box::new(right))
    }

    fn matches<'e>(
        &self,
        expr: &'e Expr,
        bindings: &mut HashMap<&'static str, &'e Expr>,
    ) -> bool {
        match self {
            Pattern::Placeholder(name) => match bindings.get(name) {
                Some(bound) => structurally_equal(bound, expr),
                None => {
                    bindings.insert(name, expr);
                    true
                }
            },
            Pattern::Number(value) => {
                matches!(expr, Expr::Number(n) if Number::numeric_equals(n, value))
            }
            Pattern::Binary(op, left, right) => match expr {
                Expr::Binary(expr_op, expr_left, expr_right) if expr_op == op => {
                    left.matches(expr_left, bindings) && right.matches(expr_right, bindings)
                }
                _ => false,
            },
        }
    }

    /// Builds the replacement, deep-cloning every bound subtree. `None`
    /// when the replacement names a hole the pattern never bound.
    fn instantiate(&self, bindings: &HashMap<&'static str, &Expr>) -> Option<Expr> {
        match self {
            Pattern::Placeholder(name) => bindings.get(name).map(|bound| (*bound).clone()),
            Pattern::Number(value) => Some(Expr::Number(value.clone())),
            Pattern::Binary(op, left, right) => Some(Expr::Binary(
                *op,
                left.instantiate(bindings)?.boxed(),
                right.instantiate(bindings)?.boxed(),
            )),
        }
    }
}

pub struct RewriteRule {
    pattern: Pattern,
    replacement: Pattern,
}

impl RewriteRule {
    pub fn new(pattern: Pattern, replacement: Pattern) -> RewriteRule {
        RewriteRule {
            pattern,
            replacement,
        }
    }

    /// Matches with a fresh bindings map and instantiates the replacement
    /// on success.
    pub fn apply(&self, expr: &Expr) -> Option<Expr> {
        let mut bindings = HashMap::new();
        if self.pattern.matches(expr, &mut bindings) {
            self.replacement.instantiate(&bindings)
        } else {
            None
        }
    }
}

/// The built-in identity rules. All preserve semantics.
pub fn default_rules() -> Vec<RewriteRule> {
    let a = || Pattern::placeholder("a");
    vec![
        RewriteRule::new(Pattern::binary(BinOp::Add, a(), Pattern::number(0)), a()),
        RewriteRule::new(Pattern::binary(BinOp::Add, Pattern::number(0), a()), a()),
        RewriteRule::new(Pattern::binary(BinOp::Sub, a(), Pattern::number(0)), a()),
        RewriteRule::new(Pattern::binary(BinOp::Mul, a(), Pattern::number(1)), a()),
        RewriteRule::new(Pattern::binary(BinOp::Mul, Pattern::number(1), a()), a()),
        RewriteRule::new(
            Pattern::binary(BinOp::Mul, a(), Pattern::number(0)),
            Pattern::number(0),
        ),
        RewriteRule::new(
            Pattern::binary(BinOp::Mul, Pattern::number(0), a()),
            Pattern::number(0),
        ),
        RewriteRule::new(Pattern::binary(BinOp::Div, a(), Pattern::number(1)), a()),
    ]
}
