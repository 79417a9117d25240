//! Pratt parser over the token stream: implicit multiplication insertion,
//! precedence climbing, and dispatch of the named special forms, with
//! eager evaluation of derivatives, numeric integrals, roots, and
//! factoring as a parse-time option.

use crate::calculus;
use crate::error::{CasError, Result};
use crate::expr::{BinOp, Expr, Func, UnOp};
use crate::factor;
use crate::lexer::{Lexer, Token};
use crate::number::Number;
use crate::polynomial::Polynomial;
use crate::solver;

/// Rebinding power of unary sign and prefix operators.
const UNARY_BINDING_POWER: u8 = 40;

#[derive(Clone, Copy, Debug)]
pub struct ParserOptions {
    /// Evaluate `dd(...)` at parse time instead of keeping a symbolic node.
    pub eval_derivatives: bool,
    /// Evaluate `integrate`, `roots`, and `factor` at parse time.
    pub eval_integrals: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            eval_derivatives: true,
            eval_integrals: true,
        }
    }
}

/// Parse with both eager toggles enabled.
pub fn parse_expr(input: &str) -> Result<Expr> {
    parse_with(input, ParserOptions::default())
}

pub fn parse_with(input: &str, options: ParserOptions) -> Result<Expr> {
    let tokens = Lexer::tokenize(input)?;
    Parser::from_tokens(tokens, options).parse()
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    options: ParserOptions,
}

impl Parser {
    pub fn from_tokens(tokens: Vec<Token>, options: ParserOptions) -> Parser {
        let mut tokens = tokens;
        insert_implicit_multiplication(&mut tokens);
        Parser {
            tokens,
            position: 0,
            options,
        }
    }

    pub fn parse(mut self) -> Result<Expr> {
        let expr = self.parse_expression(0)?;
        if self.position < self.tokens.len() {
            return Err(CasError::Parse("trailing tokens after expression".into()));
        }
        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn parse_expression(&mut self, min_binding_power: u8) -> Result<Expr> {
        let token = self
            .advance()
            .ok_or_else(|| CasError::Parse("unexpected end of input".into()))?;
        let mut left = self.nud(token)?;

        while min_binding_power < self.left_binding_power() {
            let Some(Token::Operator(op)) = self.advance() else {
                return Err(CasError::Parse("expected operator".into()));
            };
            left = self.led(left, op)?;
        }
        Ok(left)
    }

    fn left_binding_power(&self) -> u8 {
        match self.peek() {
            Some(Token::Operator(op)) => binding_power(*op),
            _ => 0,
        }
    }

    fn nud(&mut self, token: Token) -> Result<Expr> {
        match token {
            Token::Number(value) => Ok(Expr::Number(value)),
            Token::Symbol(name) => Ok(Expr::Symbol(name)),
            Token::Operator('+') => {
                let operand = self.parse_expression(UNARY_BINDING_POWER)?;
                Ok(Expr::Unary(UnOp::Plus, operand.boxed()))
            }
            Token::Operator('-') => {
                let operand = self.parse_expression(UNARY_BINDING_POWER)?;
                Ok(Expr::Unary(UnOp::Neg, operand.boxed()))
            }
            Token::Operator(op) => Err(CasError::Parse(format!(
                "unsupported prefix operator '{op}'"
            ))),
            Token::Open => self.parse_parens(),
            Token::Close => Err(CasError::Parse("unmatched closing parenthesis".into())),
            Token::Grouping(name) => self.parse_grouping(&name),
            Token::Limit(info) => {
                let operand = self.parse_expression(UNARY_BINDING_POWER)?;
                let approaching = parse_with(&info.approaching, self.options)?;
                let target = parse_with(&info.target, self.options)?;
                Ok(Expr::Limit {
                    approaching: approaching.boxed(),
                    target: target.boxed(),
                    operand: operand.boxed(),
                })
            }
        }
    }

    fn led(&mut self, left: Expr, op: char) -> Result<Expr> {
        let right = self.parse_expression(right_binding_power(op))?;
        // integer / integer folds straight to an exact rational leaf
        if op == '/' {
            if let (Expr::Number(a), Expr::Number(b)) = (&left, &right) {
                if a.is_integer() && b.is_integer() {
                    return Ok(Expr::Number(a.div(b)?));
                }
            }
        }
        let bin_op = BinOp::from_char(op)
            .ok_or_else(|| CasError::Parse(format!("unknown operator '{op}'")))?;
        Ok(Expr::Binary(bin_op, left.boxed(), right.boxed()))
    }

    fn parse_parens(&mut self) -> Result<Expr> {
        let inner_tokens = self.collect_scoped_tokens()?;
        let inner = self.sub_parse(inner_tokens)?;
        Ok(Expr::Paren(inner.boxed()))
    }

    /// Consumes tokens up to the parenthesis matching the already-consumed
    /// opening one.
    fn collect_scoped_tokens(&mut self) -> Result<Vec<Token>> {
        let mut inner = Vec::new();
        let mut depth = 1usize;
        loop {
            let token = self
                .advance()
                .ok_or_else(|| CasError::Parse("unterminated grouping".into()))?;
            match token {
                Token::Open => {
                    depth += 1;
                    inner.push(Token::Open);
                }
                Token::Close => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    inner.push(Token::Close);
                }
                other => inner.push(other),
            }
        }
        Ok(inner)
    }

    fn sub_parse(&self, tokens: Vec<Token>) -> Result<Expr> {
        Parser::from_tokens(tokens, self.options).parse()
    }

    fn expect_open(&mut self) -> Result<()> {
        match self.advance() {
            Some(Token::Open) => Ok(()),
            _ => Err(CasError::Parse("expected '('".into())),
        }
    }

    fn parse_grouping(&mut self, name: &str) -> Result<Expr> {
        self.expect_open()?;
        let inner_tokens = self.collect_scoped_tokens()?;
        match name {
            "int" => self.parse_integral(inner_tokens),
            "integrate" => self.parse_numeric_integral(inner_tokens),
            "dd" => self.parse_derivative(inner_tokens),
            "roots" => self.parse_roots(inner_tokens),
            "factor" => self.parse_factor(inner_tokens),
            _ => {
                let func = Func::from_name(name)
                    .ok_or_else(|| CasError::Parse(format!("unknown grouping '{name}'")))?;
                let inner = match self.sub_parse(inner_tokens)? {
                    Expr::Paren(body) => *body,
                    other => other,
                };
                Ok(Expr::Call(func, inner.boxed()))
            }
        }
    }

    fn parse_integral(&self, tokens: Vec<Token>) -> Result<Expr> {
        let arguments = split_arguments(tokens);
        if arguments.len() != 2 && arguments.len() != 4 {
            return Err(CasError::Parse("int requires 2 or 4 arguments".into()));
        }
        let has_bounds = arguments.len() == 4;
        let mut args = arguments.into_iter();
        let integrand = self.sub_parse(args.next().unwrap())?;
        let var = self.symbol_argument(args.next().unwrap(), "int")?;
        let bounds = if has_bounds {
            let lower = self.sub_parse(args.next().unwrap())?;
            let upper = self.sub_parse(args.next().unwrap())?;
            Some((lower.boxed(), upper.boxed()))
        } else {
            None
        };
        Ok(Expr::Integral {
            integrand: integrand.boxed(),
            var,
            bounds,
        })
    }

    fn parse_numeric_integral(&self, tokens: Vec<Token>) -> Result<Expr> {
        let arguments = split_arguments(tokens);
        if arguments.len() != 4 {
            return Err(CasError::Parse(
                "integrate requires four arguments (expr, variable, lower, upper)".into(),
            ));
        }
        let mut args = arguments.into_iter();
        let integrand = self.sub_parse(args.next().unwrap())?;
        let var = self.symbol_argument(args.next().unwrap(), "integrate")?;
        let lower = self.sub_parse(args.next().unwrap())?;
        let upper = self.sub_parse(args.next().unwrap())?;

        if !self.options.eval_integrals {
            return Ok(Expr::Integrate {
                integrand: integrand.boxed(),
                var,
                lower: lower.boxed(),
                upper: upper.boxed(),
            });
        }

        let lower_value = calculus::evaluate_constant(&lower);
        let upper_value = calculus::evaluate_constant(&upper);
        let result = calculus::integrate(&integrand, &var, lower_value, upper_value);
        Ok(Expr::Number(Number::real(result)))
    }

    fn parse_derivative(&self, tokens: Vec<Token>) -> Result<Expr> {
        let arguments = split_arguments(tokens);
        if arguments.len() < 2 {
            return Err(CasError::Parse(
                "dd requires an expression and a variable".into(),
            ));
        }
        let mut args = arguments.into_iter();
        let inner = self.sub_parse(args.next().unwrap())?;
        let var = self.symbol_argument(args.next().unwrap(), "dd")?;

        if !self.options.eval_derivatives {
            return Ok(Expr::Derivative {
                inner: inner.boxed(),
                var,
            });
        }
        Ok(calculus::differentiate(&var, &inner))
    }

    fn parse_roots(&self, tokens: Vec<Token>) -> Result<Expr> {
        let (inner, var) = self.polynomial_arguments(tokens, "roots")?;
        if !self.options.eval_integrals {
            return Ok(Expr::Roots {
                inner: inner.boxed(),
                var,
            });
        }
        let polynomial = extract_polynomial(&inner, &var)?;
        Ok(Expr::RootSet(solver::solve(&polynomial)))
    }

    fn parse_factor(&self, tokens: Vec<Token>) -> Result<Expr> {
        let (inner, var) = self.polynomial_arguments(tokens, "factor")?;
        if !self.options.eval_integrals {
            return Ok(Expr::Factor {
                inner: inner.boxed(),
                var,
            });
        }
        let polynomial = extract_polynomial(&inner, &var)?;
        Ok(Expr::FactorSet(factor::factor(&polynomial, &var)))
    }

    fn polynomial_arguments(&self, tokens: Vec<Token>, form: &str) -> Result<(Expr, String)> {
        let arguments = split_arguments(tokens);
        if arguments.len() != 2 {
            return Err(CasError::Parse(format!(
                "{form} requires expression and variable arguments"
            )));
        }
        let mut args = arguments.into_iter();
        let inner = self.sub_parse(args.next().unwrap())?;
        let var = self.symbol_argument(args.next().unwrap(), form)?;
        Ok((inner, var))
    }

    fn symbol_argument(&self, tokens: Vec<Token>, form: &str) -> Result<String> {
        match self.sub_parse(tokens)? {
            Expr::Symbol(name) => Ok(name),
            _ => Err(CasError::Parse(format!(
                "variable in {form} must be a symbol"
            ))),
        }
    }
}

/// Extraction failure and constant polynomials surface as a domain error
/// at this boundary.
fn extract_polynomial(inner: &Expr, var: &str) -> Result<Polynomial> {
    match Polynomial::from_expr(inner, var) {
        Some(polynomial) if polynomial.degree().unwrap_or(0) >= 1 => Ok(polynomial),
        _ => Err(CasError::NotPolynomial(var.to_string())),
    }
}

/// Splits on top-level commas, balancing nested parentheses.
fn split_arguments(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut result = Vec::new();
    let mut accumulator = Vec::new();
    let mut depth = 0usize;
    for token in tokens {
        match &token {
            Token::Open => depth += 1,
            Token::Close => depth = depth.saturating_sub(1),
            Token::Operator(',') if depth == 0 => {
                result.push(std::mem::take(&mut accumulator));
                continue;
            }
            _ => {}
        }
        accumulator.push(token);
    }
    if !accumulator.is_empty() {
        result.push(accumulator);
    }
    result
}

/// Between a value-producing token and one that starts an expression, a
/// `*` is inserted once over the flat token list.
fn insert_implicit_multiplication(tokens: &mut Vec<Token>) {
    let mut transformed = Vec::with_capacity(tokens.len());
    for token in tokens.drain(..) {
        if let Some(prev) = transformed.last() {
            if is_value_token(prev) && starts_expression(&token) {
                transformed.push(Token::Operator('*'));
            }
        }
        transformed.push(token);
    }
    *tokens = transformed;
}

fn is_value_token(token: &Token) -> bool {
    matches!(token, Token::Number(_) | Token::Symbol(_) | Token::Close)
}

fn starts_expression(token: &Token) -> bool {
    matches!(
        token,
        Token::Number(_) | Token::Symbol(_) | Token::Grouping(_) | Token::Limit(_) | Token::Open
    )
}

fn binding_power(op: char) -> u8 {
    match op {
        '+' | '-' => 10,
        '*' | '/' | '%' => 20,
        '^' => 30,
        _ => 0,
    }
}

fn right_binding_power(op: char) -> u8 {
    let base = binding_power(op);
    if op == '^' {
        base - 1
    } else {
        base + 1
    }
}
