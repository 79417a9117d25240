//! Character stream to token stream: numeric literals, operators, reserved
//! groupings, constants, and the `lim` prefix form.

use nom::branch::alt;
use nom::character::complete::{alpha1, char, digit0, digit1};
use nom::combinator::{opt, recognize};
use nom::error::Error;
use nom::sequence::{pair, preceded};
use nom::IResult;

use crate::error::{CasError, Result};
use crate::number::Number;

/// Reserved names that open an argument list. Each must be followed
/// immediately by `(`.
pub const GROUPINGS: &[&str] = &[
    "sqrt",
    "sin",
    "cos",
    "tan",
    "ln",
    "log",
    "int",
    "integrate",
    "dd",
    "roots",
    "factor",
];

const OPERATORS: &str = "+-*/%^";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LimitInfo {
    pub approaching: String,
    pub target: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(Number),
    Operator(char),
    Symbol(String),
    Open,
    Close,
    Grouping(String),
    Limit(LimitInfo),
}

type Lexed<'a> = IResult<&'a str, &'a str, Error<&'a str>>;

/// A run of digits with at most one dot, leading dot allowed.
fn number_literal(input: &str) -> Lexed<'_> {
    alt((
        recognize(pair(digit1, opt(preceded(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))(input)
}

fn identifier(input: &str) -> Lexed<'_> {
    alpha1(input)
}

pub struct Lexer<'a> {
    rest: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn tokenize(src: &'a str) -> Result<Vec<Token>> {
        let mut lexer = Lexer { rest: src };
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        self.rest = self.rest.trim_start();
        let Some(first) = self.rest.chars().next() else {
            return Ok(None);
        };
        if first.is_ascii_digit() || first == '.' {
            return self.lex_number().map(Some);
        }
        if first.is_alphabetic() {
            return self.lex_identifier().map(Some);
        }
        if OPERATORS.contains(first) || first == ',' {
            self.rest = &self.rest[first.len_utf8()..];
            return Ok(Some(Token::Operator(first)));
        }
        match first {
            '(' => {
                self.rest = &self.rest[1..];
                Ok(Some(Token::Open))
            }
            ')' => {
                self.rest = &self.rest[1..];
                Ok(Some(Token::Close))
            }
            other => Err(CasError::Lex(format!("unexpected character '{other}'"))),
        }
    }

    fn lex_number(&mut self) -> Result<Token> {
        let (rest, literal) = number_literal(self.rest)
            .map_err(|_| CasError::Lex(format!("malformed number near '{}'", excerpt(self.rest))))?;
        self.rest = rest;
        let number = if literal.contains('.') {
            Number::parse_decimal_literal(literal)
        } else {
            Number::parse_integer_literal(literal)
        };
        Ok(Token::Number(number))
    }

    fn lex_identifier(&mut self) -> Result<Token> {
        let (rest, name) = identifier(self.rest)
            .map_err(|_| CasError::Lex(format!("expected identifier near '{}'", excerpt(self.rest))))?;
        self.rest = rest;

        match name.to_ascii_lowercase().as_str() {
            "pi" => return Ok(Token::Number(Number::pi())),
            "tau" => return Ok(Token::Number(Number::tau())),
            "e" => return Ok(Token::Number(Number::e())),
            "infinity" => return Ok(Token::Number(Number::infinity())),
            _ => {}
        }

        if name == "lim" {
            if !self.rest.starts_with('(') {
                return Err(CasError::Lex("prefix 'lim' must be followed by '('".into()));
            }
            return self.lex_limit();
        }

        if GROUPINGS.contains(&name) {
            if !self.rest.starts_with('(') {
                return Err(CasError::Lex(format!(
                    "grouping '{name}' must be followed by '('"
                )));
            }
            return Ok(Token::Grouping(name.to_string()));
        }

        Ok(Token::Symbol(name.to_string()))
    }

    /// Collects the two comma-separated argument strings of `lim(..., ...)`,
    /// balancing nested parentheses.
    fn lex_limit(&mut self) -> Result<Token> {
        let inner = &self.rest[1..];
        let mut depth = 0usize;
        let mut args = Vec::new();
        let mut current = String::new();
        let mut end = None;

        for (idx, ch) in inner.char_indices() {
            match ch {
                '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ')' if depth == 0 => {
                    args.push(current.trim().to_string());
                    end = Some(idx + 1);
                    break;
                }
                ')' => {
                    depth -= 1;
                    current.push(ch);
                }
                ',' if depth == 0 => {
                    args.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(ch),
            }
        }

        let end = end.ok_or_else(|| CasError::Lex("unterminated limit expression".into()))?;
        self.rest = &inner[end..];

        let [approaching, target]: [String; 2] = args
            .try_into()
            .map_err(|_| CasError::Lex("limit requires exactly two arguments".into()))?;
        Ok(Token::Limit(LimitInfo { approaching, target }))
    }
}

fn excerpt(input: &str) -> &str {
    let end = input
        .char_indices()
        .nth(16)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len());
    &input[..end]
}
