use thiserror::Error;

pub type Result<T> = std::result::Result<T, CasError>;

#[derive(Debug, Error)]
pub enum CasError {
    #[error("lex error: {0}")]
    Lex(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("expression is not a polynomial in {0}")]
    NotPolynomial(String),
    #[error("zero denominator in rational")]
    ZeroDenominator,
}
