//! Structured conversion errors
//!
//! A failure aborts the conversion of one expression; there are no partial
//! results. Each error carries a machine-readable code and, where there is an
//! obvious fix, a suggestion.

use crate::NumberError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const MISMATCHED_BRACKETS: &str = "MISMATCHED_BRACKETS";
    pub const UNCLOSED_BRACKET: &str = "UNCLOSED_BRACKET";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const LONE_OPERATOR: &str = "LONE_OPERATOR";
    pub const NESTING_TOO_DEEP: &str = "NESTING_TOO_DEEP";
    pub const EMPTY_EXPRESSION: &str = "EMPTY_EXPRESSION";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const EXPONENT_NOT_DIMENSIONLESS: &str = "EXPONENT_NOT_DIMENSIONLESS";
    pub const NUMERIC: &str = "NUMERIC";
}

/// Malformed expression text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("mismatched brackets at {position} near: {near}")]
    MismatchedBrackets { position: usize, near: String },

    #[error("unclosed bracket at {position} near: {near}")]
    UnclosedBracket { position: usize, near: String },

    #[error("cannot parse starting at {position} near: {near}")]
    Unparseable { position: usize, near: String },

    #[error("lone operator {0}")]
    LoneOperator(char),

    #[error("nesting too deep (limit {limit})")]
    NestingTooDeep { limit: usize },

    #[error("empty expression")]
    EmptyExpression,

    #[error("empty group at {position}")]
    EmptyGroup { position: usize },
}

/// Structurally valid but semantically invalid expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unknown unit {0}")]
    UnknownUnit(String),

    #[error("lone operator {0}")]
    LoneOperator(char),

    #[error("division by zero")]
    DivisionByZero,

    #[error("exponent must be dimensionless {0}")]
    NonDimensionlessExponent(String),
}

/// Any failure of a single conversion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("SyntaxError: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("EvalError: {0}")]
    Eval(#[from] EvalError),

    #[error("conversion failed: {0}")]
    Numeric(#[from] NumberError),
}

/// Which stage rejected the expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Syntax,
    Eval,
    Numeric,
}

/// Serialisable summary of a [`ConvertError`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,

    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Syntax(_) => ErrorKind::Syntax,
            ConvertError::Eval(_) => ErrorKind::Eval,
            ConvertError::Numeric(_) => ErrorKind::Numeric,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::Syntax(e) => match e {
                SyntaxError::MismatchedBrackets { .. } => codes::MISMATCHED_BRACKETS,
                SyntaxError::UnclosedBracket { .. } => codes::UNCLOSED_BRACKET,
                SyntaxError::Unparseable { .. } => codes::PARSE_ERROR,
                SyntaxError::LoneOperator(_) => codes::LONE_OPERATOR,
                SyntaxError::NestingTooDeep { .. } => codes::NESTING_TOO_DEEP,
                SyntaxError::EmptyExpression | SyntaxError::EmptyGroup { .. } => {
                    codes::EMPTY_EXPRESSION
                }
            },
            ConvertError::Eval(e) => match e {
                EvalError::UnknownUnit(_) => codes::UNKNOWN_UNIT,
                EvalError::LoneOperator(_) => codes::LONE_OPERATOR,
                EvalError::DivisionByZero => codes::DIV_ZERO,
                EvalError::NonDimensionlessExponent(_) => codes::EXPONENT_NOT_DIMENSIONLESS,
            },
            ConvertError::Numeric(_) => codes::NUMERIC,
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            ConvertError::Syntax(SyntaxError::MismatchedBrackets { .. })
            | ConvertError::Syntax(SyntaxError::UnclosedBracket { .. }) => {
                Some("Pair every (, [ or { with its matching closer".to_string())
            }
            ConvertError::Syntax(SyntaxError::NestingTooDeep { .. }) => {
                Some("Flatten the expression or raise the nesting limit".to_string())
            }
            ConvertError::Syntax(SyntaxError::LoneOperator(op))
            | ConvertError::Eval(EvalError::LoneOperator(op)) => {
                Some(format!("Put a value on both sides of '{}'", op))
            }
            ConvertError::Eval(EvalError::UnknownUnit(symbol)) => {
                Some(format!("Add '{}' to the unit database or check spelling", symbol))
            }
            ConvertError::Eval(EvalError::NonDimensionlessExponent(_)) => {
                Some("Exponents must be plain numbers".to_string())
            }
            ConvertError::Eval(EvalError::DivisionByZero) => {
                Some("Ensure divisor is not zero".to_string())
            }
            _ => None,
        }
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion: self.suggestion(),
        }
    }
}

impl From<&ConvertError> for ErrorReport {
    fn from(err: &ConvertError) -> Self {
        err.report()
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}
