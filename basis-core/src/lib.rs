//! Basis Core - Fundamental types
//!
//! This crate provides the types shared by every Basis crate:
//! - `SyntaxError`, `EvalError`, `ConvertError`: typed conversion failures
//! - `ErrorReport`: serialisable error summary with a machine-readable code
//! - `NumberError` and the decimal helpers used for literals and output

mod error;
mod number;

pub use error::{codes, ConvertError, ErrorKind, ErrorReport, EvalError, SyntaxError};
pub use number::{checked, format_coefficient, format_exponent, parse_decimal, NumberError};
