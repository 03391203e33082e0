//! Basis - reduce unit expressions to base units
//!
//! ```text
//! text -> parser -> group_exponents -> Evaluator (+ UnitTable) -> DimensionalRecord -> Renderer
//! ```
//!
//! An expression such as `3 km / (2 s)^2` is tokenized into numbers, unit
//! symbols and the operators `*`, `/` and `^` (juxtaposition multiplies),
//! exponent triples are grouped, and the tree is folded left to right into a
//! coefficient and seven base-unit exponents.

mod ast;
mod eval;
mod group;
mod parser;
mod render;

pub use ast::{Node, Operator, Token};
pub use eval::Evaluator;
pub use group::{group_exponents, group_exponents_with_depth};
pub use parser::{parse, parse_with_depth, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use render::{OutputFormat, Renderer};

pub use basis_core::{ConvertError, ErrorReport, EvalError, NumberError, SyntaxError};
pub use basis_units::{Dimension, DimensionalRecord, LoadError, UnitEntry, UnitTable};

use std::sync::Arc;

/// Convert an expression with the default nesting limit
pub fn convert(expression: &str, table: &UnitTable) -> Result<DimensionalRecord, ConvertError> {
    convert_with_depth(expression, table, DEFAULT_MAX_DEPTH)
}

fn parse_grouped(expression: &str, max_depth: usize) -> Result<Node, ConvertError> {
    let parsed = parse_with_depth(expression, max_depth)?;
    if matches!(&parsed, Node::Group(children) if children.is_empty()) {
        return Err(SyntaxError::EmptyExpression.into());
    }

    group_exponents_with_depth(parsed, max_depth).map_err(ConvertError::from)
}

fn convert_with_depth(
    expression: &str,
    table: &UnitTable,
    max_depth: usize,
) -> Result<DimensionalRecord, ConvertError> {
    let grouped = parse_grouped(expression, max_depth)?;
    Evaluator::new(table).eval(&grouped)
}

/// Conversion engine holding a shared unit table
#[derive(Debug, Clone)]
pub struct Converter {
    table: Arc<UnitTable>,
    max_depth: usize,
}

impl Converter {
    pub fn new(table: UnitTable) -> Self {
        Self::from_shared(Arc::new(table))
    }

    /// Share one table between several converters (or threads)
    pub fn from_shared(table: Arc<UnitTable>) -> Self {
        Self {
            table,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the nesting limit; values above [`MAX_DEPTH_LIMIT`] are lowered to it
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn table(&self) -> &UnitTable {
        &self.table
    }

    /// Tokenize and group without evaluating
    pub fn parse(&self, expression: &str) -> Result<Node, ConvertError> {
        parse_grouped(expression, self.max_depth)
    }

    pub fn convert(&self, expression: &str) -> Result<DimensionalRecord, ConvertError> {
        convert_with_depth(expression, &self.table, self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> UnitTable {
        let mut entries = UnitTable::base_units().entries().to_vec();
        entries.push(UnitEntry::new("km", Dimension::LENGTH, 1000.0));
        entries.push(UnitEntry::new("g", Dimension::MASS, 0.001));
        entries.push(UnitEntry::new("h", Dimension::TIME, 3600.0).with_alternate("hr"));
        entries.push(UnitEntry::new("N", Dimension::FORCE, 1.0));
        UnitTable::new(entries)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn same(a: &DimensionalRecord, b: &DimensionalRecord) -> bool {
        approx(a.coefficient, b.coefficient)
            && a.dimension
                .exponents
                .iter()
                .zip(b.dimension.exponents.iter())
                .all(|(x, y)| approx(*x, *y))
    }

    // ---- concrete scenarios ----

    #[test]
    fn test_plain_number() {
        let r = convert("5", &table()).unwrap();
        assert_eq!(r.coefficient, 5.0);
        assert!(r.is_dimensionless());
    }

    #[test]
    fn test_velocity() {
        let r = convert("3 m / s", &table()).unwrap();
        assert_eq!(r.coefficient, 3.0);
        assert_eq!(r.dimension.exponent("m"), Some(1.0));
        assert_eq!(r.dimension.exponent("s"), Some(-1.0));
    }

    #[test]
    fn test_squared_group() {
        let r = convert("(2 s)^2", &table()).unwrap();
        assert_eq!(r.coefficient, 4.0);
        assert_eq!(r.dimension, Dimension::TIME.power(2.0));
    }

    #[test]
    fn test_kilometre() {
        let r = convert("1 km", &table()).unwrap();
        assert_eq!(r.coefficient, 1000.0);
        assert_eq!(r.dimension, Dimension::LENGTH);
    }

    #[test]
    fn test_inverse_group() {
        let r = convert("2 m * (3 s)^-1", &table()).unwrap();
        assert!(approx(r.coefficient, 0.6666666666666666));
        assert_eq!(r.dimension, Dimension::VELOCITY);
    }

    #[test]
    fn test_dimensioned_exponent() {
        let err = convert("3 ^ m", &table()).unwrap_err();
        assert!(matches!(err, ConvertError::Eval(EvalError::NonDimensionlessExponent(_))));
    }

    // ---- properties ----

    #[test]
    fn test_pure_numbers_are_dimensionless() {
        for input in ["2 * 3", "10 / 4", "2^0.5", "(1.5e3 / .5) * [2 {3}]", "7 ^ -2 / 3"] {
            let r = convert(input, &table()).unwrap();
            assert!(r.is_dimensionless(), "{input}");
        }
    }

    #[test]
    fn test_multiplication_is_associative() {
        let operands = ["3 km", "2 s", "g", "(4 h)^-1", "N / m"];
        let t = table();
        for a in operands {
            for b in operands {
                for c in operands {
                    let left = convert(&format!("({a} * {b}) * {c}"), &t).unwrap();
                    let right = convert(&format!("{a} * ({b} * {c})"), &t).unwrap();
                    assert!(same(&left, &right), "{a}, {b}, {c}");
                }
            }
        }
    }

    #[test]
    fn test_power_zero() {
        for base in ["3 km", "N", "(2 s)^3", "0"] {
            let r = convert(&format!("({base})^0"), &table()).unwrap();
            assert_eq!(r.coefficient, 1.0, "{base}");
            assert!(r.is_dimensionless(), "{base}");
        }
    }

    #[test]
    fn test_dimensioned_exponents_always_fail() {
        for exponent in ["m", "(2 s)", "km", "(m / s)"] {
            let err = convert(&format!("2 ^ {exponent}"), &table()).unwrap_err();
            assert!(matches!(err, ConvertError::Eval(_)), "{exponent}: {err}");
        }
    }

    #[test]
    fn test_zero_divisor_always_fails() {
        for input in ["1 / 0", "m / (0 s)", "km / (0 * 5)", "(3 / 0.0) m"] {
            let err = convert(input, &table()).unwrap_err();
            assert_eq!(err, ConvertError::Eval(EvalError::DivisionByZero), "{input}");
        }
    }

    #[test]
    fn test_unmatched_brackets() {
        for input in ["(3 * 2", "3 * 2)", "[m}", "((s)"] {
            let err = convert(input, &table()).unwrap_err();
            assert!(matches!(err, ConvertError::Syntax(_)), "{input}: {err}");
        }
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert("3 zorp", &table()).unwrap_err();
        assert_eq!(err.to_string(), "EvalError: unknown unit zorp");
    }

    // ---- edge cases ----

    #[test]
    fn test_empty_expression() {
        for input in ["", "   "] {
            let err = convert(input, &table()).unwrap_err();
            assert_eq!(err, ConvertError::Syntax(SyntaxError::EmptyExpression));
        }
    }

    #[test]
    fn test_alternate_symbol() {
        let r = convert("90 km / hr", &table()).unwrap();
        assert!(approx(r.coefficient, 25.0));
        assert_eq!(r.dimension, Dimension::VELOCITY);
    }

    #[test]
    fn test_force_in_base_units() {
        let r = convert("3 km / (2 s)^2 * 4 g", &table()).unwrap();
        assert!(approx(r.coefficient, 3.0));
        assert_eq!(r.dimension, Dimension::FORCE);
    }

    #[test]
    fn test_exponent_chain_counts_toward_depth() {
        let chain = vec!["2"; 10].join(" ^ ");
        let converter = Converter::new(table()).with_max_depth(5);
        let err = converter.convert(&chain).unwrap_err();
        assert_eq!(err, ConvertError::Syntax(SyntaxError::NestingTooDeep { limit: 5 }));
        assert!(Converter::new(table()).convert("2 ^ 2 ^ 2").is_ok());
    }

    #[test]
    fn test_long_exponent_chain_is_rejected() {
        let chain = vec!["1"; 300_000].join("^");
        let err = convert(&chain, &UnitTable::base_units()).unwrap_err();
        assert_eq!(
            err,
            ConvertError::Syntax(SyntaxError::NestingTooDeep { limit: DEFAULT_MAX_DEPTH })
        );
    }

    #[test]
    fn test_max_depth_is_capped() {
        let converter = Converter::new(table()).with_max_depth(usize::MAX);
        assert_eq!(converter.max_depth(), MAX_DEPTH_LIMIT);

        let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        let err = converter.convert(&deep).unwrap_err();
        assert_eq!(
            err,
            ConvertError::Syntax(SyntaxError::NestingTooDeep { limit: MAX_DEPTH_LIMIT })
        );
    }

    #[test]
    fn test_converter_matches_free_function() {
        let converter = Converter::new(table());
        assert_eq!(
            converter.convert("3 km / h").unwrap(),
            convert("3 km / h", converter.table()).unwrap()
        );
        assert_eq!(converter.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_converter_parse() {
        let converter = Converter::new(table());
        let node = converter.parse("m^2 / s").unwrap();
        assert_eq!(node.to_string(), "((m ^ 2) / s)");
    }

    #[test]
    fn test_shared_table_across_threads() {
        let shared = Arc::new(table());
        let handles: Vec<_> = (1..=4)
            .map(|n| {
                let converter = Converter::from_shared(Arc::clone(&shared));
                std::thread::spawn(move || converter.convert(&format!("{n} km")).map(|r| r.coefficient))
            })
            .collect();
        for (n, handle) in (1..=4).zip(handles) {
            assert_eq!(handle.join().unwrap().unwrap(), n as f64 * 1000.0);
        }
    }
}
