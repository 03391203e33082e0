//! Dimensional evaluator
//!
//! Reduces a grouped expression tree to a single dimensional record.
//! Sequences are evaluated strictly left to right; `^` has already been
//! isolated by the grouping pass, so `a / b / c` is `(a / b) / c`.

use crate::ast::{Node, Operator, Token};
use basis_core::{parse_decimal, ConvertError, EvalError, SyntaxError};
use basis_units::{DimensionalRecord, UnitTable};

/// Expression evaluator over a read-only unit table
pub struct Evaluator<'t> {
    table: &'t UnitTable,
}

impl<'t> Evaluator<'t> {
    pub fn new(table: &'t UnitTable) -> Self {
        Self { table }
    }

    /// Evaluate a grouped node
    pub fn eval(&self, node: &Node) -> Result<DimensionalRecord, ConvertError> {
        match node {
            Node::Token(token) => self.eval_token(token),
            Node::Group(children) => self.eval_sequence(children),
        }
    }

    fn eval_token(&self, token: &Token) -> Result<DimensionalRecord, ConvertError> {
        match token {
            Token::Number(text) => Ok(DimensionalRecord::scalar(parse_decimal(text)?)),
            Token::Unit(symbol) => self
                .table
                .lookup(symbol)
                .copied()
                .ok_or_else(|| EvalError::UnknownUnit(symbol.clone()).into()),
            Token::Operator(op) => Err(EvalError::LoneOperator(op.symbol()).into()),
        }
    }

    fn eval_sequence(&self, children: &[Node]) -> Result<DimensionalRecord, ConvertError> {
        match children {
            [] => Err(SyntaxError::EmptyExpression.into()),
            [only] => self.eval(only),
            _ => {
                let mut result: Option<DimensionalRecord> = None;
                let mut pending: Option<Operator> = None;

                for child in children {
                    if let Some(op) = child.as_operator() {
                        // an operator needs a value on its left and nothing pending
                        if result.is_none() || pending.is_some() {
                            return Err(EvalError::LoneOperator(op.symbol()).into());
                        }
                        pending = Some(op);
                        continue;
                    }

                    let operand = self.eval(child)?;
                    result = Some(match result {
                        None => operand,
                        Some(acc) => combine(&acc, pending.take().unwrap_or(Operator::Mul), &operand)?,
                    });
                }

                if let Some(op) = pending {
                    return Err(EvalError::LoneOperator(op.symbol()).into());
                }
                result.ok_or_else(|| SyntaxError::EmptyExpression.into())
            }
        }
    }
}

/// Apply one operator to the running result
fn combine(
    acc: &DimensionalRecord,
    op: Operator,
    operand: &DimensionalRecord,
) -> Result<DimensionalRecord, ConvertError> {
    match op {
        Operator::Mul => acc.multiply(operand),
        Operator::Div => acc.divide(operand),
        Operator::Pow => acc.power(operand),
    }
}
