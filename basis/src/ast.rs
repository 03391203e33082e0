//! Expression tree

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// Decimal literal, kept as written
    Number(String),
    /// Unit symbol, resolved against the unit table at evaluation
    Unit(String),
    Operator(Operator),
}

/// A token or an ordered group of nodes.
///
/// Groups come from brackets in the input and, after exponent grouping,
/// from `base ^ exponent` triples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Token(Token),
    Group(Vec<Node>),
}

impl Node {
    pub fn number(text: &str) -> Node {
        Node::Token(Token::Number(text.to_string()))
    }

    pub fn unit(symbol: &str) -> Node {
        Node::Token(Token::Unit(symbol.to_string()))
    }

    pub fn operator(op: Operator) -> Node {
        Node::Token(Token::Operator(op))
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Node::Token(Token::Operator(op)) => Some(*op),
            _ => None,
        }
    }

    /// Number of groups nested below this node
    pub fn nesting_depth(&self) -> usize {
        match self {
            Node::Token(_) => 0,
            Node::Group(children) => children
                .iter()
                .filter(|c| matches!(c, Node::Group(_)))
                .map(|c| 1 + c.nesting_depth())
                .max()
                .unwrap_or(0),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) | Token::Unit(text) => write!(f, "{}", text),
            Token::Operator(op) => write!(f, "{}", op.symbol()),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Token(token) => write!(f, "{}", token),
            Node::Group(children) => {
                let parts: Vec<String> = children.iter().map(|c| c.to_string()).collect();
                write!(f, "({})", parts.join(" "))
            }
        }
    }
}
