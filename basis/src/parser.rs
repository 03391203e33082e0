//! Expression tokenizer
//!
//! Splits expression text into numbers, unit symbols and operators, and turns
//! every bracketed span into a nested group. No precedence is applied here.

use crate::ast::{Node, Operator, Token};
use basis_core::SyntaxError;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Default cap on bracket nesting
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Highest nesting limit a converter accepts
pub const MAX_DEPTH_LIMIT: usize = 512;

/// Characters of context shown in error messages
const SNIPPET_LEN: usize = 20;

// ============ Compiled token patterns ============

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("number pattern")
    })
}

fn unit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^°?[A-Za-zµμΩ]+").expect("unit pattern"))
}

fn operator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[*/^]").expect("operator pattern"))
}

fn closer_for(opener: char) -> Option<char> {
    match opener {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

fn is_closer(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

/// Parse expression text into a flat group of tokens and nested groups
pub fn parse(input: &str) -> Result<Node, SyntaxError> {
    parse_with_depth(input, DEFAULT_MAX_DEPTH)
}

/// Parse with an explicit bracket nesting limit
pub fn parse_with_depth(input: &str, max_depth: usize) -> Result<Node, SyntaxError> {
    let parser = Parser { input, max_depth };
    let children = parser.parse_range(0..input.len(), 0)?;
    Ok(Node::Group(children))
}

struct Parser<'a> {
    input: &'a str,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Parse `input[range]` (byte offsets) into a child sequence
    fn parse_range(&self, range: Range<usize>, depth: usize) -> Result<Vec<Node>, SyntaxError> {
        if depth > self.max_depth {
            return Err(SyntaxError::NestingTooDeep { limit: self.max_depth });
        }

        let mut children = Vec::new();
        let mut pos = range.start;

        loop {
            let rest = self.input[pos..range.end].trim_start();
            pos = range.end - rest.len();

            let c = match rest.chars().next() {
                Some(c) => c,
                None => break,
            };

            if closer_for(c).is_some() {
                let close = self.find_matching_bracket(pos, range.end)?;
                let inner = self.parse_range(pos + c.len_utf8()..close, depth + 1)?;
                if inner.is_empty() {
                    return Err(SyntaxError::EmptyGroup { position: self.position(pos) });
                }
                children.push(Node::Group(inner));
                // closers are single-byte
                pos = close + 1;
                continue;
            }

            if is_closer(c) {
                return Err(SyntaxError::MismatchedBrackets {
                    position: self.position(pos),
                    near: self.snippet(pos),
                });
            }

            let (token, len) = match_token(rest).ok_or_else(|| SyntaxError::Unparseable {
                position: self.position(pos),
                near: self.snippet(pos),
            })?;
            children.push(Node::Token(token));
            pos += len;
        }

        Ok(children)
    }

    /// Byte offset of the bracket closing the one at `open`
    fn find_matching_bracket(&self, open: usize, end: usize) -> Result<usize, SyntaxError> {
        let mut stack: Vec<char> = Vec::new();

        for (offset, c) in self.input[open..end].char_indices() {
            let at = open + offset;
            if let Some(closer) = closer_for(c) {
                stack.push(closer);
            } else if is_closer(c) {
                if stack.last() != Some(&c) {
                    return Err(SyntaxError::MismatchedBrackets {
                        position: self.position(at),
                        near: self.snippet(open),
                    });
                }
                stack.pop();
                if stack.is_empty() {
                    return Ok(at);
                }
            }
        }

        Err(SyntaxError::UnclosedBracket {
            position: self.position(open),
            near: self.snippet(open),
        })
    }

    /// Character offset of a byte offset
    fn position(&self, byte: usize) -> usize {
        self.input[..byte].chars().count()
    }

    fn snippet(&self, byte: usize) -> String {
        self.input[byte..].chars().take(SNIPPET_LEN).collect()
    }
}

/// Match one token at the start of `text`; numbers are tried before units so
/// that signs and digits never read as unit text.
fn match_token(text: &str) -> Option<(Token, usize)> {
    if let Some(m) = number_regex().find(text) {
        return Some((Token::Number(m.as_str().to_string()), m.end()));
    }
    if let Some(m) = unit_regex().find(text) {
        return Some((Token::Unit(m.as_str().to_string()), m.end()));
    }
    operator_regex()
        .find(text)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Operator::from_char)
        .map(|op| (Token::Operator(op), op.symbol().len_utf8()))
}
