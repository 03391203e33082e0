//! Exponent grouping
//!
//! Rewrites every `base ^ exponent` run into its own three-element group so
//! the evaluator can treat `^` as binding only its immediate neighbours.
//! Grouping is left-associative: `a ^ b ^ c` becomes `((a ^ b) ^ c)`.
//! Each triple adds a nesting level, so long chains count against the same
//! limit as brackets.

use crate::ast::{Node, Operator};
use crate::parser::DEFAULT_MAX_DEPTH;
use basis_core::SyntaxError;

/// Group exponent triples at every nesting level
pub fn group_exponents(node: Node) -> Result<Node, SyntaxError> {
    group_exponents_with_depth(node, DEFAULT_MAX_DEPTH)
}

/// Group exponent triples, failing once brackets plus folded triples nest
/// deeper than `max_depth`
pub fn group_exponents_with_depth(node: Node, max_depth: usize) -> Result<Node, SyntaxError> {
    match node {
        Node::Group(children) => {
            let grouper = Grouper { max_depth };
            let (children, _) = grouper.group_level(children, 0)?;
            Ok(Node::Group(children))
        }
        token => Ok(token),
    }
}

struct Grouper {
    max_depth: usize,
}

impl Grouper {
    /// Group one sequence lying `depth` brackets below the root.
    /// Returns the sequence and the number of groups nested below it.
    fn group_level(
        &self,
        children: Vec<Node>,
        depth: usize,
    ) -> Result<(Vec<Node>, usize), SyntaxError> {
        let mut grouped: Vec<(Node, usize)> = Vec::with_capacity(children.len());
        let mut rest = children.into_iter();

        while let Some(child) = rest.next() {
            let (child, height) = self.group_child(child, depth)?;
            if child.as_operator() != Some(Operator::Pow) {
                grouped.push((child, height));
                continue;
            }

            let lone = || SyntaxError::LoneOperator(Operator::Pow.symbol());
            let (base, base_height) = grouped.pop().ok_or_else(lone)?;
            let next = rest.next().ok_or_else(lone)?;
            let (exponent, exponent_height) = self.group_child(next, depth)?;

            let height = 1 + base_height.max(exponent_height);
            if depth + height > self.max_depth {
                return Err(SyntaxError::NestingTooDeep { limit: self.max_depth });
            }
            grouped.push((Node::Group(vec![base, child, exponent]), height));
        }

        let height = grouped.iter().map(|(_, h)| *h).max().unwrap_or(0);
        Ok((grouped.into_iter().map(|(node, _)| node).collect(), height))
    }

    /// Group inside one child; a token has height 0, a group one more than
    /// its contents
    fn group_child(&self, node: Node, depth: usize) -> Result<(Node, usize), SyntaxError> {
        match node {
            Node::Group(children) => {
                let (children, below) = self.group_level(children, depth + 1)?;
                Ok((Node::Group(children), below + 1))
            }
            token => Ok((token, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn grouped(input: &str) -> Node {
        group_exponents(parse(input).unwrap()).unwrap()
    }

    fn pow() -> Node {
        Node::operator(Operator::Pow)
    }

    #[test]
    fn test_no_exponent_is_unchanged() {
        assert_eq!(grouped("3 m / s"), parse("3 m / s").unwrap());
    }

    #[test]
    fn test_simple_triple() {
        assert_eq!(
            grouped("2 s ^ 2"),
            Node::Group(vec![
                Node::number("2"),
                Node::Group(vec![Node::unit("s"), pow(), Node::number("2")]),
            ])
        );
    }

    #[test]
    fn test_left_associative_chain() {
        assert_eq!(
            grouped("a ^ 2 ^ 3"),
            Node::Group(vec![Node::Group(vec![
                Node::Group(vec![Node::unit("a"), pow(), Node::number("2")]),
                pow(),
                Node::number("3"),
            ])])
        );
    }

    #[test]
    fn test_groups_inside_brackets() {
        assert_eq!(
            grouped("(m ^ 2) / s"),
            Node::Group(vec![
                Node::Group(vec![Node::Group(vec![Node::unit("m"), pow(), Node::number("2")])]),
                Node::operator(Operator::Div),
                Node::unit("s"),
            ])
        );
    }

    #[test]
    fn test_bracket_as_base() {
        assert_eq!(
            grouped("(2 s)^2"),
            Node::Group(vec![Node::Group(vec![
                Node::Group(vec![Node::number("2"), Node::unit("s")]),
                pow(),
                Node::number("2"),
            ])])
        );
    }

    #[test]
    fn test_several_triples_in_one_sequence() {
        let node = grouped("m^2 * s^-1");
        assert_eq!(node.to_string(), "((m ^ 2) * (s ^ -1))");
    }

    #[test]
    fn test_leading_caret() {
        let err = group_exponents(parse("^ 2").unwrap()).unwrap_err();
        assert_eq!(err, SyntaxError::LoneOperator('^'));
    }

    #[test]
    fn test_trailing_caret() {
        let err = group_exponents(parse("m ^").unwrap()).unwrap_err();
        assert_eq!(err, SyntaxError::LoneOperator('^'));

        let err = group_exponents(parse("3 * (m ^)").unwrap()).unwrap_err();
        assert_eq!(err, SyntaxError::LoneOperator('^'));
    }

    #[test]
    fn test_chain_depth_limit() {
        let chain = parse("2 ^ 2 ^ 2 ^ 2").unwrap();
        assert!(group_exponents_with_depth(chain.clone(), 3).is_ok());
        assert_eq!(
            group_exponents_with_depth(chain, 2).unwrap_err(),
            SyntaxError::NestingTooDeep { limit: 2 }
        );
    }

    #[test]
    fn test_brackets_count_toward_chain_limit() {
        // two brackets plus one triple
        let node = parse("((m ^ 2))").unwrap();
        assert_eq!(group_exponents_with_depth(node.clone(), 3).unwrap().nesting_depth(), 3);
        assert_eq!(
            group_exponents_with_depth(node, 2).unwrap_err(),
            SyntaxError::NestingTooDeep { limit: 2 }
        );
    }

    #[test]
    fn test_separate_triples_do_not_stack() {
        let node = parse("m^2 s^2 kg^2 mol^2").unwrap();
        assert_eq!(group_exponents_with_depth(node, 1).unwrap().nesting_depth(), 1);
    }
}
