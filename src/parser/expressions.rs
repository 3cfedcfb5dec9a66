//! Expression parsing implementation
//!
//! Precedence climbing over a [`TokenCursor`], one method per tier, lowest
//! precedence first:
//!
//! | Tier           | Operators              | Associativity |
//! |----------------|------------------------|---------------|
//! | logical or     | `\|\|`                 | left          |
//! | logical and    | `&&`                   | left          |
//! | equality       | `==` `!=`              | left          |
//! | relational     | `<` `<=` `>` `>=`      | left          |
//! | additive       | `+` `-`                | left          |
//! | multiplicative | `*` `/` `%`            | left          |
//! | exponent       | `**` `^`               | right         |
//! | unary          | `-` `+` `!` (prefix)   | right         |
//!
//! Primaries are literals, identifiers and parenthesized expressions.
//!
//! Every recursive step and every folded operator takes a nesting level, so
//! an expression's tree never grows deeper than about twice
//! [`MAX_NESTING_DEPTH`](crate::parser::parse::MAX_NESTING_DEPTH).
//!
//! All parsing methods are implemented as `pub(crate)` or private methods on
//! [`TokenCursor`].

use crate::parser::ast::*;
use crate::parser::lexer::{Span, TokenKind};
use crate::parser::parse::{ParseError, TokenCursor};
use log::trace;

type ParseFn<'t> = fn(&mut TokenCursor<'t>) -> Result<AstNode, ParseError>;

impl<'t> TokenCursor<'t> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_logical_or()
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<AstNode, ParseError> {
        self.fold_left(&[TokenKind::Or], Self::parse_logical_and)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<AstNode, ParseError> {
        self.fold_left(&[TokenKind::And], Self::parse_equality)
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        self.fold_left(
            &[TokenKind::Equals, TokenKind::NotEquals],
            Self::parse_relational,
        )
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        self.fold_left(
            &[
                TokenKind::Less,
                TokenKind::LessEq,
                TokenKind::Greater,
                TokenKind::GreaterEq,
            ],
            Self::parse_additive,
        )
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        self.fold_left(
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_multiplicative,
        )
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        self.fold_left(
            &[TokenKind::Mul, TokenKind::Div, TokenKind::Mod],
            Self::parse_exponent,
        )
    }

    /// Parse exponent (** ^), right-associative
    fn parse_exponent(&mut self) -> Result<AstNode, ParseError> {
        let left = self.parse_unary()?;

        if let Some((op, location)) = self.match_operator(&[TokenKind::Pow]) {
            let right = self.nested(Self::parse_exponent)?;
            return Ok(binary(op, left, right, location));
        }

        Ok(left)
    }

    /// Parse prefix unary (- + !), right-associative
    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        if let Some(token) = self.current() {
            if let Some(op) = UnOp::from_token(token.kind) {
                self.advance();
                let operand = self.nested(Self::parse_unary)?;
                trace!("fold unary {}", op);
                return Ok(AstNode::UnaryExpr {
                    op,
                    operand: Box::new(operand),
                    location: token.span,
                });
            }
        }

        self.parse_primary()
    }

    /// Parse primary expression (literals, identifiers, parentheses)
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let Some(token) = self.current() else {
            return Err(ParseError::UnsupportedToken {
                kind: TokenKind::Eof,
                location: Span::default(),
            });
        };
        let location = token.span;

        let node = match token.kind {
            TokenKind::Null => AstNode::NullLiteral { location },
            TokenKind::Number => {
                let value =
                    token
                        .text
                        .parse::<f64>()
                        .map_err(|source| ParseError::InvalidNumber {
                            text: token.text.clone(),
                            source,
                            location,
                        })?;
                AstNode::NumberLiteral { value, location }
            }
            TokenKind::String => AstNode::StringLiteral {
                value: token.text.clone(),
                location,
            },
            TokenKind::Ident => AstNode::Identifier {
                name: token.text.clone(),
                location,
            },
            TokenKind::True | TokenKind::False => AstNode::BooleanLiteral {
                value: token.kind == TokenKind::True,
                location,
            },
            TokenKind::OpenParen => return self.parse_grouping(),
            kind => return Err(ParseError::UnsupportedToken { kind, location }),
        };

        self.advance();
        Ok(node)
    }

    /// Parse `( expression )`
    fn parse_grouping(&mut self) -> Result<AstNode, ParseError> {
        let open = self.advance().map(|token| token.span).unwrap_or_default();
        let expr = self.nested(Self::parse_expression)?;

        if !self.check(TokenKind::CloseParen) {
            return Err(ParseError::UnmatchedParen {
                line: open.line,
                location: open,
            });
        }
        self.advance();

        Ok(expr)
    }

    // ===== Helper methods =====

    /// Left-associative tier: `operand (op operand)*`.
    fn fold_left(
        &mut self,
        ops: &[TokenKind],
        operand: ParseFn<'t>,
    ) -> Result<AstNode, ParseError> {
        let mut left = operand(self)?;
        let mut folds = 0;

        while let Some((op, location)) = self.match_operator(ops) {
            self.enter()?;
            folds += 1;
            let right = operand(self)?;
            left = binary(op, left, right, location);
        }

        self.leave(folds);
        Ok(left)
    }

    /// Run `parse` one nesting level deeper.
    fn nested(&mut self, parse: ParseFn<'t>) -> Result<AstNode, ParseError> {
        self.enter()?;
        let result = parse(self);
        self.leave(1);
        result
    }

    /// Consume the current token if its kind is one of `ops`.
    fn match_operator(&mut self, ops: &[TokenKind]) -> Option<(BinOp, Span)> {
        let token = self.current()?;
        if !ops.contains(&token.kind) {
            return None;
        }

        let op = BinOp::from_token(token.kind)?;
        self.advance();
        Some((op, token.span))
    }
}

fn binary(op: BinOp, left: AstNode, right: AstNode, location: Span) -> AstNode {
    trace!("fold binary {}", op);
    AstNode::BinaryExpr {
        op,
        left: Box::new(left),
        right: Box::new(right),
        location,
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{AstNode, BinOp, UnOp};
    use crate::parser::lexer::{Lexer, TokenKind};
    use crate::parser::parse::{ParseError, TokenCursor};

    fn parse(source: &str) -> Result<AstNode, ParseError> {
        let mut lexer = Lexer::new();
        let tokens = lexer.lex(source).unwrap();
        let mut cursor = TokenCursor::new(tokens);
        cursor.parse_expression()
    }

    fn is_number(node: &AstNode, expected: f64) -> bool {
        matches!(node, AstNode::NumberLiteral { value, .. } if *value == expected)
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let node = parse("2 + 3 * 4").unwrap();

        let AstNode::BinaryExpr {
            op: BinOp::Add,
            left,
            right,
            ..
        } = node
        else {
            panic!("Expected addition at the root");
        };
        assert!(is_number(&left, 2.0));
        assert!(matches!(*right, AstNode::BinaryExpr { op: BinOp::Mul, .. }));
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let node = parse("10 - 4 - 3").unwrap();

        let AstNode::BinaryExpr { left, right, .. } = node else {
            panic!("Expected binary expression");
        };
        assert!(matches!(*left, AstNode::BinaryExpr { op: BinOp::Sub, .. }));
        assert!(is_number(&right, 3.0));
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let node = parse("a || b && c").unwrap();

        let AstNode::BinaryExpr {
            op: BinOp::Or,
            left,
            right,
            ..
        } = node
        else {
            panic!("Expected logical or at the root");
        };
        assert!(matches!(*left, AstNode::Identifier { ref name, .. } if name == "a"));
        assert!(matches!(*right, AstNode::BinaryExpr { op: BinOp::And, .. }));
    }

    #[test]
    fn test_unary_binds_tighter_than_exponent() {
        let node = parse("-2 ^ 2").unwrap();

        let AstNode::BinaryExpr {
            op: BinOp::Pow,
            left,
            ..
        } = node
        else {
            panic!("Expected exponent at the root");
        };
        assert!(matches!(*left, AstNode::UnaryExpr { op: UnOp::Neg, .. }));
    }

    #[test]
    fn test_operator_location_is_recorded() {
        let node = parse("1 +\n2").unwrap();
        assert_eq!(node.location().line, 1);
        assert_eq!(node.location().start, 2);
    }

    #[test]
    fn test_dangling_operator() {
        let err = parse("1 +").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnsupportedToken {
                kind: TokenKind::Eof,
                ..
            }
        ));
    }

    #[test]
    fn test_increment_is_unsupported_in_primary() {
        let err = parse("++x").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported token: '++'");
    }

    #[test]
    fn test_nesting_limit_stops_recursion() {
        let source = format!("{}1", "!".repeat(1_000));
        let err = parse(&source).unwrap_err();
        assert!(matches!(err, ParseError::NestingTooDeep { line: 1, .. }));

        let source = format!("{}1", "!".repeat(100));
        assert!(parse(&source).is_ok());
    }

    #[test]
    fn test_invalid_number() {
        let err = parse("1.2.3").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { ref text, .. } if text == "1.2.3"));
        assert!(err.to_string().starts_with("Invalid number literal `1.2.3`: "));
    }
}
