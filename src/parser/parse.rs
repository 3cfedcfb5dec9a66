//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the parse error type and the
//! [`TokenCursor`] that walks one token sequence.
//!
//! # Parser Architecture
//!
//! - This module: Parser (owns the lexer and the program root), cursor helpers
//! - `expressions`: precedence climbing over the cursor
//!
//! The cursor only ever moves forward. Each call to [`Parser::parse`] lexes its
//! input afresh, builds a new cursor over the tokens, and appends the parsed
//! top-level expressions to the program root.

use crate::error::Error;
use crate::parser::ast::Program;
use crate::parser::lexer::{Lexer, Span, Token, TokenKind};
use log::debug;
use std::num::ParseFloatError;

/// Deepest nesting a single expression may reach. Groups, prefix operators,
/// exponent right-hand sides and each operator folded into a chain all count.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parser error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Unsupported token: {kind}")]
    UnsupportedToken { kind: TokenKind, location: Span },

    #[error("Expected `)` closing parens to match one on line {line}")]
    UnmatchedParen { line: usize, location: Span },

    #[error("Invalid number literal `{text}`: {source}")]
    InvalidNumber {
        text: String,
        source: ParseFloatError,
        location: Span,
    },

    #[error("Expression nested deeper than {} levels on line {line}", MAX_NESTING_DEPTH)]
    NestingTooDeep { line: usize, location: Span },
}

impl ParseError {
    pub fn location(&self) -> &Span {
        match self {
            ParseError::UnsupportedToken { location, .. }
            | ParseError::UnmatchedParen { location, .. }
            | ParseError::InvalidNumber { location, .. }
            | ParseError::NestingTooDeep { location, .. } => location,
        }
    }

    /// Line the error points at: the opening parenthesis for an unmatched
    /// one, otherwise the offending token's line.
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnmatchedParen { line, .. }
            | ParseError::NestingTooDeep { line, .. } => *line,
            _ => self.location().line,
        }
    }
}

/// Recursive descent parser for mb-script expressions
///
/// State persists across [`Parser::parse`] calls: each successful call appends
/// its expressions to the same [`Program`].
#[derive(Default)]
pub struct Parser {
    lexer: Lexer,
    program: Program,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `source` and append its top-level expressions to the program.
    ///
    /// The first error aborts the call and nothing from `source` is appended.
    pub fn parse(&mut self, source: &str) -> Result<(), Error> {
        let tokens = self.lexer.lex(source)?;
        let mut cursor = TokenCursor::new(tokens);

        let mut parsed = Vec::new();
        while !cursor.is_at_end() {
            parsed.push(cursor.parse_expression()?);
        }

        debug!(
            "parsed {} expression(s) from {} token(s)",
            parsed.len(),
            tokens.len()
        );
        self.program.nodes.extend(parsed);
        Ok(())
    }

    /// Structural dump of everything parsed so far.
    pub fn render(&self) -> String {
        self.program.to_string()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }

    /// Tokens of the most recent successful lex.
    pub fn tokens(&self) -> &[Token] {
        self.lexer.tokens()
    }

    /// Drop every parsed expression.
    pub fn reset(&mut self) {
        self.program = Program::new();
    }
}

/// Forward-only position in a token sequence.
pub(crate) struct TokenCursor<'t> {
    tokens: &'t [Token],
    position: usize,
    depth: usize,
}

impl<'t> TokenCursor<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    // ===== Helper methods =====

    pub(crate) fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current().is_some_and(|token| token.kind == kind)
    }

    /// Consume the current token. The cursor never moves past `Eof`.
    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.current()?;
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        Some(token)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current().map_or(true, |token| token.kind == TokenKind::Eof)
    }

    /// Take one nesting level, failing at the current token once
    /// [`MAX_NESTING_DEPTH`] is reached.
    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            let location = self.current().map(|token| token.span).unwrap_or_default();
            return Err(ParseError::NestingTooDeep {
                line: location.line,
                location,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Give back `levels` nesting levels taken with [`TokenCursor::enter`].
    pub(crate) fn leave(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stops_at_eof() {
        let mut lexer = Lexer::new();
        let tokens = lexer.lex("x").unwrap();
        let mut cursor = TokenCursor::new(tokens);

        assert!(cursor.check(TokenKind::Ident));
        assert_eq!(cursor.advance().map(|t| t.kind), Some(TokenKind::Ident));
        assert!(cursor.is_at_end());
        assert_eq!(cursor.advance().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_empty_cursor_is_at_end() {
        let cursor = TokenCursor::new(&[]);
        assert!(cursor.is_at_end());
        assert!(cursor.current().is_none());
    }

    #[test]
    fn test_failed_parse_appends_nothing() {
        let mut parser = Parser::new();
        parser.parse("1").unwrap();
        assert!(parser.parse("2 3 )").is_err());

        assert_eq!(parser.program().len(), 1);
    }

    #[test]
    fn test_parse_accumulates_and_resets() {
        let mut parser = Parser::new();
        parser.parse("a").unwrap();
        parser.parse("b c").unwrap();
        assert_eq!(parser.program().len(), 3);

        parser.reset();
        assert!(parser.program().is_empty());
        assert_eq!(parser.render(), "[]");
    }

    #[test]
    fn test_error_lines() {
        let mut parser = Parser::new();

        let err = parser.parse("\n\n(1 + 2").unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(
            err.to_string(),
            "Parser error: Expected `)` closing parens to match one on line 3"
        );

        let err = parser.parse("\n'abc").unwrap_err();
        assert!(matches!(err, Error::Lex(_)));
        assert_eq!(err.line(), 2);
    }
}
