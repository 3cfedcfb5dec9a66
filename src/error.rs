//! Crate-level error type.
//!
//! A failed [`Parser::parse`](crate::parser::parse::Parser::parse) reports
//! either a lexical or a syntactic failure. Neither is fatal: the caller can
//! report it and carry on with the next input.

use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Parser error: {0}")]
    Parse(#[from] ParseError),
}

impl Error {
    /// Line the error points at.
    pub fn line(&self) -> usize {
        match self {
            Error::Lex(err) => err.span.line,
            Error::Parse(err) => err.line(),
        }
    }
}
