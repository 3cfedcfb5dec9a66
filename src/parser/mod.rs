//! mb-script source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), parser state and errors
//! - [`ast`]: AST node definitions and structural rendering
//!
//! # Grammar
//!
//! The language is expressions only: number, string, boolean and `nil`
//! literals, identifiers, prefix `-` `+` `!`, arithmetic including `**`/`^`
//! exponentiation, comparison and logical operators, and parentheses. There
//! are no statements, assignment, calls or control flow yet.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;

pub use parse::Parser;
