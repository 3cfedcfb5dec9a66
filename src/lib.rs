//! # Introduction
//!
//! `mbscript` is the front end of the mb-script expression language: a lexer
//! that turns source text into positioned tokens and a precedence-climbing
//! parser that builds an owned AST from them.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → Program (AST) → render()
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds the AST.
//! 2. [`runtime`] — the value type returned by the (not yet implemented)
//!    evaluation hooks.
//! 3. [`error`] — the crate-level error joining lexical and parse failures.
//! 4. [`repl`] — the interactive read loop used by the binary.
//! 5. [`ui`] — ratatui-based token/AST inspector; not part of the stable
//!    library API.
//!
//! ## Example
//!
//! ```
//! use mbscript::parser::Parser;
//!
//! let mut parser = Parser::new();
//! parser.parse("2 + 3 * 4").unwrap();
//! assert_eq!(parser.program().len(), 1);
//! assert!(parser.render().contains("op: *"));
//! ```

pub mod error;
pub mod parser;
pub mod repl;
pub mod runtime;
pub mod ui;

pub use error::Error;
