//! Lexer (tokenizer) for mb-script source text
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Every token records a [`Span`]: its starting character offset, the offset
//! just past its last character, and the line it started on.
//!
//! The lexer is reusable: each call to [`Lexer::lex`] resets the cursor and
//! line counter and discards the tokens of the previous call.

use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::fmt;
use thiserror::Error;

/// Position of a token in the source text.
///
/// `start` and `end` are 0-based character offsets (`end` is exclusive),
/// `line` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize) -> Self {
        Self { start, end, line }
    }
}

/// Closed set of token classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    String, // "abc" or 'abc'
    Number, // 123 or 123.45
    True,
    False,
    Null, // nil

    // Misc
    Ident,
    OpenParen,  // (
    CloseParen, // )
    Dot,        // .
    Colon,      // :
    Comma,      // ,
    Question,   // ?

    // Unary
    Negate,
    Not, // !
    Inc, // ++
    Dec, // --

    // Binary arithmetic
    Plus,  // +
    Minus, // -
    Mul,   // *
    Div,   // /
    Mod,   // %
    Pow,   // ** or ^

    // Comparison
    Equals,    // ==
    NotEquals, // !=
    Less,      // <
    Greater,   // >
    LessEq,    // <=
    GreaterEq, // >=

    // Logical
    And, // &&
    Or,  // ||

    Invalid,
    Eof,
}

impl TokenKind {
    /// Stable, human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::String => "string literal",
            TokenKind::Number => "number literal",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Null => "'nil'",
            TokenKind::Ident => "identifier",
            TokenKind::OpenParen => "'('",
            TokenKind::CloseParen => "')'",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Comma => "','",
            TokenKind::Question => "'?'",
            TokenKind::Negate => "unary '-'",
            TokenKind::Not => "'!'",
            TokenKind::Inc => "'++'",
            TokenKind::Dec => "'--'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Mul => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::Mod => "'%'",
            TokenKind::Pow => "'**'",
            TokenKind::Equals => "'=='",
            TokenKind::NotEquals => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::LessEq => "'<='",
            TokenKind::GreaterEq => "'>='",
            TokenKind::And => "'&&'",
            TokenKind::Or => "'||'",
            TokenKind::Invalid => "invalid token",
            TokenKind::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified lexeme.
///
/// For string literals `text` holds the contents without the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    pub span: Span,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} `{}` at {}:{}..{}",
            self.kind, self.text, self.span.line, self.span.start, self.span.end
        )
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error: {message}\nLine: {}, Start: {}, End: {}", .span.line, .span.start, .span.end)]
pub struct LexError {
    pub message: String,
    /// Text of the offending input.
    pub value: String,
    pub span: Span,
}

/// Lexer for mb-script source text
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    tokens: Vec<Token>,
    keywords: FxHashMap<&'static str, TokenKind>,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        let mut keywords = FxHashMap::default();
        keywords.insert("true", TokenKind::True);
        keywords.insert("false", TokenKind::False);
        keywords.insert("nil", TokenKind::Null);

        Self {
            input: Vec::new(),
            position: 0,
            line: 1,
            tokens: Vec::new(),
            keywords,
        }
    }

    /// Tokenize `source`, replacing the tokens of any previous call.
    ///
    /// The returned sequence always ends with exactly one [`TokenKind::Eof`].
    pub fn lex(&mut self, source: &str) -> Result<&[Token], LexError> {
        self.input = source.chars().collect();
        self.position = 0;
        self.line = 1;
        self.tokens.clear();

        if let Err(err) = self.scan() {
            self.tokens.clear();
            return Err(err);
        }

        let end = self.position;
        self.push_token(String::new(), TokenKind::Eof, end, self.line);
        debug!("lexed {} tokens over {} line(s)", self.tokens.len(), self.line);

        Ok(&self.tokens)
    }

    /// Tokens produced by the last successful call to [`Lexer::lex`].
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    fn scan(&mut self) -> Result<(), LexError> {
        while let Some(ch) = self.peek() {
            match ch {
                '0'..='9' => self.number_literal(),
                '"' | '\'' => self.string_literal()?,
                'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(),
                c if c.is_whitespace() => self.skip_whitespace(),
                '(' => self.single(TokenKind::OpenParen),
                ')' => self.single(TokenKind::CloseParen),
                '.' => self.single(TokenKind::Dot),
                '?' => self.single(TokenKind::Question),
                ':' => self.single(TokenKind::Colon),
                _ => self.operator()?,
            }
        }
        Ok(())
    }

    /// Numeric literal: a run of digits and dots.
    ///
    /// Runs such as `1.2.3` are kept whole; the parser rejects them when it
    /// converts the text to a number.
    fn number_literal(&mut self) {
        let start = self.position;
        let mut num = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                num.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        self.push_token(num, TokenKind::Number, start, self.line);
    }

    /// String literal delimited by `"` or `'`; the closing quote must match
    /// the opening one. Strings may span lines.
    fn string_literal(&mut self) -> Result<(), LexError> {
        let start = self.position;
        let line = self.line;
        let Some(quote) = self.advance() else {
            return Ok(());
        };
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            self.advance();
            if ch == quote {
                self.push_token(string, TokenKind::String, start, line);
                return Ok(());
            }
            string.push(ch);
        }

        Err(LexError {
            message: format!(
                "Expected `{}` to terminate string starting at line {}, pos {}",
                quote, line, start
            ),
            value: format!("{}{}", quote, string),
            span: Span::new(start, self.position, line),
        })
    }

    fn identifier_or_keyword(&mut self) {
        let start = self.position;
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = self
            .keywords
            .get(ident.as_str())
            .copied()
            .unwrap_or(TokenKind::Ident);
        self.push_token(ident, kind, start, self.line);
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn single(&mut self, kind: TokenKind) {
        let start = self.position;
        if let Some(ch) = self.advance() {
            self.push_token(ch.to_string(), kind, start, self.line);
        }
    }

    /// One- and two-character operators.
    fn operator(&mut self) -> Result<(), LexError> {
        let start = self.position;
        let Some(op) = self.advance() else {
            return Ok(());
        };

        let kind = match op {
            '+' => self.either('+', TokenKind::Inc, TokenKind::Plus),
            '-' => self.either('-', TokenKind::Dec, TokenKind::Minus),
            '*' => self.either('*', TokenKind::Pow, TokenKind::Mul),
            '/' => TokenKind::Div,
            '^' => TokenKind::Pow,
            '%' => TokenKind::Mod,
            '>' => self.either('=', TokenKind::GreaterEq, TokenKind::Greater),
            '<' => self.either('=', TokenKind::LessEq, TokenKind::Less),
            '!' => self.either('=', TokenKind::NotEquals, TokenKind::Not),
            // No assignment yet, so `=` only appears as `==`
            '=' => self.required(
                '=',
                TokenKind::Equals,
                start,
                "Assignment operator not allowed",
            )?,
            '&' => self.required(
                '&',
                TokenKind::And,
                start,
                "Expected `&` after `&` to form `&&`",
            )?,
            '|' => self.required(
                '|',
                TokenKind::Or,
                start,
                "Expected `|` after `|` to form `||`",
            )?,
            _ => {
                return Err(LexError {
                    message: format!("Unknown token `{}`", op),
                    value: op.to_string(),
                    span: Span::new(start, self.position, self.line),
                });
            }
        };

        let text: String = self.input[start..self.position].iter().collect();
        self.push_token(text, kind, start, self.line);
        Ok(())
    }

    /// Consume `second` if it follows, picking the two-character kind.
    fn either(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Like [`Lexer::either`], but the lone first character is an error.
    fn required(
        &mut self,
        second: char,
        kind: TokenKind,
        start: usize,
        message: &str,
    ) -> Result<TokenKind, LexError> {
        if self.peek() == Some(second) {
            self.advance();
            Ok(kind)
        } else {
            Err(LexError {
                message: message.to_string(),
                value: self.input[start..self.position].iter().collect(),
                span: Span::new(start, self.position, self.line),
            })
        }
    }

    fn push_token(&mut self, text: String, kind: TokenKind, start: usize, line: usize) {
        let token = Token {
            text,
            kind,
            span: Span::new(start, self.position, line),
        };
        trace!("token {}", token);
        self.tokens.push(token);
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }
}
