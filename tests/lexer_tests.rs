// Integration tests for the lexer

use mbscript::parser::lexer::{LexError, Lexer, Span, TokenKind};

fn lex_err(source: &str) -> LexError {
    let mut lexer = Lexer::new();
    lexer.lex(source).expect_err("lexing should fail")
}

#[test]
fn test_numeric_literals_are_single_tokens() {
    for source in ["0", "7", "42", "3.14", "10.", "1.2.3", "000.5"] {
        let mut lexer = Lexer::new();
        let tokens = lexer.lex(source).unwrap();

        assert_eq!(tokens.len(), 2, "input {:?}", source);
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, source);
        assert_eq!(tokens[0].span, Span::new(0, source.chars().count(), 1));
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

#[test]
fn test_whitespace_only_yields_eof() {
    for source in ["", " ", "\t\t", "\n\n  \r\n", "   \n"] {
        let mut lexer = Lexer::new();
        let tokens = lexer.lex(source).unwrap();

        assert_eq!(tokens.len(), 1, "input {:?}", source);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}

#[test]
fn test_keywords_and_identifiers() {
    let mut lexer = Lexer::new();
    let tokens = lexer.lex("true false nil truee _nil2 Null").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
    assert_eq!(tokens[3].text, "truee");
}

#[test]
fn test_line_tracking() {
    let mut lexer = Lexer::new();
    let tokens = lexer.lex("a\nb\n\n  c").unwrap();

    let lines: Vec<usize> = tokens.iter().map(|t| t.span.line).collect();
    assert_eq!(lines, vec![1, 2, 4, 4]);
    assert_eq!(tokens[2].span, Span::new(7, 8, 4));
}

#[test]
fn test_punctuation() {
    let mut lexer = Lexer::new();
    let tokens = lexer.lex("a ? b : c.d").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();

    assert_eq!(
        kinds,
        vec![
            TokenKind::Ident,
            TokenKind::Question,
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Ident,
            TokenKind::Dot,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_unterminated_string_reports_start_line() {
    let err = lex_err("1 +\n\"abc");

    assert_eq!(err.span.line, 2);
    assert_eq!(err.span.start, 4);
    assert!(err.message.contains("starting at line 2"));
    assert!(err.to_string().contains("Line: 2"));
}

#[test]
fn test_string_needs_matching_quote() {
    let err = lex_err("'abc\"");
    assert!(err.message.contains("Expected `'`"));
}

#[test]
fn test_bare_operators_are_errors() {
    for (source, value) in [("=", "="), ("a = b", "="), ("&", "&"), ("x | y", "|")] {
        let err = lex_err(source);
        assert_eq!(err.value, value, "input {:?}", source);
    }

    assert!(lex_err("=").message.contains("Assignment"));
}

#[test]
fn test_unknown_characters() {
    for source in ["#", "a , b", "[1]", "1;", "é"] {
        let err = lex_err(source);
        assert!(err.message.starts_with("Unknown token"), "input {:?}", source);
    }
}
