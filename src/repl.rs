//! Interactive read loop
//!
//! Reads one line at a time, parses it with a fresh [`Parser`] and prints the
//! rendered tree. The line is parsed as typed, minus its line ending, so
//! reported offsets match the input. Errors are reported and the loop moves on
//! to the next line; `exit` or end of input stops it.

use crate::parser::Parser;
use crossterm::style::Stylize;
use log::warn;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = ">> ";

/// Run the loop until `exit` or end of input.
///
/// `styled` turns on ANSI colors for the banner and error messages.
pub fn run<R: BufRead, W: Write>(mut input: R, output: &mut W, styled: bool) -> io::Result<()> {
    let banner = format!("mb-script v{}", env!("CARGO_PKG_VERSION"));
    if styled {
        writeln!(output, "\n{}\n", banner.as_str().bold())?;
    } else {
        writeln!(output, "\n{}\n", banner)?;
    }

    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let source = line.trim_end_matches(['\n', '\r']);
        if source.trim() == "exit" {
            writeln!(output, "Bye!")?;
            break;
        }

        let mut parser = Parser::new();
        match parser.parse(source) {
            Ok(()) => writeln!(output, "{}", parser.render())?,
            Err(err) => {
                warn!("line rejected: {}", err);
                let message = err.to_string();
                if styled {
                    writeln!(output, "{}", message.as_str().red())?;
                } else {
                    writeln!(output, "{}", message)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> String {
        let mut output = Vec::new();
        run(input.as_bytes(), &mut output, false).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_prints_tree_and_exits() {
        let out = session("1 + 2\nexit\nnever parsed\n");

        assert!(out.contains("mb-script v"));
        assert!(out.contains("{ type: BinaryExpr, left: { type: NumberLiteral, value: 1 }, op: +"));
        assert!(out.ends_with("Bye!\n"));
        assert!(!out.contains("never"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let out = session("a = 1\n(1 + 2\ntrue\n");

        assert!(out.contains("Lexer error: Assignment operator not allowed"));
        assert!(out.contains("Expected `)` closing parens to match one on line 1"));
        assert!(out.contains("{ type: BooleanLiteral, value: true }"));
    }

    #[test]
    fn test_blank_line_prints_empty_root() {
        let out = session("\n   \nexit\n");
        assert_eq!(out.matches("[]").count(), 2);
    }

    #[test]
    fn test_error_offsets_keep_leading_whitespace() {
        let out = session("  a = 1\r\n");
        assert!(out.contains("Line: 1, Start: 4, End: 5"));
    }

    #[test]
    fn test_end_of_input_stops() {
        let out = session("");
        assert!(out.ends_with(&format!("{}\n", PROMPT)));
    }
}
