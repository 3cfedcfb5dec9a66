//! Source pane rendering with token-based highlighting
//!
//! Unlike a regex highlighter, the colors here come from the lexer itself:
//! every character covered by a token takes that token's style, so the pane
//! shows exactly how the input was classified. The selected token is drawn
//! on a highlighted background and kept in view.

use super::{clamp_scroll, pane_block};
use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(crate) fn kind_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::String => Style::default().fg(DEFAULT_THEME.string),
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::True | TokenKind::False | TokenKind::Null => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Ident => Style::default().fg(DEFAULT_THEME.fg),
        TokenKind::OpenParen | TokenKind::CloseParen => {
            Style::default().fg(DEFAULT_THEME.primary)
        }
        _ => Style::default().fg(DEFAULT_THEME.operator),
    }
}

/// Split `source` into styled lines, one style per character.
fn highlight_source(source: &str, tokens: &[Token], selected: Option<&Token>) -> Vec<Line<'static>> {
    let chars: Vec<char> = source.chars().collect();
    let mut styles = vec![Style::default().fg(DEFAULT_THEME.comment); chars.len()];

    for token in tokens {
        let end = token.span.end.min(chars.len());
        for style in styles.iter_mut().take(end).skip(token.span.start) {
            *style = kind_style(token.kind);
        }
    }
    if let Some(token) = selected {
        let end = token.span.end.min(chars.len());
        for style in styles.iter_mut().take(end).skip(token.span.start) {
            *style = style
                .bg(DEFAULT_THEME.selection_bg)
                .add_modifier(Modifier::BOLD);
        }
    }

    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();

    for (ch, style) in chars.iter().zip(styles) {
        if *ch == '\n' {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(*ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    lines.push(Line::from(spans));

    lines
}

/// Render the source pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    tokens: &[Token],
    selected: Option<&Token>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Source ", is_focused);
    let lines = highlight_source(source, tokens, selected);
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Keep the selected token's line on screen
    if let Some(token) = selected {
        let row = token.span.line.saturating_sub(1);
        if row < *scroll_offset {
            *scroll_offset = row;
        } else if row >= *scroll_offset + visible_height {
            *scroll_offset = row + 1 - visible_height;
        }
    }
    clamp_scroll(scroll_offset, lines.len(), visible_height);

    let visible_lines: Vec<Line> = lines
        .into_iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let is_current = selected.is_some_and(|token| token.span.line == idx + 1);
            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    #[test]
    fn test_highlight_splits_lines() {
        let mut lexer = Lexer::new();
        let tokens = lexer.lex("1 +\n'a'").unwrap().to_vec();
        let lines = highlight_source("1 +\n'a'", &tokens, None);

        assert_eq!(lines.len(), 2);
        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, "1 +");
        assert_eq!(lines[1].spans.len(), 1);
        assert_eq!(lines[1].spans[0].style, kind_style(TokenKind::String));
    }

    #[test]
    fn test_selected_token_is_highlighted() {
        let mut lexer = Lexer::new();
        let tokens = lexer.lex("ab cd").unwrap().to_vec();
        let lines = highlight_source("ab cd", &tokens, Some(&tokens[1]));

        let last = lines[0].spans.last().unwrap();
        assert_eq!(last.content, "cd");
        assert_eq!(last.style.bg, Some(DEFAULT_THEME.selection_bg));
    }
}
