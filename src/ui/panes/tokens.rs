//! Token list pane rendering

use super::source::kind_style;
use super::{clamp_scroll, pane_block};
use crate::parser::lexer::Token;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// One list row: `line:start..end  kind  text`.
pub(crate) fn token_row(token: &Token) -> String {
    format!(
        "{:>3}:{:<9} {:<16} {}",
        token.span.line,
        format!("{}..{}", token.span.start, token.span.end),
        token.kind.name(),
        token.text.escape_debug()
    )
}

/// Render the token pane
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tokens ", is_focused);

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Follow the selection
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }
    clamp_scroll(scroll_offset, tokens.len(), visible_height);

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let mut style = kind_style(token.kind);
            if idx == selected {
                style = style
                    .bg(DEFAULT_THEME.selection_bg)
                    .add_modifier(Modifier::BOLD);
            }
            let marker = if idx == selected { "▶ " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.secondary)),
                Span::styled(token_row(token), style),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{Span as TokenSpan, TokenKind};

    #[test]
    fn test_token_row_escapes_newlines() {
        let token = Token {
            text: "a\nb".to_string(),
            kind: TokenKind::String,
            span: TokenSpan::new(0, 5, 1),
        };
        let row = token_row(&token);

        assert!(row.starts_with("  1:0..5"));
        assert!(row.contains("string literal"));
        assert!(row.ends_with("a\\nb"));
    }
}
