//! Tree pane rendering: the program outline, or the error that stopped parsing

use super::{clamp_scroll, pane_block};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Render the tree pane. `error` takes precedence over `outline`.
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    outline: &[String],
    error: Option<&str>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Tree ", is_focused);

    if let Some(message) = error {
        let lines: Vec<Line> = message.lines().map(Line::from).collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.error))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    clamp_scroll(scroll_offset, outline.len(), visible_height);

    let lines: Vec<Line> = outline
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| Line::styled(line.as_str(), Style::default().fg(DEFAULT_THEME.fg)))
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
