//! TUI pane rendering modules
//!
//! - [`source`]: Source text colored by token kind, with the selected token highlighted
//! - [`tokens`]: The token stream as a selectable list
//! - [`tree`]: Outline of the parsed program, or the parse error
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a `render_*` function that takes the frame, its
//! area, the data to show and its scroll state.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};

pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;

/// Bordered block with the focus-dependent border style shared by all panes.
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Clamp `offset` so a window of `visible` rows stays within `total` rows.
fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
