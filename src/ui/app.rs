//! Main TUI application state and logic

use crate::parser::lexer::Token;
use crate::parser::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tokens,
    Tree,
}

impl FocusedPane {
    /// Move focus to the next pane (source -> tokens -> tree)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The source text being inspected
    pub source_code: String,

    /// Tokens from the lexer (empty when lexing failed)
    pub tokens: Vec<Token>,

    /// Outline of the parsed program
    pub outline: Vec<String>,

    /// Number of top-level expressions parsed
    pub node_count: usize,

    /// Lex or parse error, if any
    pub error: Option<String>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index into `tokens`
    pub selected_token: usize,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub tokens_scroll: usize,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Lex and parse `source_code` and build the app state from the result.
    pub fn new(source_code: String) -> Self {
        let mut parser = Parser::new();
        let result = parser.parse(&source_code);

        let (error, status_message) = match &result {
            Ok(()) => (None, String::from("Parsed successfully")),
            Err(err) => (
                Some(err.to_string()),
                format!("Parsing failed on line {}", err.line()),
            ),
        };

        App {
            tokens: parser.tokens().to_vec(),
            outline: parser.program().outline(),
            node_count: parser.program().len(),
            source_code,
            error,
            focused_pane: FocusedPane::Tokens,
            selected_token: 0,
            source_scroll: 0,
            tokens_scroll: 0,
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    pub fn selected(&self) -> Option<&Token> {
        self.tokens.get(self.selected_token)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left: Source (top) | Tokens (bottom); right: Tree
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[0]);

        let selected = self.tokens.get(self.selected_token);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            &self.tokens,
            selected,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tokens_pane(
            frame,
            left_rows[1],
            &self.tokens,
            self.selected_token,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            columns[1],
            &self.outline,
            self.error.as_deref(),
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.tokens.len(),
            self.node_count,
            self.error.is_some(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up | KeyCode::Char('k') => match self.focused_pane {
                FocusedPane::Source | FocusedPane::Tokens => {
                    self.selected_token = self.selected_token.saturating_sub(1);
                    self.describe_selection();
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down | KeyCode::Char('j') => match self.focused_pane {
                FocusedPane::Source | FocusedPane::Tokens => {
                    if self.selected_token + 1 < self.tokens.len() {
                        self.selected_token += 1;
                    }
                    self.describe_selection();
                }
                FocusedPane::Tree => {
                    self.tree_scroll = self.tree_scroll.saturating_add(1);
                }
            },
            KeyCode::Home => {
                self.selected_token = 0;
                self.describe_selection();
            }
            KeyCode::End => {
                self.selected_token = self.tokens.len().saturating_sub(1);
                self.describe_selection();
            }
            _ => {}
        }
    }

    fn describe_selection(&mut self) {
        if let Some(token) = self.selected() {
            self.status_message = format!(
                "Token {}/{}: {}",
                self.selected_token + 1,
                self.tokens.len(),
                token
            );
        }
    }
}
