//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The inspector shows a source file next to the tokens the lexer produced
//! for it and the tree the parser built from them. It is organized into three
//! layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, token selection
//! - **[`panes`]** — stateless render functions for each visible pane (source,
//!   tokens, tree, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the source text
//! and call [`App::run`] to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
