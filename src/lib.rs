//! tagbox - a terminal tag input with autocomplete suggestions.
//!
//! Type to filter a list of suggestions, pick one with the arrow keys or the
//! mouse, or commit free text as a tag. The widget state machine lives in
//! [`ui::TagInputState`]; everything else drives it from a terminal.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod terminal;
pub mod ui;
