//! Event handling for the application.
//!
//! Terminal input is polled by [`EventHandler`] and turned into [`Event`]s;
//! [`KeyBindings`] decides which keys navigate the suggestion list.

mod bindings;
mod handler;

use crossterm::event::{KeyEvent, MouseEvent};

pub use bindings::KeyBindings;
pub use handler::EventHandler;

/// An application event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button, move or scroll event.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The poll interval elapsed without input.
    Tick,
}
