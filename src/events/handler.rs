//! Event handler implementation.
//!
//! Polls for terminal events and converts them to application events.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent};

use super::Event;

/// The tick rate for the event loop in milliseconds.
const TICK_RATE_MS: u64 = 250;

/// Handles application events by polling crossterm for terminal events.
pub struct EventHandler {
    /// The tick rate duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(TICK_RATE_MS),
        }
    }

    /// Poll for the next event.
    ///
    /// Blocks until an event is available or the tick rate elapses.
    pub fn next(&self) -> std::io::Result<Event> {
        if event::poll(self.tick_rate)? {
            Ok(convert(event::read()?))
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a crossterm event onto an application event.
fn convert(event: CrosstermEvent) -> Event {
    match event {
        CrosstermEvent::Key(key_event) => Event::Key(key_event),
        CrosstermEvent::Mouse(mouse_event) => Event::Mouse(mouse_event),
        CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
        // Terminal focus is not field focus
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost => Event::Tick,
        // Paste arrives as key events with bracketed paste disabled
        CrosstermEvent::Paste(_) => Event::Tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    #[test]
    fn test_event_handler_new() {
        let handler = EventHandler::new();
        assert_eq!(handler.tick_rate, Duration::from_millis(TICK_RATE_MS));
    }

    #[test]
    fn test_convert_key() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(convert(CrosstermEvent::Key(key)), Event::Key(key));
    }

    #[test]
    fn test_convert_mouse() {
        let mouse = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(convert(CrosstermEvent::Mouse(mouse)), Event::Mouse(mouse));
    }

    #[test]
    fn test_convert_focus_is_tick() {
        assert_eq!(convert(CrosstermEvent::FocusGained), Event::Tick);
        assert_eq!(convert(CrosstermEvent::Paste("x".to_string())), Event::Tick);
    }
}
