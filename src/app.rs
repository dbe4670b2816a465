//! Main application state and event loop.
//!
//! Follows The Elm Architecture: events flow through [`App::update`], and
//! [`App::view`] draws the current state.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace};

use crate::error::{AppError, Result};
use crate::events::{Event, EventHandler};
use crate::terminal::TerminalSession;
use crate::ui::{render_help, TagChange, TagInput, TAG_INPUT_HINTS};

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// The user is editing tags.
    #[default]
    Editing,
    /// The user accepted the tags.
    Finished,
    /// The user aborted; the tags are discarded.
    Cancelled,
}

/// The main application struct that holds all state.
pub struct App {
    /// Current state.
    state: AppState,
    /// The tag input widget.
    tag_input: TagInput,
    /// Last tag change, shown in the status line.
    status: Option<String>,
}

impl App {
    /// Create a new application around a tag input.
    pub fn new(tag_input: TagInput) -> Self {
        debug!(
            candidates = tag_input.state().candidates().len(),
            tags = tag_input.tags().len(),
            "Creating application"
        );
        Self {
            state: AppState::Editing,
            tag_input,
            status: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Whether the event loop should stop.
    pub fn should_quit(&self) -> bool {
        self.state != AppState::Editing
    }

    /// The tag input widget.
    pub fn tag_input(&self) -> &TagInput {
        &self.tag_input
    }

    /// The committed tags.
    pub fn tags(&self) -> &[String] {
        self.tag_input.tags()
    }

    /// Status line text.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Mouse(mouse_event) => {
                trace!(kind = ?mouse_event.kind, column = mouse_event.column, row = mouse_event.row, "Mouse event");
                let change = self.tag_input.handle_mouse(mouse_event);
                self.record(change);
            }
            Event::Resize(width, height) => {
                // ratatui redraws at the new size on the next frame
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

        if key_event.kind == KeyEventKind::Release {
            return;
        }

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                info!("Tag input cancelled");
                self.state = AppState::Cancelled;
            }
            (KeyCode::Esc, _) => {
                info!(tags = self.tags().len(), "Tag input finished");
                self.state = AppState::Finished;
            }
            _ => {
                let change = self.tag_input.handle_key(key_event);
                self.record(change);
            }
        }
    }

    /// Tell the user when pointer events will not arrive.
    fn set_mouse_available(&mut self, available: bool) {
        if !available {
            self.status = Some("Mouse unavailable, keyboard only".to_string());
        }
    }

    fn record(&mut self, change: Option<TagChange>) {
        if let Some(change) = change {
            self.status = Some(match change {
                TagChange::Added(tag) => format!("Added '{}'", tag),
                TagChange::Removed(tag) => format!("Removed '{}'", tag),
            });
        }
    }

    /// Render the application UI.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(6),    // Tag input
                Constraint::Length(1), // Status
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.tag_input.render(frame, chunks[1]);
        self.render_status(frame, chunks[2]);
        render_help(frame, chunks[3], TAG_INPUT_HINTS);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("tagbox")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        frame.render_widget(title, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let count = self.tags().len();
        let text = match &self.status {
            Some(status) => format!("{} · {} tag(s)", status, count),
            None => format!("{} tag(s)", count),
        };
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }

    /// Run the event loop until the user finishes or cancels.
    pub fn run(&mut self, session: &mut TerminalSession, events: &EventHandler) -> Result<()> {
        self.set_mouse_available(session.mouse_enabled());
        while !self.should_quit() {
            session
                .terminal()
                .draw(|frame| self.view(frame))
                .map_err(|e| AppError::terminal(format!("draw: {}", e)))?;
            let event = events.next()?;
            self.update(event);
        }
        Ok(())
    }
}
