//! Tag input component.
//!
//! Binds [`TagInputState`] to the terminal: renders the tag chips, the text
//! field and the dropdown, and routes key and mouse events back into the
//! state machine. The screen regions drawn in the last frame are kept so
//! mouse presses can be hit-tested.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use tracing::trace;

use super::autocomplete::{NavKey, PointerRegions, Suggestion, TagChange, TagInputState};
use super::input::TextField;
use crate::config::Settings;
use crate::events::KeyBindings;
use crate::ui::theme::Theme;

/// Close control drawn after each chip.
const CLOSE_LABEL: &str = " x ";

/// Screen regions drawn in the last frame.
#[derive(Debug, Clone, Default)]
pub struct HitRegions {
    /// The text field, borders included.
    field: Rect,
    /// The dropdown panel (list or not-found content), if drawn.
    dropdown: Option<Rect>,
    /// Visible dropdown rows and the suggestion each shows.
    items: Vec<(Rect, String)>,
    /// Visible chip close controls and the tag each removes.
    tag_closes: Vec<(Rect, String)>,
}

impl HitRegions {
    /// Where the close control of `tag` was drawn, if it was.
    pub fn tag_close(&self, tag: &str) -> Option<Rect> {
        self.tag_closes
            .iter()
            .find(|(_, name)| name == tag)
            .map(|(rect, _)| *rect)
    }

    fn item_at(&self, pos: Position) -> Option<&str> {
        self.items
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, name)| name.as_str())
    }

    fn close_at(&self, pos: Position) -> Option<&str> {
        self.tag_closes
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, tag)| tag.as_str())
    }
}

impl PointerRegions for HitRegions {
    type Target = Position;

    fn field_contains(&self, target: &Position) -> bool {
        self.field.contains(*target)
    }

    fn dropdown_contains(&self, target: &Position) -> bool {
        self.dropdown.is_some_and(|rect| rect.contains(*target))
    }
}

/// The tag input widget.
#[derive(Debug)]
pub struct TagInput {
    /// Widget state machine.
    state: TagInputState,
    /// Raw text editing.
    field: TextField,
    /// Navigation keys.
    bindings: KeyBindings,
    /// Resolved styles.
    theme: Theme,
    /// Field placeholder.
    placeholder: String,
    /// Shown when the open dropdown has no matches.
    not_found: String,
    /// Dropdown rows before scrolling.
    max_visible: u16,
    /// Scroll state of the dropdown list.
    list_state: ListState,
    /// Regions from the last render.
    regions: HitRegions,
}

impl TagInput {
    /// Create a tag input with default presentation.
    pub fn new(suggestions: Vec<Suggestion>, selected_tags: Vec<String>) -> Self {
        Self::with_settings(suggestions, selected_tags, &Settings::default())
    }

    /// Create a tag input using the presentation from `settings`.
    ///
    /// The candidate pool and initial tags are passed separately so the
    /// caller can merge command-line input with the configured ones.
    pub fn with_settings(
        suggestions: Vec<Suggestion>,
        selected_tags: Vec<String>,
        settings: &Settings,
    ) -> Self {
        Self {
            state: TagInputState::new(suggestions, selected_tags),
            field: TextField::new(),
            bindings: KeyBindings::new(settings.emacs_nav),
            theme: Theme::from_overrides(&settings.styles),
            placeholder: settings.placeholder_or_default().to_string(),
            not_found: settings.not_found_or_default().to_string(),
            max_visible: settings.max_visible_suggestions.max(1),
            list_state: ListState::default(),
            regions: HitRegions::default(),
        }
    }

    /// The underlying state machine.
    pub fn state(&self) -> &TagInputState {
        &self.state
    }

    /// The committed tags.
    pub fn tags(&self) -> &[String] {
        self.state.tags()
    }

    /// Regions from the last render.
    pub fn regions(&self) -> &HitRegions {
        &self.regions
    }

    /// Handle a key press.
    ///
    /// Navigation keys go to the state machine; everything else edits the
    /// field, and edits are reported as text changes.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<TagChange> {
        let nav = self.bindings.classify(&key);
        if nav != NavKey::Other {
            let (outcome, change) = self.state.on_key_down(nav);
            trace!(?nav, ?outcome, "Navigation key");
            self.sync_field();
            return change;
        }

        if self.field.handle_input(key) {
            self.state.on_text_changed(self.field.value());
        }
        None
    }

    /// Handle a mouse event.
    ///
    /// A left press first runs the outside-click rule, then reaches whatever
    /// it landed on: a dropdown row, a chip's close control, or the field.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<TagChange> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }

        let pos = Position::new(mouse.column, mouse.row);
        self.state.on_outside_pointer_down(&self.regions, &pos);

        let change = if let Some(name) = self.regions.item_at(pos).map(str::to_string) {
            self.state.commit_suggestion(&name)
        } else if let Some(tag) = self.regions.close_at(pos).map(str::to_string) {
            self.state.remove_tag(&tag)
        } else {
            if self.regions.field_contains(&pos) {
                self.state.on_focus_or_click();
            }
            None
        };
        self.sync_field();
        change
    }

    /// Keep the field in step after the state machine cleared its input.
    fn sync_field(&mut self) {
        if self.field.value() != self.state.input() {
            self.field.set_value(self.state.input());
        }
    }

    /// Render the widget and record its hit regions.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Tags ")
            .borders(Borders::ALL)
            .border_style(self.theme.wrapper);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Tag chips
                Constraint::Length(3), // Text field
                Constraint::Min(0),    // Dropdown
            ])
            .split(inner);

        self.regions = HitRegions::default();
        self.render_chips(frame, chunks[0]);

        self.field
            .render(frame, chunks[1], &self.placeholder, self.theme.input, true);
        self.regions.field = chunks[1];

        if self.state.is_dropdown_visible() {
            self.render_dropdown(frame, chunks[2]);
        }
    }

    /// Render committed tags as chips on a single row.
    fn render_chips(&mut self, frame: &mut Frame, area: Rect) {
        if self.state.tags().is_empty() {
            let empty = Paragraph::new("No tags").style(self.theme.muted);
            frame.render_widget(empty, area);
            return;
        }

        // Offsets stay in usize: a single tag can be wider than u16::MAX
        let available = area.width as usize;
        let mut used = 0usize;
        let mut spans: Vec<Span> = Vec::new();
        for tag in self.state.tags() {
            let label = Span::styled(format!(" {} ", tag), self.theme.tag);
            let close = Span::styled(CLOSE_LABEL, self.theme.tag_close);
            let label_width = label.width();
            let close_width = close.width();

            let chip_end = used
                .saturating_add(label_width)
                .saturating_add(close_width);
            if chip_end > available {
                spans.push(Span::styled("…", self.theme.muted));
                break;
            }

            // Fits within area.width, so the casts are lossless
            let close_x = area.x + (used + label_width) as u16;
            self.regions
                .tag_closes
                .push((Rect::new(close_x, area.y, close_width as u16, 1), tag.clone()));
            spans.push(label);
            spans.push(close);
            spans.push(Span::raw(" "));
            used = chip_end + 1;
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Render the dropdown list, or the not-found content when empty.
    fn render_dropdown(&mut self, frame: &mut Frame, area: Rect) {
        let filtered = self.state.filtered();
        let rows = if filtered.is_empty() {
            1
        } else {
            filtered.len().min(self.max_visible as usize) as u16
        };
        let height = rows.saturating_add(2).min(area.height);
        if height < 3 {
            return;
        }
        let panel = Rect::new(area.x, area.y, area.width, height);

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.dropdown);
        let inner = block.inner(panel);
        frame.render_widget(block, panel);
        self.regions.dropdown = Some(panel);

        if filtered.is_empty() {
            let content = Paragraph::new(self.not_found.as_str()).style(self.theme.muted);
            frame.render_widget(content, inner);
            return;
        }

        let items: Vec<ListItem> = filtered
            .iter()
            .map(|s| ListItem::new(s.name.as_str()))
            .collect();
        let list = List::new(items)
            .style(self.theme.dropdown)
            .highlight_style(self.theme.highlight)
            .highlight_symbol("> ");

        match self.state.cursor() {
            Some(idx) => self.list_state.select(Some(idx)),
            None => self.list_state = ListState::default(),
        }
        frame.render_stateful_widget(list, inner, &mut self.list_state);

        let offset = self.list_state.offset();
        self.regions.items = filtered
            .iter()
            .skip(offset)
            .take(inner.height as usize)
            .enumerate()
            .map(|(row, s)| {
                (
                    Rect::new(inner.x, inner.y + row as u16, inner.width, 1),
                    s.name.clone(),
                )
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn colors() -> TagInput {
        let pool = ["Red", "Blue", "White", "Black", "Magenta", "Yellow", "Green"]
            .iter()
            .map(|n| Suggestion::from(*n))
            .collect();
        TagInput::new(pool, vec!["Violet".to_string(), "Orange".to_string()])
    }

    fn draw(input: &mut TagInput) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                input.render(frame, area);
            })
            .unwrap();
        terminal
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut out = String::new();
        for row in buffer.content.chunks(width) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(input: &mut TagInput, text: &str) {
        for c in text.chars() {
            input.handle_key(press(KeyCode::Char(c)));
        }
    }

    fn click(pos: Position) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: pos.x,
            row: pos.y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn center(rect: Rect) -> Position {
        Position::new(rect.x + rect.width / 2, rect.y + rect.height / 2)
    }

    #[test]
    fn test_renders_placeholder_and_chips() {
        let mut input = colors();
        let terminal = draw(&mut input);
        let text = screen(&terminal);

        assert!(text.contains("Type and press enter to add"));
        assert!(text.contains(" Violet "));
        assert!(text.contains(" Orange "));
        assert!(!input.state().is_dropdown_visible());
        assert!(input.regions().dropdown.is_none());
    }

    #[test]
    fn test_typing_filters_and_opens() {
        let mut input = colors();
        type_str(&mut input, "bl");

        assert_eq!(input.state().input(), "bl");
        let names: Vec<&str> = input
            .state()
            .filtered()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Blue", "Black"]);

        let terminal = draw(&mut input);
        let text = screen(&terminal);
        assert!(text.contains("Blue"));
        assert!(text.contains("Black"));
        assert_eq!(input.regions().items.len(), 2);
    }

    #[test]
    fn test_keyboard_commit_clears_field() {
        let mut input = colors();
        type_str(&mut input, "r");
        input.handle_key(press(KeyCode::Down));

        let change = input.handle_key(press(KeyCode::Enter));

        assert_eq!(change, Some(TagChange::Added("Red".to_string())));
        assert_eq!(input.field.value(), "");
        assert!(!input.state().is_dropdown_visible());
    }

    #[test]
    fn test_free_text_commit() {
        let mut input = colors();
        type_str(&mut input, "Custom");

        let change = input.handle_key(press(KeyCode::Enter));

        assert_eq!(change, Some(TagChange::Added("Custom".to_string())));
        assert_eq!(input.field.value(), "");
        assert!(input.tags().contains(&"Custom".to_string()));
    }

    #[test]
    fn test_not_found_content() {
        let mut input = colors();
        draw(&mut input);
        input.handle_mouse(click(center(input.regions().field)));
        type_str(&mut input, "vio");

        assert!(input.state().is_not_found_visible());
        let terminal = draw(&mut input);
        assert!(screen(&terminal).contains("Suggestions not found"));
        assert!(input.regions().items.is_empty());
        assert!(input.regions().dropdown.is_some());
    }

    #[test]
    fn test_click_field_opens_dropdown() {
        let mut input = colors();
        draw(&mut input);

        input.handle_mouse(click(center(input.regions().field)));

        assert!(input.state().is_dropdown_visible());
    }

    #[test]
    fn test_click_item_commits() {
        let mut input = colors();
        draw(&mut input);
        input.handle_mouse(click(center(input.regions().field)));
        draw(&mut input);

        let (rect, name) = input.regions().items[1].clone();
        assert_eq!(name, "Blue");
        let change = input.handle_mouse(click(center(rect)));

        assert_eq!(change, Some(TagChange::Added("Blue".to_string())));
        assert!(!input.state().is_dropdown_visible());
    }

    #[test]
    fn test_click_outside_closes() {
        let mut input = colors();
        type_str(&mut input, "e");
        draw(&mut input);
        assert!(input.state().is_dropdown_visible());

        input.handle_mouse(click(Position::new(59, 19)));

        assert!(!input.state().is_dropdown_visible());
        assert_eq!(input.state().input(), "e");
    }

    #[test]
    fn test_click_close_removes_tag() {
        let mut input = colors();
        draw(&mut input);

        let (rect, tag) = input.regions().tag_closes[0].clone();
        assert_eq!(tag, "Violet");
        let change = input.handle_mouse(click(center(rect)));

        assert_eq!(change, Some(TagChange::Removed("Violet".to_string())));
        assert_eq!(input.tags(), &["Orange".to_string()]);
    }

    #[test]
    fn test_removed_tag_reappears_in_dropdown() {
        let pool = vec![Suggestion::from("Red"), Suggestion::from("Blue")];
        let mut input = TagInput::new(pool, vec!["Red".to_string()]);
        draw(&mut input);

        let (rect, _) = input.regions().tag_closes[0].clone();
        input.handle_mouse(click(center(rect)));
        input.handle_mouse(click(center(input.regions().field)));
        draw(&mut input);

        let names: Vec<&str> = input.regions().items.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, vec!["Red", "Blue"]);
    }

    #[test]
    fn test_dropdown_scrolls_to_cursor() {
        let pool = (0..20).map(|i| Suggestion::new(format!("item{:02}", i))).collect();
        let settings = Settings {
            max_visible_suggestions: 3,
            ..Settings::default()
        };
        let mut input = TagInput::with_settings(pool, vec![], &settings);
        for _ in 0..5 {
            input.handle_key(press(KeyCode::Down));
        }
        assert_eq!(input.state().cursor(), Some(4));

        draw(&mut input);

        let names: Vec<&str> = input.regions().items.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"item04"));
    }

    #[test]
    fn test_dropdown_drawn_for_huge_pool() {
        for size in [u16::MAX as usize + 1, u16::MAX as usize + 2] {
            let pool = (0..size).map(|i| Suggestion::new(format!("s{}", i))).collect();
            let mut input = TagInput::new(pool, vec![]);
            draw(&mut input);
            input.handle_mouse(click(center(input.regions().field)));
            assert!(input.state().is_dropdown_visible());

            draw(&mut input);

            let panel = input.regions().dropdown.expect("dropdown drawn");
            assert_eq!(input.regions().items.len(), 8);
            input.handle_mouse(click(Position::new(panel.x, panel.y)));
            assert!(input.state().is_dropdown_visible());
        }
    }

    #[test]
    fn test_chip_wider_than_u16_renders() {
        let wide = "a".repeat(u16::MAX as usize - 2);
        let mut input = TagInput::new(vec![], vec!["Red".to_string(), wide]);

        let terminal = draw(&mut input);

        assert!(screen(&terminal).contains(" Red "));
        assert!(screen(&terminal).contains('…'));
        assert_eq!(input.regions().tag_closes.len(), 1);
        let close = input.regions().tag_close("Red").unwrap();
        assert_eq!(close.x, 1 + " Red ".len() as u16);
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        let mut input = colors();
        draw(&mut input);
        let mut event = click(center(input.regions().field));
        event.kind = MouseEventKind::Moved;

        assert_eq!(input.handle_mouse(event), None);
        assert!(!input.state().is_dropdown_visible());
    }
}
