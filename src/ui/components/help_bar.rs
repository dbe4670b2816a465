//! Key hint line.
//!
//! Displays the tag input's keyboard shortcuts at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Hints shown below the tag input. Keys are written in brackets.
pub const TAG_INPUT_HINTS: &str =
    "[↑/↓] select  [Enter] add  [click x] remove  [Esc] done  [Ctrl+C] cancel";

/// Render a single line of key hints.
pub fn render_help(frame: &mut Frame, area: Rect, hints: &str) {
    let line = Line::from(hint_spans(hints));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into spans, styling bracketed keys apart from the
/// descriptions around them.
fn hint_spans(hints: &str) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Cyan);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    let mut rest = hints;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_spans_simple() {
        let spans = hint_spans("[Enter] add");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "[Enter]");
        assert_eq!(spans[1].content, " add");
    }

    #[test]
    fn test_hint_spans_tag_input() {
        // Five keys, each followed by a description
        assert_eq!(hint_spans(TAG_INPUT_HINTS).len(), 10);
    }

    #[test]
    fn test_hint_spans_empty() {
        assert!(hint_spans("").is_empty());
    }

    #[test]
    fn test_hint_spans_unclosed_bracket() {
        let spans = hint_spans("[Esc");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "[Esc");
    }
}
