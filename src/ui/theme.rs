//! Theme and styling configuration.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use tracing::warn;

use crate::config::{StyleOverrides, StyleSpec};

/// Resolved styles for the tag input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// The outer wrapper block.
    pub wrapper: Style,
    /// The dropdown panel.
    pub dropdown: Style,
    /// The text field.
    pub input: Style,
    /// Tag chips.
    pub tag: Style,
    /// The close control on a chip.
    pub tag_close: Style,
    /// The highlighted dropdown row.
    pub highlight: Style,
    /// The not-found content.
    pub muted: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            wrapper: Style::default().fg(Color::Cyan),
            dropdown: Style::default().fg(Color::White),
            input: Style::default().fg(Color::White),
            tag: Style::default().fg(Color::White).bg(Color::Blue),
            tag_close: Style::default().fg(Color::LightRed).bg(Color::Blue),
            highlight: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Build a theme from configured overrides on top of the defaults.
    pub fn from_overrides(overrides: &StyleOverrides) -> Self {
        let base = Self::default();
        let tag = apply(base.tag, &overrides.tag);
        Self {
            wrapper: apply(base.wrapper, &overrides.wrapper),
            dropdown: apply(base.dropdown, &overrides.dropdown),
            input: apply(base.input, &overrides.input),
            // Close control follows the chip background
            tag_close: match tag.bg {
                Some(bg) => base.tag_close.bg(bg),
                None => base.tag_close,
            },
            tag,
            ..base
        }
    }
}

/// Layer a spec onto a style. Unparseable colors are skipped.
fn apply(style: Style, spec: &StyleSpec) -> Style {
    if spec.is_empty() {
        return style;
    }
    let mut style = style;
    if let Some(fg) = spec.fg.as_deref().and_then(parse_color) {
        style = style.fg(fg);
    }
    if let Some(bg) = spec.bg.as_deref().and_then(parse_color) {
        style = style.bg(bg);
    }
    if spec.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

fn parse_color(name: &str) -> Option<Color> {
    match Color::from_str(name) {
        Ok(color) => Some(color),
        Err(_) => {
            warn!(color = %name, "Ignoring unknown color");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_are_default() {
        assert_eq!(Theme::from_overrides(&StyleOverrides::default()), Theme::default());
    }

    #[test]
    fn test_bold_only_override_applies() {
        let mut overrides = StyleOverrides::default();
        overrides.input.bold = true;
        let theme = Theme::from_overrides(&overrides);
        assert_eq!(
            theme.input,
            Theme::default().input.add_modifier(Modifier::BOLD)
        );
        assert_eq!(theme.wrapper, Theme::default().wrapper);
    }

    #[test]
    fn test_tag_override() {
        let mut overrides = StyleOverrides::default();
        overrides.tag = StyleSpec {
            fg: Some("black".to_string()),
            bg: Some("yellow".to_string()),
            bold: true,
        };

        let theme = Theme::from_overrides(&overrides);

        assert_eq!(theme.tag.fg, Some(Color::Black));
        assert_eq!(theme.tag.bg, Some(Color::Yellow));
        assert!(theme.tag.add_modifier.contains(Modifier::BOLD));
        assert_eq!(theme.tag_close.bg, Some(Color::Yellow));
    }

    #[test]
    fn test_unknown_color_is_skipped() {
        let mut overrides = StyleOverrides::default();
        overrides.input.fg = Some("not-a-color".to_string());

        let theme = Theme::from_overrides(&overrides);

        assert_eq!(theme.input, Theme::default().input);
    }
}
