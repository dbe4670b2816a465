//! Tag input settings.

use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Fallback text-field prompt.
pub const DEFAULT_PLACEHOLDER: &str = "Type and press enter to add";

/// Fallback content for an open dropdown with no matches.
pub const DEFAULT_NOT_FOUND: &str = "Suggestions not found";

/// Settings for the tag input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Candidate pool, in display order.
    pub suggestions: Vec<String>,
    /// Tags present when the widget starts.
    pub selected_tags: Vec<String>,
    /// Text-field placeholder.
    pub placeholder: Option<String>,
    /// Content shown when nothing matches.
    pub not_found_content: Option<String>,
    /// Maximum dropdown rows before it scrolls.
    pub max_visible_suggestions: u16,
    /// Whether Ctrl+P/Ctrl+N navigate suggestions.
    pub emacs_nav: bool,
    /// Presentational style overrides.
    pub styles: StyleOverrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            suggestions: Vec::new(),
            selected_tags: Vec::new(),
            placeholder: None,
            not_found_content: None,
            max_visible_suggestions: 8,
            emacs_nav: true,
            styles: StyleOverrides::default(),
        }
    }
}

impl Settings {
    /// The placeholder, or the built-in prompt.
    pub fn placeholder_or_default(&self) -> &str {
        self.placeholder.as_deref().unwrap_or(DEFAULT_PLACEHOLDER)
    }

    /// The not-found content, or the built-in message.
    pub fn not_found_or_default(&self) -> &str {
        self.not_found_content.as_deref().unwrap_or(DEFAULT_NOT_FOUND)
    }

    /// Validate these settings.
    ///
    /// Suggestion names must be non-empty and unique, since a suggestion is
    /// identified by its name.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        for (i, name) in self.suggestions.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "suggestion #{} is empty",
                    i + 1
                )));
            }
            if self.suggestions[..i].contains(name) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate suggestion '{}'",
                    name
                )));
            }
        }

        if self.max_visible_suggestions == 0 {
            return Err(ConfigError::ValidationError(
                "max_visible_suggestions must be at least 1".to_string(),
            ));
        }

        self.styles.validate()
    }
}

/// Style overrides for each part of the widget.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StyleOverrides {
    /// The outer wrapper block.
    pub wrapper: StyleSpec,
    /// The dropdown panel.
    pub dropdown: StyleSpec,
    /// The text field.
    pub input: StyleSpec,
    /// Each tag chip.
    pub tag: StyleSpec,
}

impl StyleOverrides {
    fn validate(&self) -> Result<()> {
        for (part, spec) in [
            ("wrapper", &self.wrapper),
            ("dropdown", &self.dropdown),
            ("input", &self.input),
            ("tag", &self.tag),
        ] {
            for color in [&spec.fg, &spec.bg].into_iter().flatten() {
                if Color::from_str(color).is_err() {
                    return Err(ConfigError::ValidationError(format!(
                        "styles.{}: unknown color '{}'",
                        part, color
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A single style override. Colors use ratatui's names (`"blue"`,
/// `"#ff8800"`, `"42"`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StyleSpec {
    /// Foreground color.
    pub fg: Option<String>,
    /// Background color.
    pub bg: Option<String>,
    /// Bold text.
    pub bold: bool,
}

impl StyleSpec {
    /// Check whether this spec overrides anything.
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && !self.bold
    }
}
