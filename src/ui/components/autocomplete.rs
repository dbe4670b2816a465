//! Tag input state machine.
//!
//! Owns everything the tag input widget knows about: the candidate pool, the
//! committed tags, the live input text, the filtered suggestion list, the
//! keyboard cursor and whether the dropdown is open. Every public operation is
//! a complete transition; derived state (the filtered list and the cursor) is
//! recomputed in one place at the end of any transition that touches the
//! input text or the tag collection.
//!
//! Nothing here knows about terminals. The rendering surface reads the state
//! through the accessors and feeds events back through the `on_*` methods.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A candidate entry offered in the dropdown.
///
/// Identity is the (case-sensitive) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    /// Display name, also the value committed as a tag.
    pub name: String,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Suggestion {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Suggestion {
    fn from(name: String) -> Self {
        Self { name }
    }
}

/// Navigational meaning of a key press.
///
/// The rendering surface decides which physical keys map to which variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Move the cursor up one suggestion.
    Previous,
    /// Move the cursor down one suggestion.
    Next,
    /// Commit the highlighted suggestion or the typed text.
    Commit,
    /// Anything else. Character input goes through `on_text_changed`.
    Other,
}

/// Whether a key press was consumed by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was consumed; the field's default handling must be suppressed.
    Handled,
    /// The key did nothing here.
    Ignored,
}

/// A change to the tag collection, reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagChange {
    /// A tag was appended.
    Added(String),
    /// A tag was removed.
    Removed(String),
}

/// Containment test for pointer events, supplied by the rendering surface.
///
/// The state machine only knows the decision rule for outside clicks; where
/// the text field and the dropdown actually are is the surface's business.
pub trait PointerRegions {
    /// Whatever a pointer event targets (a cell position, a node id, ...).
    type Target;

    /// Whether the target lies inside the text field.
    fn field_contains(&self, target: &Self::Target) -> bool;

    /// Whether the target lies inside the dropdown panel.
    fn dropdown_contains(&self, target: &Self::Target) -> bool;
}

/// The consolidated widget state.
#[derive(Debug, Clone)]
pub struct TagInputState {
    /// Read-only candidate pool.
    candidates: Vec<Suggestion>,
    /// Committed tags, unique, in insertion order.
    tags: Vec<String>,
    /// Live, uncommitted field text.
    input: String,
    /// Candidates matching the input that are not yet tags.
    filtered: Vec<Suggestion>,
    /// Keyboard cursor into `filtered`.
    cursor: Option<usize>,
    /// Whether the dropdown (or the not-found panel) is shown.
    dropdown_visible: bool,
}

impl TagInputState {
    /// Create a new state from a candidate pool and the initial tags.
    ///
    /// Duplicate initial tags are dropped, keeping the first occurrence.
    pub fn new(candidates: Vec<Suggestion>, selected_tags: Vec<String>) -> Self {
        let mut tags: Vec<String> = Vec::with_capacity(selected_tags.len());
        for tag in selected_tags {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        let mut state = Self {
            candidates,
            tags,
            input: String::new(),
            filtered: Vec::new(),
            cursor: None,
            dropdown_visible: false,
        };
        state.recompute();
        state
    }

    /// The full candidate pool.
    pub fn candidates(&self) -> &[Suggestion] {
        &self.candidates
    }

    /// The committed tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The live input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The suggestions currently eligible for selection.
    pub fn filtered(&self) -> &[Suggestion] {
        &self.filtered
    }

    /// The keyboard cursor, `None` when nothing is highlighted.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The suggestion under the cursor.
    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.cursor.and_then(|idx| self.filtered.get(idx))
    }

    /// Whether the dropdown panel is open.
    pub fn is_dropdown_visible(&self) -> bool {
        self.dropdown_visible
    }

    /// Whether the open panel should show the "not found" content.
    pub fn is_not_found_visible(&self) -> bool {
        self.dropdown_visible && self.filtered.is_empty()
    }

    /// Check whether a tag is already committed.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag == name)
    }

    /// The field text changed.
    ///
    /// Opens the dropdown only when there is something to show; an already
    /// open dropdown stays open and falls back to the not-found content.
    pub fn on_text_changed(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.recompute();
        if !self.filtered.is_empty() {
            self.dropdown_visible = true;
        }
        trace!(input = %self.input, matches = self.filtered.len(), "Input changed");
    }

    /// The field was focused or clicked.
    pub fn on_focus_or_click(&mut self) {
        self.dropdown_visible = true;
    }

    /// Handle a navigational key.
    ///
    /// Navigation never wraps; out of range moves are ignored.
    pub fn on_key_down(&mut self, key: NavKey) -> (KeyOutcome, Option<TagChange>) {
        match key {
            NavKey::Next => {
                let next = self.cursor.map_or(0, |idx| idx + 1);
                if next < self.filtered.len() {
                    self.cursor = Some(next);
                    self.dropdown_visible = true;
                    (KeyOutcome::Handled, None)
                } else {
                    (KeyOutcome::Ignored, None)
                }
            }
            NavKey::Previous => match self.cursor {
                Some(idx) if idx > 0 => {
                    self.cursor = Some(idx - 1);
                    self.dropdown_visible = true;
                    (KeyOutcome::Handled, None)
                }
                _ => (KeyOutcome::Ignored, None),
            },
            NavKey::Commit => {
                if let Some(name) = self.highlighted().map(|s| s.name.clone()) {
                    let change = self.commit_suggestion(&name);
                    self.cursor = None;
                    (KeyOutcome::Handled, change)
                } else {
                    (KeyOutcome::Ignored, self.commit_input())
                }
            }
            NavKey::Other => (KeyOutcome::Ignored, None),
        }
    }

    /// Commit a suggestion as a tag.
    ///
    /// Used for both keyboard commit and pointer clicks on a dropdown item.
    /// A name that is already a tag is not appended twice.
    pub fn commit_suggestion(&mut self, name: &str) -> Option<TagChange> {
        let change = if self.has_tag(name) {
            None
        } else {
            self.tags.push(name.to_string());
            debug!(tag = %name, "Committed suggestion");
            Some(TagChange::Added(name.to_string()))
        };
        self.dropdown_visible = false;
        self.input.clear();
        self.recompute();
        change
    }

    /// Remove a tag. Unknown names are ignored.
    pub fn remove_tag(&mut self, name: &str) -> Option<TagChange> {
        let idx = self.tags.iter().position(|tag| tag == name)?;
        let removed = self.tags.remove(idx);
        debug!(tag = %removed, "Removed tag");
        self.recompute();
        Some(TagChange::Removed(removed))
    }

    /// A pointer went down somewhere in the interface.
    ///
    /// Closes the dropdown when the target is outside both the field and the
    /// dropdown. Returns whether it closed.
    pub fn on_outside_pointer_down<R: PointerRegions>(
        &mut self,
        regions: &R,
        target: &R::Target,
    ) -> bool {
        if self.dropdown_visible
            && !regions.field_contains(target)
            && !regions.dropdown_contains(target)
        {
            self.dropdown_visible = false;
            self.cursor = None;
            trace!("Dropdown closed by outside pointer");
            true
        } else {
            false
        }
    }

    /// Enter with nothing highlighted: commit the typed text verbatim.
    fn commit_input(&mut self) -> Option<TagChange> {
        if self.input.is_empty() || self.has_tag(&self.input) {
            return None;
        }
        let tag = std::mem::take(&mut self.input);
        debug!(tag = %tag, "Committed free text");
        self.tags.push(tag.clone());
        self.recompute();
        Some(TagChange::Added(tag))
    }

    /// Rebuild the filtered view and reset the cursor.
    fn recompute(&mut self) {
        let query = self.input.to_lowercase();
        self.filtered = self
            .candidates
            .iter()
            .filter(|s| query.is_empty() || s.name.to_lowercase().contains(&query))
            .filter(|s| !self.tags.contains(&s.name))
            .cloned()
            .collect();
        self.cursor = None;
    }
}
