//! User interface.
//!
//! The tag input state machine lives in `components::autocomplete`; the rest
//! of this module draws it to the terminal.

mod components;
pub mod theme;

pub use components::{
    render_help, HitRegions, KeyOutcome, NavKey, PointerRegions, Suggestion, TagChange,
    TagInput, TagInputState, TextField, TAG_INPUT_HINTS,
};
pub use theme::Theme;
