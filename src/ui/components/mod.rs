//! Reusable UI components.

mod autocomplete;
mod help_bar;
mod input;
mod tag_input;

pub use autocomplete::{
    KeyOutcome, NavKey, PointerRegions, Suggestion, TagChange, TagInputState,
};
pub use help_bar::{render_help, TAG_INPUT_HINTS};
pub use input::TextField;
pub use tag_input::{HitRegions, TagInput};
