//! Reusable rendering and editing helpers.

pub mod draft_input;
pub mod rich_text;
pub mod wrap;
