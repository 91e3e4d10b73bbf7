/// Character Chat - roleplay conversation panel for the terminal
///
/// Message list rendering, mode toggles, draft input and debounced
/// autoscroll for chatting with a single character.

pub mod config;
pub mod core;
pub mod error;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
