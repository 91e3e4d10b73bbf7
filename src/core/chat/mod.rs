//! Character chat domain: messages, modes, and the rules the panel renders by.

pub mod analytics;
pub mod i18n;
pub mod message;
pub mod modes;
pub mod player_input;
pub mod rows;

pub use analytics::{notify, Analytics, AnalyticsError, AnalyticsEvent};
pub use i18n::{tr, Catalog, Translator};
pub use message::{Character, Message, MessageId, MessageRole};
pub use modes::{ModeState, ModeToggle, Perspective};
pub use rows::{build_rows, ListView, Row};
