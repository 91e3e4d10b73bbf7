//! Terminal front end: the chat panel, its widgets, and the event loop
//! that owns the conversation.

pub mod app;
pub mod autoscroll;
pub mod events;
pub mod layout;
pub mod narrator;
pub mod theme;
pub mod views;
pub mod widgets;
