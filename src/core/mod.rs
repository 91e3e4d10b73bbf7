pub mod chat;
pub mod logging;
