//! Error types for the character chat binary and its configuration layer.
//!
//! The panel itself has no failure states; these cover the terminal and
//! file system work around it.

use std::path::PathBuf;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file that exists but cannot be used.
    #[error("Configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Terminal setup or teardown failed.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl Error {
    /// Create a configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Error::Terminal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_mentions_path() {
        let e = Error::config("/etc/cc.toml", "bad value");
        let msg = e.to_string();
        assert!(msg.contains("/etc/cc.toml"));
        assert!(msg.contains("bad value"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
    }
}
