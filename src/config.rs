use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::chat::Character;
use crate::error::{Error, Result};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub panel: PanelConfig,
    pub character: CharacterConfig,
    pub logging: LoggingConfig,
    pub data: DataConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Enable mouse support in the terminal.
    pub mouse_enabled: bool,
}

/// Chat panel behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Delay before scrolling to the newest message after the list changes.
    pub autoscroll_delay_ms: u64,
    /// Locale of the built-in string catalog ("en", "zh").
    pub locale: String,
    /// Pause between chunks of the scripted narrator reply.
    pub narrator_chunk_ms: u64,
    /// Suggested inputs offered before the first reply.
    pub suggestions: Vec<String>,
}

/// The character shown in the panel header and reply rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub id: String,
    pub name: String,
    pub personality: Option<String>,
    pub avatar_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
    /// Rolled log files to keep.
    pub keep_files: usize,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 50,
            mouse_enabled: false,
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            autoscroll_delay_ms: 300,
            locale: "en".to_string(),
            narrator_chunk_ms: 40,
            suggestions: vec![
                "Look around the tavern".to_string(),
                "Ask about the missing caravan".to_string(),
                "Order a drink".to_string(),
            ],
        }
    }
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            id: "elowen".to_string(),
            name: "Elowen".to_string(),
            personality: Some("A wry half-elf innkeeper who hears every rumor first.".to_string()),
            avatar_path: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            keep_files: 7,
        }
    }
}

impl CharacterConfig {
    pub fn to_character(&self) -> Character {
        Character {
            id: self.id.clone(),
            name: self.name.clone(),
            personality: self.personality.clone(),
            avatar_path: self.avatar_path.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/character-chat/config.toml`.
    ///
    /// Runs before logging is up, so a read or parse failure is handed back
    /// next to the defaults for the caller to report.
    pub fn load() -> (Self, Option<Error>) {
        Self::load_or_default(&Self::config_path())
    }

    /// Like [`load_from`](Self::load_from), but falls back to defaults.
    pub fn load_or_default(path: &Path) -> (Self, Option<Error>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load from an explicit path. A missing file yields defaults; a file
    /// that cannot be read or parsed is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&contents).map_err(|e| Error::config(path, e.to_string()))
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("character-chat"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tui.tick_rate_ms.max(1))
    }

    pub fn autoscroll_delay(&self) -> Duration {
        Duration::from_millis(self.panel.autoscroll_delay_ms)
    }

    pub fn narrator_chunk_delay(&self) -> Duration {
        Duration::from_millis(self.panel.narrator_chunk_ms)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("character-chat").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
