//! Authoring-assistance modes toggled from the chat panel.
//!
//! The panel never mutates a [`ModeState`]; it computes the successor of the
//! snapshot it was given and hands that back to the owner.

use serde::{Deserialize, Serialize};

/// Narrative perspective requested from the narrator.
///
/// Cycles `Off -> Novel -> Protagonist -> Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "PerspectiveRecord", into = "PerspectiveRecord")]
pub enum Perspective {
    #[default]
    Off,
    Novel,
    Protagonist,
}

impl Perspective {
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::Novel,
            Self::Novel => Self::Protagonist,
            Self::Protagonist => Self::Off,
        }
    }

    pub fn is_active(self) -> bool {
        self != Self::Off
    }
}

/// Record shape `{ active, mode }` used by owners that predate the enum.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PerspectiveRecord {
    active: bool,
    #[serde(default)]
    mode: Option<String>,
}

impl From<PerspectiveRecord> for Perspective {
    fn from(record: PerspectiveRecord) -> Self {
        match (record.active, record.mode.as_deref()) {
            (false, _) => Self::Off,
            (true, Some("novel")) => Self::Novel,
            (true, _) => Self::Protagonist,
        }
    }
}

impl From<Perspective> for PerspectiveRecord {
    fn from(perspective: Perspective) -> Self {
        let (active, mode) = match perspective {
            Perspective::Off => (false, "novel"),
            Perspective::Novel => (true, "novel"),
            Perspective::Protagonist => (true, "protagonist"),
        };
        Self {
            active,
            mode: Some(mode.to_string()),
        }
    }
}

/// Current state of every mode button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeState {
    #[serde(rename = "story-progress", default)]
    pub story_progress: bool,
    #[serde(default)]
    pub perspective: Perspective,
    #[serde(rename = "scene-setting", default)]
    pub scene_setting: bool,
}

impl ModeState {
    /// State after pressing `toggle` once.
    #[must_use]
    pub fn toggled(self, toggle: ModeToggle) -> Self {
        match toggle {
            ModeToggle::StoryProgress => Self {
                story_progress: !self.story_progress,
                ..self
            },
            ModeToggle::Perspective => Self {
                perspective: self.perspective.next(),
                ..self
            },
            ModeToggle::SceneSetting => Self {
                scene_setting: !self.scene_setting,
                ..self
            },
        }
    }

    pub fn is_active(&self, toggle: ModeToggle) -> bool {
        match toggle {
            ModeToggle::StoryProgress => self.story_progress,
            ModeToggle::Perspective => self.perspective.is_active(),
            ModeToggle::SceneSetting => self.scene_setting,
        }
    }
}

/// The three mode buttons, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeToggle {
    StoryProgress,
    Perspective,
    SceneSetting,
}

impl ModeToggle {
    pub const ALL: [ModeToggle; 3] = [
        ModeToggle::StoryProgress,
        ModeToggle::Perspective,
        ModeToggle::SceneSetting,
    ];

    /// Name reported to analytics when the button is pressed.
    pub fn analytics_name(self) -> &'static str {
        match self {
            Self::StoryProgress => "toggle_story_progress",
            Self::Perspective => "toggle_perspective",
            Self::SceneSetting => "toggle_scene_setting",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::StoryProgress => 0,
            Self::Perspective => 1,
            Self::SceneSetting => 2,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx % Self::ALL.len()]
    }
}
