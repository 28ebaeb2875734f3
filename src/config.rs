use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuestError, QuestResult};

/// Opacity applied to every component after a reload.
pub const DEFAULT_FADE_ALPHA: f32 = 0.2;

/// Editor settings, read from an optional TOML file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Written into the `; Saved by version:` header of every file.
    pub version: String,
    pub fade_alpha: f32,
    /// Drop localization keys no quest file references when saving.
    pub prune_unused_text: bool,
    /// Keep a `.bak` copy of every file a save replaces.
    pub keep_backups: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            fade_alpha: DEFAULT_FADE_ALPHA,
            prune_unused_text: false,
            keep_backups: false,
        }
    }
}

impl EditorConfig {
    pub fn from_toml_str(content: &str) -> QuestResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> QuestResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|err| QuestError::io(path, err))?;
        Self::from_toml_str(&content)
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}
