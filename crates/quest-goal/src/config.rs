// config.rs — Where a project's quest state lives.
//
// `for_project()` lays everything out under `<root>/.quest/`. `load()`
// additionally reads `<root>/.quest/config.toml` when present; any key it
// leaves out keeps its default, and relative paths resolve against the
// project root.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::QuestError;

const QUEST_DIR: &str = ".quest";
const CONFIG_FILE: &str = "config.toml";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestConfig {
    /// Root directory of the project.
    pub project_root: PathBuf,

    /// JSON file holding the saved tracker.
    pub data_file: PathBuf,

    /// JSONL activity log.
    pub activity_log: PathBuf,

    /// Whether the CLI appends to the activity log.
    pub activity_log_enabled: bool,
}

/// On-disk shape of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    data_file: Option<PathBuf>,

    #[serde(default)]
    activity_log: Option<PathBuf>,

    #[serde(default = "default_activity_log_enabled")]
    activity_log_enabled: bool,
}

fn default_activity_log_enabled() -> bool {
    true
}

impl QuestConfig {
    /// Defaults under `<root>/.quest/`.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let quest_dir = root.join(QUEST_DIR);
        Self {
            project_root: root,
            data_file: quest_dir.join("tracker.json"),
            activity_log: quest_dir.join("activity.jsonl"),
            activity_log_enabled: default_activity_log_enabled(),
        }
    }

    /// Defaults overlaid with `<root>/.quest/config.toml`, if it exists.
    pub fn load(project_root: impl AsRef<Path>) -> Result<Self, QuestError> {
        let mut config = Self::for_project(project_root);
        let path = config.config_file();
        if !path.exists() {
            return Ok(config);
        }

        let content = std::fs::read_to_string(&path).map_err(|source| QuestError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| QuestError::ConfigError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        if let Some(data_file) = file.data_file {
            config.data_file = config.project_root.join(data_file);
        }
        if let Some(activity_log) = file.activity_log {
            config.activity_log = config.project_root.join(activity_log);
        }
        config.activity_log_enabled = file.activity_log_enabled;
        tracing::debug!(path = %path.display(), "loaded quest config");
        Ok(config)
    }

    /// Path of the optional TOML override file.
    pub fn config_file(&self) -> PathBuf {
        self.project_root.join(QUEST_DIR).join(CONFIG_FILE)
    }
}
