//! User preferences persisted between editor sessions

mod file;

pub use file::PreferencesError;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum number of entries kept in the recent projects list
pub const MAX_RECENT_PROJECTS: usize = 10;

/// A project file opened or saved recently
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentProject {
    pub path: String,
    pub name: String,
}

/// Editor preferences
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Most recent first
    pub recent_projects: Vec<RecentProject>,
    pub show_grid: bool,
    /// Reopen the most recent project on startup
    pub auto_open_last_project: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            recent_projects: Vec::new(),
            show_grid: true,
            auto_open_last_project: false,
        }
    }
}

impl EditorPreferences {
    /// Move a project to the front of the recent list, adding it if missing
    pub fn add_recent_project(&mut self, path: impl AsRef<Path>, name: impl Into<String>) {
        let path = path.as_ref().to_string_lossy().to_string();
        self.recent_projects.retain(|p| p.path != path);
        self.recent_projects.insert(
            0,
            RecentProject {
                path,
                name: name.into(),
            },
        );
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }

    pub fn remove_recent_project(&mut self, path: &str) {
        self.recent_projects.retain(|p| p.path != path);
    }

    pub fn clear_recent_projects(&mut self) {
        self.recent_projects.clear();
    }

    /// The most recently used project, if any
    pub fn last_project(&self) -> Option<&RecentProject> {
        self.recent_projects.first()
    }
}
