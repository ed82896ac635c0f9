//! Project management for the tile painter
//!
//! The `Project` resource pairs the live editing session with the file it
//! was opened from or last saved to.

mod file;

pub use file::*;

use bevy::prelude::Resource;
use std::path::PathBuf;
use tilepaint_core::{Command, EditorSession, GridError, MapConfig};

/// The open map and its backing file
#[derive(Debug, Clone, Resource)]
pub struct Project {
    pub session: EditorSession,
    pub path: Option<PathBuf>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl Project {
    /// Create an unsaved project with a blank map
    pub fn new(config: MapConfig) -> Self {
        Self {
            session: EditorSession::new(config),
            path: None,
        }
    }

    pub fn with_session(session: EditorSession) -> Self {
        Self {
            session,
            path: None,
        }
    }

    /// Forward a command to the session
    pub fn apply(&mut self, command: Command) -> Result<(), GridError> {
        self.session.apply(command)
    }

    /// Forward a command from the UI, logging a rejection instead of returning it
    pub fn send(&mut self, command: Command) -> bool {
        match self.session.apply(command) {
            Ok(()) => true,
            Err(e) => {
                bevy::log::warn!("Command rejected: {}", e);
                false
            }
        }
    }

    /// Check if the map has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    /// Get project name (from path, or "Untitled")
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_stem())
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Clear the map back to empty tiles and detach it from its file
    pub fn new_map(&mut self) {
        self.session.new_map();
        self.path = None;
    }
}
