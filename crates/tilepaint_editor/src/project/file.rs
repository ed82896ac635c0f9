//! Project file save/load operations

use super::Project;
use std::path::Path;
use tilepaint_core::{GridError, MapDocument};

#[derive(Debug)]
pub enum ProjectError {
    IoError(String),
    /// The file was read but its contents were rejected
    Document(GridError),
    NoPath,
}

impl std::fmt::Display for ProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectError::IoError(e) => write!(f, "IO error: {}", e),
            ProjectError::Document(e) => write!(f, "{}", e),
            ProjectError::NoPath => write!(f, "No file path set"),
        }
    }
}

impl std::error::Error for ProjectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectError::Document(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ProjectError {
    fn from(e: GridError) -> Self {
        ProjectError::Document(e)
    }
}

/// Read and parse a project document
pub fn read_document(path: &Path) -> Result<MapDocument, ProjectError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ProjectError::IoError(e.to_string()))?;
    Ok(MapDocument::from_json(&content)?)
}

/// Write a project document as pretty JSON
pub fn write_document(path: &Path, document: &MapDocument) -> Result<(), ProjectError> {
    let content = document.to_json_pretty()?;
    std::fs::write(path, content).map_err(|e| ProjectError::IoError(e.to_string()))
}

/// Write exported map code to a file
pub fn write_export(path: &Path, code: &str) -> Result<(), ProjectError> {
    std::fs::write(path, code).map_err(|e| ProjectError::IoError(e.to_string()))
}

impl Project {
    /// Load a project file into the live session
    ///
    /// The session is only replaced once the document has been read and
    /// validated against the current map size.
    pub fn open(&mut self, path: &Path) -> Result<(), ProjectError> {
        let document = read_document(path)?;
        self.session.load(&document)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Save project to file
    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        write_document(path, &self.session.document())?;
        self.path = Some(path.to_path_buf());
        self.session.mark_saved();
        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), ProjectError> {
        if let Some(path) = self.path.clone() {
            self.save(&path)
        } else {
            Err(ProjectError::NoPath)
        }
    }
}
