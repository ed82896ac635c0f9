//! Map export (Lua tile table) and the JSON project document
//!
//! The document format matches what earlier versions of the tool saved:
//!
//! ```json
//! {
//!   "config": { "tw": 128, "th": 128, "displaySize": 32, "mapW": 32, "mapH": 24, ... },
//!   "tiles": [69, 69, 10, ...]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::{GridBuffer, GridError, MapConfig};

/// Row-major tile rows for code generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTable {
    pub width: u32,
    pub height: u32,
    pub rows: Vec<Vec<u32>>,
}

impl TileTable {
    pub fn from_grid(grid: &GridBuffer) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            rows: grid.rows().map(<[u32]>::to_vec).collect(),
        }
    }

    /// Render as a Lua table literal for the game runtime
    pub fn to_lua(&self) -> String {
        let mut code = String::from("local mapData = {\n");
        let _ = writeln!(code, "    w = {},", self.width);
        let _ = writeln!(code, "    h = {},", self.height);
        code.push_str("    tiles = {\n");
        for row in &self.rows {
            let line = row
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(code, "        {},", line);
        }
        code.push_str("    }\n}");
        code
    }
}

/// Saved project: map configuration plus the flat tile array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub config: MapConfig,
    pub tiles: Vec<u32>,
}

impl MapDocument {
    /// Build a document from the live grid
    pub fn from_grid(grid: &GridBuffer, config: &MapConfig) -> Self {
        Self {
            config: config.clone(),
            tiles: grid.tiles().to_vec(),
        }
    }

    /// Parse a document from JSON
    pub fn from_json(json: &str) -> Result<Self, GridError> {
        serde_json::from_str(json).map_err(|e| GridError::MalformedDocument(e.to_string()))
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, GridError> {
        serde_json::to_string_pretty(self).map_err(|e| GridError::MalformedDocument(e.to_string()))
    }

    /// Validate against the live configuration and build a grid
    ///
    /// The map size must match `expected`; nothing is modified on failure.
    pub fn to_grid(&self, expected: &MapConfig) -> Result<GridBuffer, GridError> {
        if self.config.dimensions() != expected.dimensions() {
            return Err(GridError::DimensionMismatch {
                expected: expected.dimensions(),
                found: self.config.dimensions(),
            });
        }
        GridBuffer::from_tiles(self.config.width, self.config.height, self.tiles.clone())
    }
}

/// Default file name for a saved project, stamped with the current time
pub fn default_project_file_name() -> String {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("map_project_{}.json", millis)
}
