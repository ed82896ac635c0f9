//! Map configuration stored alongside the tiles in project files

use crate::PaletteLayout;
use serde::{Deserialize, Serialize};

/// Tile id used by the eraser and for blank maps
pub const DEFAULT_EMPTY_TILE: u32 = 69;

/// Map and tileset configuration
///
/// Field names are serialized with the keys used by existing project files
/// (`tw`, `th`, `displaySize`, `mapW`, `mapH`, `tilesetPath`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Width of one tile on the tileset sheet, in pixels
    pub tw: u32,
    /// Height of one tile on the tileset sheet, in pixels
    pub th: u32,
    /// Size of one tile in world space, in pixels
    #[serde(rename = "displaySize")]
    pub display_size: u32,
    /// Map width in tiles
    #[serde(rename = "mapW")]
    pub width: u32,
    /// Map height in tiles
    #[serde(rename = "mapH")]
    pub height: u32,
    /// Tileset image path, relative to the assets directory
    #[serde(rename = "tilesetPath")]
    pub tileset_path: String,
    /// Background tile written by the eraser
    #[serde(rename = "emptyTile", default = "default_empty_tile")]
    pub empty_tile: u32,
    /// Palette swatch layout and tile id mapping
    #[serde(default)]
    pub palette: PaletteLayout,
}

fn default_empty_tile() -> u32 {
    DEFAULT_EMPTY_TILE
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tw: 128,
            th: 128,
            display_size: 32,
            width: 32,
            height: 24,
            tileset_path: "tiles/hub_tileset.png".to_string(),
            empty_tile: DEFAULT_EMPTY_TILE,
            palette: PaletteLayout::default(),
        }
    }
}

impl MapConfig {
    /// Create a configuration for a map of the given size, other settings default
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Number of cells in the map
    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Map dimensions as `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
