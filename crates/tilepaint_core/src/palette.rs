//! Palette swatch layout and tile id <-> tileset cell mapping
//!
//! The palette shows `swatch_count` swatches in a fixed grid of `columns`.
//! Swatch `i` selects tile id `i + id_offset`. Saved maps depend on this
//! mapping, so it lives in `MapConfig` rather than in the UI.

use serde::{Deserialize, Serialize};

/// Fixed swatch grid used for tile selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaletteLayout {
    /// Swatches per palette row
    pub columns: u32,
    /// Total number of swatches
    pub swatch_count: u32,
    /// Swatch edge length in pixels
    pub swatch_size: f32,
    /// Gap between swatches in pixels
    pub margin: f32,
    /// Tile id of swatch 0
    pub id_offset: u32,
    /// Tiles per row on the tileset sheet
    pub sheet_columns: u32,
}

impl Default for PaletteLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            swatch_count: 64,
            swatch_size: 32.0,
            margin: 4.0,
            id_offset: 10,
            sheet_columns: 8,
        }
    }
}

impl PaletteLayout {
    /// Distance between the origins of neighbouring swatches
    pub fn pitch(&self) -> f32 {
        self.swatch_size + self.margin
    }

    /// Number of swatch rows
    pub fn rows(&self) -> u32 {
        self.swatch_count.div_ceil(self.columns.max(1))
    }

    /// Total palette size in pixels
    pub fn size(&self) -> (f32, f32) {
        (
            self.columns as f32 * self.pitch(),
            self.rows() as f32 * self.pitch(),
        )
    }

    /// Swatch index under a position relative to the palette's top-left corner
    pub fn swatch_at(&self, x: f32, y: f32) -> Option<u32> {
        if x.is_nan() || y.is_nan() || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.pitch()).floor() as u32;
        let row = (y / self.pitch()).floor() as u32;
        if col >= self.columns || row >= self.rows() {
            return None;
        }
        let index = row * self.columns + col;
        (index < self.swatch_count).then_some(index)
    }

    /// Top-left corner of a swatch relative to the palette origin
    pub fn swatch_origin(&self, index: u32) -> (f32, f32) {
        let col = index % self.columns.max(1);
        let row = index / self.columns.max(1);
        (col as f32 * self.pitch(), row as f32 * self.pitch())
    }

    /// Tile id selected by a swatch
    pub fn tile_for_swatch(&self, index: u32) -> u32 {
        index + self.id_offset
    }

    /// Swatch showing a tile id, if the tile is on the palette
    pub fn swatch_for_tile(&self, tile: u32) -> Option<u32> {
        tile.checked_sub(self.id_offset)
            .filter(|&index| index < self.swatch_count)
    }

    /// Source cell `(col, row)` of a tile on the tileset sheet
    ///
    /// Base tiles 0-3 live in the first sheet column; palette tiles follow
    /// in sheet order. Ids with no image return `None`.
    pub fn atlas_cell(&self, tile: u32) -> Option<(u32, u32)> {
        match tile {
            0 => Some((0, 0)),
            2 => Some((0, 1)),
            3 => Some((0, 2)),
            1 => Some((0, 3)),
            t if t >= self.id_offset => {
                let index = t - self.id_offset;
                let columns = self.sheet_columns.max(1);
                Some((index % columns, index / columns))
            }
            _ => None,
        }
    }
}
