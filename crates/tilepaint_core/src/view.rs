//! Pan/zoom view transform and screen <-> tile coordinate mapping
//!
//! World space is measured in pixels at zoom 1.0 with the origin at the top-left
//! corner of the map. Screen space is measured in pointer pixels. The mapping is
//! `screen = viewport_origin + world * zoom + offset`.

use serde::{Deserialize, Serialize};

/// Smallest allowed zoom factor
pub const MIN_ZOOM: f32 = 0.1;
/// Largest allowed zoom factor
pub const MAX_ZOOM: f32 = 5.0;

/// Canvas rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Affine world -> screen map: `screen = world * zoom + offset`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub zoom: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 50.0,
            offset_y: 50.0,
        }
    }
}

impl ViewTransform {
    /// Pan by a screen-space delta
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Multiply the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`
    pub fn zoom_by(&mut self, factor: f32) {
        self.set_zoom(self.zoom * factor);
    }

    /// Set the zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]`
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Zoom step for one scroll wheel notch: out for a positive delta, in otherwise
    pub fn wheel_factor(delta: f32) -> f32 {
        if delta > 0.0 {
            0.9
        } else {
            1.1
        }
    }

    /// Zoom as a rounded percentage for display
    pub fn zoom_percent(&self) -> i32 {
        (self.zoom * 100.0).round() as i32
    }
}

/// Converts between screen coordinates and tile indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    /// Tile display size in world pixels
    pub tile_size: f32,
}

impl CoordinateMapper {
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    /// Screen position to world position (pixels at zoom 1.0)
    pub fn screen_to_world(
        &self,
        screen_x: f32,
        screen_y: f32,
        viewport: &Viewport,
        transform: &ViewTransform,
    ) -> (f32, f32) {
        (
            (screen_x - viewport.x - transform.offset_x) / transform.zoom,
            (screen_y - viewport.y - transform.offset_y) / transform.zoom,
        )
    }

    /// Screen position to tile coordinate
    ///
    /// The result may be negative or beyond the grid; bounds checks are the caller's job.
    pub fn screen_to_tile(
        &self,
        screen_x: f32,
        screen_y: f32,
        viewport: &Viewport,
        transform: &ViewTransform,
    ) -> (i32, i32) {
        let (world_x, world_y) = self.screen_to_world(screen_x, screen_y, viewport, transform);
        (
            (world_x / self.tile_size).floor() as i32,
            (world_y / self.tile_size).floor() as i32,
        )
    }

    /// Screen position of a tile's top-left corner
    pub fn tile_to_screen(
        &self,
        tile_x: i32,
        tile_y: i32,
        viewport: &Viewport,
        transform: &ViewTransform,
    ) -> (f32, f32) {
        (
            viewport.x + tile_x as f32 * self.tile_size * transform.zoom + transform.offset_x,
            viewport.y + tile_y as f32 * self.tile_size * transform.zoom + transform.offset_y,
        )
    }

    /// Edge length of one tile on screen
    pub fn tile_screen_size(&self, transform: &ViewTransform) -> f32 {
        self.tile_size * transform.zoom
    }
}
