//! Core data structures for tilepaint
//!
//! This crate provides the editable grid behind the tile painting editor:
//! - `GridBuffer` - Fixed-size, row-major tile array with bounds-checked access
//! - `ViewTransform` / `CoordinateMapper` - Screen <-> tile space under pan and zoom
//! - `ToolEngine` - Brush, eraser, flood fill, rectangle fill and picker tools
//! - `HistoryStack` - Bounded undo/redo log of grid snapshots
//! - `MapDocument` / `TileTable` - Persistence document and Lua table export
//! - `EditorSession` - Owns all of the above and applies typed `Command`s

mod config;
mod error;
mod export;
mod grid;
mod history;
mod palette;
mod session;
mod tools;
mod view;

pub use config::{MapConfig, DEFAULT_EMPTY_TILE};
pub use error::GridError;
pub use export::{default_project_file_name, MapDocument, TileTable};
pub use grid::GridBuffer;
pub use history::{HistoryStack, Snapshot, DEFAULT_HISTORY_CAPACITY};
pub use palette::PaletteLayout;
pub use session::{Command, EditorSession, Modifiers, PointerButton};
pub use tools::{fill_rect, flood_fill, RectSession, TileRect, Tool, ToolEngine, ToolState};
pub use view::{CoordinateMapper, ViewTransform, Viewport, MAX_ZOOM, MIN_ZOOM};
