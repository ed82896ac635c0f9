//! Editor session - owns the grid, view, tools and history, and applies commands
//!
//! Every input event from the host is turned into a [`Command`] and passed to
//! [`EditorSession::apply`]. The session never touches the display; the host
//! reads [`EditorSession::grid`], [`EditorSession::view`] and
//! [`EditorSession::rect_preview`] to draw each frame.

use crate::{
    CoordinateMapper, GridBuffer, GridError, HistoryStack, MapConfig, MapDocument, TileRect,
    TileTable, Tool, ToolEngine, ToolState, ViewTransform, Viewport,
};

/// Pointer button that started a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Modifier keys held during an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Typed input event processed by [`EditorSession::apply`]
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Pointer pressed at a screen position
    PointerDown {
        x: f32,
        y: f32,
        button: PointerButton,
        modifiers: Modifiers,
    },
    /// Pointer moved to a screen position
    PointerMove { x: f32, y: f32 },
    /// Pointer released; completes the current gesture
    PointerUp,
    SelectTool(Tool),
    SelectTile(u32),
    /// Click on the palette, relative to the palette's top-left corner
    PaletteClick { x: f32, y: f32 },
    /// Scroll wheel; positive `delta` scrolls down (zooms out)
    Zoom { delta: f32, modifiers: Modifiers },
    /// One zoom step from a button; same direction rule as `Zoom`, no modifier needed
    ZoomStep { delta: f32 },
    /// Canvas moved or resized
    Resize(Viewport),
    Undo,
    Redo,
    /// Reset every cell to the empty tile
    NewMap,
    /// Replace the grid with a loaded document
    Load(MapDocument),
}

#[derive(Debug, Clone, Copy, Default)]
struct PointerState {
    drawing: bool,
    panning: bool,
    last: Option<(f32, f32)>,
}

/// All state for one open map
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: MapConfig,
    grid: GridBuffer,
    view: ViewTransform,
    viewport: Viewport,
    mapper: CoordinateMapper,
    tools: ToolEngine,
    history: HistoryStack,
    pointer: PointerState,
    dirty: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(MapConfig::default())
    }
}

impl EditorSession {
    /// Create a session with a blank map, recording it as the first history entry
    pub fn new(config: MapConfig) -> Self {
        Self::with_state(config, ToolState::default(), ViewTransform::default())
    }

    pub fn with_state(config: MapConfig, tools: ToolState, view: ViewTransform) -> Self {
        let grid = GridBuffer::new(config.width, config.height, config.empty_tile);
        let mut history = HistoryStack::default();
        history.push(grid.snapshot());

        Self {
            mapper: CoordinateMapper::new(config.display_size as f32),
            config,
            grid,
            view,
            viewport: Viewport::default(),
            tools: ToolEngine::new(tools),
            history,
            pointer: PointerState::default(),
            dirty: false,
        }
    }

    /// Apply one command. Only `Load` can fail, and a failed load changes nothing.
    pub fn apply(&mut self, command: Command) -> Result<(), GridError> {
        match command {
            Command::PointerDown {
                x,
                y,
                button,
                modifiers,
            } => self.pointer_down(x, y, button, modifiers),
            Command::PointerMove { x, y } => self.pointer_move(x, y),
            Command::PointerUp => self.pointer_up(),
            Command::SelectTool(tool) => self.tools.select_tool(tool),
            Command::SelectTile(tile) => self.tools.select_tile(tile),
            Command::PaletteClick { x, y } => {
                let palette = &self.config.palette;
                if let Some(index) = palette.swatch_at(x, y) {
                    self.tools.select_tile(palette.tile_for_swatch(index));
                }
            }
            Command::Zoom { delta, modifiers } => {
                if modifiers.shift && delta != 0.0 {
                    self.view.zoom_by(ViewTransform::wheel_factor(delta));
                }
            }
            Command::ZoomStep { delta } => {
                if delta != 0.0 {
                    self.view.zoom_by(ViewTransform::wheel_factor(delta));
                }
            }
            Command::Resize(viewport) => self.viewport = viewport,
            Command::Undo => {
                if let Some(snapshot) = self.history.undo() {
                    self.grid.restore(snapshot)?;
                    self.dirty = true;
                }
            }
            Command::Redo => {
                if let Some(snapshot) = self.history.redo() {
                    self.grid.restore(snapshot)?;
                    self.dirty = true;
                }
            }
            Command::NewMap => self.new_map(),
            Command::Load(document) => self.load(&document)?,
        }
        Ok(())
    }

    /// Reset every cell to the empty tile as one undoable step
    pub fn new_map(&mut self) {
        self.grid.fill(self.config.empty_tile);
        if self.history.push(self.grid.snapshot()) {
            self.dirty = true;
        }
    }

    /// Replace the grid with a document's tiles, or reject it untouched
    pub fn load(&mut self, document: &MapDocument) -> Result<(), GridError> {
        let grid = document.to_grid(&self.config)?;
        self.grid = grid;
        self.pointer = PointerState::default();
        self.tools.rect.clear();
        self.history.push(self.grid.snapshot());
        self.dirty = false;
        Ok(())
    }

    fn pointer_down(&mut self, x: f32, y: f32, button: PointerButton, modifiers: Modifiers) {
        self.pointer.last = Some((x, y));
        // The secondary button paints like the primary one, but never pans
        let pans = match button {
            PointerButton::Middle => true,
            PointerButton::Primary => modifiers.alt,
            PointerButton::Secondary => false,
        };
        if pans {
            self.pointer.panning = true;
            return;
        }

        self.pointer.drawing = true;
        let tile = self.screen_to_tile(x, y);
        if self.tools.begin(&mut self.grid, tile, self.config.empty_tile) {
            self.dirty = true;
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        let (last_x, last_y) = self.pointer.last.unwrap_or((x, y));
        self.pointer.last = Some((x, y));

        if self.pointer.panning {
            self.view.pan_by(x - last_x, y - last_y);
        } else if self.pointer.drawing {
            let tile = self.screen_to_tile(x, y);
            if self.tools.drag(&mut self.grid, tile, self.config.empty_tile) {
                self.dirty = true;
            }
        }
    }

    fn pointer_up(&mut self) {
        if self.pointer.drawing {
            if let Some((x, y)) = self.pointer.last {
                let end = self.screen_to_tile(x, y);
                if self.tools.finish(&mut self.grid, end) {
                    self.dirty = true;
                }
            }
            self.history.push(self.grid.snapshot());
        }
        self.pointer.drawing = false;
        self.pointer.panning = false;
        self.tools.rect.clear();
    }

    fn screen_to_tile(&self, x: f32, y: f32) -> (i32, i32) {
        self.mapper.screen_to_tile(x, y, &self.viewport, &self.view)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridBuffer {
        &self.grid
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn current_tool(&self) -> Tool {
        self.tools.current_tool()
    }

    pub fn selected_tile(&self) -> u32 {
        self.tools.selected_tile()
    }

    pub fn is_drawing(&self) -> bool {
        self.pointer.drawing
    }

    pub fn is_panning(&self) -> bool {
        self.pointer.panning
    }

    /// Rectangle being dragged out with the rect tool, for preview drawing
    pub fn rect_preview(&self) -> Option<TileRect> {
        if self.pointer.drawing && self.tools.current_tool() == Tool::Rect {
            self.tools.rect.preview()
        } else {
            None
        }
    }

    /// Tile under the last known pointer position (may be off the grid)
    pub fn hover_tile(&self) -> Option<(i32, i32)> {
        self.pointer.last.map(|(x, y)| self.screen_to_tile(x, y))
    }

    /// Whether the map changed since the last save or load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Document for saving the current map
    pub fn document(&self) -> MapDocument {
        MapDocument::from_grid(&self.grid, &self.config)
    }

    /// Tile rows for code export
    pub fn tile_table(&self) -> TileTable {
        TileTable::from_grid(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4x4 map with 10px tiles, no pan, so screen (x, y) hits tile (x / 10, y / 10)
    fn session() -> EditorSession {
        let mut config = MapConfig::with_size(4, 4);
        config.display_size = 10;
        let view = ViewTransform {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let mut session = EditorSession::with_state(config, ToolState::default(), view);
        session
            .apply(Command::Resize(Viewport::new(0.0, 0.0, 40.0, 40.0)))
            .unwrap();
        session
    }

    fn click(session: &mut EditorSession, x: f32, y: f32) {
        session
            .apply(Command::PointerDown {
                x,
                y,
                button: PointerButton::Primary,
                modifiers: Modifiers::default(),
            })
            .unwrap();
        session.apply(Command::PointerUp).unwrap();
    }

    #[test]
    fn test_new_session_is_blank_with_one_history_entry() {
        let session = EditorSession::new(MapConfig::default());
        assert!(session.grid().tiles().iter().all(|&t| t == 69));
        assert_eq!(session.history().len(), 1);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_brush_stroke_is_one_history_entry() {
        let mut session = session();
        session.apply(Command::SelectTile(12)).unwrap();
        session
            .apply(Command::PointerDown {
                x: 5.0,
                y: 5.0,
                button: PointerButton::Primary,
                modifiers: Modifiers::default(),
            })
            .unwrap();
        session.apply(Command::PointerMove { x: 15.0, y: 5.0 }).unwrap();
        session.apply(Command::PointerMove { x: 25.0, y: 5.0 }).unwrap();
        assert!(session.is_drawing());
        session.apply(Command::PointerUp).unwrap();

        assert_eq!(&session.grid().tiles()[0..4], &[12, 12, 12, 69]);
        assert_eq!(session.history().len(), 2);
        assert!(session.is_dirty());

        session.apply(Command::Undo).unwrap();
        assert!(session.grid().tiles().iter().all(|&t| t == 69));
        session.apply(Command::Redo).unwrap();
        assert_eq!(&session.grid().tiles()[0..4], &[12, 12, 12, 69]);
    }

    #[test]
    fn test_moves_without_button_do_not_paint() {
        let mut session = session();
        session.apply(Command::PointerMove { x: 5.0, y: 5.0 }).unwrap();
        assert!(session.grid().tiles().iter().all(|&t| t == 69));
        assert_eq!(session.hover_tile(), Some((0, 0)));
    }

    #[test]
    fn test_picker_gesture_does_not_grow_history() {
        let mut session = session();
        session.apply(Command::SelectTile(42)).unwrap();
        click(&mut session, 15.0, 15.0);
        session.apply(Command::SelectTool(Tool::Picker)).unwrap();
        session.apply(Command::SelectTile(10)).unwrap();
        click(&mut session, 15.0, 15.0);
        assert_eq!(session.selected_tile(), 42);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_rect_tool_uses_release_position() {
        let mut session = session();
        session.apply(Command::SelectTool(Tool::Rect)).unwrap();
        session.apply(Command::SelectTile(7)).unwrap();
        session
            .apply(Command::PointerDown {
                x: 25.0,
                y: 25.0,
                button: PointerButton::Primary,
                modifiers: Modifiers::default(),
            })
            .unwrap();
        session.apply(Command::PointerMove { x: 15.0, y: 15.0 }).unwrap();
        assert_eq!(
            session.rect_preview(),
            Some(TileRect::from_corners((1, 1), (2, 2)))
        );
        assert!(session.grid().tiles().iter().all(|&t| t == 69));

        session.apply(Command::PointerUp).unwrap();
        assert_eq!(session.rect_preview(), None);
        for (x, y, tile) in session.grid().cells() {
            let inside = (1..=2).contains(&x) && (1..=2).contains(&y);
            assert_eq!(tile, if inside { 7 } else { 69 });
        }
    }

    #[test]
    fn test_pointer_off_canvas_is_ignored() {
        let mut session = session();
        for tool in Tool::ALL {
            session.apply(Command::SelectTool(tool)).unwrap();
            click(&mut session, -5.0, 100.0);
        }
        assert!(session.grid().tiles().iter().all(|&t| t == 69));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_alt_drag_pans_instead_of_painting() {
        let mut session = session();
        session
            .apply(Command::PointerDown {
                x: 5.0,
                y: 5.0,
                button: PointerButton::Primary,
                modifiers: Modifiers {
                    alt: true,
                    ..Default::default()
                },
            })
            .unwrap();
        assert!(session.is_panning());
        session.apply(Command::PointerMove { x: 25.0, y: 0.0 }).unwrap();
        session.apply(Command::PointerUp).unwrap();

        assert_eq!((session.view().offset_x, session.view().offset_y), (20.0, -5.0));
        assert!(session.grid().tiles().iter().all(|&t| t == 69));
        // The pan shifted the map: screen x = 25 is now tile 0
        assert_eq!(session.hover_tile(), Some((0, 0)));
    }

    #[test]
    fn test_zoom_requires_shift() {
        let mut session = session();
        session
            .apply(Command::Zoom {
                delta: 1.0,
                modifiers: Modifiers::default(),
            })
            .unwrap();
        assert_eq!(session.view().zoom, 1.0);
        session
            .apply(Command::Zoom {
                delta: -1.0,
                modifiers: Modifiers {
                    shift: true,
                    ..Default::default()
                },
            })
            .unwrap();
        assert!((session.view().zoom - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_secondary_button_paints() {
        let mut session = session();
        let alt = Modifiers {
            alt: true,
            ..Default::default()
        };
        session
            .apply(Command::PointerDown {
                x: 15.0,
                y: 25.0,
                button: PointerButton::Secondary,
                modifiers: alt,
            })
            .unwrap();
        assert!(session.is_drawing());
        assert!(!session.is_panning());
        session.apply(Command::PointerUp).unwrap();
        assert_eq!(session.grid().get(1, 2), Ok(10));
        assert_eq!(session.view().offset_x, 0.0);

        session
            .apply(Command::PointerDown {
                x: 5.0,
                y: 5.0,
                button: PointerButton::Middle,
                modifiers: Modifiers::default(),
            })
            .unwrap();
        assert!(session.is_panning());
        session.apply(Command::PointerUp).unwrap();
        assert_eq!(session.grid().get(0, 0), Ok(69));
    }

    #[test]
    fn test_zoom_step_ignores_modifiers() {
        let mut session = session();
        session.apply(Command::ZoomStep { delta: -1.0 }).unwrap();
        assert!((session.view().zoom - 1.1).abs() < 1e-6);
        session.apply(Command::ZoomStep { delta: 1.0 }).unwrap();
        assert!((session.view().zoom - 0.99).abs() < 1e-6);
        session.apply(Command::ZoomStep { delta: 0.0 }).unwrap();
        assert!((session.view().zoom - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_palette_click_selects_offset_tile() {
        let mut session = session();
        session
            .apply(Command::PaletteClick { x: 40.0, y: 40.0 })
            .unwrap();
        // Column 1, row 1 -> swatch 5 -> tile 15
        assert_eq!(session.selected_tile(), 15);
        session
            .apply(Command::PaletteClick { x: 500.0, y: 0.0 })
            .unwrap();
        assert_eq!(session.selected_tile(), 15);
        session
            .apply(Command::PaletteClick { x: 10.0, y: 1.0e12 })
            .unwrap();
        assert_eq!(session.selected_tile(), 15);
    }

    #[test]
    fn test_load_replaces_grid_and_records_history() {
        let mut session = session();
        let mut doc = session.document();
        doc.tiles = (0..16).collect();
        session.apply(Command::Load(doc.clone())).unwrap();
        assert_eq!(session.grid().tiles(), doc.tiles.as_slice());
        assert_eq!(session.history().len(), 2);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_rejected_load_keeps_state() {
        let mut session = session();
        session.apply(Command::SelectTile(11)).unwrap();
        click(&mut session, 5.0, 5.0);
        let before = session.grid().clone();
        let history_len = session.history().len();

        let mut doc = MapDocument::from_grid(&GridBuffer::new(8, 8, 1), &MapConfig::with_size(8, 8));
        assert!(matches!(
            session.apply(Command::Load(doc.clone())),
            Err(GridError::DimensionMismatch { .. })
        ));

        doc.config = session.config().clone();
        doc.tiles.truncate(3);
        assert!(matches!(
            session.apply(Command::Load(doc)),
            Err(GridError::MalformedDocument(_))
        ));

        assert_eq!(session.grid(), &before);
        assert_eq!(session.history().len(), history_len);
    }

    #[test]
    fn test_new_map_is_undoable() {
        let mut session = session();
        session.apply(Command::SelectTile(11)).unwrap();
        click(&mut session, 5.0, 5.0);
        session.apply(Command::NewMap).unwrap();
        assert!(session.grid().tiles().iter().all(|&t| t == 69));
        session.apply(Command::Undo).unwrap();
        assert_eq!(session.grid().get(0, 0), Ok(11));
    }

    #[test]
    fn test_flood_fill_scenario_through_session() {
        let mut config = MapConfig::with_size(4, 4);
        config.display_size = 10;
        let view = ViewTransform {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        };
        let tools = ToolState {
            current_tool: Tool::Fill,
            selected_tile: 5,
        };
        let mut session = EditorSession::with_state(config, tools, view);
        click(&mut session, 0.0, 0.0);
        assert!(session.grid().tiles().iter().all(|&t| t == 5));
    }
}
