//! Editing tools - brush, eraser, flood fill, rectangle fill and picker
//!
//! Tools receive tile coordinates that may lie outside the grid (the pointer
//! left the canvas). Those inputs are ignored rather than reported as errors.

use serde::{Deserialize, Serialize};

use crate::GridBuffer;

/// Available editing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Fill,
    Rect,
    Picker,
}

impl Tool {
    /// All tools in toolbar order
    pub const ALL: [Tool; 5] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Fill,
        Tool::Rect,
        Tool::Picker,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Eraser => "Eraser",
            Tool::Fill => "Fill",
            Tool::Rect => "Rect",
            Tool::Picker => "Picker",
        }
    }

    /// Single-key shortcut shown in tooltips
    pub fn shortcut(&self) -> char {
        match self {
            Tool::Brush => 'B',
            Tool::Eraser => 'E',
            Tool::Fill => 'G',
            Tool::Rect => 'R',
            Tool::Picker => 'I',
        }
    }
}

/// Current tool selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolState {
    pub current_tool: Tool,
    pub selected_tile: u32,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            current_tool: Tool::Brush,
            selected_tile: 10,
        }
    }
}

/// Inclusive tile rectangle with normalized corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl TileRect {
    /// Build a rectangle from two corners given in any order
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            min_x: a.0.min(b.0),
            min_y: a.1.min(b.1),
            max_x: a.0.max(b.0),
            max_y: a.1.max(b.1),
        }
    }

    /// Width in tiles, both edges included. Saturates at `u32::MAX`.
    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x).saturating_add(1)
    }

    /// Height in tiles, both edges included. Saturates at `u32::MAX`.
    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y).saturating_add(1)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Transient state of a rectangle gesture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RectSession {
    /// Corner recorded on pointer-down
    pub origin: Option<(i32, i32)>,
    /// Corner under the pointer during the drag
    pub current: Option<(i32, i32)>,
}

impl RectSession {
    /// Rectangle to draw as a live preview, if a gesture is in progress
    pub fn preview(&self) -> Option<TileRect> {
        let origin = self.origin?;
        Some(TileRect::from_corners(origin, self.current.unwrap_or(origin)))
    }

    pub fn clear(&mut self) {
        self.origin = None;
        self.current = None;
    }
}

/// Flood fill the 4-connected region containing `(x, y)` with `replacement`
///
/// Returns the number of cells changed. Filling from outside the grid, or
/// onto a region that already holds `replacement`, changes nothing.
pub fn flood_fill(grid: &mut GridBuffer, x: i32, y: i32, replacement: u32) -> usize {
    let Ok(target) = grid.get(x, y) else {
        return 0;
    };
    if target == replacement {
        return 0;
    }

    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let tiles = grid.tiles_mut();
    let mut changed = 0;

    // Neighbours are pushed before their value is checked, so a cell can be
    // on the stack more than once; the check on pop filters the repeats.
    let mut stack = vec![(x, y)];
    while let Some((cx, cy)) = stack.pop() {
        let idx = (cy * width + cx) as usize;
        if tiles[idx] != target {
            continue;
        }
        tiles[idx] = replacement;
        changed += 1;

        if cx > 0 {
            stack.push((cx - 1, cy));
        }
        if cx < width - 1 {
            stack.push((cx + 1, cy));
        }
        if cy > 0 {
            stack.push((cx, cy - 1));
        }
        if cy < height - 1 {
            stack.push((cx, cy + 1));
        }
    }

    changed
}

/// Fill the rectangle spanning `a` and `b` (inclusive) with `tile`
///
/// Corners may be given in any order. Cells outside the grid are skipped, so
/// a rectangle hanging over the edge is clipped. Returns the number of cells changed.
pub fn fill_rect(grid: &mut GridBuffer, a: (i32, i32), b: (i32, i32), tile: u32) -> usize {
    let rect = TileRect::from_corners(a, b);
    let min_x = rect.min_x.max(0);
    let min_y = rect.min_y.max(0);
    let max_x = rect.max_x.min(grid.width() as i32 - 1);
    let max_y = rect.max_y.min(grid.height() as i32 - 1);

    let width = grid.width() as i32;
    let tiles = grid.tiles_mut();
    let mut changed = 0;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let idx = (y * width + x) as usize;
            if tiles[idx] != tile {
                tiles[idx] = tile;
                changed += 1;
            }
        }
    }

    changed
}

/// Applies the selected tool to a grid, one gesture at a time
#[derive(Debug, Clone, Default)]
pub struct ToolEngine {
    pub state: ToolState,
    pub rect: RectSession,
}

impl ToolEngine {
    pub fn new(state: ToolState) -> Self {
        Self {
            state,
            rect: RectSession::default(),
        }
    }

    pub fn current_tool(&self) -> Tool {
        self.state.current_tool
    }

    pub fn selected_tile(&self) -> u32 {
        self.state.selected_tile
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.state.current_tool = tool;
    }

    pub fn select_tile(&mut self, tile: u32) {
        self.state.selected_tile = tile;
    }

    /// Start a gesture at `pos`. Returns true if the grid changed.
    pub fn begin(&mut self, grid: &mut GridBuffer, pos: (i32, i32), empty_tile: u32) -> bool {
        if self.state.current_tool == Tool::Rect {
            self.rect.origin = Some(pos);
            self.rect.current = Some(pos);
            return false;
        }
        self.apply_at(grid, pos, empty_tile)
    }

    /// Continue a gesture at `pos`. Returns true if the grid changed.
    pub fn drag(&mut self, grid: &mut GridBuffer, pos: (i32, i32), empty_tile: u32) -> bool {
        if self.state.current_tool == Tool::Rect {
            if self.rect.origin.is_some() {
                self.rect.current = Some(pos);
            }
            return false;
        }
        self.apply_at(grid, pos, empty_tile)
    }

    /// Complete a gesture with the pointer at `end`. Returns true if the grid changed.
    pub fn finish(&mut self, grid: &mut GridBuffer, end: (i32, i32)) -> bool {
        let changed = match (self.state.current_tool, self.rect.origin) {
            (Tool::Rect, Some(origin)) => {
                fill_rect(grid, origin, end, self.state.selected_tile) > 0
            }
            _ => false,
        };
        self.rect.clear();
        changed
    }

    /// Apply a point tool (brush, eraser, picker, fill) once at `pos`
    pub fn apply_at(&mut self, grid: &mut GridBuffer, pos: (i32, i32), empty_tile: u32) -> bool {
        let (x, y) = pos;
        let Ok(current) = grid.get(x, y) else {
            return false;
        };

        match self.state.current_tool {
            Tool::Brush => set_if_changed(grid, pos, current, self.state.selected_tile),
            Tool::Eraser => set_if_changed(grid, pos, current, empty_tile),
            Tool::Picker => {
                self.state.selected_tile = current;
                false
            }
            Tool::Fill => flood_fill(grid, x, y, self.state.selected_tile) > 0,
            Tool::Rect => false,
        }
    }
}

fn set_if_changed(grid: &mut GridBuffer, (x, y): (i32, i32), current: u32, tile: u32) -> bool {
    if current == tile {
        return false;
    }
    grid.set(x, y, tile).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(tool: Tool, tile: u32) -> ToolEngine {
        ToolEngine::new(ToolState {
            current_tool: tool,
            selected_tile: tile,
        })
    }

    #[test]
    fn test_flood_fill_whole_grid() {
        let mut grid = GridBuffer::new(4, 4, 69);
        assert_eq!(flood_fill(&mut grid, 0, 0, 5), 16);
        assert!(grid.tiles().iter().all(|&t| t == 5));
    }

    #[test]
    fn test_flood_fill_from_interior_cell() {
        let mut grid = GridBuffer::new(9, 7, 3);
        flood_fill(&mut grid, 4, 3, 12);
        assert!(grid.tiles().iter().all(|&t| t == 12));
    }

    #[test]
    fn test_flood_fill_same_value_is_noop() {
        let mut grid = GridBuffer::new(4, 4, 5);
        grid.set(1, 1, 6).unwrap();
        let before = grid.clone();
        assert_eq!(flood_fill(&mut grid, 0, 0, 5), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_flood_fill_respects_region_boundary() {
        // Vertical wall of 1s at x = 2 splits the grid in two
        let mut grid = GridBuffer::new(5, 3, 0);
        for y in 0..3 {
            grid.set(2, y, 1).unwrap();
        }
        assert_eq!(flood_fill(&mut grid, 0, 0, 7), 6);
        for y in 0..3 {
            assert_eq!(grid.get(0, y), Ok(7));
            assert_eq!(grid.get(1, y), Ok(7));
            assert_eq!(grid.get(2, y), Ok(1));
            assert_eq!(grid.get(3, y), Ok(0));
            assert_eq!(grid.get(4, y), Ok(0));
        }
    }

    #[test]
    fn test_flood_fill_is_four_connected() {
        // Diagonal neighbours are not part of the region
        let mut grid = GridBuffer::from_tiles(3, 3, vec![0, 1, 0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(flood_fill(&mut grid, 1, 1, 9), 1);
        assert_eq!(grid.get(0, 0), Ok(0));
        assert_eq!(grid.get(1, 1), Ok(9));
    }

    #[test]
    fn test_flood_fill_out_of_bounds() {
        let mut grid = GridBuffer::new(4, 4, 0);
        assert_eq!(flood_fill(&mut grid, -1, 0, 3), 0);
        assert_eq!(flood_fill(&mut grid, 0, 4, 3), 0);
        assert!(grid.tiles().iter().all(|&t| t == 0));
    }

    #[test]
    fn test_flood_fill_large_region() {
        let mut grid = GridBuffer::new(512, 512, 0);
        assert_eq!(flood_fill(&mut grid, 200, 300, 1), 512 * 512);
    }

    #[test]
    fn test_rect_fill_scenario() {
        let mut grid = GridBuffer::new(4, 4, 0);
        assert_eq!(fill_rect(&mut grid, (1, 1), (2, 2), 7), 4);
        for (x, y, tile) in grid.cells() {
            let inside = (1..=2).contains(&x) && (1..=2).contains(&y);
            assert_eq!(tile, if inside { 7 } else { 0 }, "cell ({}, {})", x, y);
        }
    }

    #[test]
    fn test_rect_fill_corner_order_is_irrelevant() {
        let corners = [((0, 3), (2, 1)), ((3, 0), (1, 2)), ((-2, 5), (1, 1))];
        for (a, b) in corners {
            let mut forward = GridBuffer::new(4, 4, 0);
            let mut backward = GridBuffer::new(4, 4, 0);
            fill_rect(&mut forward, a, b, 8);
            fill_rect(&mut backward, b, a, 8);
            assert_eq!(forward, backward);
        }
    }

    #[test]
    fn test_rect_fill_clips_to_grid() {
        let mut grid = GridBuffer::new(4, 4, 0);
        assert_eq!(fill_rect(&mut grid, (-3, -3), (0, 1), 4), 2);
        assert_eq!(grid.get(0, 0), Ok(4));
        assert_eq!(grid.get(0, 1), Ok(4));
        assert_eq!(grid.get(1, 0), Ok(0));

        let before = grid.clone();
        assert_eq!(fill_rect(&mut grid, (10, 10), (20, 20), 4), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_tile_rect_dimensions() {
        let rect = TileRect::from_corners((3, 1), (1, 4));
        assert_eq!((rect.min_x, rect.min_y, rect.max_x, rect.max_y), (1, 1, 3, 4));
        assert_eq!((rect.width(), rect.height()), (3, 4));
        assert!(rect.contains(3, 4));
        assert!(!rect.contains(0, 1));
    }

    #[test]
    fn test_tile_rect_extreme_corners() {
        let rect = TileRect::from_corners((i32::MAX, 0), (i32::MIN, -5));
        assert_eq!(rect.width(), u32::MAX);
        assert_eq!(rect.height(), 6);

        let mut grid = GridBuffer::new(3, 3, 0);
        assert_eq!(fill_rect(&mut grid, (i32::MIN, i32::MIN), (i32::MAX, i32::MAX), 7), 9);
    }

    #[test]
    fn test_brush_and_eraser() {
        let mut grid = GridBuffer::new(4, 4, 69);
        let mut tools = engine(Tool::Brush, 12);
        assert!(tools.begin(&mut grid, (1, 2), 69));
        assert_eq!(grid.get(1, 2), Ok(12));
        // Painting the same tile again is not a change
        assert!(!tools.drag(&mut grid, (1, 2), 69));

        tools.select_tool(Tool::Eraser);
        assert!(tools.begin(&mut grid, (1, 2), 69));
        assert_eq!(grid.get(1, 2), Ok(69));
    }

    #[test]
    fn test_picker_reads_without_mutating() {
        let mut grid = GridBuffer::new(4, 4, 0);
        grid.set(2, 3, 42).unwrap();
        let before = grid.clone();
        let mut tools = engine(Tool::Picker, 10);
        assert!(!tools.begin(&mut grid, (2, 3), 69));
        assert_eq!(tools.selected_tile(), 42);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_out_of_bounds_tools_leave_grid_unchanged() {
        for tool in Tool::ALL {
            let mut grid = GridBuffer::new(4, 4, 3);
            let before = grid.clone();
            let mut tools = engine(tool, 11);
            for pos in [(-1, 0), (4, 4), (0, -7), (100, 1)] {
                tools.begin(&mut grid, pos, 69);
                tools.drag(&mut grid, pos, 69);
                tools.finish(&mut grid, pos);
            }
            assert_eq!(grid, before, "{:?} changed the grid", tool);
            assert_eq!(tools.selected_tile(), 11);
        }
    }

    #[test]
    fn test_rect_gesture() {
        let mut grid = GridBuffer::new(4, 4, 0);
        let mut tools = engine(Tool::Rect, 7);
        assert!(!tools.begin(&mut grid, (2, 2), 69));
        assert!(!tools.drag(&mut grid, (1, 1), 69));
        assert_eq!(
            tools.rect.preview(),
            Some(TileRect::from_corners((1, 1), (2, 2)))
        );
        // Preview never touches the grid
        assert!(grid.tiles().iter().all(|&t| t == 0));

        assert!(tools.finish(&mut grid, (1, 1)));
        assert_eq!(grid.tiles().iter().filter(|&&t| t == 7).count(), 4);
        assert_eq!(tools.rect.preview(), None);
    }
}
