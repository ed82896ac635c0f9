//! Fixed-size tile buffer

use crate::{GridError, Snapshot};

/// A fixed-size, row-major grid of tile ids
///
/// The cell at `(x, y)` lives at index `y * width + x`. The buffer is never
/// resized after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBuffer {
    width: u32,
    height: u32,
    tiles: Vec<u32>,
}

impl GridBuffer {
    /// Create a grid with every cell set to `fill`
    pub fn new(width: u32, height: u32, fill: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![fill; width as usize * height as usize],
        }
    }

    /// Create a grid from an existing row-major tile sequence
    pub fn from_tiles(width: u32, height: u32, tiles: Vec<u32>) -> Result<Self, GridError> {
        if tiles.len() != width as usize * height as usize {
            return Err(GridError::MalformedDocument(format!(
                "expected {} tiles for a {}x{} map, found {}",
                width as usize * height as usize,
                width,
                height,
                tiles.len()
            )));
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major view of all tiles
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Mutable row-major view of all tiles
    pub(crate) fn tiles_mut(&mut self) -> &mut [u32] {
        &mut self.tiles
    }

    /// Check whether a (possibly negative) tile coordinate lies inside the grid
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Buffer index for a tile coordinate, if in bounds
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the tile at a position
    pub fn get(&self, x: i32, y: i32) -> Result<u32, GridError> {
        self.index(x, y)
            .map(|idx| self.tiles[idx])
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Set the tile at a position
    pub fn set(&mut self, x: i32, y: i32, tile: u32) -> Result<(), GridError> {
        let idx = self.index(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.tiles[idx] = tile;
        Ok(())
    }

    /// Set every cell to `tile`
    pub fn fill(&mut self, tile: u32) {
        self.tiles.iter_mut().for_each(|t| *t = tile);
    }

    /// Iterate over every cell as `(x, y, tile)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        let width = self.width.max(1);
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (i as u32 % width, i as u32 / width, tile))
    }

    /// Iterate over the grid one row at a time
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.tiles.chunks(self.width.max(1) as usize)
    }

    /// Take an independent copy of the tile contents
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.tiles.clone())
    }

    /// Overwrite the tile contents from a snapshot
    ///
    /// The snapshot is copied, so later edits never reach back into history.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), GridError> {
        if snapshot.len() != self.tiles.len() {
            return Err(GridError::MalformedDocument(format!(
                "snapshot holds {} tiles, grid holds {}",
                snapshot.len(),
                self.tiles.len()
            )));
        }
        self.tiles.copy_from_slice(snapshot.tiles());
        Ok(())
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid() {
        let grid = GridBuffer::new(4, 3, 69);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.tiles().len(), 12);
        assert!(grid.tiles().iter().all(|&t| t == 69));
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = GridBuffer::new(5, 4, 0);
        for y in 0..4 {
            for x in 0..5 {
                let tile = (y * 5 + x) as u32 + 10;
                grid.set(x, y, tile).unwrap();
                assert_eq!(grid.get(x, y), Ok(tile));
            }
        }
        // Row-major layout
        assert_eq!(grid.tiles()[2 * 5 + 3], 23);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = GridBuffer::new(4, 4, 0);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (100, 100)] {
            assert!(matches!(
                grid.get(x, y),
                Err(GridError::OutOfBounds { .. })
            ));
            assert!(matches!(
                grid.set(x, y, 7),
                Err(GridError::OutOfBounds { .. })
            ));
        }
        assert!(grid.tiles().iter().all(|&t| t == 0));
    }

    #[test]
    fn test_from_tiles_length_check() {
        assert!(GridBuffer::from_tiles(2, 2, vec![1, 2, 3, 4]).is_ok());
        assert!(matches!(
            GridBuffer::from_tiles(2, 2, vec![1, 2, 3]),
            Err(GridError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_cells_and_rows() {
        let grid = GridBuffer::from_tiles(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells[0], (0, 0, 1));
        assert_eq!(cells[4], (1, 1, 5));
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut grid = GridBuffer::new(2, 2, 0);
        let snapshot = grid.snapshot();
        grid.set(0, 0, 9).unwrap();
        assert_eq!(snapshot.tiles()[0], 0);

        grid.restore(&snapshot).unwrap();
        assert_eq!(grid.get(0, 0), Ok(0));
        grid.set(1, 1, 5).unwrap();
        assert_eq!(snapshot.tiles()[3], 0);
    }
}
