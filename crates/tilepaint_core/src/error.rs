//! Error type shared by the grid, persistence and session APIs

/// Errors produced by the grid core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Tile coordinate outside `[0, width) x [0, height)`
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    /// Loaded grid size disagrees with the current configuration
    DimensionMismatch {
        expected: (u32, u32),
        found: (u32, u32),
    },
    /// Persistence payload could not be parsed or is internally inconsistent
    MalformedDocument(String),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "Tile ({}, {}) is outside the {}x{} grid",
                x, y, width, height
            ),
            GridError::DimensionMismatch { expected, found } => write!(
                f,
                "Map size mismatch: expected {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            GridError::MalformedDocument(e) => write!(f, "Malformed map document: {}", e),
        }
    }
}

impl std::error::Error for GridError {}
