use core::fmt;

/// Errors signalled by [Grid](crate::Grid) accessors. Out-of-range
/// coordinates and indices are reported, never clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate pair falls outside the grid rectangle.
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// A linear node index falls outside the node arena.
    IndexOutOfBounds { index: usize, len: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "coordinate ({}, {}) outside {}x{} grid",
                    x, y, width, height
                )
            }
            GridError::IndexOutOfBounds { index, len } => {
                write!(f, "node index {} outside arena of {} nodes", index, len)
            }
        }
    }
}

impl std::error::Error for GridError {}
