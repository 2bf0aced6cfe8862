use crate::{CellState, Position};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MazeError>;

/// Broad category of a [`MazeError`].
///
/// Every error in this crate is a caller contract violation; the kind tells
/// the caller which contract was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    OutOfBounds,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze is not ready to solve: start or end is missing")]
    NotReady,
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("position {pos} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        pos: Position,
        rows: usize,
        cols: usize,
    },
    #[error("cell at {pos} is {state:?}, only walls and empty cells can be toggled")]
    InvalidToggle { pos: Position, state: CellState },
    #[error("no steps remain in the solution")]
    NoStepsRemaining,
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

impl MazeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MazeError::NotReady
            | MazeError::InvalidDimensions { .. }
            | MazeError::InvalidSnapshot(_)
            | MazeError::Parse { .. } => ErrorKind::InvalidArgument,
            MazeError::InvalidToggle { .. } | MazeError::NoStepsRemaining => {
                ErrorKind::InvalidState
            }
            MazeError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(MazeError::NotReady.kind(), ErrorKind::InvalidArgument);
        assert_eq!(MazeError::NoStepsRemaining.kind(), ErrorKind::InvalidState);
        let err = MazeError::OutOfBounds {
            pos: Position::new(5, 0),
            rows: 3,
            cols: 3,
        };
        assert_eq!(err.kind(), ErrorKind::OutOfBounds);
        assert_eq!(err.to_string(), "position (5, 0) is outside the 3x3 grid");
    }
}
