use crate::grid::cell_count;
use crate::{CellState, Grid, MazeError, Position, Result};
use serde::{Deserialize, Serialize};

/// Flat, serialisable copy of a [`Grid`].
///
/// Cells are listed as `(row, col, state)` triples; the start and end roles
/// are stored separately because a single cell can carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<(usize, usize, CellState)>,
    pub start: Option<Position>,
    pub end: Option<Position>,
}

impl Grid {
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            rows: self.rows(),
            cols: self.cols(),
            cells: self
                .cells()
                .map(|(pos, state)| (pos.row, pos.col, state))
                .collect(),
            start: self.start(),
            end: self.end(),
        }
    }

    /// Rebuild a grid from a snapshot, checking that every cell is covered
    /// exactly once and that the roles are in bounds.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self> {
        let (rows, cols) = (snapshot.rows, snapshot.cols);
        let count = cell_count(rows, cols)?;
        if snapshot.cells.len() != count {
            return Err(MazeError::InvalidSnapshot(format!(
                "expected {} cells, found {}",
                count,
                snapshot.cells.len()
            )));
        }

        let mut grid = Grid::blank(rows, cols);
        let mut seen = vec![false; count];
        for &(row, col, state) in &snapshot.cells {
            let pos = Position::new(row, col);
            grid.set_state(pos, state)?;
            let idx = row * cols + col;
            if seen[idx] {
                return Err(MazeError::InvalidSnapshot(format!("cell {} listed twice", pos)));
            }
            seen[idx] = true;
        }

        for role in [snapshot.start, snapshot.end].into_iter().flatten() {
            if !grid.in_bounds(role) {
                return Err(MazeError::OutOfBounds { pos: role, rows, cols });
            }
        }
        grid.restore_roles(snapshot.start, snapshot.end);
        Ok(grid)
    }
}
