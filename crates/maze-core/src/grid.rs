use crate::{MazeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of rows for a freshly configured maze
pub const DEFAULT_ROWS: usize = 13;
/// Default number of columns for a freshly configured maze
pub const DEFAULT_COLS: usize = 10;

/// State of a single maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Wall,
    Empty,
    Start,
    End,
    /// Laid over a path cell by the solver during replay
    Visited,
}

impl CellState {
    /// Character used by the text format
    pub fn to_char(self) -> char {
        match self {
            CellState::Wall => '#',
            CellState::Empty => '.',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Visited => 'o',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(CellState::Wall),
            '.' => Some(CellState::Empty),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            'o' => Some(CellState::Visited),
            _ => None,
        }
    }
}

/// A cell position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// A rectangular maze of cell states with unique start and end roles.
///
/// The start and end roles are tracked by coordinate. Clearing a role only
/// empties its cell when the other role does not point at the same cell;
/// otherwise the cell is left showing the remaining role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Row-major cell states
    cells: Vec<CellState>,
    start: Option<Position>,
    end: Option<Position>,
}

impl Default for Grid {
    fn default() -> Self {
        let mut grid = Self::blank(DEFAULT_ROWS, DEFAULT_COLS);
        grid.place_default_roles();
        grid
    }
}

impl Grid {
    /// Create a grid with every cell empty, start at the top-left corner and
    /// end at the bottom-right corner.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        cell_count(rows, cols)?;
        let mut grid = Self::blank(rows, cols);
        grid.place_default_roles();
        Ok(grid)
    }

    /// All cells empty, no roles assigned. Callers must have checked the
    /// dimensions with [`cell_count`].
    pub(crate) fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::Empty; rows * cols],
            start: None,
            end: None,
        }
    }

    fn place_default_roles(&mut self) {
        let start = Position::new(0, 0);
        let end = Position::new(self.rows - 1, self.cols - 1);
        self.start = Some(start);
        self.end = Some(end);
        let (si, ei) = (self.index(start), self.index(end));
        self.cells[si] = CellState::Start;
        self.cells[ei] = CellState::End;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        if self.in_bounds(pos) {
            Ok(self.index(pos))
        } else {
            Err(MazeError::OutOfBounds {
                pos,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn cell_state(&self, pos: Position) -> Result<CellState> {
        let idx = self.checked_index(pos)?;
        Ok(self.cells[idx])
    }

    /// Bounds are the caller's problem.
    pub(crate) fn state_unchecked(&self, pos: Position) -> CellState {
        self.cells[self.index(pos)]
    }

    pub(crate) fn set_state(&mut self, pos: Position, state: CellState) -> Result<()> {
        let idx = self.checked_index(pos)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// Reattach the roles without touching any cell state
    pub(crate) fn restore_roles(&mut self, start: Option<Position>, end: Option<Position>) {
        self.start = start;
        self.end = end;
    }

    pub fn start(&self) -> Option<Position> {
        self.start
    }

    pub fn end(&self) -> Option<Position> {
        self.end
    }

    /// A grid can be solved once both start and end are placed
    pub fn is_ready(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Move the start role to `pos`, releasing the previous start cell.
    pub fn set_start(&mut self, pos: Position) -> Result<()> {
        let idx = self.checked_index(pos)?;
        self.clear_start();
        self.start = Some(pos);
        self.cells[idx] = CellState::Start;
        Ok(())
    }

    /// Release the start role. The cell goes back to empty unless the end
    /// role points at it too, in which case it shows the end again.
    pub fn clear_start(&mut self) {
        if let Some(start) = self.start.take() {
            let idx = self.index(start);
            if self.end == Some(start) {
                if self.cells[idx] == CellState::Start {
                    self.cells[idx] = CellState::End;
                }
            } else {
                self.cells[idx] = CellState::Empty;
            }
        }
    }

    /// Move the end role to `pos`, releasing the previous end cell.
    pub fn set_end(&mut self, pos: Position) -> Result<()> {
        let idx = self.checked_index(pos)?;
        self.clear_end();
        self.end = Some(pos);
        self.cells[idx] = CellState::End;
        Ok(())
    }

    pub fn clear_end(&mut self) {
        if let Some(end) = self.end.take() {
            let idx = self.index(end);
            if self.start == Some(end) {
                if self.cells[idx] == CellState::End {
                    self.cells[idx] = CellState::Start;
                }
            } else {
                self.cells[idx] = CellState::Empty;
            }
        }
    }

    /// Flip a cell between wall and empty, returning its new state.
    pub fn toggle_wall(&mut self, pos: Position) -> Result<CellState> {
        let idx = self.checked_index(pos)?;
        let next = match self.cells[idx] {
            CellState::Wall => CellState::Empty,
            CellState::Empty => CellState::Wall,
            state => return Err(MazeError::InvalidToggle { pos, state }),
        };
        self.cells[idx] = next;
        Ok(next)
    }

    /// Mark a cell as visited regardless of its current state.
    pub fn mark_visited(&mut self, pos: Position) -> Result<()> {
        self.set_state(pos, CellState::Visited)
    }

    /// Undo every visited mark left behind by a replay. The end cell gets
    /// its role back, everything else becomes empty.
    pub fn clear_visited(&mut self) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                let idx = self.index(pos);
                if self.cells[idx] != CellState::Visited {
                    continue;
                }
                self.cells[idx] = if self.end == Some(pos) {
                    CellState::End
                } else if self.start == Some(pos) {
                    CellState::Start
                } else {
                    CellState::Empty
                };
            }
        }
    }

    /// Iterate over every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| (Position::new(i / self.cols, i % self.cols), state))
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }
}

/// Number of cells in a `rows × cols` grid. Zero-sized and overflowing
/// dimensions are rejected.
pub(crate) fn cell_count(rows: usize, cols: usize) -> Result<usize> {
    match rows.checked_mul(cols) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(MazeError::InvalidDimensions { rows, cols }),
    }
}

/// Writes one line per row. Visited marks hide the end cell, so text taken
/// after a replay parses back without an end; call
/// [`Grid::clear_visited`] first to keep the roles.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                write!(f, "{}", self.state_unchecked(Position::new(row, col)).to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the text format written by `Display`: one line per row, blank
/// lines ignored. Only the roles present in the text are assigned, so an
/// end covered by an `o` mark comes back as a plain visited cell.
impl FromStr for Grid {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        let lines: Vec<(usize, &str)> = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let rows = lines.len();
        let cols = lines.first().map(|(_, line)| line.chars().count()).unwrap_or(0);
        cell_count(rows, cols)?;

        let mut grid = Self::blank(rows, cols);
        for (row, &(line_no, line)) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(MazeError::Parse {
                    line: line_no,
                    reason: format!("expected {} cells, found {}", cols, line.chars().count()),
                });
            }
            for (col, c) in line.chars().enumerate() {
                let pos = Position::new(row, col);
                let state = CellState::from_char(c).ok_or_else(|| MazeError::Parse {
                    line: line_no,
                    reason: format!("unknown cell '{}'", c),
                })?;
                let duplicate = match state {
                    CellState::Start => grid.start.replace(pos).is_some(),
                    CellState::End => grid.end.replace(pos).is_some(),
                    _ => false,
                };
                if duplicate {
                    return Err(MazeError::Parse {
                        line: line_no,
                        reason: format!("more than one '{}'", c),
                    });
                }
                let idx = grid.index(pos);
                grid.cells[idx] = state;
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_new_grid_defaults() {
        let grid = Grid::new(13, 10).unwrap();
        assert_eq!(grid.rows(), 13);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.start(), Some(pos(0, 0)));
        assert_eq!(grid.end(), Some(pos(12, 9)));
        assert_eq!(grid.cell_state(pos(0, 0)).unwrap(), CellState::Start);
        assert_eq!(grid.cell_state(pos(12, 9)).unwrap(), CellState::End);
        assert_eq!(grid.count(CellState::Empty), 13 * 10 - 2);
        assert!(grid.is_ready());
    }

    #[test]
    fn test_default_matches_reference_layout() {
        let grid = Grid::default();
        assert_eq!((grid.rows(), grid.cols()), (DEFAULT_ROWS, DEFAULT_COLS));
        assert_eq!(grid.end(), Some(pos(DEFAULT_ROWS - 1, DEFAULT_COLS - 1)));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = Grid::new(0, 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 2).unwrap_err(),
            MazeError::InvalidDimensions {
                rows: usize::MAX,
                cols: 2
            }
        );
        assert!(cell_count(1 << (usize::BITS - 1), 4).is_err());
        assert_eq!(cell_count(13, 10).unwrap(), 130);
    }

    #[test]
    fn test_single_cell_grid_shares_roles() {
        let grid = Grid::new(1, 1).unwrap();
        assert_eq!(grid.start(), grid.end());
        assert_eq!(grid.cell_state(pos(0, 0)).unwrap(), CellState::End);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.cell_state(pos(3, 0)).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(grid.toggle_wall(pos(0, 3)).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(grid.mark_visited(pos(9, 9)).unwrap_err().kind(), ErrorKind::OutOfBounds);

        // A rejected set_start must not release the current start
        assert!(grid.set_start(pos(7, 7)).is_err());
        assert_eq!(grid.start(), Some(pos(0, 0)));
        assert_eq!(grid.cell_state(pos(0, 0)).unwrap(), CellState::Start);
    }

    #[test]
    fn test_toggle_wall_round_trip() {
        let mut grid = Grid::new(3, 3).unwrap();
        let p = pos(1, 1);
        assert_eq!(grid.toggle_wall(p).unwrap(), CellState::Wall);
        assert_eq!(grid.toggle_wall(p).unwrap(), CellState::Empty);

        grid.toggle_wall(p).unwrap();
        grid.toggle_wall(p).unwrap();
        grid.toggle_wall(p).unwrap();
        assert_eq!(grid.cell_state(p).unwrap(), CellState::Wall);
    }

    #[test]
    fn test_toggle_wall_rejects_roles_and_visited() {
        let mut grid = Grid::new(3, 3).unwrap();
        let err = grid.toggle_wall(pos(0, 0)).unwrap_err();
        assert_eq!(
            err,
            MazeError::InvalidToggle {
                pos: pos(0, 0),
                state: CellState::Start
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert!(grid.toggle_wall(pos(2, 2)).is_err());

        grid.mark_visited(pos(1, 0)).unwrap();
        assert!(grid.toggle_wall(pos(1, 0)).is_err());
        assert_eq!(grid.cell_state(pos(1, 0)).unwrap(), CellState::Visited);
    }

    #[test]
    fn test_set_start_clears_previous() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_start(pos(1, 1)).unwrap();
        assert_eq!(grid.cell_state(pos(0, 0)).unwrap(), CellState::Empty);
        assert_eq!(grid.cell_state(pos(1, 1)).unwrap(), CellState::Start);
        assert_eq!(grid.start(), Some(pos(1, 1)));
        assert_eq!(grid.count(CellState::Start), 1);
    }

    #[test]
    fn test_set_end_clears_previous() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_end(pos(0, 2)).unwrap();
        assert_eq!(grid.cell_state(pos(2, 2)).unwrap(), CellState::Empty);
        assert_eq!(grid.cell_state(pos(0, 2)).unwrap(), CellState::End);
        assert_eq!(grid.count(CellState::End), 1);
    }

    #[test]
    fn test_start_moved_off_shared_cell_keeps_end() {
        let mut grid = Grid::new(3, 3).unwrap();
        // Start lands on the end cell, then moves away again
        grid.set_start(pos(2, 2)).unwrap();
        assert_eq!(grid.cell_state(pos(2, 2)).unwrap(), CellState::Start);
        assert_eq!(grid.end(), Some(pos(2, 2)));

        grid.set_start(pos(1, 0)).unwrap();
        assert_eq!(grid.cell_state(pos(2, 2)).unwrap(), CellState::End);
        assert_eq!(grid.end(), Some(pos(2, 2)));
        assert_eq!(grid.cell_state(pos(1, 0)).unwrap(), CellState::Start);
        assert_eq!(grid.count(CellState::Start), 1);
        assert_eq!(grid.count(CellState::End), 1);
    }

    #[test]
    fn test_clear_roles() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.clear_start();
        assert_eq!(grid.start(), None);
        assert_eq!(grid.cell_state(pos(0, 0)).unwrap(), CellState::Empty);
        assert!(!grid.is_ready());

        // Clearing an absent role is a no-op
        grid.clear_start();
        assert_eq!(grid.start(), None);

        grid.clear_end();
        assert_eq!(grid.end(), None);
        assert_eq!(grid.cell_state(pos(2, 2)).unwrap(), CellState::Empty);
        assert_eq!(grid.count(CellState::Empty), 9);
    }

    #[test]
    fn test_clear_start_on_shared_cell_leaves_cell() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_end(pos(0, 0)).unwrap();
        assert_eq!(grid.start(), grid.end());

        grid.clear_start();
        assert_eq!(grid.start(), None);
        assert_eq!(grid.cell_state(pos(0, 0)).unwrap(), CellState::End);
    }

    #[test]
    fn test_clear_end_on_shared_cell_shows_start() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_start(pos(1, 1)).unwrap();
        assert_eq!(grid.cell_state(pos(1, 1)).unwrap(), CellState::Start);

        grid.clear_end();
        assert_eq!(grid.end(), None);
        assert_eq!(grid.cell_state(pos(1, 1)).unwrap(), CellState::Start);
        assert_eq!(grid.start(), Some(pos(1, 1)));
    }

    #[test]
    fn test_clear_visited_restores_end() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.mark_visited(pos(0, 1)).unwrap();
        grid.mark_visited(pos(0, 2)).unwrap();
        grid.clear_visited();
        assert_eq!(grid.cell_state(pos(0, 1)).unwrap(), CellState::Empty);
        assert_eq!(grid.cell_state(pos(0, 2)).unwrap(), CellState::End);
    }

    #[test]
    fn test_display_and_parse() {
        let text = "S#.\n.#.\n..E\n";
        let grid: Grid = text.parse().unwrap();
        assert_eq!(grid.start(), Some(pos(0, 0)));
        assert_eq!(grid.end(), Some(pos(2, 2)));
        assert_eq!(grid.cell_state(pos(1, 1)).unwrap(), CellState::Wall);
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn test_text_after_replay_loses_end() {
        let mut grid = Grid::new(1, 3).unwrap();
        grid.mark_visited(pos(0, 1)).unwrap();
        grid.mark_visited(pos(0, 2)).unwrap();
        assert_eq!(grid.to_string(), "Soo\n");

        let parsed: Grid = grid.to_string().parse().unwrap();
        assert_eq!(parsed.end(), None);
        assert!(!parsed.is_ready());

        grid.clear_visited();
        let parsed: Grid = grid.to_string().parse().unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn test_parse_without_roles_is_not_ready() {
        let grid: Grid = "..\n..".parse().unwrap();
        assert!(!grid.is_ready());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "S.\n.".parse::<Grid>(),
            Err(MazeError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            "SS\n.E".parse::<Grid>(),
            Err(MazeError::Parse { line: 1, .. })
        ));
        assert!(matches!("S?\n.E".parse::<Grid>(), Err(MazeError::Parse { .. })));
        assert!(matches!(
            "\n\n".parse::<Grid>(),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_cells_row_major() {
        let grid = Grid::new(2, 2).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells[0], (pos(0, 0), CellState::Start));
        assert_eq!(cells[1], (pos(0, 1), CellState::Empty));
        assert_eq!(cells[3], (pos(1, 1), CellState::End));
    }
}
