//! Core maze engine.
//!
//! A [`Grid`] holds the cell states of a rectangular maze together with the
//! unique start and end roles. A [`Solver`] runs a single breadth-first search
//! over a ready grid and then replays the shortest path one step at a time,
//! marking each cell [`CellState::Visited`] as the caller drives it.
//!
//! ```
//! use maze_core::{Grid, Position, Solver};
//!
//! let mut grid = Grid::new(3, 3).unwrap();
//! grid.toggle_wall(Position::new(0, 1)).unwrap();
//! grid.toggle_wall(Position::new(1, 1)).unwrap();
//!
//! let mut solver = Solver::new(&mut grid).unwrap();
//! assert_eq!(solver.remaining_steps(), 4);
//! while !solver.is_solved() {
//!     solver.next_step().unwrap();
//! }
//! ```

mod error;
mod grid;
mod snapshot;
mod solver;

pub use error::{ErrorKind, MazeError, Result};
pub use grid::{CellState, Grid, Position, DEFAULT_COLS, DEFAULT_ROWS};
pub use snapshot::GridSnapshot;
pub use solver::{SolveState, Solver};
