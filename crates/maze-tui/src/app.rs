use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use log::{info, warn};
use maze_core::{CellState, Grid, GridSnapshot, Position, Result as MazeResult, SolveState, Solver};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Tick rate while the maze is being edited
const IDLE_TICK: Duration = Duration::from_millis(100);
/// How many ticks a message stays on screen
const MESSAGE_TICKS: u32 = 30;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Start-up settings, filled in from the command line
#[derive(Debug, Clone)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    /// Pause between two replayed steps
    pub step_delay: Duration,
    /// Fraction of empty cells to turn into walls at start-up
    pub wall_density: Option<f64>,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: maze_core::DEFAULT_ROWS,
            cols: maze_core::DEFAULT_COLS,
            step_delay: Duration::from_millis(400),
            wall_density: None,
            theme: Theme::default(),
        }
    }
}

/// The maze is either open for editing or owned by a running replay
#[derive(Debug)]
pub enum Board {
    Editing(Grid),
    Replaying(Solver),
}

/// The main application state
pub struct App {
    pub board: Board,
    /// Currently selected cell position
    pub cursor: Position,
    /// State of the last clicked cell, which decides what the next click does
    pub mode: CellState,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    step_delay: Duration,
}

impl App {
    pub fn new(config: Config) -> MazeResult<Self> {
        let mut grid = Grid::new(config.rows, config.cols)?;
        if let Some(density) = config.wall_density {
            let walls = scatter_walls(&mut grid, density, &mut rand::thread_rng());
            info!("scattered {} walls at density {:.2}", walls, density);
        }
        Ok(Self::with_grid(grid, config))
    }

    pub fn with_grid(grid: Grid, config: Config) -> Self {
        Self {
            board: Board::Editing(grid),
            cursor: Position::new(0, 0),
            mode: CellState::Empty,
            theme: config.theme,
            message: None,
            message_timer: 0,
            step_delay: config.step_delay,
        }
    }

    pub fn grid(&self) -> &Grid {
        match &self.board {
            Board::Editing(grid) => grid,
            Board::Replaying(solver) => solver.grid(),
        }
    }

    pub fn is_replaying(&self) -> bool {
        matches!(self.board, Board::Replaying(_))
    }

    /// Steps left in the running replay
    pub fn remaining_steps(&self) -> Option<usize> {
        match &self.board {
            Board::Replaying(solver) => Some(solver.remaining_steps()),
            Board::Editing(_) => None,
        }
    }

    /// Replay runs at the configured step delay, editing at a fixed rate
    pub fn get_tick_rate(&self) -> Duration {
        if self.is_replaying() {
            self.step_delay
        } else {
            IDLE_TICK
        }
    }

    /// Update message timer and advance the replay (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        let Board::Replaying(solver) = &mut self.board else {
            return;
        };
        if let Err(e) = solver.next_step() {
            warn!("replay stopped: {}", e);
        }
        if solver.state() != SolveState::InProgress {
            let grid = solver.grid().clone();
            self.board = Board::Editing(grid);
            info!("replay finished");
            self.show_message("Solved!");
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => self.click(self.cursor),
            KeyCode::Char('s') => self.solve(),
            KeyCode::Char('r') => self.reset_visited(),
            KeyCode::Char('w') => self.save_maze(),
            KeyCode::Char('l') => self.load_maze(),
            _ => {}
        }
        AppAction::Continue
    }

    fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        let grid = self.grid();
        let row = self.cursor.row.saturating_add_signed(row_delta).min(grid.rows() - 1);
        let col = self.cursor.col.saturating_add_signed(col_delta).min(grid.cols() - 1);
        self.cursor = Position::new(row, col);
    }

    /// Apply a click to `pos` according to the current mode. Clicking with
    /// start or end mode moves that role here; otherwise the click toggles
    /// a wall or clears the role on the cell. The clicked cell's previous
    /// state becomes the next mode.
    pub fn click(&mut self, pos: Position) {
        let Board::Editing(grid) = &mut self.board else {
            self.show_message("Wait for the solver to finish");
            return;
        };

        let state = match grid.cell_state(pos) {
            Ok(state) => state,
            Err(e) => {
                warn!("click ignored: {}", e);
                return;
            }
        };

        let result = match self.mode {
            CellState::Start => grid.set_start(pos),
            CellState::End => grid.set_end(pos),
            CellState::Wall | CellState::Empty => match state {
                CellState::Empty | CellState::Wall => grid.toggle_wall(pos).map(|_| ()),
                CellState::Start => {
                    grid.clear_start();
                    Ok(())
                }
                CellState::End => {
                    grid.clear_end();
                    Ok(())
                }
                CellState::Visited => Ok(()),
            },
            CellState::Visited => Ok(()),
        };

        match result {
            Ok(()) => self.mode = state,
            Err(e) => self.show_message(&e.to_string()),
        }
    }

    /// Search the maze and start the replay if a path exists
    pub fn solve(&mut self) {
        let Board::Editing(grid) = &mut self.board else {
            return;
        };
        if !grid.is_ready() {
            self.show_message("Maze is not ready: place a start and an end");
            return;
        }

        // Marks from an earlier run would block the search
        grid.clear_visited();
        match Solver::new(grid.clone()) {
            Ok(solver) if solver.is_solvable() => {
                let steps = solver.remaining_steps();
                info!("solving in {} steps", steps);
                self.board = Board::Replaying(solver);
                self.show_message(&format!("Solving, {} steps...", steps));
            }
            Ok(_) => {
                info!("maze has no path");
                self.show_message("No path exists");
            }
            Err(e) => self.show_message(&e.to_string()),
        }
    }

    fn reset_visited(&mut self) {
        if let Board::Editing(grid) = &mut self.board {
            grid.clear_visited();
        }
    }

    /// Show a message for a while
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = MESSAGE_TICKS;
    }

    /// Get the save file path
    fn save_path() -> PathBuf {
        crate::data_dir().join("maze_save.json")
    }

    fn save_maze(&mut self) {
        if self.is_replaying() {
            self.show_message("Wait for the solver to finish");
            return;
        }
        let json = SaveState::new(self.grid()).serialize();
        match fs::write(Self::save_path(), json) {
            Ok(_) => self.show_message("Maze saved"),
            Err(e) => {
                warn!("save failed: {}", e);
                self.show_message("Failed to save");
            }
        }
    }

    fn load_maze(&mut self) {
        if self.is_replaying() {
            self.show_message("Wait for the solver to finish");
            return;
        }
        match fs::read_to_string(Self::save_path()) {
            Ok(json) => match SaveState::deserialize(&json) {
                Some(grid) => {
                    self.board = Board::Editing(grid);
                    self.cursor = Position::new(0, 0);
                    self.mode = CellState::Empty;
                    self.show_message("Maze loaded");
                }
                None => self.show_message("Invalid save file"),
            },
            Err(_) => self.show_message("No save file found"),
        }
    }
}

/// Turn a random share of the empty cells into walls. Returns how many
/// walls were placed.
pub fn scatter_walls(grid: &mut Grid, density: f64, rng: &mut impl Rng) -> usize {
    let density = density.clamp(0.0, 1.0);
    let empty: Vec<Position> = grid
        .cells()
        .filter(|&(_, state)| state == CellState::Empty)
        .map(|(pos, _)| pos)
        .collect();

    let mut placed = 0;
    for pos in empty {
        if rng.gen_bool(density) && grid.toggle_wall(pos).is_ok() {
            placed += 1;
        }
    }
    placed
}

/// On-disk save format
#[derive(Serialize, Deserialize)]
pub struct SaveState {
    maze: GridSnapshot,
}

impl SaveState {
    pub fn new(grid: &Grid) -> Self {
        Self {
            maze: grid.snapshot(),
        }
    }

    pub fn serialize(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Parse a save file back into a grid
    pub fn deserialize(json: &str) -> Option<Grid> {
        let state: SaveState = serde_json::from_str(json).ok()?;
        match Grid::from_snapshot(&state.maze) {
            Ok(grid) => Some(grid),
            Err(e) => {
                warn!("rejected save file: {}", e);
                None
            }
        }
    }

    /// Read a save file from an explicit path
    pub fn load(path: &std::path::Path) -> std::io::Result<Grid> {
        let json = fs::read_to_string(path)?;
        Self::deserialize(&json).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, "invalid maze save file")
        })
    }
}
