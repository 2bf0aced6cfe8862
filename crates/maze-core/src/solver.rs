//! Breadth-first path solving and stepwise replay.
//!
//! The path is computed once when the [`Solver`] is built. Replaying it marks
//! one cell per [`Solver::next_step`] call as visited on the underlying grid.
//!
//! The solver does not notice edits made to the grid after construction. A
//! caller that lets the grid change mid-replay gets a plan computed for the
//! old layout, so editing should be locked while a replay is running.

use crate::{CellState, Grid, MazeError, Position, Result};
use log::debug;
use std::borrow::{Borrow, BorrowMut};
use std::collections::VecDeque;

/// Where the replay stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveState {
    /// No path connects start and end
    Unsolvable,
    /// Steps remain to be replayed
    InProgress,
    /// Every step has been replayed
    Solved,
}

/// Shortest-path solver over a ready grid.
///
/// `G` is anything that lends out a mutable [`Grid`]: pass `&mut grid` to
/// keep ownership with the caller, or move the grid in and take it back with
/// [`Solver::into_inner`].
#[derive(Debug)]
pub struct Solver<G = Grid> {
    grid: G,
    /// Path from the cell after start up to and including end
    plan: Option<Vec<Position>>,
    /// Index of the next step to replay
    cursor: usize,
}

impl<G: BorrowMut<Grid>> Solver<G> {
    /// Run the search. Fails if the grid has no start or no end.
    pub fn new(grid: G) -> Result<Self> {
        let (start, end) = {
            let g: &Grid = grid.borrow();
            match (g.start(), g.end()) {
                (Some(start), Some(end)) => (start, end),
                _ => return Err(MazeError::NotReady),
            }
        };

        let plan = shortest_path(grid.borrow(), start, end);
        match &plan {
            Some(path) => debug!("path from {} to {} found, {} steps", start, end, path.len()),
            None => debug!("no path from {} to {}", start, end),
        }

        Ok(Self {
            grid,
            plan,
            cursor: 0,
        })
    }

    pub fn grid(&self) -> &Grid {
        self.grid.borrow()
    }

    pub fn into_inner(self) -> G {
        self.grid
    }

    pub fn is_solvable(&self) -> bool {
        self.plan.is_some()
    }

    pub fn remaining_steps(&self) -> usize {
        self.plan.as_ref().map_or(0, |plan| plan.len() - self.cursor)
    }

    /// True once a path exists and all of it has been replayed. Never true
    /// for an unsolvable maze.
    pub fn is_solved(&self) -> bool {
        self.is_solvable() && self.remaining_steps() == 0
    }

    pub fn state(&self) -> SolveState {
        match &self.plan {
            None => SolveState::Unsolvable,
            Some(plan) if self.cursor < plan.len() => SolveState::InProgress,
            Some(_) => SolveState::Solved,
        }
    }

    /// The whole plan in replay order, empty when unsolvable
    pub fn path(&self) -> &[Position] {
        self.plan.as_deref().unwrap_or(&[])
    }

    /// Replay the next cell of the path, marking it visited on the grid.
    pub fn next_step(&mut self) -> Result<Position> {
        let pos = match &self.plan {
            Some(plan) if self.cursor < plan.len() => plan[self.cursor],
            _ => return Err(MazeError::NoStepsRemaining),
        };
        self.grid.borrow_mut().mark_visited(pos)?;
        self.cursor += 1;
        Ok(pos)
    }
}

/// Neighbours of `pos` the search may step onto, in the fixed order up,
/// down, left, right. Only empty cells and the end are passable; the start
/// is never re-entered.
fn reachable_neighbors(grid: &Grid, searched: &[bool], pos: Position) -> Vec<Position> {
    let mut candidates = Vec::with_capacity(4);
    if pos.row > 0 {
        candidates.push(Position::new(pos.row - 1, pos.col));
    }
    candidates.push(Position::new(pos.row + 1, pos.col));
    if pos.col > 0 {
        candidates.push(Position::new(pos.row, pos.col - 1));
    }
    candidates.push(Position::new(pos.row, pos.col + 1));

    candidates
        .into_iter()
        .filter(|&n| grid.in_bounds(n))
        .filter(|&n| !searched[n.row * grid.cols() + n.col])
        .filter(|&n| matches!(grid.state_unchecked(n), CellState::Empty | CellState::End))
        .collect()
}

/// BFS from `start`, stopping as soon as `end` is discovered. Returns the
/// path ordered start to end with the start itself left out.
fn shortest_path(grid: &Grid, start: Position, end: Position) -> Option<Vec<Position>> {
    let cols = grid.cols();
    let idx = |p: Position| p.row * cols + p.col;

    let mut searched = vec![false; grid.rows() * cols];
    let mut previous: Vec<Option<Position>> = vec![None; grid.rows() * cols];
    let mut queue = VecDeque::new();

    searched[idx(start)] = true;
    queue.push_back(start);

    let mut reached_end = false;
    while let Some(current) = queue.pop_front() {
        let neighbors = reachable_neighbors(grid, &searched, current);
        for &n in &neighbors {
            searched[idx(n)] = true;
            previous[idx(n)] = Some(current);
            queue.push_back(n);
        }
        if neighbors.contains(&end) {
            reached_end = true;
            break;
        }
    }

    if !reached_end {
        return None;
    }

    let mut path = Vec::new();
    let mut current = end;
    while current != start {
        path.push(current);
        current = previous[idx(current)]?;
    }
    path.reverse();
    Some(path)
}
