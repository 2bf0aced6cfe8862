//! Basic example of using the maze engine

use maze_core::{Grid, Position, Solver};

fn main() {
    // Build a maze from its text form
    let layout = "\
S...#.....
.##.#.###.
.#..#...#.
.#.####.#.
...#....#E";
    let mut grid: Grid = layout.parse().expect("valid layout");

    println!("Maze ({} x {}):", grid.rows(), grid.cols());
    println!("{}", grid);

    // Walls can be flipped cell by cell
    grid.toggle_wall(Position::new(0, 4)).expect("cell is a wall");

    let mut solver = Solver::new(&mut grid).expect("maze has a start and an end");
    if !solver.is_solvable() {
        println!("No path exists");
        return;
    }

    println!("Shortest path has {} steps\n", solver.remaining_steps());
    while !solver.is_solved() {
        let step = solver.next_step().expect("steps remain");
        println!("visit {} ({} left)", step, solver.remaining_steps());
    }

    println!("\nSolved maze:");
    println!("{}", grid);
}
