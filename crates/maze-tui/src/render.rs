use crate::app::App;
use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use maze_core::{CellState, Position};
use std::io;

/// Each cell is drawn 3 chars wide: " S "
const CELL_WIDTH: u16 = 3;
/// Width reserved for the info panel to the right of the grid
const PANEL_WIDTH: u16 = 28;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    let grid = app.grid();
    let (grid_width, grid_height) = grid_extent(grid.rows(), grid.cols());

    let total_width = grid_width.saturating_add(3 + PANEL_WIDTH);
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y: u16 = if term_height > grid_height.saturating_add(6) { 2 } else { 1 };
    let below = start_y.saturating_add(grid_height);

    render_grid(stdout, app, start_x, start_y)?;
    render_info_panel(stdout, app, start_x.saturating_add(grid_width).saturating_add(3), start_y)?;
    render_controls(stdout, app, start_x, below.saturating_add(1))?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width, below.saturating_add(3))?;
    }

    execute!(stdout, Show)?;
    Ok(())
}

/// Terminal coordinate for a row or column count, pinned at the edge
fn to_coord(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Width and height of the bordered grid in terminal cells
fn grid_extent(rows: usize, cols: usize) -> (u16, u16) {
    let width = to_coord(cols).saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = to_coord(rows).saturating_add(2);
    (width, height)
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let grid = app.grid();
    let horizontal = "-".repeat(grid.cols() * CELL_WIDTH as usize);

    // +------------------------------+
    // | S                            |
    // |    ###                       |
    // |                            E |
    // +------------------------------+
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(format!("+{}+", horizontal))
    )?;

    for row in 0..grid.rows() {
        let cell_y = y.saturating_add(1).saturating_add(to_coord(row));
        execute!(
            stdout,
            MoveTo(x, cell_y),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
        for col in 0..grid.cols() {
            render_cell(stdout, app, Position::new(row, col))?;
        }
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|")
        )?;
    }

    execute!(
        stdout,
        MoveTo(x, y.saturating_add(1).saturating_add(to_coord(grid.rows()))),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(format!("+{}+", horizontal))
    )?;
    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let state = app.grid().cell_state(pos).unwrap_or(CellState::Wall);
    let label = Theme::cell_label(state);

    let (left, right) = if pos == app.cursor && !app.is_replaying() {
        ('[', ']')
    } else {
        (' ', ' ')
    };

    execute!(
        stdout,
        SetBackgroundColor(theme.cell_bg(state)),
        SetForegroundColor(theme.cursor),
        Print(left),
        SetForegroundColor(theme.fg),
        Print(label),
        SetForegroundColor(theme.cursor),
        Print(right)
    )?;
    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let grid = app.grid();

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print("MAZE SOLVER"),
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Size:   {} x {}", grid.rows(), grid.cols()))
    )?;

    let (status, color) = match app.remaining_steps() {
        Some(left) => (format!("Solving, {} left", left), theme.success),
        None if grid.is_ready() => ("Editing".to_string(), theme.info),
        None => ("Needs start and end".to_string(), theme.error),
    };
    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print("Status: "),
        SetForegroundColor(color),
        Print(status),
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!("Click:  {}", mode_label(app.mode))),
        MoveTo(x, y + 5),
        Print(format!("Cursor: {}", app.cursor))
    )?;

    let legend = [
        (CellState::Start, "Start"),
        (CellState::End, "End"),
        (CellState::Wall, "Wall"),
        (CellState::Visited, "Path"),
    ];
    for (i, (state, name)) in legend.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + 7 + i as u16),
            SetBackgroundColor(theme.cell_bg(*state)),
            SetForegroundColor(theme.fg),
            Print(format!(" {} ", Theme::cell_label(*state))),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.info),
            Print(format!(" {}", name))
        )?;
    }
    Ok(())
}

/// What the next click will do
fn mode_label(mode: CellState) -> &'static str {
    match mode {
        CellState::Start => "place start",
        CellState::End => "place end",
        CellState::Wall | CellState::Empty => "toggle wall",
        CellState::Visited => "nothing",
    }
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let controls: &[(&str, &str)] = if app.is_replaying() {
        &[("q", "quit")]
    } else {
        &[
            ("arrows", "move"),
            ("space", "click"),
            ("s", "solve"),
            ("r", "reset"),
            ("w", "save"),
            ("l", "load"),
            ("q", "quit"),
        ]
    };

    execute!(stdout, MoveTo(x, y), SetBackgroundColor(theme.bg))?;
    for (key, action) in controls {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(key),
            SetForegroundColor(theme.info),
            Print(format!(" {}  ", action))
        )?;
    }
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let x = term_width.saturating_sub(to_coord(msg.len()).saturating_add(4)) / 2;
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.key),
        Print(format!("[ {} ]", msg))
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_extent() {
        assert_eq!(grid_extent(13, 10), (32, 15));
        assert_eq!(grid_extent(1, 1), (5, 3));
    }

    #[test]
    fn test_grid_extent_saturates() {
        assert_eq!(grid_extent(70_000, 30_000), (u16::MAX, u16::MAX));
        assert_eq!(grid_extent(3, usize::MAX), (u16::MAX, 5));
    }
}
