mod app;
mod render;
mod theme;

use app::{App, Config, SaveState};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use theme::ThemeName;

/// Largest row or column count the terminal layout can address
const MAX_SIDE: i64 = 1000;

/// Draw a maze in the terminal and watch its shortest path get solved
#[derive(Parser, Debug)]
#[command(name = "maze", version)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = maze_core::DEFAULT_ROWS as u16, value_parser = clap::value_parser!(u16).range(1..=MAX_SIDE))]
    rows: u16,

    /// Number of columns
    #[arg(long, default_value_t = maze_core::DEFAULT_COLS as u16, value_parser = clap::value_parser!(u16).range(1..=MAX_SIDE))]
    cols: u16,

    /// Pause between two replayed steps, in milliseconds
    #[arg(long, default_value_t = 400)]
    delay_ms: u64,

    /// Scatter random walls over this share of the empty cells (0.0 to 1.0)
    #[arg(long, value_parser = parse_density)]
    walls: Option<f64>,

    /// Start from a saved maze instead of an empty one
    #[arg(long)]
    load: Option<PathBuf>,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeName::Dark)]
    theme: ThemeName,
}

fn parse_density(s: &str) -> Result<f64, String> {
    let density: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(format!("density must be between 0.0 and 1.0, got {}", density))
    }
}

/// Directory for the save file and the log
pub fn data_dir() -> PathBuf {
    ensure_dir(dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")))
}

/// Create `dir` if needed, falling back to the working directory when that
/// fails.
fn ensure_dir(dir: PathBuf) -> PathBuf {
    match fs::create_dir_all(&dir) {
        Ok(()) => dir,
        Err(e) => {
            warn!("cannot create {}: {}, using the working directory", dir.display(), e);
            PathBuf::from(".")
        }
    }
}

/// The terminal owns stdout and stderr, so log lines go to a file.
fn init_logging() {
    let path = data_dir().join("maze.log");
    match File::create(&path) {
        Ok(file) => {
            let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .try_init();
        }
        Err(e) => eprintln!("Logging disabled, cannot open {}: {}", path.display(), e),
    }
}

fn build_app(args: Args) -> io::Result<App> {
    let config = Config {
        rows: args.rows.into(),
        cols: args.cols.into(),
        step_delay: Duration::from_millis(args.delay_ms),
        wall_density: args.walls,
        theme: args.theme.into(),
    };

    match args.load {
        Some(path) => {
            let grid = SaveState::load(&path)?;
            info!("loaded maze from {}", path.display());
            Ok(App::with_grid(grid, config))
        }
        None => App::new(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e)),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging();

    let mut app = build_app(args)?;
    info!("starting with a {}x{} maze", app.grid().rows(), app.grid().cols());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        error!("terminal error: {}", e);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // Replay pacing comes from the app
        let tick_rate = app.get_tick_rate();

        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for replay updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                // Handle Ctrl+C
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["maze"]);
        assert_eq!(args.rows, 13);
        assert_eq!(args.cols, 10);
        assert_eq!(args.load, None);
        assert_eq!(args.delay_ms, 400);
        assert_eq!(args.walls, None);
        assert_eq!(args.theme, ThemeName::Dark);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "maze", "--rows", "5", "--cols", "7", "--delay-ms", "50", "--walls", "0.3",
            "--theme", "high-contrast",
        ]);
        assert_eq!((args.rows, args.cols), (5, 7));
        assert_eq!(args.delay_ms, 50);
        assert_eq!(args.walls, Some(0.3));
        assert_eq!(args.theme, ThemeName::HighContrast);
    }

    #[test]
    fn test_density_out_of_range_rejected() {
        assert!(Args::try_parse_from(["maze", "--walls", "1.5"]).is_err());
        assert!(Args::try_parse_from(["maze", "--walls", "lots"]).is_err());
    }

    #[test]
    fn test_grid_size_limits() {
        assert!(Args::try_parse_from(["maze", "--cols", "0"]).is_err());
        assert!(Args::try_parse_from(["maze", "--rows", "0"]).is_err());
        assert!(Args::try_parse_from(["maze", "--rows", "70000"]).is_err());
        assert!(Args::try_parse_from(["maze", "--cols", "1001"]).is_err());

        let args = Args::parse_from(["maze", "--rows", "1000", "--cols", "1"]);
        let app = build_app(args).ok().unwrap();
        assert_eq!((app.grid().rows(), app.grid().cols()), (1000, 1));
    }

    #[test]
    fn test_ensure_dir_falls_back_when_blocked() {
        // A regular file cannot hold a subdirectory
        let file = std::env::temp_dir().join(format!("maze-ensure-dir-{}", std::process::id()));
        fs::write(&file, b"").unwrap();
        assert_eq!(ensure_dir(file.join("sub")), PathBuf::from("."));
        fs::remove_file(&file).unwrap();

        let dir = std::env::temp_dir();
        assert_eq!(ensure_dir(dir.clone()), dir);
    }
}
