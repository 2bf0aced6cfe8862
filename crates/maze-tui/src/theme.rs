use clap::ValueEnum;
use crossterm::style::Color;
use maze_core::CellState;

/// Named color themes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Dark,
    Light,
    HighContrast,
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Wall cell background
    pub wall: Color,
    /// Empty cell background
    pub empty: Color,
    /// Start cell background
    pub start: Color,
    /// End cell background
    pub end: Color,
    /// Visited (path) cell background
    pub visited: Color,
    /// Cursor marker color
    pub cursor: Color,
    /// Error/unsolvable color
    pub error: Color,
    /// Success/solved color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl From<ThemeName> for Theme {
    fn from(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Theme::dark(),
            ThemeName::Light => Theme::light(),
            ThemeName::HighContrast => Theme::high_contrast(),
        }
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            wall: Color::Rgb { r: 90, g: 95, b: 115 },
            empty: Color::Rgb { r: 35, g: 40, b: 55 },
            start: Color::Rgb { r: 60, g: 170, b: 90 },
            end: Color::Rgb { r: 200, g: 70, b: 70 },
            visited: Color::Rgb { r: 70, g: 120, b: 220 },
            cursor: Color::Rgb { r: 255, g: 210, b: 100 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            wall: Color::Rgb { r: 60, g: 60, b: 80 },
            empty: Color::Rgb { r: 230, g: 232, b: 242 },
            start: Color::Rgb { r: 40, g: 160, b: 60 },
            end: Color::Rgb { r: 220, g: 50, b: 50 },
            visited: Color::Rgb { r: 120, g: 170, b: 255 },
            cursor: Color::Rgb { r: 200, g: 120, b: 20 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            wall: Color::White,
            empty: Color::Black,
            start: Color::Green,
            end: Color::Red,
            visited: Color::Blue,
            cursor: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }

    /// Background color for a cell in the given state
    pub fn cell_bg(&self, state: CellState) -> Color {
        match state {
            CellState::Wall => self.wall,
            CellState::Empty => self.empty,
            CellState::Start => self.start,
            CellState::End => self.end,
            CellState::Visited => self.visited,
        }
    }

    /// Label drawn inside a cell
    pub fn cell_label(state: CellState) -> char {
        match state {
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Visited => '*',
            CellState::Wall | CellState::Empty => ' ',
        }
    }
}
