use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "custom-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Side length of one logical cell in canvas pixels.
pub const CELL_SIZE_PX: u16 = 10;

/// Default canvas width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u16 = 600;

/// Default canvas height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: u16 = 400;

/// Cell the snake head starts on after every reset.
pub const SPAWN_CELL: (i32, i32) = (10, 10);

/// Fill color for snake segments.
pub const SNAKE_COLOR: Color = Color::Green;

/// Fill color for food.
pub const FOOD_COLOR: Color = Color::Red;

/// Background color for the play area.
pub const CANVAS_BG: Color = Color::Black;

/// Upper half-block glyph for compositing two cells into one terminal row.
pub const GLYPH_HALF_UPPER: &str = "▀";

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Derives the grid from a pixel canvas. Each axis is at least one cell.
    #[must_use]
    pub fn from_canvas(canvas_width: u16, canvas_height: u16, cell_px: u16) -> Self {
        let cell_px = cell_px.max(1);
        Self {
            width: (canvas_width / cell_px).max(1),
            height: (canvas_height / cell_px).max(1),
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Boundary policy for a run.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Leaving the grid ends the game.
    #[default]
    Classic,
    /// Leaving the grid re-enters at the opposite edge.
    Modern,
}

impl Mode {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Classic => Self::Modern,
            Self::Modern => Self::Classic,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Modern => "Modern",
        }
    }
}

/// Speed tier. Each tier maps to a fixed tick interval.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Returns the timer interval for this tier.
    #[must_use]
    pub fn tick_interval(self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(100),
            Self::Hard => Duration::from_millis(50),
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Where replacement food may appear.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPolicy {
    /// Uniform over the whole grid, snake cells included.
    #[default]
    Anywhere,
    /// Uniform over cells the snake does not occupy.
    AvoidSnake,
}

/// Startup settings, read from an optional JSON file and overridden by CLI flags.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub canvas_width: u16,
    pub canvas_height: u16,
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub food_policy: FoodPolicy,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            mode: Mode::default(),
            difficulty: Difficulty::default(),
            food_policy: FoodPolicy::default(),
            seed: None,
        }
    }
}

impl Settings {
    /// Returns the logical grid for the configured canvas.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize::from_canvas(self.canvas_width, self.canvas_height, CELL_SIZE_PX)
    }

    /// Loads settings from `explicit` when given, otherwise from the
    /// platform config file. A missing default file yields defaults; a
    /// missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => load_settings_from_path(path),
            None => match default_config_path() {
                Some(path) if path.exists() => load_settings_from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }
}

/// Returns the platform-correct settings file path, if a config dir exists.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

fn load_settings_from_path(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_settings(&raw).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_settings(raw: &str) -> std::result::Result<Settings, serde_json::Error> {
    serde_json::from_str(raw)
}
