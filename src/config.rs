//! Configuration and palette management for greed.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.greed/config.toml`
//! - Key binding settings
//! - The ten-entry cell palette
//!
//! # Configuration File
//!
//! ```toml
//! height = 22
//! width = 79
//! # seed = 1234
//!
//! [keys]
//! # up-left, up, up-right, left, right, down-left, down, down-right
//! moves = "qweadzxc"
//! quit = " "
//!
//! [palette]
//! highlight = { fg = "dark_grey", bg = "grey" }
//! digits = ["dark_yellow", "dark_red", "dark_green", "dark_blue",
//!           "dark_magenta", "yellow", "red", "green", "cyan"]
//! ```
//!
//! # Color Names
//!
//! `black`, `dark_grey`, `red`, `dark_red`, `green`, `dark_green`, `yellow`,
//! `dark_yellow`, `blue`, `dark_blue`, `magenta`, `dark_magenta`, `cyan`,
//! `dark_cyan`, `white`, `grey`, `reset`, or `#rrggbb`.

use std::fs;
use std::path::{Path, PathBuf};

use crossterm::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::ui::KeyMapper;

/// Default grid height
pub const DEFAULT_HEIGHT: usize = 22;
/// Default grid width
pub const DEFAULT_WIDTH: usize = 79;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Grid dimensions must be positive, got {height}x{width}")]
    Dimensions { height: usize, width: usize },

    #[error("Expected 8 move keys, got {0}")]
    MoveKeyCount(usize),

    #[error("Key {0:?} is bound more than once")]
    DuplicateKey(char),

    #[error("Quit key must be a single character, got {0:?}")]
    QuitKey(String),

    #[error("Palette needs 9 digit colors, got {0}")]
    PaletteSize(usize),

    #[error("Unknown color {0:?}")]
    UnknownColor(String),
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Grid rows
    pub height: usize,
    /// Grid columns
    pub width: usize,
    /// Fixed RNG seed for reproducible boards
    pub seed: Option<u64>,
    pub keys: KeyConfig,
    pub palette: PaletteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
            seed: None,
            keys: KeyConfig::default(),
            palette: PaletteConfig::default(),
        }
    }
}

/// Key binding configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Eight characters in direction order
    pub moves: String,
    pub quit: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            moves: "qweadzxc".to_string(),
            quit: " ".to_string(),
        }
    }
}

/// Foreground/background color names for one style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub fg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
}

/// Palette configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Style for cells on a legal run
    pub highlight: StyleConfig,
    /// Foreground for digits 1 through 9
    pub digits: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            highlight: StyleConfig {
                fg: "dark_grey".to_string(),
                bg: Some("grey".to_string()),
            },
            digits: [
                "dark_yellow",
                "dark_red",
                "dark_green",
                "dark_blue",
                "dark_magenta",
                "yellow",
                "red",
                "green",
                "cyan",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults on any problem
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path.map(Path::to_path_buf).or_else(Self::get_config_path) {
            Some(p) => p,
            None => return Self::default(),
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check the settings a game cannot start without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.height == 0 || self.width == 0 {
            return Err(ConfigError::Dimensions {
                height: self.height,
                width: self.width,
            });
        }
        self.palette()?;
        KeyMapper::from_config(&self.keys)?;
        Ok(())
    }

    /// Resolve the configured palette
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Palette::from_config(&self.palette)
    }

    /// Directory holding the config and log files
    pub fn data_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".greed"))
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("config.toml"))
    }
}

/// Style of one rendered cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Option<Color>,
}

impl CellStyle {
    pub const fn fg(fg: Color) -> Self {
        Self { fg, bg: None }
    }
}

/// Ten styles: index 0 highlights legal runs, 1-9 color the digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    styles: [CellStyle; 10],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            styles: [
                CellStyle {
                    fg: Color::DarkGrey,
                    bg: Some(Color::Grey),
                },
                CellStyle::fg(Color::DarkYellow),
                CellStyle::fg(Color::DarkRed),
                CellStyle::fg(Color::DarkGreen),
                CellStyle::fg(Color::DarkBlue),
                CellStyle::fg(Color::DarkMagenta),
                CellStyle::fg(Color::Yellow),
                CellStyle::fg(Color::Red),
                CellStyle::fg(Color::Green),
                CellStyle::fg(Color::Cyan),
            ],
        }
    }
}

impl Palette {
    pub fn from_config(config: &PaletteConfig) -> Result<Self, ConfigError> {
        if config.digits.len() != 9 {
            return Err(ConfigError::PaletteSize(config.digits.len()));
        }
        let mut palette = Palette::default();
        palette.styles[0] = CellStyle {
            fg: parse_color(&config.highlight.fg)?,
            bg: config.highlight.bg.as_deref().map(parse_color).transpose()?,
        };
        for (i, name) in config.digits.iter().enumerate() {
            palette.styles[i + 1] = CellStyle::fg(parse_color(name)?);
        }
        Ok(palette)
    }

    /// Style for legal-run cells
    pub fn highlight(&self) -> CellStyle {
        self.styles[0]
    }

    /// Style for an unhighlighted fuel digit
    pub fn digit(&self, value: u8) -> CellStyle {
        self.styles[usize::from(value).min(9)]
    }
}

/// Parse a color name or `#rrggbb`
pub fn parse_color(name: &str) -> Result<Color, ConfigError> {
    let lowered = name.trim().to_lowercase().replace('-', "_");
    let color = match lowered.as_str() {
        "black" => Color::Black,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        "red" => Color::Red,
        "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "dark_cyan" => Color::DarkCyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "reset" => Color::Reset,
        hex if hex.len() == 7 && hex.is_ascii() && hex.starts_with('#') => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            match (channel(1), channel(3), channel(5)) {
                (Ok(r), Ok(g), Ok(b)) => Color::Rgb { r, g, b },
                _ => return Err(ConfigError::UnknownColor(name.to_string())),
            }
        }
        _ => return Err(ConfigError::UnknownColor(name.to_string())),
    };
    Ok(color)
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
