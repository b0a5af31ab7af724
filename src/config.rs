//! User configuration (`config.toml`).
//!
//! ```toml
//! [grid]
//! rows = 20
//! cols = 10
//!
//! [display]
//! column_width = 9
//! ```
//!
//! Problems with the file never stop the program: they are collected as
//! warnings and the defaults are used instead.

use anyhow::{Context, bail};
use cellgrid_core::sheet::{DEFAULT_COLS, DEFAULT_ROWS};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;
const DEFAULT_COLUMN_WIDTH: usize = 9;
const MIN_COLUMN_WIDTH: usize = 3;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    grid: Option<GridSection>,
    display: Option<DisplaySection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct GridSection {
    rows: Option<usize>,
    cols: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    column_width: Option<usize>,
}

/// Effective settings after defaults, file and command line are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    pub column_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl Config {
    /// Parse config text on top of the defaults.
    pub fn parse(content: &str) -> anyhow::Result<Config> {
        let file: ConfigFile = toml::from_str(content).context("invalid config")?;
        let mut config = Config::default();
        if let Some(grid) = file.grid {
            config.rows = grid.rows.unwrap_or(config.rows);
            config.cols = grid.cols.unwrap_or(config.cols);
        }
        if let Some(display) = file.display {
            config.column_width = display.column_width.unwrap_or(config.column_width);
        }
        if config.column_width < MIN_COLUMN_WIDTH {
            bail!(
                "column_width must be at least {} (got {})",
                MIN_COLUMN_WIDTH,
                config.column_width
            );
        }
        Ok(config)
    }

    fn read(path: &Path) -> anyhow::Result<Config> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for {}", path.display()))?;
        if meta.len() > MAX_CONFIG_FILE_BYTES {
            bail!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            );
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Config::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Load the config from `config_file`, or from the user config dir when none is given.
///
/// Returns the config plus any warnings to show the user.
pub fn load_config(config_file: Option<&PathBuf>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    match Config::read(&path) {
        Ok(config) => (config, warnings),
        Err(err) => {
            warnings.push(format!("{:#}", err));
            (Config::default(), warnings)
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellgrid")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
