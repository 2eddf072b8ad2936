// SPDX-License-Identifier: MIT OR Apache-2.0

//! Player settings stored as TOML in the platform config directory

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tripeg_core::{GameError, MIN_ROWS};

/// Largest board the terminal renderer lays out
pub const MAX_ROWS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Rows on the board
    #[serde(default = "default_rows")]
    pub rows: usize,
    /// Hole taken out automatically when the game starts
    #[serde(default)]
    pub first_peg: Option<usize>,
    /// Print hole ids next to each hole
    #[serde(default = "default_show_ids")]
    pub show_ids: bool,
}

fn default_rows() -> usize {
    5
}

fn default_show_ids() -> bool {
    true
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            first_peg: None,
            show_ids: default_show_ids(),
        }
    }
}

impl CliConfig {
    /// Reject settings no game can start from
    pub fn validate(&self) -> Result<()> {
        if self.rows < MIN_ROWS {
            return Err(GameError::TooFewRows {
                rows: self.rows,
                min: MIN_ROWS,
            }
            .into());
        }
        if self.rows > MAX_ROWS {
            bail!("Board can have at most {} rows, got {}", MAX_ROWS, self.rows);
        }

        let holes = self.rows * (self.rows + 1) / 2;
        if let Some(first) = self.first_peg {
            if first >= holes {
                bail!("First peg {} is not on a {}-row board (holes 0..{})", first, self.rows, holes);
            }
        }

        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("io", "tripeg", "tripeg")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Load settings from the default location
pub fn load_config() -> Result<CliConfig> {
    let config_path = get_config_path().context("Failed to determine config path")?;
    load_config_from(&config_path)
}

/// Load settings from `config_path`, writing the defaults there if the file doesn't exist
pub fn load_config_from(config_path: &Path) -> Result<CliConfig> {
    if !config_path.exists() {
        tracing::info!("Config file not found, creating default at: {}", config_path.display());

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = CliConfig::default();
        save_config_to(config_path, &default_config)?;
        return Ok(default_config);
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

    toml::from_str::<CliConfig>(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

pub fn save_config_to(config_path: &Path, config: &CliConfig) -> Result<()> {
    let toml_content = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(config_path, toml_content)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    tracing::info!("Saved config to: {}", config_path.display());
    Ok(())
}
