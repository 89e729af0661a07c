use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    List,        // Per-day collapsible listing
    Grid,        // Hour-by-hour week table
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_font_scale")]
    pub font_scale: f32,
    #[serde(default)]
    pub view_mode: ViewMode,
    #[serde(default = "default_grid_start_hour")]
    pub grid_start_hour: u8,
    #[serde(default = "default_grid_end_hour")]
    pub grid_end_hour: u8,
    /// Override for the plan file location; defaults to the platform data dir
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_grid_start_hour() -> u8 {
    6  // 6am
}

fn default_grid_end_hour() -> u8 {
    23  // 11pm
}

fn default_font_scale() -> f32 {
    1.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_scale: 1.0,
            view_mode: ViewMode::List,
            grid_start_hour: 6,
            grid_end_hour: 23,
            data_file: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            serde_json::from_str(&contents)
                .context("Failed to parse config file")
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "weekplan", "weekplan")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Where the plan store lives: the configured override, or
    /// `weekplans.json` in the platform data directory
    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        let proj_dirs = ProjectDirs::from("dev", "weekplan", "weekplan")
            .context("Could not determine data directory")?;
        Ok(proj_dirs.data_dir().join("weekplans.json"))
    }

    /// Hour range for the grid view, clamped to something renderable
    pub fn grid_hours(&self) -> std::ops::Range<u32> {
        let start = (self.grid_start_hour as u32).min(23);
        let end = (self.grid_end_hour as u32).clamp(start + 1, 24);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.font_scale, 1.0);
        assert_eq!(config.view_mode, ViewMode::List);
        assert_eq!(config.grid_hours(), 6..23);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn grid_hours_clamps_inverted_ranges() {
        let config = Config {
            grid_start_hour: 22,
            grid_end_hour: 8,
            ..Config::default()
        };
        assert_eq!(config.grid_hours(), 22..23);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config {
            view_mode: ViewMode::Grid,
            grid_start_hour: 7,
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.view_mode, ViewMode::Grid);
        assert_eq!(back.grid_start_hour, 7);
    }
}
