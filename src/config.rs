use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::GridPos;
use crate::grid::MIN_GRID_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("grid size {0} is too small, the minimum is 4")]
    GridTooSmall(i32),
    #[error("timer `{0}` must have a non-zero period")]
    ZeroPeriod(&'static str),
    #[error("start position ({col}, {row}) lies outside a {size}x{size} grid")]
    StartOutOfBounds { col: i32, row: i32, size: i32 },
    #[error("storage capacity must be positive")]
    ZeroCapacity,
}

/// Tunables for one run. Every field has a default, so a TOML file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid_size: i32,
    /// Fixed seed for reproducible grids; entropy when absent.
    pub seed: Option<u64>,
    pub start_col: i32,
    pub start_row: i32,
    pub initial_fuel: f64,
    pub storage_capacity: u32,
    pub fuel_decay_ms: u64,
    pub gravity_ms: u64,
    pub ascend_lock_ms: u64,
    pub log_filter: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: 15,
            seed: None,
            start_col: 0,
            start_row: 1,
            initial_fuel: 100.0,
            storage_capacity: 300,
            fuel_decay_ms: 500,
            gravity_ms: 200,
            ascend_lock_ms: 500,
            log_filter: "wgpu=error,naga=warn,deepdrill=debug".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        self.validate_values()?;
        self.check_start(self.grid_size)
    }

    /// Everything except the grid: timer periods and hold capacity.
    pub fn validate_values(&self) -> Result<(), ConfigError> {
        for (name, ms) in [
            ("fuel_decay_ms", self.fuel_decay_ms),
            ("gravity_ms", self.gravity_ms),
            ("ascend_lock_ms", self.ascend_lock_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::ZeroPeriod(name));
            }
        }
        if self.storage_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// The start cell has to exist on a grid of side `size`.
    pub fn check_start(&self, size: i32) -> Result<(), ConfigError> {
        let (col, row) = (self.start_col, self.start_row);
        if col < 0 || row < 0 || col >= size || row >= size {
            return Err(ConfigError::StartOutOfBounds { col, row, size });
        }
        Ok(())
    }

    pub fn start(&self) -> GridPos {
        GridPos::new(self.start_col, self.start_row)
    }

    pub fn fuel_decay_period(&self) -> Duration {
        Duration::from_millis(self.fuel_decay_ms)
    }

    pub fn gravity_period(&self) -> Duration {
        Duration::from_millis(self.gravity_ms)
    }

    pub fn ascend_lock(&self) -> Duration {
        Duration::from_millis(self.ascend_lock_ms)
    }
}
