//! Configuration types for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tuning for the per-tick material rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Lower bound (inclusive) of a fresh vapor lifetime, in ticks
    pub vapor_lifetime_min: u32,
    /// Upper bound (exclusive) of a fresh vapor lifetime, in ticks
    pub vapor_lifetime_max: u32,
    /// Chance per tick that vapor rises into an empty cell above
    pub vapor_rise_chance: f64,
    /// Chance that a reacting cell becomes rock instead of vapor
    pub rock_chance: f64,
    /// Chance that a blocked liquid tries the left side before the right
    pub liquid_left_first_chance: f64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            vapor_lifetime_min: 300,
            vapor_lifetime_max: 600,
            vapor_rise_chance: 0.5,
            rock_chance: 0.1,
            liquid_left_first_chance: 0.5,
        }
    }
}

impl RuleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.vapor_lifetime_min == 0 || self.vapor_lifetime_min >= self.vapor_lifetime_max {
            return Err(Error::Validation(format!(
                "vapor lifetime range [{}, {}) must be non-empty and start above zero",
                self.vapor_lifetime_min, self.vapor_lifetime_max
            )));
        }

        let chances = [
            ("vapor_rise_chance", self.vapor_rise_chance),
            ("rock_chance", self.rock_chance),
            ("liquid_left_first_chance", self.liquid_left_first_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Validation(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Largest grid (columns times rows) a startup viewport may produce
pub const MAX_GRID_CELLS: u64 = 1 << 24;

/// Simulation configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Edge length of one grid cell, in pixels
    pub cell_size: u32,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of creature ticks between dog steps
    pub dog_move_delay: u32,
    /// Pixel position of the dog placed at startup, if any
    pub initial_dog: Option<(i32, i32)>,
    /// Material rule tuning
    pub rules: RuleConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            viewport_width: 800,
            viewport_height: 600,
            seed: 0,
            dog_move_delay: 10,
            initial_dog: Some((150, 150)),
            rules: RuleConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(Error::Validation("cell_size must be positive".to_string()));
        }
        if self.dog_move_delay == 0 {
            return Err(Error::Validation(
                "dog_move_delay must be positive".to_string(),
            ));
        }
        let (width, height) = self.grid_dimensions(self.viewport_width, self.viewport_height);
        if width as u64 * height as u64 > MAX_GRID_CELLS {
            return Err(Error::Validation(format!(
                "viewport yields a {}x{} grid, over the {} cell limit",
                width, height, MAX_GRID_CELLS
            )));
        }
        self.rules.validate()
    }

    /// Grid dimensions (columns, rows) for a viewport of the given pixel size.
    /// Each axis saturates at `i32::MAX`.
    pub fn grid_dimensions(&self, pixel_width: u32, pixel_height: u32) -> (i32, i32) {
        let cells = |pixels: u32| (pixels / self.cell_size.max(1)).min(i32::MAX as u32) as i32;
        (cells(pixel_width), cells(pixel_height))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
