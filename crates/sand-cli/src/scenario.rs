//! Scripted input for a headless run.

use sand_core::{Material, Result, SimConfig};
use sand_world::{Brush, FrameInput};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A brush held at one pixel for a span of frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pour {
    pub x: i32,
    pub y: i32,
    pub material: Material,
    /// First frame (inclusive) the brush is held
    pub start: u64,
    /// Frame (exclusive) the brush is released
    pub end: u64,
}

impl Pour {
    fn active(&self, frame: u64) -> bool {
        (self.start..self.end).contains(&frame)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub sim: SimConfig,
    /// Number of frames to run
    pub frames: u64,
    /// Log statistics every N frames (0 disables)
    pub report_every: u64,
    /// Pours in priority order; the first active one paints each frame
    pub pours: Vec<Pour>,
    /// Where to write the final render snapshot as JSON
    pub dump_frame: Option<String>,
}

impl Default for Scenario {
    fn default() -> Self {
        let pour = |x, material, start, end| Pour {
            x,
            y: 5,
            material,
            start,
            end,
        };

        Self {
            sim: SimConfig::default(),
            frames: 600,
            report_every: 100,
            pours: vec![
                pour(400, Material::Sand, 0, 200),
                pour(250, Material::Water, 100, 300),
                pour(550, Material::Lava, 150, 350),
                pour(300, Material::Vapor, 400, 450),
            ],
            dump_frame: None,
        }
    }
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&text)?;
        scenario.sim.validate()?;
        Ok(scenario)
    }

    /// Input for the given frame, emulating a held pointer
    pub fn input_for(&self, frame: u64) -> FrameInput {
        FrameInput {
            brush: self
                .pours
                .iter()
                .find(|pour| pour.active(frame))
                .map(|pour| Brush {
                    x: pour.x,
                    y: pour.y,
                    material: pour.material,
                }),
        }
    }
}
