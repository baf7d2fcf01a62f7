//! Headless runner: drives a simulation through a scripted scenario.

mod render;
mod scenario;
mod telemetry;

use anyhow::{Context, Result};
use sand_world::Simulation;
use scenario::Scenario;
use tracing::{debug, info};

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::load(&path)
            .with_context(|| format!("failed to load scenario from {}", path))?,
        None => Scenario::default(),
    };

    let mut sim = Simulation::new(scenario.sim.clone()).context("invalid simulation config")?;
    info!(frames = scenario.frames, pours = scenario.pours.len(), "Starting scenario");

    for frame in 0..scenario.frames {
        let report = sim.frame_step(&scenario.input_for(frame));
        debug!(frame, placed = report.placed, dog = ?report.dog, "Frame done");

        if scenario.report_every > 0 && frame % scenario.report_every == 0 {
            info!(
                frame,
                active = report.stats.active,
                moved = report.stats.moved,
                reactions = report.stats.reactions,
                condensed = report.stats.condensed,
                "Frame {}/{}",
                frame,
                scenario.frames
            );
        }
    }

    for (material, count) in sim.population() {
        info!(%material, count, "Final population");
    }

    let frame = sim.frame();
    print!("{}", render::render_ascii(&frame));

    if let Some(path) = &scenario.dump_frame {
        let json = serde_json::to_string_pretty(&frame).context("failed to encode frame")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path))?;
        info!(path = %path, "Frame snapshot written");
    }

    Ok(())
}
