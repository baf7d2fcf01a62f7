//! Log subscriber setup for the headless runner.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: debug for the runner and the engine.
const DEFAULT_FILTER: &str = "info,sand_cli=debug,sand_world=debug";

pub fn init_telemetry() -> Result<()> {
    let json = std::env::var("SAND_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr so the rendered grid on stdout stays clean.
    let (plain_layer, json_layer) = if json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (
            Some(fmt::layer().with_target(true).with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(plain_layer)
        .with(json_layer)
        .try_init()?;

    info!(json, "Telemetry initialized");
    Ok(())
}
