//! WAYPOINT desktop demo.
//!
//! Runs a scripted browsing session through the navigator with logging
//! collaborators standing in for the web engine and views. An optional
//! TOML config path can be given as the first argument or through
//! `WAYPOINT_CONFIG`.

mod collaborators;
mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};

use waypoint_types::config::NavigatorConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("WAYPOINT_CONFIG").ok())
        .map(PathBuf::from);

    let config = match config_path {
        Some(path) => NavigatorConfig::load(&path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => NavigatorConfig::default(),
    };
    log::info!(
        "Starting WAYPOINT (max cursor speed {}, scroll x{})",
        config.cursor.max_speed,
        config.cursor.scroll_multiplier,
    );

    scenario::run(config)
}
