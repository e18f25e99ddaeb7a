//! Navigator configuration, loadable from TOML.
//!
//! Every section and field has a default, so an empty file (or no file
//! at all) yields [`NavigatorConfig::default`].

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, WaypointError};

/// Cursor movement tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Speed gained per tick while a direction is held (px/tick).
    pub acceleration: f32,
    /// Speed ceiling (px/tick).
    pub max_speed: f32,
    /// Multiplier applied to speed on each idle tick.
    pub friction: f32,
    /// Speed below this threshold snaps to zero.
    pub speed_epsilon: f32,
    /// Fling velocity per unit of cursor speed on an edge hit.
    pub scroll_multiplier: i32,
    /// Start in the viewport center (true) or the top-left corner.
    pub start_centered: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.8,
            max_speed: 25.0,
            friction: 0.8,
            speed_epsilon: 0.1,
            scroll_multiplier: 45,
            start_centered: true,
        }
    }
}

/// Progress indicator tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Value shown as soon as a load starts, so the bar is visible
    /// before the engine reports any progress.
    pub initial_progress: u8,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            initial_progress: 5,
        }
    }
}

/// Rules deciding when the virtual cursor is offered.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EligibilityConfig {
    /// URL substrings of pages that bring their own remote navigation.
    pub hostile_url_patterns: Vec<String>,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            hostile_url_patterns: vec!["youtube.com/tv".to_string()],
        }
    }
}

/// Top-level navigator configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub cursor: CursorConfig,
    pub progress: ProgressConfig,
    pub eligibility: EligibilityConfig,
}

impl NavigatorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loaded navigator config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Reject values the cursor engine or binder cannot work with.
    pub fn validate(&self) -> Result<()> {
        let c = &self.cursor;
        if !c.max_speed.is_finite() || c.max_speed <= 0.0 {
            return Err(WaypointError::Config(format!(
                "cursor.max_speed must be positive and finite, got {}",
                c.max_speed
            )));
        }
        if !c.acceleration.is_finite() || c.acceleration <= 0.0 {
            return Err(WaypointError::Config(format!(
                "cursor.acceleration must be positive and finite, got {}",
                c.acceleration
            )));
        }
        if !(0.0..1.0).contains(&c.friction) {
            return Err(WaypointError::Config(format!(
                "cursor.friction must be in [0, 1), got {}",
                c.friction
            )));
        }
        if c.scroll_multiplier <= 0 {
            return Err(WaypointError::Config(format!(
                "cursor.scroll_multiplier must be positive, got {}",
                c.scroll_multiplier
            )));
        }
        if f64::from(c.max_speed) * f64::from(c.scroll_multiplier) > f64::from(i32::MAX) {
            return Err(WaypointError::Config(format!(
                "cursor.max_speed * cursor.scroll_multiplier must fit in i32, got {} * {}",
                c.max_speed, c.scroll_multiplier
            )));
        }
        if !c.speed_epsilon.is_finite() || c.speed_epsilon <= 0.0 {
            return Err(WaypointError::Config(format!(
                "cursor.speed_epsilon must be positive and finite, got {}",
                c.speed_epsilon
            )));
        }
        if self.progress.initial_progress > 100 {
            return Err(WaypointError::Config(format!(
                "progress.initial_progress must be <= 100, got {}",
                self.progress.initial_progress
            )));
        }
        Ok(())
    }

    /// Whether `url` matches one of the cursor-hostile patterns.
    pub fn is_cursor_hostile(&self, url: &str) -> bool {
        self.eligibility
            .hostile_url_patterns
            .iter()
            .any(|pattern| url.contains(pattern.as_str()))
    }
}
