//! Platform service traits and desktop implementation.

use waypoint_types::error::{Result, WaypointError};

// ---------------------------------------------------------------------------
// Platform chrome service
// ---------------------------------------------------------------------------

/// How the platform presents its own system bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemUiMode {
    /// Status and navigation bars visible, content laid out below them.
    Standard,
    /// System bars hidden; they can be revealed transiently by gesture
    /// and hide again on their own.
    Immersive,
}

impl std::fmt::Display for SystemUiMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Immersive => write!(f, "immersive"),
        }
    }
}

/// Abstraction over the window-level chrome the browser does not draw
/// itself: system bars and the keep-awake flag.
///
/// The keep-awake flag doubles as the persisted record of whether
/// immersive mode is active, so callers query it rather than tracking
/// their own copy.
pub trait PlatformChrome {
    /// Switch the system bars to the given mode.
    fn set_system_ui(&mut self, mode: SystemUiMode) -> Result<()>;

    /// Set or clear the keep-screen-on window flag.
    fn set_keep_screen_on(&mut self, on: bool) -> Result<()>;

    /// Current value of the keep-screen-on window flag.
    fn keep_screen_on(&self) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// Accessibility service
// ---------------------------------------------------------------------------

/// Abstraction over platform accessibility state.
pub trait AccessibilityService {
    /// Whether a screen reader with its own navigation mode is running.
    fn screen_reader_active(&self) -> bool;
}

// ---------------------------------------------------------------------------
// Unified platform trait
// ---------------------------------------------------------------------------

/// Aggregate trait providing access to all platform services.
pub trait Platform: PlatformChrome + AccessibilityService {}

// ---------------------------------------------------------------------------
// Desktop implementation
// ---------------------------------------------------------------------------

/// Default platform implementation for desktop hosts.
///
/// There are no real system bars on desktop, so the chrome state is only
/// recorded (and logged) for the host to render however it likes.
pub struct DesktopPlatform {
    window_attached: bool,
    ui_mode: SystemUiMode,
    keep_screen_on: bool,
    screen_reader: bool,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self {
            window_attached: true,
            ui_mode: SystemUiMode::Standard,
            keep_screen_on: false,
            screen_reader: false,
        }
    }

    /// Simulate the hosting window going away (or coming back).
    pub fn set_window_attached(&mut self, attached: bool) {
        self.window_attached = attached;
    }

    /// Toggle the simulated screen reader.
    pub fn set_screen_reader(&mut self, active: bool) {
        self.screen_reader = active;
    }

    /// Current system bar mode.
    pub fn ui_mode(&self) -> SystemUiMode {
        self.ui_mode
    }

    fn window(&self) -> Result<()> {
        if self.window_attached {
            Ok(())
        } else {
            Err(WaypointError::Platform("no window attached".into()))
        }
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformChrome for DesktopPlatform {
    fn set_system_ui(&mut self, mode: SystemUiMode) -> Result<()> {
        self.window()?;
        log::debug!("System UI: {} -> {}", self.ui_mode, mode);
        self.ui_mode = mode;
        Ok(())
    }

    fn set_keep_screen_on(&mut self, on: bool) -> Result<()> {
        self.window()?;
        self.keep_screen_on = on;
        Ok(())
    }

    fn keep_screen_on(&self) -> Result<bool> {
        self.window()?;
        Ok(self.keep_screen_on)
    }
}

impl AccessibilityService for DesktopPlatform {
    fn screen_reader_active(&self) -> bool {
        self.screen_reader
    }
}

impl Platform for DesktopPlatform {}

// ---------------------------------------------------------------------------
// In-module tests
// ---------------------------------------------------------------------------
