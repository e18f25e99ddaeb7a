//! Toolbar affordances: which navigation controls are enabled or shown.

use std::str::FromStr;

use waypoint_types::error::WaypointError;

/// What the content surface can currently do with its history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavCapability {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Enabled / visible state of the navigation controls.
///
/// Always derived from `(loading, can_go_back, can_go_forward)`; never
/// stored as a source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    pub back_enabled: bool,
    pub forward_enabled: bool,
    pub refresh_visible: bool,
    pub stop_visible: bool,
}

impl ToolbarState {
    /// Resolve the control set. Refresh and stop are mutually exclusive.
    pub fn resolve(loading: bool, can_go_back: bool, can_go_forward: bool) -> Self {
        Self {
            back_enabled: can_go_back,
            forward_enabled: can_go_forward,
            refresh_visible: !loading,
            stop_visible: loading,
        }
    }

    pub fn from_capability(loading: bool, nav: NavCapability) -> Self {
        Self::resolve(loading, nav.can_go_back, nav.can_go_forward)
    }

    /// Opacity for the back button (disabled buttons are dimmed).
    pub fn back_alpha(&self) -> f32 {
        if self.back_enabled { 1.0 } else { 0.5 }
    }

    /// Opacity for the forward button.
    pub fn forward_alpha(&self) -> f32 {
        if self.forward_enabled { 1.0 } else { 0.5 }
    }
}

/// A control the user can activate on the browser toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Tapping the URL text. Deliberately does nothing.
    UrlBar,
    Back,
    Forward,
    Reload,
    Stop,
}

impl ToolbarAction {
    /// Stable identifier used by hosts that route clicks by view id.
    pub fn id(self) -> &'static str {
        match self {
            Self::UrlBar => "display_url",
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Reload => "refresh",
            Self::Stop => "stop",
        }
    }
}

impl FromStr for ToolbarAction {
    type Err = WaypointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "display_url" => Ok(Self::UrlBar),
            "back" => Ok(Self::Back),
            "forward" => Ok(Self::Forward),
            "refresh" => Ok(Self::Reload),
            "stop" => Ok(Self::Stop),
            other => Err(WaypointError::UnknownAction(other.to_string())),
        }
    }
}
