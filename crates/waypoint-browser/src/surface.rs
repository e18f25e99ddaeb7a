//! Collaborator traits: everything the navigator talks to but does not own.
//!
//! All calls are fire-and-forget from the navigator's point of view. A
//! failing web engine or view layer is never reported back.

use waypoint_types::geometry::Point;

use crate::toolbar::ToolbarState;

// -----------------------------------------------------------------------
// ContentSurface
// -----------------------------------------------------------------------

/// The web engine view that renders the session's page.
pub trait ContentSurface {
    fn load_url(&mut self, url: &str);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);
    fn stop_loading(&mut self);

    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;

    /// URL the engine currently has loaded, if any.
    fn url(&self) -> Option<String>;
    fn title(&self) -> Option<String>;

    /// Start a fling scroll with the given velocity (px/s).
    fn fling_scroll(&mut self, dx: i32, dy: i32);

    fn set_blocking_enabled(&mut self, enabled: bool);

    /// Drop all page state (history, cache, cookies) for this surface.
    fn cleanup(&mut self);
}

// -----------------------------------------------------------------------
// MenuSurface
// -----------------------------------------------------------------------

/// The browser menu, while it is open.
///
/// The navigator only keeps a weak reference; a closed menu is simply
/// not notified.
pub trait MenuSurface {
    fn update_trackers(&mut self, count: u32);
    fn update_loading(&mut self, loading: bool);
    fn dismiss(&mut self);
}

// -----------------------------------------------------------------------
// BrowserChrome
// -----------------------------------------------------------------------

/// Opaque handle to a view the web engine hands over for fullscreen
/// playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentViewHandle(pub u64);

/// The browser's own views: URL bar, progress bar, lock icon, toolbar,
/// and the two containers swapped by fullscreen mode.
pub trait BrowserChrome {
    fn set_url_text(&mut self, text: &str);
    fn set_progress(&mut self, value: u8);
    fn set_progress_visible(&mut self, visible: bool);
    fn set_lock_visible(&mut self, visible: bool);
    fn set_toolbar(&mut self, state: ToolbarState);

    /// Show or hide the container holding chrome and web content.
    fn set_browser_visible(&mut self, visible: bool);

    /// Add a view to the fullscreen container, sized to fill it.
    fn attach_fullscreen_view(&mut self, view: ContentViewHandle);
    /// Remove every view from the fullscreen container.
    fn detach_fullscreen_views(&mut self);
    fn set_fullscreen_container_visible(&mut self, visible: bool);
}

// -----------------------------------------------------------------------
// CursorView
// -----------------------------------------------------------------------

/// The on-screen overlay that draws the virtual pointer.
pub trait CursorView {
    fn set_visible(&mut self, visible: bool);
    fn move_to(&mut self, position: Point);
}

// -----------------------------------------------------------------------
// Telemetry
// -----------------------------------------------------------------------

/// Usage events reported to the host's telemetry pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryEvent {
    Reload,
}

pub trait Telemetry {
    fn record(&mut self, event: TelemetryEvent);
}
