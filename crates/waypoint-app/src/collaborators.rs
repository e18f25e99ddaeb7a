//! Log-backed stand-ins for the views and web engine a real host would
//! provide.

use std::cell::RefCell;
use std::rc::Rc;

use waypoint_browser::{
    BrowserChrome, ContentSurface, ContentViewHandle, CursorView, MenuSurface, Telemetry,
    TelemetryEvent, ToolbarState,
};
use waypoint_types::geometry::Point;

// -----------------------------------------------------------------------
// Chrome
// -----------------------------------------------------------------------

/// What the chrome would currently be showing.
#[derive(Debug, Clone, Default)]
pub struct ChromeSnapshot {
    pub url_text: String,
    pub progress: u8,
    pub progress_visible: bool,
    pub lock_visible: bool,
    pub toolbar: Option<ToolbarState>,
    pub browser_visible: bool,
    pub fullscreen_visible: bool,
}

/// Chrome that logs every update and keeps the last rendered state.
#[derive(Clone, Default)]
pub struct LogChrome {
    pub shown: Rc<RefCell<ChromeSnapshot>>,
}

impl LogChrome {
    pub fn new() -> Self {
        let chrome = Self::default();
        chrome.shown.borrow_mut().browser_visible = true;
        chrome
    }
}

impl BrowserChrome for LogChrome {
    fn set_url_text(&mut self, text: &str) {
        log::info!("[chrome] url: {text}");
        self.shown.borrow_mut().url_text = text.to_string();
    }

    fn set_progress(&mut self, value: u8) {
        log::debug!("[chrome] progress: {value}%");
        self.shown.borrow_mut().progress = value;
    }

    fn set_progress_visible(&mut self, visible: bool) {
        log::info!("[chrome] progress bar {}", if visible { "shown" } else { "hidden" });
        self.shown.borrow_mut().progress_visible = visible;
    }

    fn set_lock_visible(&mut self, visible: bool) {
        log::info!("[chrome] lock icon {}", if visible { "shown" } else { "hidden" });
        self.shown.borrow_mut().lock_visible = visible;
    }

    fn set_toolbar(&mut self, state: ToolbarState) {
        log::info!(
            "[chrome] toolbar: back={} (alpha {}) forward={} (alpha {}) {}",
            state.back_enabled,
            state.back_alpha(),
            state.forward_enabled,
            state.forward_alpha(),
            if state.stop_visible { "stop" } else { "refresh" }
        );
        self.shown.borrow_mut().toolbar = Some(state);
    }

    fn set_browser_visible(&mut self, visible: bool) {
        self.shown.borrow_mut().browser_visible = visible;
    }

    fn attach_fullscreen_view(&mut self, view: ContentViewHandle) {
        log::info!("[chrome] fullscreen view {} attached", view.0);
    }

    fn detach_fullscreen_views(&mut self) {
        log::info!("[chrome] fullscreen views detached");
    }

    fn set_fullscreen_container_visible(&mut self, visible: bool) {
        self.shown.borrow_mut().fullscreen_visible = visible;
    }
}

// -----------------------------------------------------------------------
// Content
// -----------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct History {
    pub entries: Vec<String>,
    pub index: usize,
    pub flings: Vec<(i32, i32)>,
}

/// A pretend web engine with a linear history.
#[derive(Clone, Default)]
pub struct LogContent {
    pub history: Rc<RefCell<History>>,
}

impl ContentSurface for LogContent {
    fn load_url(&mut self, url: &str) {
        log::info!("[content] load {url}");
        let mut h = self.history.borrow_mut();
        if !h.entries.is_empty() {
            let keep = h.index + 1;
            h.entries.truncate(keep);
        }
        h.entries.push(url.to_string());
        h.index = h.entries.len() - 1;
    }

    fn go_back(&mut self) {
        let mut h = self.history.borrow_mut();
        h.index = h.index.saturating_sub(1);
        log::info!("[content] back to {:?}", h.entries.get(h.index));
    }

    fn go_forward(&mut self) {
        let mut h = self.history.borrow_mut();
        if h.index + 1 < h.entries.len() {
            h.index += 1;
        }
        log::info!("[content] forward to {:?}", h.entries.get(h.index));
    }

    fn reload(&mut self) {
        log::info!("[content] reload");
    }

    fn stop_loading(&mut self) {
        log::info!("[content] stop");
    }

    fn can_go_back(&self) -> bool {
        self.history.borrow().index > 0
    }

    fn can_go_forward(&self) -> bool {
        let h = self.history.borrow();
        h.index + 1 < h.entries.len()
    }

    fn url(&self) -> Option<String> {
        let h = self.history.borrow();
        h.entries.get(h.index).cloned()
    }

    fn title(&self) -> Option<String> {
        None
    }

    fn fling_scroll(&mut self, dx: i32, dy: i32) {
        log::debug!("[content] fling ({dx}, {dy})");
        self.history.borrow_mut().flings.push((dx, dy));
    }

    fn set_blocking_enabled(&mut self, enabled: bool) {
        log::info!("[content] tracker blocking {}", if enabled { "on" } else { "off" });
    }

    fn cleanup(&mut self) {
        log::info!("[content] cleanup");
        *self.history.borrow_mut() = History::default();
    }
}

// -----------------------------------------------------------------------
// Cursor, menu, telemetry
// -----------------------------------------------------------------------

pub struct LogCursorView;

impl CursorView for LogCursorView {
    fn set_visible(&mut self, visible: bool) {
        log::info!("[cursor] {}", if visible { "visible" } else { "hidden" });
    }

    fn move_to(&mut self, position: Point) {
        let (x, y) = position.to_pixels();
        log::trace!("[cursor] at ({x}, {y})");
    }
}

pub struct LogMenu;

impl MenuSurface for LogMenu {
    fn update_trackers(&mut self, count: u32) {
        log::info!("[menu] {count} trackers blocked");
    }

    fn update_loading(&mut self, loading: bool) {
        log::info!("[menu] loading: {loading}");
    }

    fn dismiss(&mut self) {
        log::info!("[menu] dismissed");
    }
}

pub struct LogTelemetry;

impl Telemetry for LogTelemetry {
    fn record(&mut self, event: TelemetryEvent) {
        log::info!("[telemetry] {event:?}");
    }
}
