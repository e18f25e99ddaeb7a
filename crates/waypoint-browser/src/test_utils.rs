//! Shared test utilities for the browser surface.
//!
//! Every collaborator mock keeps its state behind an `Rc<RefCell<..>>`
//! so a test can hand a boxed clone to the surface and still inspect
//! what happened afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use waypoint_platform::{AccessibilityService, DesktopPlatform, Platform, PlatformChrome};
use waypoint_platform::SystemUiMode;
use waypoint_types::error::Result;
use waypoint_types::geometry::Point;

use crate::surface::{
    BrowserChrome, ContentSurface, ContentViewHandle, CursorView, MenuSurface, Telemetry,
    TelemetryEvent,
};
use crate::toolbar::ToolbarState;

// -----------------------------------------------------------------------
// RecordingChrome
// -----------------------------------------------------------------------

/// A recorded call on [`BrowserChrome`].
#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum ChromeCall {
    UrlText(String),
    Progress(u8),
    ProgressVisible(bool),
    LockVisible(bool),
    Toolbar(ToolbarState),
    BrowserVisible(bool),
    AttachFullscreen(ContentViewHandle),
    DetachFullscreen,
    FullscreenVisible(bool),
}

/// What the chrome currently shows, folded from the recorded calls.
#[derive(Debug, Clone)]
pub struct ChromeView {
    pub url_text: String,
    pub progress: u8,
    pub progress_visible: bool,
    pub lock_visible: bool,
    pub toolbar: Option<ToolbarState>,
    pub browser_visible: bool,
    pub fullscreen_views: Vec<ContentViewHandle>,
    pub fullscreen_visible: bool,
}

impl Default for ChromeView {
    fn default() -> Self {
        Self {
            url_text: String::new(),
            progress: 0,
            progress_visible: false,
            lock_visible: false,
            toolbar: None,
            browser_visible: true,
            fullscreen_views: Vec::new(),
            fullscreen_visible: false,
        }
    }
}

/// A chrome that records all calls for test assertions.
#[derive(Clone, Default)]
pub struct RecordingChrome {
    calls: Rc<RefCell<Vec<ChromeCall>>>,
    view: Rc<RefCell<ChromeView>>,
}

impl RecordingChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ChromeCall> {
        self.calls.borrow().clone()
    }

    pub fn view(&self) -> ChromeView {
        self.view.borrow().clone()
    }

    /// Count of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&ChromeCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: ChromeCall) {
        {
            let mut v = self.view.borrow_mut();
            match &call {
                ChromeCall::UrlText(t) => v.url_text = t.clone(),
                ChromeCall::Progress(p) => v.progress = *p,
                ChromeCall::ProgressVisible(b) => v.progress_visible = *b,
                ChromeCall::LockVisible(b) => v.lock_visible = *b,
                ChromeCall::Toolbar(s) => v.toolbar = Some(*s),
                ChromeCall::BrowserVisible(b) => v.browser_visible = *b,
                ChromeCall::AttachFullscreen(h) => v.fullscreen_views.push(*h),
                ChromeCall::DetachFullscreen => v.fullscreen_views.clear(),
                ChromeCall::FullscreenVisible(b) => v.fullscreen_visible = *b,
            }
        }
        self.calls.borrow_mut().push(call);
    }
}

impl BrowserChrome for RecordingChrome {
    fn set_url_text(&mut self, text: &str) {
        self.record(ChromeCall::UrlText(text.to_string()));
    }

    fn set_progress(&mut self, value: u8) {
        self.record(ChromeCall::Progress(value));
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.record(ChromeCall::ProgressVisible(visible));
    }

    fn set_lock_visible(&mut self, visible: bool) {
        self.record(ChromeCall::LockVisible(visible));
    }

    fn set_toolbar(&mut self, state: ToolbarState) {
        self.record(ChromeCall::Toolbar(state));
    }

    fn set_browser_visible(&mut self, visible: bool) {
        self.record(ChromeCall::BrowserVisible(visible));
    }

    fn attach_fullscreen_view(&mut self, view: ContentViewHandle) {
        self.record(ChromeCall::AttachFullscreen(view));
    }

    fn detach_fullscreen_views(&mut self) {
        self.record(ChromeCall::DetachFullscreen);
    }

    fn set_fullscreen_container_visible(&mut self, visible: bool) {
        self.record(ChromeCall::FullscreenVisible(visible));
    }
}

// -----------------------------------------------------------------------
// MockContent
// -----------------------------------------------------------------------

/// A navigation command received by [`MockContent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentCommand {
    Load(String),
    Back,
    Forward,
    Reload,
    Stop,
}

#[derive(Debug, Default)]
pub struct ContentState {
    pub url: Option<String>,
    pub title: Option<String>,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub commands: Vec<ContentCommand>,
    pub flings: Vec<(i32, i32)>,
    pub blocking: Option<bool>,
    pub cleaned_up: bool,
}

/// A web engine stand-in that records commands.
#[derive(Clone, Default)]
pub struct MockContent {
    pub state: Rc<RefCell<ContentState>>,
}

impl MockContent {
    pub fn with_url(url: &str) -> Self {
        let content = Self::default();
        content.state.borrow_mut().url = Some(url.to_string());
        content
    }

    pub fn set_history(&self, can_go_back: bool, can_go_forward: bool) {
        let mut s = self.state.borrow_mut();
        s.can_go_back = can_go_back;
        s.can_go_forward = can_go_forward;
    }

    pub fn commands(&self) -> Vec<ContentCommand> {
        self.state.borrow().commands.clone()
    }

    pub fn flings(&self) -> Vec<(i32, i32)> {
        self.state.borrow().flings.clone()
    }
}

impl ContentSurface for MockContent {
    fn load_url(&mut self, url: &str) {
        let mut s = self.state.borrow_mut();
        s.commands.push(ContentCommand::Load(url.to_string()));
        s.url = Some(url.to_string());
    }

    fn go_back(&mut self) {
        self.state.borrow_mut().commands.push(ContentCommand::Back);
    }

    fn go_forward(&mut self) {
        self.state.borrow_mut().commands.push(ContentCommand::Forward);
    }

    fn reload(&mut self) {
        self.state.borrow_mut().commands.push(ContentCommand::Reload);
    }

    fn stop_loading(&mut self) {
        self.state.borrow_mut().commands.push(ContentCommand::Stop);
    }

    fn can_go_back(&self) -> bool {
        self.state.borrow().can_go_back
    }

    fn can_go_forward(&self) -> bool {
        self.state.borrow().can_go_forward
    }

    fn url(&self) -> Option<String> {
        self.state.borrow().url.clone()
    }

    fn title(&self) -> Option<String> {
        self.state.borrow().title.clone()
    }

    fn fling_scroll(&mut self, dx: i32, dy: i32) {
        self.state.borrow_mut().flings.push((dx, dy));
    }

    fn set_blocking_enabled(&mut self, enabled: bool) {
        self.state.borrow_mut().blocking = Some(enabled);
    }

    fn cleanup(&mut self) {
        self.state.borrow_mut().cleaned_up = true;
    }
}

// -----------------------------------------------------------------------
// MockMenu
// -----------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MockMenu {
    pub trackers: Vec<u32>,
    pub loading: Vec<bool>,
    pub dismissed: u32,
}

impl MenuSurface for MockMenu {
    fn update_trackers(&mut self, count: u32) {
        self.trackers.push(count);
    }

    fn update_loading(&mut self, loading: bool) {
        self.loading.push(loading);
    }

    fn dismiss(&mut self) {
        self.dismissed += 1;
    }
}

// -----------------------------------------------------------------------
// MockCursorView
// -----------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CursorViewState {
    pub visible: bool,
    pub position: Option<Point>,
    pub moves: usize,
}

#[derive(Clone, Default)]
pub struct MockCursorView {
    pub state: Rc<RefCell<CursorViewState>>,
}

impl MockCursorView {
    pub fn visible(&self) -> bool {
        self.state.borrow().visible
    }

    pub fn position(&self) -> Option<Point> {
        self.state.borrow().position
    }
}

impl CursorView for MockCursorView {
    fn set_visible(&mut self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    fn move_to(&mut self, position: Point) {
        let mut s = self.state.borrow_mut();
        s.position = Some(position);
        s.moves += 1;
    }
}

// -----------------------------------------------------------------------
// SharedPlatform
// -----------------------------------------------------------------------

/// A [`DesktopPlatform`] the test keeps a handle to.
#[derive(Clone, Default)]
pub struct SharedPlatform(pub Rc<RefCell<DesktopPlatform>>);

impl SharedPlatform {
    pub fn ui_mode(&self) -> SystemUiMode {
        self.0.borrow().ui_mode()
    }

    pub fn keep_screen_on_flag(&self) -> bool {
        self.0.borrow().keep_screen_on().unwrap_or(false)
    }
}

impl PlatformChrome for SharedPlatform {
    fn set_system_ui(&mut self, mode: SystemUiMode) -> Result<()> {
        self.0.borrow_mut().set_system_ui(mode)
    }

    fn set_keep_screen_on(&mut self, on: bool) -> Result<()> {
        self.0.borrow_mut().set_keep_screen_on(on)
    }

    fn keep_screen_on(&self) -> Result<bool> {
        self.0.borrow().keep_screen_on()
    }
}

impl AccessibilityService for SharedPlatform {
    fn screen_reader_active(&self) -> bool {
        self.0.borrow().screen_reader_active()
    }
}

impl Platform for SharedPlatform {}

// -----------------------------------------------------------------------
// RecordingTelemetry
// -----------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct RecordingTelemetry {
    pub events: Rc<RefCell<Vec<TelemetryEvent>>>,
}

impl Telemetry for RecordingTelemetry {
    fn record(&mut self, event: TelemetryEvent) {
        self.events.borrow_mut().push(event);
    }
}
