//! Browsing surface: binds one session to one on-screen viewport.
//!
//! [`BrowserSurface`] keeps the URL bar, progress bar, lock icon and
//! toolbar in sync with a [`Session`], drives the virtual
//! [`CursorEngine`] from directional input, and swaps in a fullscreen
//! container when the web engine plays video. The web engine, the menu,
//! the views and the platform window are all collaborators reached
//! through the traits in [`surface`] and `waypoint-platform`.

pub mod binder;
pub mod cursor;
pub mod fullscreen;
pub mod session;
pub mod surface;
pub mod toolbar;
pub mod url;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use binder::{BinderEffect, PresentationBinder, RenderedIndicators};
pub use cursor::{CursorEngine, CursorState, EdgeHit};
pub use fullscreen::{EnterOutcome, ExitCallback, FullscreenController, FullscreenMode};
pub use session::{Delivery, Session, SessionEvent, SessionId, SessionLookup, SessionSubscription};
pub use surface::{
    BrowserChrome, ContentSurface, ContentViewHandle, CursorView, MenuSurface, Telemetry,
    TelemetryEvent,
};
pub use toolbar::{NavCapability, ToolbarAction, ToolbarState};

// -----------------------------------------------------------------------
// Imports
// -----------------------------------------------------------------------

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use waypoint_platform::Platform;
use waypoint_types::config::NavigatorConfig;
use waypoint_types::error::{Result, WaypointError};
use waypoint_types::geometry::{Point, Viewport};
use waypoint_types::input::{Direction, InputEvent};

// -----------------------------------------------------------------------
// BackOutcome
// -----------------------------------------------------------------------

/// What a back press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Went back in the content's history.
    WentBack,
    /// Nothing to go back to: the host should close this surface and
    /// remove its session.
    CloseSurface,
}

// -----------------------------------------------------------------------
// BrowserSurface
// -----------------------------------------------------------------------

/// The navigation and presentation coordinator for one browsing surface.
pub struct BrowserSurface {
    config: NavigatorConfig,
    session_id: SessionId,
    initial_url: Option<String>,
    binder: PresentationBinder,
    cursor: CursorEngine,
    fullscreen: FullscreenController,
    chrome: Box<dyn BrowserChrome>,
    platform: Box<dyn Platform>,
    content: Option<Box<dyn ContentSurface>>,
    menu: Option<Weak<RefCell<dyn MenuSurface>>>,
    telemetry: Option<Box<dyn Telemetry>>,
    torn_down: bool,
}

impl BrowserSurface {
    /// Create a surface for the session with the given id.
    ///
    /// If the registry has no such session the surface is still usable
    /// but inert: no indicators are ever updated.
    pub fn create_for_session(
        session_id: SessionId,
        sessions: &mut impl SessionLookup,
        config: NavigatorConfig,
        chrome: Box<dyn BrowserChrome>,
        platform: Box<dyn Platform>,
    ) -> Self {
        let mut binder = PresentationBinder::new(&config.progress);
        let initial_url = match sessions.session_mut(session_id) {
            Some(session) => {
                binder.bind(session.subscribe());
                Some(session.snapshot().url.clone())
            },
            None => {
                log::warn!("No session {session_id}; browser surface is inert");
                None
            },
        };
        let cursor = CursorEngine::new(config.cursor.clone());

        let mut surface = Self {
            config,
            session_id,
            initial_url,
            binder,
            cursor,
            fullscreen: FullscreenController::new(),
            chrome,
            platform,
            content: None,
            menu: None,
            telemetry: None,
            torn_down: false,
        };
        surface.pump_session_events();
        surface
    }

    pub fn with_telemetry(mut self, telemetry: Box<dyn Telemetry>) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    // -- Collaborators ----------------------------------------------------

    /// Attach the web engine view. The session's blocking preference is
    /// applied to it right away.
    pub fn attach_content(&mut self, mut content: Box<dyn ContentSurface>) {
        let blocking = self.binder.rendered().blocking_enabled.unwrap_or(true);
        content.set_blocking_enabled(blocking);
        self.content = Some(content);
        self.refresh_toolbar();
        self.update_cursor_state();
    }

    pub fn detach_content(&mut self) -> Option<Box<dyn ContentSurface>> {
        let content = self.content.take();
        self.update_cursor_state();
        content
    }

    /// Attach the cursor overlay, sized to the content viewport.
    pub fn attach_cursor(&mut self, view: Box<dyn CursorView>, viewport: Viewport) {
        self.cursor.attach(view, viewport);
        self.update_cursor_state();
    }

    pub fn detach_cursor(&mut self) {
        self.cursor.detach();
    }

    pub fn resize_viewport(&mut self, viewport: Viewport) {
        self.cursor.resize(viewport);
    }

    /// Remember the open menu. Only a weak reference is kept; a menu the
    /// host has dropped is simply no longer notified.
    pub fn set_menu<M: MenuSurface + 'static>(&mut self, menu: &Rc<RefCell<M>>) {
        let menu: Rc<RefCell<M>> = Rc::clone(menu);
        let menu: Rc<RefCell<dyn MenuSurface>> = menu;
        self.menu = Some(Rc::downgrade(&menu));
    }

    // -- Session binding --------------------------------------------------

    /// Apply all pending session notifications. Returns `true` if any of
    /// them changed something beyond the chrome.
    pub fn pump_session_events(&mut self) -> bool {
        let effects = self.binder.pump(&mut *self.chrome);
        let changed = !effects.is_empty();
        self.apply_effects(effects);
        changed
    }

    fn apply_effects(&mut self, effects: Vec<BinderEffect>) {
        let mut recheck_cursor = false;
        for effect in effects {
            match effect {
                BinderEffect::UrlChanged => recheck_cursor = true,
                BinderEffect::LoadingChanged(loading) => {
                    self.refresh_toolbar();
                    self.with_menu(|menu| menu.update_loading(loading));
                    recheck_cursor = true;
                },
                BinderEffect::TrackersChanged(count) => {
                    self.with_menu(|menu| menu.update_trackers(count));
                },
                BinderEffect::BlockingChanged(enabled) => {
                    if let Some(content) = self.content.as_mut() {
                        content.set_blocking_enabled(enabled);
                    }
                },
            }
        }
        if recheck_cursor {
            self.update_cursor_state();
        }
    }

    fn with_menu(&mut self, f: impl FnOnce(&mut dyn MenuSurface)) {
        let Some(menu) = self.menu.as_ref().and_then(Weak::upgrade) else {
            self.menu = None;
            return;
        };
        match menu.try_borrow_mut() {
            Ok(mut menu) => f(&mut *menu),
            Err(_) => log::warn!("Menu is busy; dropping update"),
        };
    }

    fn nav_capability(&self) -> Option<NavCapability> {
        self.content.as_ref().map(|c| NavCapability {
            can_go_back: c.can_go_back(),
            can_go_forward: c.can_go_forward(),
        })
    }

    fn refresh_toolbar(&mut self) {
        let nav = self.nav_capability();
        self.binder.refresh_toolbar(&mut *self.chrome, nav);
    }

    // -- Cursor -----------------------------------------------------------

    /// Recompute whether the virtual cursor should be offered.
    ///
    /// Eligible when content with a URL is attached, the URL is not a
    /// page with its own remote navigation, and no screen reader is
    /// running.
    pub fn update_cursor_state(&mut self) {
        let eligible = !self.torn_down
            && self
                .content
                .as_ref()
                .and_then(|c| c.url())
                .is_some_and(|url| !url.is_empty() && !self.config.is_cursor_hostile(&url))
            && !self.platform.screen_reader_active();
        self.cursor.set_eligible(eligible);
    }

    /// The platform's accessibility state changed.
    pub fn on_accessibility_changed(&mut self) {
        self.update_cursor_state();
    }

    /// Force the cursor on or off until the next eligibility recheck.
    pub fn set_cursor_enabled(&mut self, enabled: bool) {
        self.cursor.set_eligible(enabled);
    }

    pub fn start_direction(&mut self, direction: Direction) {
        self.cursor.start_direction(direction);
    }

    pub fn stop_direction(&mut self, direction: Direction) {
        self.cursor.stop_direction(direction);
    }

    pub fn cursor_location(&self) -> Option<Point> {
        self.cursor.current_position()
    }

    pub fn cursor(&self) -> &CursorEngine {
        &self.cursor
    }

    /// Route an input event. Returns `true` if it was consumed.
    ///
    /// Directional buttons are only consumed while the cursor is attached
    /// and eligible; otherwise the page gets them for its own focus
    /// navigation. The held set is tracked either way.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let cursor_active = self.cursor.is_attached() && self.cursor.is_eligible();
        match event {
            InputEvent::ButtonPress(button) => match button.direction() {
                Some(d) => {
                    self.start_direction(d);
                    cursor_active
                },
                None => false,
            },
            InputEvent::ButtonRelease(button) => match button.direction() {
                Some(d) => {
                    self.stop_direction(d);
                    cursor_active
                },
                None => false,
            },
            InputEvent::FocusLost => {
                self.cursor.release_all();
                true
            },
            InputEvent::FocusGained => false,
        }
    }

    /// Advance the cursor one frame and turn edge hits into fling
    /// scrolls. Returns `true` while further ticks are needed.
    pub fn tick(&mut self) -> bool {
        for hit in self.cursor.tick() {
            let (dx, dy) = hit.scroll_delta();
            match self.content.as_mut() {
                Some(content) => content.fling_scroll(dx, dy),
                None => log::trace!("Edge hit {:?} with no content to scroll", hit.direction),
            }
        }
        self.cursor.is_ticking()
    }

    // -- Navigation -------------------------------------------------------

    pub fn can_go_back(&self) -> bool {
        self.content.as_ref().is_some_and(|c| c.can_go_back())
    }

    pub fn can_go_forward(&self) -> bool {
        self.content.as_ref().is_some_and(|c| c.can_go_forward())
    }

    pub fn go_back(&mut self) -> Result<()> {
        let content = self.content.as_mut().ok_or_else(|| unavailable("go_back"))?;
        content.go_back();
        self.refresh_toolbar();
        Ok(())
    }

    pub fn go_forward(&mut self) -> Result<()> {
        let content = self.content.as_mut().ok_or_else(|| unavailable("go_forward"))?;
        content.go_forward();
        self.refresh_toolbar();
        Ok(())
    }

    pub fn reload(&mut self) -> Result<()> {
        let content = self.content.as_mut().ok_or_else(|| unavailable("reload"))?;
        content.reload();
        if let Some(telemetry) = self.telemetry.as_mut() {
            telemetry.record(TelemetryEvent::Reload);
        }
        self.refresh_toolbar();
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        let content = self.content.as_mut().ok_or_else(|| unavailable("stop"))?;
        content.stop_loading();
        self.refresh_toolbar();
        Ok(())
    }

    /// Load a URL. Empty URLs are ignored.
    pub fn load_url(&mut self, url: &str) -> Result<()> {
        let content = self.content.as_mut().ok_or_else(|| unavailable("load_url"))?;
        if url.is_empty() {
            log::debug!("Ignoring empty URL");
            return Ok(());
        }
        content.load_url(url);
        Ok(())
    }

    /// Run a toolbar control.
    pub fn dispatch(&mut self, action: ToolbarAction) -> Result<()> {
        log::debug!("Toolbar action: {}", action.id());
        match action {
            ToolbarAction::UrlBar => Ok(()),
            ToolbarAction::Back => self.go_back(),
            ToolbarAction::Forward => self.go_forward(),
            ToolbarAction::Reload => self.reload(),
            ToolbarAction::Stop => self.stop(),
        }
    }

    /// Run a toolbar control by its view id (`"back"`, `"refresh"`, ...).
    pub fn dispatch_id(&mut self, id: &str) -> Result<()> {
        let action: ToolbarAction = id.parse()?;
        self.dispatch(action)
    }

    pub fn on_back_pressed(&mut self) -> BackOutcome {
        if self.can_go_back() && self.go_back().is_ok() {
            BackOutcome::WentBack
        } else {
            log::info!("Nothing to go back to; closing session {}", self.session_id);
            BackOutcome::CloseSurface
        }
    }

    // -- Lifecycle --------------------------------------------------------

    /// Wipe the content's page state. Returns the session id the host
    /// should now remove from its registry.
    pub fn erase(&mut self) -> SessionId {
        if let Some(content) = self.content.as_mut() {
            content.cleanup();
        }
        log::info!("Erased session {}", self.session_id);
        self.session_id
    }

    /// The host is being paused: close the menu if it is open.
    pub fn on_pause(&mut self) {
        self.with_menu(|menu| menu.dismiss());
        self.menu = None;
    }

    /// The web engine asks for fullscreen.
    pub fn on_enter_fullscreen(
        &mut self,
        view: Option<ContentViewHandle>,
        callback: ExitCallback,
    ) -> EnterOutcome {
        self.fullscreen
            .enter(view, callback, &mut *self.chrome, &mut *self.platform)
    }

    /// Leave fullscreen. Returns `false` if there was nothing to leave.
    pub fn on_exit_fullscreen(&mut self) -> bool {
        self.fullscreen.exit(&mut *self.chrome, &mut *self.platform)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    /// Release everything. Safe to call more than once; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.cursor.detach();
        self.fullscreen
            .teardown(&mut *self.chrome, &mut *self.platform);
        self.binder.unbind();
        self.menu = None;
        log::debug!("Browser surface for session {} torn down", self.session_id);
    }

    // -- Accessors --------------------------------------------------------

    /// Current URL with credentials removed.
    pub fn url(&self) -> &str {
        self.binder.url()
    }

    /// URL the session had when this surface was created.
    pub fn initial_url(&self) -> Option<&str> {
        self.initial_url.as_deref()
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Whether the surface is still receiving session notifications.
    pub fn is_bound(&self) -> bool {
        self.binder.is_bound()
    }

    pub fn indicators(&self) -> &RenderedIndicators {
        self.binder.rendered()
    }

    /// Title of the loaded page, if the content surface knows it.
    pub fn title(&self) -> Option<String> {
        self.content.as_ref().and_then(|c| c.title())
    }
}

impl Drop for BrowserSurface {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn unavailable(op: &str) -> WaypointError {
    WaypointError::SurfaceUnavailable(op.to_string())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
