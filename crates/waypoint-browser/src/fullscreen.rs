//! Fullscreen (immersive) presentation for embedded video.
//!
//! The web engine asks for fullscreen and hands over a view plus a
//! callback it expects to be invoked exactly once when fullscreen ends,
//! whoever ends it. The controller stores that callback and clears it
//! before invoking, so repeated or racing exits never notify twice.

use std::fmt;

use waypoint_platform::{PlatformChrome, SystemUiMode};

use crate::surface::{BrowserChrome, ContentViewHandle};

/// Single-use notification back to the web engine.
pub struct ExitCallback(Box<dyn FnOnce()>);

impl ExitCallback {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Box::new(f))
    }

    /// Consume and run the callback.
    pub fn invoke(self) {
        (self.0)();
    }
}

impl fmt::Debug for ExitCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExitCallback(..)")
    }
}

/// Result of a fullscreen request.
#[must_use]
#[derive(Debug)]
pub enum EnterOutcome {
    Entered,
    /// Already fullscreen. The caller's callback is handed back unused.
    Rejected(ExitCallback),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenMode {
    Normal,
    Fullscreen { view: Option<ContentViewHandle> },
}

#[derive(Debug)]
pub struct FullscreenController {
    mode: FullscreenMode,
    exit_callback: Option<ExitCallback>,
}

impl Default for FullscreenController {
    fn default() -> Self {
        Self::new()
    }
}

impl FullscreenController {
    pub fn new() -> Self {
        Self {
            mode: FullscreenMode::Normal,
            exit_callback: None,
        }
    }

    pub fn mode(&self) -> FullscreenMode {
        self.mode
    }

    pub fn is_fullscreen(&self) -> bool {
        matches!(self.mode, FullscreenMode::Fullscreen { .. })
    }

    /// Enter fullscreen.
    ///
    /// Without a view the callback is still stored and the mode still
    /// flips, but the browser chrome stays as it is.
    pub fn enter<P: PlatformChrome + ?Sized>(
        &mut self,
        view: Option<ContentViewHandle>,
        callback: ExitCallback,
        chrome: &mut dyn BrowserChrome,
        platform: &mut P,
    ) -> EnterOutcome {
        if self.is_fullscreen() {
            log::warn!("Fullscreen requested while already fullscreen; rejecting");
            return EnterOutcome::Rejected(callback);
        }
        self.exit_callback = Some(callback);
        self.mode = FullscreenMode::Fullscreen { view };

        if let Some(view) = view {
            chrome.set_browser_visible(false);
            chrome.attach_fullscreen_view(view);
            chrome.set_fullscreen_container_visible(true);
            if let Err(e) = platform.set_keep_screen_on(true) {
                log::warn!("Failed to keep screen on: {e}");
            }
            if let Err(e) = platform.set_system_ui(SystemUiMode::Immersive) {
                log::warn!("Failed to enter immersive mode: {e}");
            }
        }
        log::info!("Entered fullscreen");
        EnterOutcome::Entered
    }

    /// Leave fullscreen and notify the engine.
    ///
    /// Returns `false` when there was nothing to exit. Safe to call any
    /// number of times; the engine's callback runs at most once.
    pub fn exit<P: PlatformChrome + ?Sized>(
        &mut self,
        chrome: &mut dyn BrowserChrome,
        platform: &mut P,
    ) -> bool {
        if !self.is_fullscreen() && self.exit_callback.is_none() {
            return false;
        }
        chrome.detach_fullscreen_views();
        chrome.set_fullscreen_container_visible(false);
        chrome.set_browser_visible(true);
        exit_immersive_if_needed(platform);
        self.mode = FullscreenMode::Normal;

        if let Some(callback) = self.exit_callback.take() {
            callback.invoke();
        }
        log::info!("Exited fullscreen");
        true
    }

    /// Called when the surface is going away.
    pub fn teardown<P: PlatformChrome + ?Sized>(
        &mut self,
        chrome: &mut dyn BrowserChrome,
        platform: &mut P,
    ) {
        if !self.exit(chrome, platform) {
            exit_immersive_if_needed(platform);
        }
    }
}

/// Drop immersive mode if the keep-awake flag says it is active.
pub fn exit_immersive_if_needed<P: PlatformChrome + ?Sized>(platform: &mut P) {
    match platform.keep_screen_on() {
        Ok(false) => {},
        Ok(true) => {
            if let Err(e) = platform.set_keep_screen_on(false) {
                log::warn!("Failed to clear keep-screen-on: {e}");
            }
            if let Err(e) = platform.set_system_ui(SystemUiMode::Standard) {
                log::warn!("Failed to leave immersive mode: {e}");
            }
        },
        Err(e) => log::debug!("No window to leave immersive mode on: {e}"),
    }
}
