//! Presentation binder: maps session changes onto the browser chrome.
//!
//! The binder remembers the last value it rendered for each indicator
//! and skips re-rendering identical values, so duplicate notifications
//! from the session are harmless. Side effects that reach beyond the
//! chrome (menu, content surface, cursor) are returned to the caller as
//! [`BinderEffect`]s.

use waypoint_types::config::ProgressConfig;

use crate::session::{Delivery, SessionEvent, SessionId, SessionSubscription};
use crate::surface::BrowserChrome;
use crate::toolbar::{NavCapability, ToolbarState};
use crate::url::{display_url, strip_user_info};

/// Progress value shown when a load finishes, right before hiding.
const PROGRESS_COMPLETE: u8 = 100;

/// Last values pushed to the chrome. `None` means never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedIndicators {
    pub url_text: Option<String>,
    pub loading: Option<bool>,
    pub progress: u8,
    pub progress_visible: bool,
    pub lock_visible: Option<bool>,
    pub toolbar: Option<ToolbarState>,
    pub blocked_trackers: Option<u32>,
    pub blocking_enabled: Option<bool>,
}

/// A change the binder could not complete on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinderEffect {
    /// The URL changed; cursor eligibility depends on it.
    UrlChanged,
    /// Loading flipped. Toolbar, menu and cursor eligibility follow.
    LoadingChanged(bool),
    /// Forward to the menu if one is open.
    TrackersChanged(u32),
    /// Forward to the content surface.
    BlockingChanged(bool),
}

pub struct PresentationBinder {
    initial_progress: u8,
    rendered: RenderedIndicators,
    /// Current URL with credentials stripped, scheme kept.
    url: String,
    subscription: Option<SessionSubscription>,
}

impl PresentationBinder {
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            initial_progress: config.initial_progress,
            rendered: RenderedIndicators::default(),
            url: String::new(),
            subscription: None,
        }
    }

    /// Start listening to a session. Replaces any previous subscription.
    pub fn bind(&mut self, subscription: SessionSubscription) {
        log::debug!("Binder bound to session {}", subscription.session_id());
        self.subscription = Some(subscription);
    }

    /// Stop listening. Returns the subscription so it can be re-bound.
    pub fn unbind(&mut self) -> Option<SessionSubscription> {
        self.subscription.take()
    }

    pub fn is_bound(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.subscription.as_ref().map(SessionSubscription::session_id)
    }

    pub fn rendered(&self) -> &RenderedIndicators {
        &self.rendered
    }

    /// Current URL with any userinfo removed.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Last loading state seen, `false` before the first notification.
    pub fn loading(&self) -> bool {
        self.rendered.loading.unwrap_or(false)
    }

    /// Apply every pending session event, in order.
    ///
    /// When the session has gone away the subscription is dropped and the
    /// binder stays inert until the next [`bind`](Self::bind).
    pub fn pump(&mut self, chrome: &mut dyn BrowserChrome) -> Vec<BinderEffect> {
        let mut effects = Vec::new();
        loop {
            let Some(sub) = self.subscription.as_ref() else {
                break;
            };
            match sub.poll() {
                Delivery::Event(event) => {
                    if let Some(effect) = self.apply(event, chrome) {
                        effects.push(effect);
                    }
                },
                Delivery::Idle => break,
                Delivery::Closed => {
                    log::debug!("Session {} is gone; binder inert", sub.session_id());
                    self.subscription = None;
                    break;
                },
            }
        }
        effects
    }

    /// Apply a single session event to the chrome.
    pub fn apply(
        &mut self,
        event: SessionEvent,
        chrome: &mut dyn BrowserChrome,
    ) -> Option<BinderEffect> {
        match event {
            SessionEvent::Url(url) => self.on_url(&url, chrome),
            SessionEvent::Loading(loading) => self.on_loading(loading, chrome),
            SessionEvent::Progress(progress) => {
                self.on_progress(progress, chrome);
                None
            },
            SessionEvent::Secure(secure) => {
                if self.rendered.lock_visible != Some(secure) {
                    chrome.set_lock_visible(secure);
                    self.rendered.lock_visible = Some(secure);
                }
                None
            },
            SessionEvent::BlockedTrackers(count) => {
                if self.rendered.blocked_trackers == Some(count) {
                    return None;
                }
                self.rendered.blocked_trackers = Some(count);
                Some(BinderEffect::TrackersChanged(count))
            },
            SessionEvent::BlockingEnabled(enabled) => {
                if self.rendered.blocking_enabled == Some(enabled) {
                    return None;
                }
                self.rendered.blocking_enabled = Some(enabled);
                Some(BinderEffect::BlockingChanged(enabled))
            },
        }
    }

    /// Re-resolve the toolbar for the current loading state.
    ///
    /// `nav` is `None` when no content surface is attached; the toolbar is
    /// then left as it is.
    pub fn refresh_toolbar(&mut self, chrome: &mut dyn BrowserChrome, nav: Option<NavCapability>) {
        let Some(nav) = nav else {
            return;
        };
        let state = ToolbarState::from_capability(self.loading(), nav);
        if self.rendered.toolbar != Some(state) {
            chrome.set_toolbar(state);
            self.rendered.toolbar = Some(state);
        }
    }

    fn on_url(&mut self, url: &str, chrome: &mut dyn BrowserChrome) -> Option<BinderEffect> {
        let stripped = strip_user_info(url);
        let text = display_url(url);
        let text_changed = self.rendered.url_text.as_deref() != Some(text.as_str());
        if !text_changed && self.url == stripped {
            return None;
        }
        if text_changed {
            chrome.set_url_text(&text);
            self.rendered.url_text = Some(text);
        }
        self.url = stripped.into_owned();
        Some(BinderEffect::UrlChanged)
    }

    fn on_loading(&mut self, loading: bool, chrome: &mut dyn BrowserChrome) -> Option<BinderEffect> {
        if self.rendered.loading == Some(loading) {
            return None;
        }
        self.rendered.loading = Some(loading);

        if loading {
            self.rendered.progress = self.initial_progress;
            chrome.set_progress(self.initial_progress);
            if !self.rendered.progress_visible {
                chrome.set_progress_visible(true);
                self.rendered.progress_visible = true;
            }
        } else if self.rendered.progress_visible {
            // Only finish a bar that was actually shown; an instant load
            // that never displayed progress must not flash it.
            self.rendered.progress = PROGRESS_COMPLETE;
            chrome.set_progress(PROGRESS_COMPLETE);
            chrome.set_progress_visible(false);
            self.rendered.progress_visible = false;
        }
        Some(BinderEffect::LoadingChanged(loading))
    }

    fn on_progress(&mut self, progress: u8, chrome: &mut dyn BrowserChrome) {
        if !self.rendered.progress_visible {
            log::trace!("Ignoring progress {progress} while the bar is hidden");
            return;
        }
        if self.rendered.progress != progress {
            chrome.set_progress(progress);
            self.rendered.progress = progress;
        }
    }
}
