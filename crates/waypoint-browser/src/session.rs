//! Browsing sessions and their change notifications.
//!
//! A [`Session`] is owned by the host's session manager. The browser
//! surface never holds the session itself: it holds a
//! [`SessionSubscription`], a channel receiver that simply goes quiet
//! (and then reports [`Delivery::Closed`]) once the session is dropped.

use std::collections::HashMap;
use std::fmt;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use uuid::Uuid;

use waypoint_types::error::{Result, WaypointError};

// -----------------------------------------------------------------------
// SessionId
// -----------------------------------------------------------------------

/// Opaque session identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| WaypointError::Config(format!("invalid session id {s:?}: {e}")))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// -----------------------------------------------------------------------
// Snapshot and events
// -----------------------------------------------------------------------

/// Point-in-time view of a session's observable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub url: String,
    pub loading: bool,
    /// Load progress, 0 to 100.
    pub progress: u8,
    pub secure: bool,
    pub blocked_trackers: u32,
    pub blocking_enabled: bool,
}

impl SessionSnapshot {
    fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            loading: false,
            progress: 0,
            secure: false,
            blocked_trackers: 0,
            blocking_enabled: true,
        }
    }

    /// The current value of every field, as the events a new subscriber
    /// receives first.
    pub fn replay(&self) -> [SessionEvent; 6] {
        [
            SessionEvent::Url(self.url.clone()),
            SessionEvent::BlockingEnabled(self.blocking_enabled),
            SessionEvent::Loading(self.loading),
            SessionEvent::Secure(self.secure),
            SessionEvent::Progress(self.progress),
            SessionEvent::BlockedTrackers(self.blocked_trackers),
        ]
    }
}

/// A single field change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Url(String),
    Loading(bool),
    Progress(u8),
    Secure(bool),
    BlockedTrackers(u32),
    BlockingEnabled(bool),
}

// -----------------------------------------------------------------------
// Session
// -----------------------------------------------------------------------

/// One logical browsing session (a tab).
///
/// Setters always notify, even when the value is unchanged; subscribers
/// are expected to tolerate duplicates.
pub struct Session {
    id: SessionId,
    snapshot: SessionSnapshot,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl Session {
    pub fn new(url: &str) -> Self {
        Self::with_id(SessionId::new_random(), url)
    }

    pub fn with_id(id: SessionId, url: &str) -> Self {
        Self {
            id,
            snapshot: SessionSnapshot::new(url),
            subscribers: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Subscribe to changes. The current value of every field is queued
    /// on the new subscription before any later change.
    pub fn subscribe(&mut self) -> SessionSubscription {
        let (tx, rx) = crossbeam_channel::unbounded();
        for event in self.snapshot.replay() {
            // Receiver is alive in this scope; send cannot fail.
            let _ = tx.send(event);
        }
        self.subscribers.push(tx);
        log::debug!(
            "Session {} subscribed ({} total)",
            self.id,
            self.subscribers.len()
        );
        SessionSubscription {
            session: self.id,
            rx,
        }
    }

    /// Number of live subscriptions (dropped ones are pruned lazily on
    /// the next notification).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn set_url(&mut self, url: &str) {
        self.snapshot.url = url.to_string();
        self.emit(SessionEvent::Url(url.to_string()));
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.snapshot.loading = loading;
        self.emit(SessionEvent::Loading(loading));
    }

    /// Set load progress. Values above 100 are clamped.
    pub fn set_progress(&mut self, progress: u8) {
        let progress = progress.min(100);
        self.snapshot.progress = progress;
        self.emit(SessionEvent::Progress(progress));
    }

    pub fn set_secure(&mut self, secure: bool) {
        self.snapshot.secure = secure;
        self.emit(SessionEvent::Secure(secure));
    }

    /// Record one more blocked tracker.
    pub fn count_blocked_tracker(&mut self) {
        self.snapshot.blocked_trackers = self.snapshot.blocked_trackers.saturating_add(1);
        self.emit(SessionEvent::BlockedTrackers(self.snapshot.blocked_trackers));
    }

    pub fn reset_blocked_trackers(&mut self) {
        self.snapshot.blocked_trackers = 0;
        self.emit(SessionEvent::BlockedTrackers(0));
    }

    pub fn set_blocking_enabled(&mut self, enabled: bool) {
        self.snapshot.blocking_enabled = enabled;
        self.emit(SessionEvent::BlockingEnabled(enabled));
    }

    fn emit(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("snapshot", &self.snapshot)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

// -----------------------------------------------------------------------
// Subscription
// -----------------------------------------------------------------------

/// Result of polling a subscription once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Event(SessionEvent),
    /// Nothing pending right now.
    Idle,
    /// The session is gone and every queued event has been delivered.
    Closed,
}

/// Receiving end of a session's change notifications.
///
/// Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct SessionSubscription {
    session: SessionId,
    rx: Receiver<SessionEvent>,
}

impl SessionSubscription {
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn poll(&self) -> Delivery {
        match self.rx.try_recv() {
            Ok(event) => Delivery::Event(event),
            Err(TryRecvError::Empty) => Delivery::Idle,
            Err(TryRecvError::Disconnected) => Delivery::Closed,
        }
    }
}

// -----------------------------------------------------------------------
// Lookup
// -----------------------------------------------------------------------

/// Read access to the host's session registry.
pub trait SessionLookup {
    fn session_mut(&mut self, id: SessionId) -> Option<&mut Session>;
}

impl SessionLookup for HashMap<SessionId, Session> {
    fn session_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(sub: &SessionSubscription) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        while let Delivery::Event(e) = sub.poll() {
            out.push(e);
        }
        out
    }

    #[test]
    fn subscribe_replays_current_values() {
        let mut s = Session::new("https://example.com");
        s.set_secure(true);
        let sub = s.subscribe();
        let events = drain(&sub);
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], SessionEvent::Url("https://example.com".into()));
        assert!(events.contains(&SessionEvent::Secure(true)));
        assert!(events.contains(&SessionEvent::BlockingEnabled(true)));
    }

    #[test]
    fn changes_arrive_in_order() {
        let mut s = Session::new("about:blank");
        let sub = s.subscribe();
        drain(&sub);
        s.set_loading(true);
        s.set_progress(40);
        s.set_loading(false);
        assert_eq!(
            drain(&sub),
            vec![
                SessionEvent::Loading(true),
                SessionEvent::Progress(40),
                SessionEvent::Loading(false),
            ]
        );
    }

    #[test]
    fn duplicate_values_still_notify() {
        let mut s = Session::new("about:blank");
        let sub = s.subscribe();
        drain(&sub);
        s.set_secure(false);
        s.set_secure(false);
        assert_eq!(drain(&sub).len(), 2);
    }

    #[test]
    fn progress_is_clamped() {
        let mut s = Session::new("about:blank");
        s.set_progress(250);
        assert_eq!(s.snapshot().progress, 100);
    }

    #[test]
    fn tracker_count_and_reset() {
        let mut s = Session::new("about:blank");
        s.count_blocked_tracker();
        s.count_blocked_tracker();
        assert_eq!(s.snapshot().blocked_trackers, 2);
        s.reset_blocked_trackers();
        assert_eq!(s.snapshot().blocked_trackers, 0);
    }

    #[test]
    fn dropped_session_closes_after_queued_events() {
        let mut s = Session::new("about:blank");
        let sub = s.subscribe();
        drain(&sub);
        s.set_loading(true);
        drop(s);
        assert_eq!(sub.poll(), Delivery::Event(SessionEvent::Loading(true)));
        assert_eq!(sub.poll(), Delivery::Closed);
        assert_eq!(sub.poll(), Delivery::Closed);
    }

    #[test]
    fn idle_when_nothing_pending() {
        let mut s = Session::new("about:blank");
        let sub = s.subscribe();
        drain(&sub);
        assert_eq!(sub.poll(), Delivery::Idle);
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let mut s = Session::new("about:blank");
        let sub = s.subscribe();
        let _keep = s.subscribe();
        assert_eq!(s.subscriber_count(), 2);
        drop(sub);
        s.set_loading(true);
        assert_eq!(s.subscriber_count(), 1);
    }

    #[test]
    fn session_id_parse_and_display() {
        let id = SessionId::new_random();
        let parsed = SessionId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
        assert!(SessionId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn lookup_by_id() {
        let s = Session::new("https://a.com");
        let id = s.id();
        let mut registry = HashMap::new();
        registry.insert(id, s);
        assert!(registry.session_mut(id).is_some());
        assert!(registry.session_mut(SessionId::new_random()).is_none());
    }
}
