//! Live map sessions
//!
//! Every open page owns one [`MapSession`]. Its view updates are fanned out
//! through a broadcast channel to whichever SSE streams are subscribed.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use application::{GeocodingPort, MapSession, MapSessionConfig, ViewPort, ViewUpdate};
use moka::future::Cache;
use tokio::{sync::broadcast, time::MissedTickBehavior};
use tracing::{debug, info, trace};
use uuid::Uuid;

/// Updates buffered per session before slow subscribers start lagging
const UPDATE_CHANNEL_CAPACITY: usize = 256;

/// Session identifier
pub type SessionId = Uuid;

/// `ViewPort` that publishes updates to a broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastView {
    sender: broadcast::Sender<ViewUpdate>,
}

impl BroadcastView {
    /// Create a view with its own channel
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Receive updates published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ViewUpdate> {
        self.sender.subscribe()
    }

    /// Number of attached subscribers
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewPort for BroadcastView {
    fn apply(&self, update: ViewUpdate) {
        let name = update.name();
        // Sending only fails when nobody is listening
        if self.sender.send(update).is_err() {
            trace!(update = name, "No subscribers for view update");
        }
    }
}

/// A map session together with its update channel
pub struct LiveSession {
    id: SessionId,
    session: MapSession,
    view: Arc<BroadcastView>,
    refreshing: AtomicBool,
}

impl fmt::Debug for LiveSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveSession")
            .field("id", &self.id)
            .field("subscribers", &self.view.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl LiveSession {
    /// Session identifier
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// The session's map state and event handling
    #[must_use]
    pub const fn session(&self) -> &MapSession {
        &self.session
    }

    /// Receive view updates emitted from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ViewUpdate> {
        self.view.subscribe()
    }
}

/// Limits applied to the registry
#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    /// Drop sessions not touched for this long
    pub idle_timeout: Duration,
    /// Maximum number of live sessions
    pub max_sessions: u64,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            max_sessions: 10_000,
        }
    }
}

/// Registry of live sessions with idle expiry
///
/// A session is touched whenever it is looked up, and periodically while an
/// update stream is subscribed. Streams hold only a receiver, so they end
/// once an expired or removed session is dropped.
pub struct SessionRegistry {
    sessions: Cache<SessionId, Arc<LiveSession>>,
    geocoder: Arc<dyn GeocodingPort>,
    config: MapSessionConfig,
    refresh_every: Duration,
}

impl fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("sessions", &self.sessions.entry_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SessionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        config: MapSessionConfig,
        limits: SessionLimits,
    ) -> Self {
        let sessions = Cache::builder()
            .max_capacity(limits.max_sessions)
            .time_to_idle(limits.idle_timeout)
            .eviction_listener(|id: Arc<SessionId>, _, cause| {
                debug!(session_id = %id, ?cause, "Session evicted");
            })
            .build();

        Self {
            sessions,
            geocoder,
            config,
            refresh_every: (limits.idle_timeout / 3).max(Duration::from_millis(1)),
        }
    }

    /// Start a new session showing the configured initial view
    pub async fn create(&self) -> Arc<LiveSession> {
        let id = Uuid::now_v7();
        let view = Arc::new(BroadcastView::new());
        let session = MapSession::new(Arc::clone(&self.geocoder), view.clone(), self.config);
        let live = Arc::new(LiveSession {
            id,
            session,
            view,
            refreshing: AtomicBool::new(false),
        });

        self.sessions.insert(id, Arc::clone(&live)).await;
        info!(session_id = %id, "Session created");
        live
    }

    /// Look up a session, refreshing its idle timer
    pub async fn get(&self, id: SessionId) -> Option<Arc<LiveSession>> {
        self.sessions.get(&id).await
    }

    /// Whether a session is live, without refreshing its idle timer
    #[must_use]
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Refresh a session's idle timer for as long as it has subscribers
    ///
    /// Call after subscribing. At most one refresher runs per session; it
    /// stops when the last subscriber is gone or the session was removed.
    pub fn keep_alive_while_subscribed(self: &Arc<Self>, live: &Arc<LiveSession>) {
        if live.refreshing.swap(true, Ordering::SeqCst) {
            return;
        }

        let registry = Arc::clone(self);
        let session = Arc::downgrade(live);
        let id = live.id;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(registry.refresh_every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(live) = session.upgrade() else {
                    break;
                };
                if live.view.subscriber_count() == 0 {
                    live.refreshing.store(false, Ordering::SeqCst);
                    // A stream may have opened between the check and the store
                    if live.view.subscriber_count() == 0
                        || live.refreshing.swap(true, Ordering::SeqCst)
                    {
                        break;
                    }
                }
                if registry.get(id).await.is_none() {
                    break;
                }
                trace!(session_id = %id, "Session kept alive by open stream");
            }
            debug!(session_id = %id, "Stopped refreshing session");
        });
    }

    /// Remove a session; returns whether it existed
    pub async fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).await.is_some();
        if removed {
            info!(session_id = %id, "Session closed");
        }
        removed
    }

    /// Approximate number of live sessions
    #[must_use]
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    /// Whether no sessions are live
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending evictions so `len` is exact
    pub async fn sync(&self) {
        self.sessions.run_pending_tasks().await;
    }

    /// Per-session configuration
    #[must_use]
    pub const fn config(&self) -> &MapSessionConfig {
        &self.config
    }
}
