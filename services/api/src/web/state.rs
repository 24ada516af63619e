//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the in-memory session store.

use crate::config::Config;
use course_builder_core::{
    ChatCompletionService, ConversationClient, ConversationSession, StructureRequester,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::info;
use uuid::Uuid;

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub conversation: ConversationClient,
    pub requester: StructureRequester,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: &Config, chat: Arc<dyn ChatCompletionService>) -> Self {
        Self {
            conversation: ConversationClient::new(chat.clone()),
            requester: StructureRequester::new(chat),
            sessions: SessionStore::with_idle_timeout(config.session_idle_timeout),
        }
    }
}

//=========================================================================================
// SessionStore (Conversation Sessions, Not Persisted)
//=========================================================================================

/// A conversation session shared between requests. Turns on one session are
/// serialized by its lock; different sessions proceed independently.
pub type SessionHandle = Arc<tokio::sync::Mutex<ConversationSession>>;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

struct StoredSession {
    handle: SessionHandle,
    last_touched: Instant,
}

/// Sessions live until deleted or until they sit untouched for longer than
/// the idle timeout. Expired sessions are swept whenever a session is created.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, StoredSession>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Starts a new, empty session and returns its id.
    pub fn create(&self) -> (Uuid, SessionHandle) {
        let now = Instant::now();
        self.evict_idle(now);

        let session = ConversationSession::new();
        let id = session.id();
        let handle = Arc::new(tokio::sync::Mutex::new(session));
        self.lock().insert(
            id,
            StoredSession {
                handle: handle.clone(),
                last_touched: now,
            },
        );
        (id, handle)
    }

    /// Looks up a live session and marks it as used.
    pub fn get(&self, id: Uuid) -> Option<SessionHandle> {
        let now = Instant::now();
        let mut sessions = self.lock();
        match sessions.get_mut(&id) {
            Some(stored) if now.duration_since(stored.last_touched) <= self.idle_timeout => {
                stored.last_touched = now;
                Some(stored.handle.clone())
            }
            Some(_) => {
                sessions.remove(&id);
                None
            }
            None => None,
        }
    }

    /// Drops a session. Returns `false` if it did not exist.
    pub fn remove(&self, id: Uuid) -> bool {
        self.lock().remove(&id).is_some()
    }

    /// Removes every session idle for longer than the timeout at `now`.
    /// Returns how many were dropped.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, stored| now.duration_since(stored.last_touched) <= self.idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "Evicted idle sessions.");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, StoredSession>> {
        // Entries are inserted and removed whole, so a poisoned map is still usable.
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
