use crate::{
    config::Credentials,
    error::{LogoflowError, Result},
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub type SessionId = Uuid;

/// Per-user state between the name step and the logo step.
///
/// The selection is always a member of the current candidate list: it is
/// cleared whenever a new list is recorded.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub credentials: Credentials,
    description: String,
    candidates: Option<Vec<String>>,
    selected: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Stores a fresh candidate list and the description that produced it.
    ///
    /// An empty list leaves the session untouched and returns `false`.
    pub fn record_candidates(&mut self, description: &str, names: Vec<String>) -> bool {
        if names.is_empty() {
            return false;
        }
        self.description = description.to_string();
        self.candidates = Some(names);
        self.selected = None;
        true
    }

    pub fn select(&mut self, name: &str) -> Result<()> {
        let candidates = self
            .candidates
            .as_ref()
            .ok_or_else(|| LogoflowError::SessionError("No names generated yet".into()))?;

        if !candidates.iter().any(|c| c == name) {
            return Err(LogoflowError::SessionError(format!(
                "'{}' is not one of the current names",
                name
            )));
        }

        self.selected = Some(name.to_string());
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn can_generate_logo(&self) -> bool {
        self.credentials.is_ready() && self.selected.as_deref().is_some_and(|s| !s.is_empty())
    }
}

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
struct SessionEntry {
    session: Session,
    last_seen: Instant,
}

/// In-memory sessions keyed by id. A session idle for longer than the timeout
/// is dropped, credentials included; nothing is persisted.
#[derive(Debug)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SessionEntry>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Locks the map after evicting idle sessions.
    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, SessionEntry>> {
        // A panic while holding the lock cannot leave a half-written session.
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < self.idle_timeout);
        if sessions.len() < before {
            log::debug!("Expired {} idle session(s)", before - sessions.len());
        }
        sessions
    }

    pub fn create(&self) -> SessionId {
        let id = Uuid::new_v4();
        self.lock().insert(
            id,
            SessionEntry {
                session: Session::new(),
                last_seen: Instant::now(),
            },
        );
        log::debug!("Created session {}", id);
        id
    }

    /// Returns a snapshot of a live session and marks it as seen.
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.lock().get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            entry.session.clone()
        })
    }

    /// Returns `id` if it names a live session, otherwise a newly created one.
    pub fn get_or_create(&self, id: Option<SessionId>) -> SessionId {
        match id {
            Some(id) if self.get(&id).is_some() => id,
            _ => self.create(),
        }
    }

    /// Applies `f` to the stored session. The lock is never held across an
    /// upstream call: callers snapshot, call out, then update.
    pub fn update<R>(&self, id: &SessionId, f: impl FnOnce(&mut Session) -> R) -> Option<R> {
        self.lock().get_mut(id).map(|entry| {
            entry.last_seen = Instant::now();
            f(&mut entry.session)
        })
    }

    pub fn remove(&self, id: &SessionId) -> Option<Session> {
        self.lock().remove(id).map(|entry| entry.session)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
