use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::SessionRepository;
use crate::domain::session::StorefrontSession;

/// Sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TIMEOUT_SECS: i64 = 30 * 60;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl<T> From<PoisonError<T>> for DomainError {
    fn from(e: PoisonError<T>) -> Self {
        DomainError::Internal(format!("session store lock poisoned: {e}"))
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

/// Process-local session store. Sessions die with the process, or earlier
/// once idle for longer than the timeout.
#[derive(Debug)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, StorefrontSession>>,
    idle_timeout: Duration,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::with_idle_timeout(Duration::seconds(DEFAULT_IDLE_TIMEOUT_SECS))
    }
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read()?.len())
    }

    /// The live session for `id`, touched. Expired sessions are dropped on sight.
    fn live<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, StorefrontSession>,
        id: Uuid,
    ) -> Option<&'a mut StorefrontSession> {
        let now = Utc::now();
        if sessions.get(&id)?.is_idle(now, self.idle_timeout) {
            sessions.remove(&id);
            log::debug!("Session {} expired", id);
            return None;
        }
        let session = sessions.get_mut(&id)?;
        session.touch(now);
        Some(session)
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: StorefrontSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write()?;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_idle(now, self.idle_timeout));
        let evicted = before - sessions.len();
        if evicted > 0 {
            log::info!("Evicted {} idle sessions", evicted);
        }
        sessions.insert(session.id, session);
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<StorefrontSession>, DomainError> {
        let mut sessions = self.sessions.write()?;
        Ok(self.live(&mut sessions, id).map(|s| s.clone()))
    }

    fn update<T, F>(&self, id: Uuid, f: F) -> Result<Option<T>, DomainError>
    where
        F: FnOnce(&mut StorefrontSession) -> T,
    {
        let mut sessions = self.sessions.write()?;
        Ok(self.live(&mut sessions, id).map(f))
    }

    fn remove(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.sessions.write()?.remove(&id).is_some())
    }
}
