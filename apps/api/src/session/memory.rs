use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::conversation::{Session, Turn};
use crate::models::criteria::SearchCriteria;
use crate::session::{SessionStore, StoreError};

/// Process-local session map. Every operation runs under one lock, so appends
/// for the same session never interleave.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    ttl: chrono::Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX),
        }
    }

    fn is_expired(&self, session: &Session, now: DateTime<Utc>) -> bool {
        now - session.last_active > self.ttl
    }

    /// Fetches the live entry for `id`, resetting it if it expired.
    fn live_entry<'a>(
        &self,
        sessions: &'a mut HashMap<String, Session>,
        id: &str,
        now: DateTime<Utc>,
    ) -> &'a mut Session {
        if sessions
            .get(id)
            .is_some_and(|session| self.is_expired(session, now))
        {
            debug!(conversation_id = id, "session expired; starting fresh");
            sessions.remove(id);
        }
        sessions
            .entry(id.to_string())
            .or_insert_with(|| Session::new(id))
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &str) -> Result<Session, StoreError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let session = self.live_entry(&mut sessions, id, now);
        session.last_active = now;
        Ok(session.clone())
    }

    async fn append_turn(
        &self,
        id: &str,
        human: &str,
        assistant: &str,
    ) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let session = self.live_entry(&mut sessions, id, now);
        session.turns.push(Turn::human(human));
        session.turns.push(Turn::assistant(assistant));
        session.last_active = now;
        Ok(())
    }

    async fn save_criteria(&self, id: &str, criteria: &SearchCriteria) -> Result<(), StoreError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let session = self.live_entry(&mut sessions, id, now);
        session.criteria = criteria.clone();
        session.last_active = now;
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        Ok(before - sessions.len())
    }
}
