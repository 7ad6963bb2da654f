//! Session memory — per-conversation turn history plus accumulated search criteria.
//!
//! `AppState` carries an `Arc<dyn SessionStore>`. Backends:
//! - `InMemorySessionStore`: process-local map, idle sessions expire after a TTL.
//! - `RedisSessionStore`: shared store, expiry enforced by Redis key TTLs.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::conversation::Session;
use crate::models::criteria::SearchCriteria;

pub mod memory;
pub mod redis_store;

pub use self::memory::InMemorySessionStore;
pub use self::redis_store::RedisSessionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Session encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the live session for `id`, creating an empty one if none exists
    /// or the previous one expired.
    async fn get_or_create(&self, id: &str) -> Result<Session, StoreError>;

    /// Appends one human entry then one assistant entry.
    async fn append_turn(&self, id: &str, human: &str, assistant: &str)
        -> Result<(), StoreError>;

    /// Replaces the accumulated search criteria for `id`.
    async fn save_criteria(&self, id: &str, criteria: &SearchCriteria)
        -> Result<(), StoreError>;

    /// Drops expired sessions, returning how many were removed.
    async fn purge_expired(&self) -> Result<usize, StoreError>;
}
