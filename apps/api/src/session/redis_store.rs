use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::aio::MultiplexedConnection;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::conversation::{Session, Turn};
use crate::models::criteria::SearchCriteria;
use crate::session::{SessionStore, StoreError};

const KEY_PREFIX: &str = "job-assistant:session";

/// Per-session fields stored next to the turn list.
#[derive(Debug, Serialize, Deserialize)]
struct SessionState {
    criteria: SearchCriteria,
    created_at: DateTime<Utc>,
}

/// Redis-backed sessions.
///
/// Layout per session: a list of JSON-encoded turns and a JSON state string.
/// Every write refreshes `EXPIRE` on both keys, so idle sessions age out in Redis.
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        info!("Redis session store connected");
        Ok(Self {
            conn,
            ttl_secs: ttl.as_secs().max(1),
        })
    }

    async fn write_state(&self, id: &str, state: &SessionState) -> Result<(), StoreError> {
        let (turns_key, state_key) = keys(id);
        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&state_key)
            .arg(serde_json::to_string(state)?)
            .arg("EX")
            .arg(self.ttl_secs)
            .ignore()
            .cmd("EXPIRE")
            .arg(&turns_key)
            .arg(self.ttl_secs)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn read_state(&self, id: &str) -> Result<Option<SessionState>, StoreError> {
        let (_, state_key) = keys(id);
        let mut conn = self.conn.clone();
        let raw: Option<String> = redis::cmd("GET")
            .arg(&state_key)
            .query_async(&mut conn)
            .await?;
        Ok(raw.map(|s| serde_json::from_str(&s)).transpose()?)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get_or_create(&self, id: &str) -> Result<Session, StoreError> {
        let (turns_key, _) = keys(id);

        let state = match self.read_state(id).await? {
            Some(state) => state,
            None => SessionState {
                criteria: SearchCriteria::default(),
                created_at: Utc::now(),
            },
        };
        // Touch both keys so reads also count as activity.
        self.write_state(id, &state).await?;

        let mut conn = self.conn.clone();
        let raw_turns: Vec<String> = redis::cmd("LRANGE")
            .arg(&turns_key)
            .arg(0)
            .arg(-1)
            .query_async(&mut conn)
            .await?;
        let turns = raw_turns
            .iter()
            .map(|raw| serde_json::from_str::<Turn>(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Session {
            id: id.to_string(),
            turns,
            criteria: state.criteria,
            created_at: state.created_at,
            last_active: Utc::now(),
        })
    }

    async fn append_turn(
        &self,
        id: &str,
        human: &str,
        assistant: &str,
    ) -> Result<(), StoreError> {
        let (turns_key, state_key) = keys(id);
        let human = serde_json::to_string(&Turn::human(human))?;
        let assistant = serde_json::to_string(&Turn::assistant(assistant))?;

        let mut conn = self.conn.clone();
        redis::pipe()
            .atomic()
            .cmd("RPUSH")
            .arg(&turns_key)
            .arg(human)
            .arg(assistant)
            .ignore()
            .cmd("EXPIRE")
            .arg(&turns_key)
            .arg(self.ttl_secs)
            .ignore()
            .cmd("EXPIRE")
            .arg(&state_key)
            .arg(self.ttl_secs)
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn save_criteria(&self, id: &str, criteria: &SearchCriteria) -> Result<(), StoreError> {
        let created_at = self
            .read_state(id)
            .await?
            .map(|state| state.created_at)
            .unwrap_or_else(Utc::now);
        let state = SessionState {
            criteria: criteria.clone(),
            created_at,
        };
        self.write_state(id, &state).await
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        // Redis evicts expired keys itself.
        Ok(0)
    }
}

fn keys(id: &str) -> (String, String) {
    (
        format!("{KEY_PREFIX}:{id}:turns"),
        format!("{KEY_PREFIX}:{id}:state"),
    )
}
