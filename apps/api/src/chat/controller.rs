//! Dialogue controller — one chat turn from query to persisted reply.
//!
//! Per turn:
//! 1. Load (or start) the session and classify the query against its history.
//! 2. Dispatch: job search, general question, or greeting.
//! 3. Persist merged search criteria (job search only) and append the turn.
//!
//! A failure at any step aborts the turn before anything is persisted.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

use crate::chat::advisor::Advisor;
use crate::chat::criteria::CriteriaExtractor;
use crate::chat::intent::{Intent, IntentClassifier};
use crate::chat::prompts::{ASK_ROLE_REPLY, GREETING_REPLY};
use crate::chat::reasons::annotate;
use crate::chat::ChatError;
use crate::jobs::JobRepository;
use crate::models::conversation::Session;
use crate::models::criteria::SearchCriteria;
use crate::models::job::MatchResult;
use crate::session::SessionStore;

/// What the client receives for a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<MatchResult>>,
}

impl ChatReply {
    fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            data: None,
        }
    }

    fn with_matches(response: impl Into<String>, matches: Vec<MatchResult>) -> Self {
        Self {
            response: response.into(),
            data: Some(matches),
        }
    }
}

/// A reply plus the criteria to remember for the session, if any.
struct TurnOutcome {
    reply: ChatReply,
    criteria: Option<SearchCriteria>,
}

pub struct ChatService {
    sessions: Arc<dyn SessionStore>,
    classifier: Arc<dyn IntentClassifier>,
    extractor: Arc<dyn CriteriaExtractor>,
    advisor: Arc<dyn Advisor>,
    jobs: Arc<dyn JobRepository>,
    /// Serialises turns within one conversation.
    turn_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ChatService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        classifier: Arc<dyn IntentClassifier>,
        extractor: Arc<dyn CriteriaExtractor>,
        advisor: Arc<dyn Advisor>,
        jobs: Arc<dyn JobRepository>,
    ) -> Self {
        Self {
            sessions,
            classifier,
            extractor,
            advisor,
            jobs,
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Runs one turn for `conversation_id`.
    pub async fn handle(&self, conversation_id: &str, query: &str) -> Result<ChatReply, ChatError> {
        let query = query.trim();

        let guard = self.lock_conversation(conversation_id).await;
        let result = self.run_turn(conversation_id, query).await;
        drop(guard);
        self.release_idle_locks().await;

        result
    }

    async fn run_turn(&self, conversation_id: &str, query: &str) -> Result<ChatReply, ChatError> {
        let session = self.sessions.get_or_create(conversation_id).await?;

        let intent = self
            .classifier
            .classify(&session.turns, query)
            .await
            .map_err(ChatError::Classification)?;
        info!(
            intent = intent.as_label(),
            prior_exchanges = session.exchange_count(),
            "routed query"
        );

        let outcome = match intent {
            Intent::JobSearch => self.job_search(&session, query).await?,
            Intent::GeneralQuestion => self.general_question(&session, query).await?,
            Intent::Greeting => TurnOutcome {
                reply: ChatReply::text(GREETING_REPLY),
                criteria: None,
            },
        };

        if let Some(criteria) = &outcome.criteria {
            self.sessions
                .save_criteria(conversation_id, criteria)
                .await?;
        }
        self.sessions
            .append_turn(conversation_id, query, &outcome.reply.response)
            .await?;

        Ok(outcome.reply)
    }

    async fn job_search(&self, session: &Session, query: &str) -> Result<TurnOutcome, ChatError> {
        let update = self
            .extractor
            .extract(&session.turns, &session.criteria, query)
            .await
            .map_err(ChatError::Extraction)?;
        if update.is_empty() {
            debug!("nothing extracted this turn");
        }
        let criteria = session.criteria.clone().merge(update);

        let reply = self.search_with_fallback(&criteria).await?;
        Ok(TurnOutcome {
            reply,
            criteria: Some(criteria),
        })
    }

    /// Slot-filling then search: role and location are required before any
    /// lookup; domain and salary are dropped once if the full search is empty.
    async fn search_with_fallback(&self, criteria: &SearchCriteria) -> Result<ChatReply, ChatError> {
        let Some(role) = criteria.role.as_deref() else {
            debug!("no role yet; asking for one");
            return Ok(ChatReply::text(ASK_ROLE_REPLY));
        };
        let Some(location) = criteria.location.as_deref() else {
            debug!(role, "no location yet; asking for one");
            return Ok(ChatReply::text(format!(
                "Sounds good, a {role} role. Where are you looking? (e.g., 'New York', or 'Remote')"
            )));
        };

        let results = self.jobs.lookup(criteria).await?;
        if !results.is_empty() {
            let count = results.len();
            info!(count, "job search matched");
            return Ok(ChatReply::with_matches(
                format!("Success! I found {count} matching jobs. Here are the top results:"),
                annotate(results, criteria),
            ));
        }

        if criteria.has_relaxable_filters() {
            let relaxed = criteria.relaxed();
            info!(role, location, "no exact match; relaxing domain and salary");
            let results = self.jobs.lookup(&relaxed).await?;
            if !results.is_empty() {
                let count = results.len();
                return Ok(ChatReply::with_matches(
                    format!(
                        "I couldn't find an exact match, but here are {count} jobs that match your core criteria:"
                    ),
                    annotate(results, &relaxed),
                ));
            }
        }

        info!(role, location, "job search found nothing");
        Ok(ChatReply::text(format!(
            "I couldn't find any {role} positions in {location}. Would you like to try a different search?"
        )))
    }

    async fn general_question(
        &self,
        session: &Session,
        query: &str,
    ) -> Result<TurnOutcome, ChatError> {
        let answer = self
            .advisor
            .answer(&session.turns, query)
            .await
            .map_err(ChatError::Advice)?;
        Ok(TurnOutcome {
            reply: ChatReply::text(answer),
            criteria: None,
        })
    }

    async fn lock_conversation(&self, conversation_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.turn_locks.lock().await;
            locks
                .entry(conversation_id.to_string())
                .or_default()
                .clone()
        };
        lock.lock_owned().await
    }

    /// Forgets locks nobody is holding or waiting on.
    async fn release_idle_locks(&self) {
        let mut locks = self.turn_locks.lock().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
