use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::criteria::SearchCriteria;

/// Who produced a turn entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Human,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn human(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Human,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// A client-identified conversation thread.
///
/// `turns` is append-only and kept in arrival order. `criteria` accumulates the
/// job search filters gathered across turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub turns: Vec<Turn>,
    pub criteria: SearchCriteria,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            turns: Vec::new(),
            criteria: SearchCriteria::default(),
            created_at: now,
            last_active: now,
        }
    }

    /// Number of completed human/assistant exchanges.
    pub fn exchange_count(&self) -> usize {
        self.turns
            .iter()
            .filter(|t| t.speaker == Speaker::Human)
            .count()
    }
}
