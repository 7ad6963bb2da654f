use serde::{Deserialize, Serialize};

/// A posting from the job dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: u32,
    pub role: String,
    pub location: String,
    pub salary: u64,
    pub domain: String,
    pub description: String,
}

/// A search hit with the reasons it matched, as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub job: JobRecord,
    pub reasons: Vec<String>,
}
