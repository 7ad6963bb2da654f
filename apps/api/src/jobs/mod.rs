//! Job lookup: the dataset behind job search.
//!
//! `AppState` holds an `Arc<dyn JobRepository>`; the fixture dataset is the only
//! backend today.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::criteria::SearchCriteria;
use crate::models::job::JobRecord;

pub mod fixture;

/// Maximum number of records a single lookup returns.
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("job source unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Returns at most `MAX_RESULTS` jobs satisfying every present filter.
    /// Text filters are case-insensitive substring matches, salary is `>=`.
    async fn lookup(&self, criteria: &SearchCriteria) -> Result<Vec<JobRecord>, LookupError>;
}

/// Whether `job` passes every filter present in `criteria`.
pub fn job_matches(job: &JobRecord, criteria: &SearchCriteria) -> bool {
    passes_text_filter(&job.role, criteria.role.as_deref())
        && passes_text_filter(&job.location, criteria.location.as_deref())
        && passes_text_filter(&job.domain, criteria.domain.as_deref())
        && criteria.min_salary.map_or(true, |min| job.salary >= min)
}

/// An absent filter lets every job through.
fn passes_text_filter(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}
