use async_trait::async_trait;

use crate::jobs::{job_matches, JobRepository, LookupError, MAX_RESULTS};
use crate::models::criteria::SearchCriteria;
use crate::models::job::JobRecord;

/// In-memory job dataset. Lookups never fail.
pub struct FixtureJobRepository {
    jobs: Vec<JobRecord>,
}

impl FixtureJobRepository {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self { jobs }
    }

    /// The bundled sample postings.
    pub fn sample() -> Self {
        Self::new(sample_jobs())
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

#[async_trait]
impl JobRepository for FixtureJobRepository {
    async fn lookup(&self, criteria: &SearchCriteria) -> Result<Vec<JobRecord>, LookupError> {
        Ok(self
            .jobs
            .iter()
            .filter(|job| job_matches(job, criteria))
            .take(MAX_RESULTS)
            .cloned()
            .collect())
    }
}

fn job(
    id: u32,
    role: &str,
    location: &str,
    salary: u64,
    domain: &str,
    description: &str,
) -> JobRecord {
    JobRecord {
        id,
        role: role.to_string(),
        location: location.to_string(),
        salary,
        domain: domain.to_string(),
        description: description.to_string(),
    }
}

pub fn sample_jobs() -> Vec<JobRecord> {
    vec![
        job(
            1,
            "Software Engineer",
            "San Francisco, CA",
            150_000,
            "Cloud Computing",
            "Build scalable cloud services for a major tech company.",
        ),
        job(
            2,
            "Data Analyst",
            "New York, NY",
            110_000,
            "Finance",
            "Analyze financial data to identify market trends for a top investment bank.",
        ),
        job(
            3,
            "Product Manager",
            "Remote",
            135_000,
            "SaaS",
            "Lead the product lifecycle for a fast-growing software-as-a-service startup.",
        ),
        job(
            4,
            "UX/UI Designer",
            "Austin, TX",
            95_000,
            "E-commerce",
            "Design intuitive and beautiful user interfaces for an online retail platform.",
        ),
        job(
            5,
            "Software Engineer",
            "New York, NY",
            165_000,
            "FinTech",
            "Develop trading algorithms and high-frequency trading systems.",
        ),
        job(
            6,
            "Data Scientist",
            "San Francisco, CA",
            175_000,
            "AI/ML",
            "Research and develop machine learning models for a leading AI research lab.",
        ),
        job(
            7,
            "Data Analyst",
            "Chicago, IL",
            90_000,
            "Healthcare",
            "Work with patient data to improve healthcare outcomes.",
        ),
        job(
            8,
            "Software Engineer",
            "Remote",
            140_000,
            "Startup",
            "Full-stack development for a new social media application.",
        ),
    ]
}
