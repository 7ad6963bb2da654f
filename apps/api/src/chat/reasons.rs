//! Match reasons — why a returned job fits the search.

use crate::models::criteria::SearchCriteria;
use crate::models::job::{JobRecord, MatchResult};

pub const GENERIC_MATCH_REASON: &str = "This is a good general match based on your query.";

/// One reason per satisfied criterion, in role, location, domain, salary order.
/// Falls back to a single generic reason when nothing matched.
pub fn match_reasons(job: &JobRecord, criteria: &SearchCriteria) -> Vec<String> {
    let mut reasons = Vec::new();

    if mentions_criterion(&job.role, criteria.role.as_deref()) {
        reasons.push(format!("Matches role: **{}**", job.role));
    }
    if mentions_criterion(&job.location, criteria.location.as_deref()) {
        reasons.push(format!("Matches location: **{}**", job.location));
    }
    if mentions_criterion(&job.domain, criteria.domain.as_deref()) {
        reasons.push(format!("Matches domain: **{}**", job.domain));
    }
    if criteria.min_salary.is_some_and(|min| job.salary >= min) {
        reasons.push(format!(
            "Meets salary requirement: **${}**",
            with_thousands(job.salary)
        ));
    }

    if reasons.is_empty() {
        reasons.push(GENERIC_MATCH_REASON.to_string());
    }
    reasons
}

/// Attaches reasons computed against `criteria` to every job.
pub fn annotate(jobs: Vec<JobRecord>, criteria: &SearchCriteria) -> Vec<MatchResult> {
    jobs.into_iter()
        .map(|job| {
            let reasons = match_reasons(&job, criteria);
            MatchResult { job, reasons }
        })
        .collect()
}

/// Only a present criterion can match.
fn mentions_criterion(field: &str, needle: Option<&str>) -> bool {
    needle.is_some_and(|n| field.to_lowercase().contains(&n.to_lowercase()))
}

fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::fixture::sample_jobs;

    fn fintech_engineer() -> JobRecord {
        sample_jobs().into_iter().find(|j| j.id == 5).unwrap()
    }

    #[test]
    fn test_all_four_criteria_in_fixed_order() {
        let criteria = SearchCriteria {
            role: Some("software".to_string()),
            location: Some("NEW YORK".to_string()),
            domain: Some("fintech".to_string()),
            min_salary: Some(150_000),
        };
        let reasons = match_reasons(&fintech_engineer(), &criteria);
        assert_eq!(
            reasons,
            vec![
                "Matches role: **Software Engineer**",
                "Matches location: **New York, NY**",
                "Matches domain: **FinTech**",
                "Meets salary requirement: **$165,000**",
            ]
        );
    }

    #[test]
    fn test_nothing_matches_gives_single_generic_reason() {
        let criteria = SearchCriteria {
            role: Some("Chef".to_string()),
            location: Some("Paris".to_string()),
            domain: Some("Food".to_string()),
            min_salary: Some(500_000),
        };
        assert_eq!(
            match_reasons(&fintech_engineer(), &criteria),
            vec![GENERIC_MATCH_REASON]
        );
    }

    #[test]
    fn test_empty_criteria_gives_generic_reason() {
        assert_eq!(
            match_reasons(&fintech_engineer(), &SearchCriteria::default()),
            vec![GENERIC_MATCH_REASON]
        );
    }

    #[test]
    fn test_role_and_location_only() {
        let criteria = SearchCriteria {
            role: Some("Software Engineer".to_string()),
            location: Some("New York".to_string()),
            ..Default::default()
        };
        assert_eq!(
            match_reasons(&fintech_engineer(), &criteria),
            vec![
                "Matches role: **Software Engineer**",
                "Matches location: **New York, NY**",
            ]
        );
    }

    #[test]
    fn test_salary_below_threshold_is_not_a_reason() {
        let criteria = SearchCriteria {
            role: Some("Software".to_string()),
            min_salary: Some(165_001),
            ..Default::default()
        };
        assert_eq!(
            match_reasons(&fintech_engineer(), &criteria),
            vec!["Matches role: **Software Engineer**"]
        );
    }

    #[test]
    fn test_with_thousands() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1_000), "1,000");
        assert_eq!(with_thousands(95_000), "95,000");
        assert_eq!(with_thousands(1_500_000), "1,500,000");
    }
}
