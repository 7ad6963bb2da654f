use serde::{Deserialize, Serialize};

/// Job search filters collected from the conversation.
///
/// Absent values are always `None`, never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub role: Option<String>,
    pub location: Option<String>,
    pub domain: Option<String>,
    pub min_salary: Option<u64>,
}

/// One field of a single turn's extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    /// The key was not in the extraction at all.
    Missing,
    /// The key was present and explicitly empty (`null`, blank, placeholder).
    Cleared,
    Set(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Missing
    }
}

impl<T> Slot<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Slot::Missing)
    }

    /// Missing carries `previous` forward, Cleared drops it, Set replaces it.
    fn apply(self, previous: Option<T>) -> Option<T> {
        match self {
            Slot::Missing => previous,
            Slot::Cleared => None,
            Slot::Set(value) => Some(value),
        }
    }

    /// Only a new value replaces `previous`; an explicit empty does not.
    fn apply_required(self, previous: Option<T>) -> Option<T> {
        match self {
            Slot::Set(value) => Some(value),
            Slot::Missing | Slot::Cleared => previous,
        }
    }
}

impl<T> From<Option<T>> for Slot<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Slot::Missing, Slot::Set)
    }
}

/// What one turn's extraction says about each criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaUpdate {
    pub role: Slot<String>,
    pub location: Slot<String>,
    pub domain: Slot<String>,
    pub min_salary: Slot<u64>,
}

impl CriteriaUpdate {
    /// True when the extraction mentioned no field at all.
    pub fn is_empty(&self) -> bool {
        self.role.is_missing()
            && self.location.is_missing()
            && self.domain.is_missing()
            && self.min_salary.is_missing()
    }
}

/// Values become `Set`, `None` becomes `Missing`.
impl From<SearchCriteria> for CriteriaUpdate {
    fn from(criteria: SearchCriteria) -> Self {
        CriteriaUpdate {
            role: criteria.role.into(),
            location: criteria.location.into(),
            domain: criteria.domain.into(),
            min_salary: criteria.min_salary.into(),
        }
    }
}

impl SearchCriteria {
    /// Applies one turn's extraction on top of what the session knows.
    ///
    /// Role and location are the slots being filled, so only a new value
    /// replaces them. Domain and salary are optional filters: an explicit null
    /// clears them, a missing key leaves them as they were.
    pub fn merge(self, update: CriteriaUpdate) -> SearchCriteria {
        SearchCriteria {
            role: update.role.apply_required(self.role),
            location: update.location.apply_required(self.location),
            domain: update.domain.apply(self.domain),
            min_salary: update.min_salary.apply(self.min_salary),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SearchCriteria::default()
    }

    /// True when an optional filter is set that a relaxed search would drop.
    pub fn has_relaxable_filters(&self) -> bool {
        self.domain.is_some() || self.min_salary.is_some()
    }

    /// Only the core fields, role and location.
    pub fn relaxed(&self) -> SearchCriteria {
        SearchCriteria {
            role: self.role.clone(),
            location: self.location.clone(),
            domain: None,
            min_salary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(
        role: Option<&str>,
        location: Option<&str>,
        domain: Option<&str>,
        min_salary: Option<u64>,
    ) -> SearchCriteria {
        SearchCriteria {
            role: role.map(String::from),
            location: location.map(String::from),
            domain: domain.map(String::from),
            min_salary,
        }
    }

    #[test]
    fn test_merge_newer_values_override() {
        let previous = criteria(Some("Data Analyst"), Some("Chicago"), None, None);
        let newer = criteria(None, Some("New York"), Some("Finance"), None);

        let merged = previous.merge(newer.into());
        assert_eq!(
            merged,
            criteria(Some("Data Analyst"), Some("New York"), Some("Finance"), None)
        );
    }

    #[test]
    fn test_merge_with_empty_keeps_previous() {
        let previous = criteria(Some("Software Engineer"), None, Some("SaaS"), Some(120_000));
        let merged = previous.clone().merge(CriteriaUpdate::default());
        assert_eq!(merged, previous);
    }

    #[test]
    fn test_explicit_null_clears_optional_filters() {
        let previous = criteria(
            Some("Software Engineer"),
            Some("New York"),
            Some("FinTech"),
            Some(160_000),
        );
        let update = CriteriaUpdate {
            role: Slot::Set("Data Analyst".to_string()),
            location: Slot::Set("New York".to_string()),
            domain: Slot::Cleared,
            min_salary: Slot::Cleared,
        };

        let merged = previous.merge(update);
        assert_eq!(merged, criteria(Some("Data Analyst"), Some("New York"), None, None));
    }

    #[test]
    fn test_explicit_null_keeps_filled_slots() {
        let previous = criteria(Some("Data Analyst"), None, None, None);
        let update = CriteriaUpdate {
            role: Slot::Cleared,
            location: Slot::Set("Chicago".to_string()),
            ..Default::default()
        };

        let merged = previous.merge(update);
        assert_eq!(merged, criteria(Some("Data Analyst"), Some("Chicago"), None, None));
    }

    #[test]
    fn test_update_from_criteria_marks_absent_as_missing() {
        let update = CriteriaUpdate::from(criteria(Some("x"), None, None, Some(5)));
        assert_eq!(update.role, Slot::Set("x".to_string()));
        assert_eq!(update.location, Slot::Missing);
        assert_eq!(update.min_salary, Slot::Set(5));
        assert!(!update.is_empty());
        assert!(CriteriaUpdate::default().is_empty());
    }

    #[test]
    fn test_relaxed_drops_optional_filters() {
        let full = criteria(Some("Data Analyst"), Some("NY"), Some("Finance"), Some(1));
        assert!(full.has_relaxable_filters());

        let relaxed = full.relaxed();
        assert_eq!(relaxed, criteria(Some("Data Analyst"), Some("NY"), None, None));
        assert!(!relaxed.has_relaxable_filters());
    }

    #[test]
    fn test_default_is_empty() {
        assert!(SearchCriteria::default().is_empty());
        assert!(!criteria(Some("x"), None, None, None).is_empty());
    }
}
