//! Criteria extraction — turns conversational text into a `CriteriaUpdate`.
//!
//! Model output is not guaranteed to be well-formed. Anything that cannot be read
//! as a JSON object yields an update with every field missing instead of an error.
//! A key that is present but `null` stays distinct from a key that is absent.

use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::chat::prompts::{criteria_prompt, CRITERIA_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{ChatModel, LlmError};
use crate::models::conversation::Turn;
use crate::models::criteria::{CriteriaUpdate, SearchCriteria, Slot};

/// First `{` through last `}`, across newlines.
static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON span pattern is valid"));

/// Pulls the first brace-delimited span out of `text` and parses it as a JSON
/// object. Returns an empty map when there is no span or it is not an object.
pub fn extract_json_object(text: &str) -> Map<String, Value> {
    let Some(span) = JSON_SPAN.find(text) else {
        return Map::new();
    };

    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            debug!("criteria span is not valid JSON: {e}");
            Map::new()
        }
    }
}

/// Reads the four criteria fields from a loosely typed object.
///
/// Absent or mistyped keys are `Missing`; `null`, blank strings and placeholder
/// strings are `Cleared`.
pub fn criteria_from_json(object: &Map<String, Value>) -> CriteriaUpdate {
    CriteriaUpdate {
        role: text_slot(object.get("role")),
        location: text_slot(object.get("location")),
        domain: text_slot(object.get("domain")),
        min_salary: salary_slot(object.get("min_salary")),
    }
}

/// `extract_json_object` followed by `criteria_from_json`.
pub fn parse_criteria(text: &str) -> CriteriaUpdate {
    criteria_from_json(&extract_json_object(text))
}

fn text_slot(value: Option<&Value>) -> Slot<String> {
    let text = match value {
        None => return Slot::Missing,
        Some(Value::Null) => return Slot::Cleared,
        Some(Value::String(s)) => s.trim(),
        Some(_) => return Slot::Missing,
    };
    let placeholder = ["null", "none", "n/a", "unknown"]
        .iter()
        .any(|p| text.eq_ignore_ascii_case(p));
    if text.is_empty() || placeholder {
        Slot::Cleared
    } else {
        Slot::Set(text.to_string())
    }
}

fn salary_slot(value: Option<&Value>) -> Slot<u64> {
    let amount = match value {
        None => return Slot::Missing,
        Some(Value::Null) => return Slot::Cleared,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Slot::Cleared,
        Some(Value::String(s)) => parse_salary_text(s),
        Some(_) => return Slot::Missing,
    };
    match amount {
        Some(n) if n.is_finite() && n >= 1.0 => Slot::Set(n as u64),
        // Zero or negative means "no minimum".
        Some(n) if n.is_finite() => Slot::Cleared,
        _ => Slot::Missing,
    }
}

/// Accepts forms like `120000`, `$120,000`, `120k`, `1.5m`.
fn parse_salary_text(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_' | ' '))
        .collect();

    let (digits, multiplier) = if let Some(d) = cleaned.strip_suffix('k') {
        (d, 1_000.0)
    } else if let Some(d) = cleaned.strip_suffix('m') {
        (d, 1_000_000.0)
    } else {
        (cleaned.as_str(), 1.0)
    };

    digits.parse::<f64>().ok().map(|n| n * multiplier)
}

#[async_trait]
pub trait CriteriaExtractor: Send + Sync {
    /// Best-effort extraction for the latest turn. `known` is what the session
    /// has accumulated so far.
    async fn extract(
        &self,
        history: &[Turn],
        known: &SearchCriteria,
        query: &str,
    ) -> Result<CriteriaUpdate, LlmError>;
}

pub struct LlmCriteriaExtractor {
    model: Arc<dyn ChatModel>,
    system: String,
}

impl LlmCriteriaExtractor {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            system: format!("{CRITERIA_SYSTEM}{JSON_ONLY_INSTRUCTION}"),
        }
    }
}

#[async_trait]
impl CriteriaExtractor for LlmCriteriaExtractor {
    async fn extract(
        &self,
        history: &[Turn],
        known: &SearchCriteria,
        query: &str,
    ) -> Result<CriteriaUpdate, LlmError> {
        let known = serde_json::to_string(known).unwrap_or_else(|_| "{}".to_string());
        let prompt = criteria_prompt(&known, query);

        let reply = self.model.complete(&self.system, history, &prompt).await?;
        let update = parse_criteria(&reply);
        debug!(?update, "extracted search criteria");
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    fn set(text: &str) -> Slot<String> {
        Slot::Set(text.to_string())
    }

    #[test]
    fn test_no_brace_span_yields_all_missing() {
        assert!(parse_criteria("I could not find any criteria, sorry.").is_empty());
        assert!(parse_criteria("").is_empty());
    }

    #[test]
    fn test_invalid_json_span_yields_all_missing() {
        assert!(parse_criteria("Here you go: {role: Software Engineer, location: ?}").is_empty());
        assert!(parse_criteria("{\"role\": \"Data Analyst\",").is_empty());
    }

    #[test]
    fn test_span_surrounded_by_prose_and_fences() {
        let raw = "Sure! Here is the JSON:\n```json\n{\n  \"role\": \"Data Analyst\",\n  \"location\": \"New York\",\n  \"domain\": null,\n  \"min_salary\": 120000\n}\n```\nLet me know!";
        let update = parse_criteria(raw);
        assert_eq!(update.role, set("Data Analyst"));
        assert_eq!(update.location, set("New York"));
        assert_eq!(update.domain, Slot::Cleared);
        assert_eq!(update.min_salary, Slot::Set(120_000));
    }

    #[test]
    fn test_null_and_absent_keys_stay_distinct() {
        let update = parse_criteria(r#"{"role": "Data Analyst", "domain": null}"#);
        assert_eq!(update.domain, Slot::Cleared);
        assert_eq!(update.location, Slot::Missing);
        assert_eq!(update.min_salary, Slot::Missing);
    }

    #[test]
    fn test_greedy_span_over_two_objects_is_invalid() {
        // First `{` to last `}` covers both objects, which is not valid JSON.
        let raw = "{\"role\": \"A\"} and also {\"role\": \"B\"}";
        assert!(parse_criteria(raw).is_empty());
    }

    #[test]
    fn test_object_inside_array_is_found() {
        let object = extract_json_object("[{\"role\": \"x\"}]");
        assert_eq!(object.get("role"), Some(&json!("x")));
        assert!(extract_json_object("{}").is_empty());
    }

    #[test]
    fn test_blank_and_placeholder_strings_are_cleared() {
        let object = json!({"role": "  ", "location": "null", "domain": "N/A"});
        let update = criteria_from_json(object.as_object().unwrap());
        assert_eq!(update.role, Slot::Cleared);
        assert_eq!(update.location, Slot::Cleared);
        assert_eq!(update.domain, Slot::Cleared);
        assert_eq!(update.min_salary, Slot::Missing);
    }

    #[test]
    fn test_values_are_trimmed() {
        let object = json!({"role": " Product Manager ", "location": "Remote\n"});
        let update = criteria_from_json(object.as_object().unwrap());
        assert_eq!(update.role, set("Product Manager"));
        assert_eq!(update.location, set("Remote"));
    }

    #[test]
    fn test_mistyped_fields_are_missing() {
        let object = json!({"role": 42, "location": ["NY"], "min_salary": true});
        let update = criteria_from_json(object.as_object().unwrap());
        assert!(update.is_empty());
    }

    #[test]
    fn test_salary_forms() {
        let cases = [
            (json!(100000), Slot::Set(100_000)),
            (json!(95000.9), Slot::Set(95_000)),
            (json!("100k"), Slot::Set(100_000)),
            (json!("$120,000"), Slot::Set(120_000)),
            (json!("1.5m"), Slot::Set(1_500_000)),
            (json!("six figures"), Slot::Missing),
            (json!(0), Slot::Cleared),
            (json!(-5), Slot::Cleared),
            (json!(""), Slot::Cleared),
            (Value::Null, Slot::Cleared),
        ];
        for (value, expected) in cases {
            let object = json!({ "min_salary": value.clone() });
            let update = criteria_from_json(object.as_object().unwrap());
            assert_eq!(update.min_salary, expected, "input {value}");
        }
    }

    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn complete(
            &self,
            _system: &str,
            _history: &[Turn],
            input: &str,
        ) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(input.to_string());
            Ok("{}".to_string())
        }
    }

    #[tokio::test]
    async fn test_prompt_keeps_placeholder_text_from_known_criteria() {
        let model = Arc::new(RecordingModel {
            prompts: Mutex::new(Vec::new()),
        });
        let extractor = LlmCriteriaExtractor::new(model.clone());
        let known = SearchCriteria {
            role: Some("{query} wrangler".to_string()),
            ..Default::default()
        };

        extractor.extract(&[], &known, "in Austin").await.unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains(r#""role":"{query} wrangler""#));
        assert!(prompts[0].ends_with("Latest user message: in Austin"));
    }
}
