use crate::domain::model::ScoringIndex;
use serde_json::Value;

pub struct ScoringIndexBuilder;

impl ScoringIndexBuilder {
    /// Flattens `sections → <any key> → questions → <item id> → { keys: [...] }`
    /// into item id → first key. Never fails: anything that does not have the
    /// expected shape is skipped.
    pub fn build(scoring: Option<&Value>) -> ScoringIndex {
        let mut index = ScoringIndex::new();

        let Some(sections) = scoring
            .and_then(|s| s.get("sections"))
            .and_then(Value::as_object)
        else {
            tracing::debug!("No scoring sections found, answer keys unavailable");
            return index;
        };

        for section in sections.values() {
            let Some(questions) = section.get("questions").and_then(Value::as_object) else {
                continue;
            };

            for (item_id, question) in questions {
                match question.get("keys").and_then(first_key) {
                    Some(key) => index.insert(item_id.as_str(), key),
                    None => tracing::debug!("No answer key for item {}", item_id),
                }
            }
        }

        tracing::debug!("Built scoring index with {} entries", index.len());
        index
    }
}

fn first_key(keys: &Value) -> Option<String> {
    match keys.as_array()?.first()? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
