use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Root of a test-definition file: `{ "test": { "sections": [...] }, "scoring": {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestDocument {
    pub test: TestBody,
    /// Kept dynamic at the boundary; normalized into a [`ScoringIndex`] before rendering.
    #[serde(default)]
    pub scoring: Option<Value>,
}

/// Sections stay untyped until the type filter has run; skipped sections are
/// never decoded further.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestBody {
    pub sections: Vec<Value>,
}

impl TestBody {
    pub fn section_type(section: &Value) -> Option<&str> {
        section.get("type").and_then(Value::as_str)
    }
}

/// A routing/destination section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub chunks: Option<Vec<Chunk>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(default)]
    pub items: Option<Vec<Item>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: Option<String>,
    /// Test exports use both `"displayNumber": 3` and `"displayNumber": "3"`.
    #[serde(default)]
    pub display_number: Option<Value>,
    #[serde(default)]
    pub stimulus: Option<String>,
    #[serde(default)]
    pub stem: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "scalar_string")]
    pub kind: Option<String>,
    #[serde(default)]
    pub answer_options: Option<Vec<AnswerOption>>,
}

impl Item {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn display_number(&self) -> String {
        match &self.display_number {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }

    pub fn question_type(&self) -> QuestionType {
        QuestionType::from_tag(self.kind.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerOption {
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "scalar_string")]
    pub content: Option<String>,
}

/// Accepts strings, numbers and booleans; numbers are kept in their decimal
/// form so `"id": 5` still joins against the scoring key `"5"`.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionType {
    MultipleChoice,
    ShortResponse,
    Other(Option<String>),
}

impl QuestionType {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("mcq") => Self::MultipleChoice,
            Some("spr") => Self::ShortResponse,
            other => Self::Other(other.map(str::to_string)),
        }
    }
}

/// Flat lookup from item id to its first accepted answer key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringIndex {
    keys: HashMap<String, String>,
}

impl ScoringIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins on duplicate item ids.
    pub fn insert(&mut self, item_id: impl Into<String>, key: impl Into<String>) {
        self.keys.insert(item_id.into(), key.into());
    }

    pub fn get(&self, item_id: &str) -> Option<&str> {
        self.keys.get(item_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOption {
    pub id: String,
    pub content: String,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerBlock {
    Options(Vec<RenderedOption>),
    /// `None` when no answer key is available for the item.
    ShortResponse(Option<String>),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQuestionBlock {
    pub id: String,
    pub display_number: String,
    pub stimulus: Option<String>,
    pub stem: Option<String>,
    pub answer: AnswerBlock,
}

impl RenderedQuestionBlock {
    pub fn correct_option_count(&self) -> usize {
        match &self.answer {
            AnswerBlock::Options(options) => options.iter().filter(|o| o.correct).count(),
            _ => 0,
        }
    }
}

/// One routed/destination section with its formatted questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedModule {
    pub title: String,
    pub instructions: String,
    pub questions: Vec<RenderedQuestionBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub modules: Vec<RenderedModule>,
}

impl RenderedDocument {
    pub fn question_count(&self) -> usize {
        self.modules.iter().map(|m| m.questions.len()).sum()
    }
}
