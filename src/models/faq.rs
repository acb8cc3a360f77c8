use serde::{Deserialize, Serialize};
use validator::Validate;

/// Fallback category for records curated without one
pub const DEFAULT_CATEGORY: &str = "Общие вопросы";

/// Represents one question/answer unit in the knowledge base
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct FaqRecord {
    /// Unique identifier, stable across edits
    pub id: i64,

    /// Display question text
    #[validate(length(min = 1))]
    pub question: String,

    /// Display answer text
    #[validate(length(min = 1))]
    pub answer: String,

    /// Comma-separated curated tags
    #[serde(default)]
    pub keywords: String,

    /// Lowercase, whitespace-collapsed form of `question`, used for matching.
    /// Recomputed at load time; never trusted from storage.
    #[serde(default)]
    pub normalized_question: String,

    /// Free-text grouping label
    #[serde(default = "default_category")]
    pub category: String,

    /// Times this record answered a query above threshold
    #[serde(default)]
    pub usage_count: u64,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl FaqRecord {
    /// Create a new record; normalization happens in [`FaqRecord::prepare`]
    pub fn new(id: i64, question: &str, answer: &str, keywords: &str, category: &str) -> Self {
        let mut record = Self {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            keywords: keywords.to_string(),
            normalized_question: String::new(),
            category: category.to_string(),
            usage_count: 0,
        };
        record.prepare();
        record
    }

    /// Recompute derived fields after loading from storage
    pub fn prepare(&mut self) {
        self.normalized_question = normalize_question(&self.question);
        if self.category.trim().is_empty() {
            self.category = DEFAULT_CATEGORY.to_string();
        }
    }

    /// Keyword tokens: comma-split, trimmed, lowercased
    pub fn keyword_tokens(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

/// Lowercase and collapse whitespace; punctuation is preserved
pub fn normalize_question(question: &str) -> String {
    question
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Best match for one search call; transient, never persisted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchMatch {
    /// Id of the matched FAQ record
    pub faq_id: i64,

    /// Matched question text
    pub question: String,

    /// Answer text to send back
    pub answer: String,

    /// Category of the matched record
    pub category: String,

    /// Relevance score; larger is more relevant
    pub score: f64,
}

impl SearchMatch {
    pub fn from_record(record: &FaqRecord, score: f64) -> Self {
        Self {
            faq_id: record.id,
            question: record.question.clone(),
            answer: record.answer.clone(),
            category: record.category.clone(),
            score,
        }
    }
}
