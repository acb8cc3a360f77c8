//! Query expansion via fixed typo-correction and synonym tables
//!
//! Expansion is deliberately static lookup, not a stemmer: the bounds below
//! (synonym rule only for short queries, top-2 synonyms, cap of 5 candidates)
//! gate the recall/precision trade-off callers depend on.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maximum number of expansion candidates returned, original included
const MAX_EXPANSIONS: usize = 5;

/// Synonym substitution only applies to queries of at most this many words
const SYNONYM_WORD_LIMIT: usize = 3;

/// At most this many synonyms are substituted per word
const SYNONYMS_PER_WORD: usize = 2;

/// Fixed correction table for frequent misspellings seen in HR chats
static TYPO_CORRECTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("отпуст", "отпуск"),
        ("отпускк", "отпуск"),
        ("зарплота", "зарплата"),
        ("зп", "зарплата"),
        ("бальничный", "больничный"),
        ("болничный", "больничный"),
        ("увальнение", "увольнение"),
        ("оформеть", "оформить"),
        ("камандировка", "командировка"),
        ("премя", "премия"),
    ])
});

/// Fixed synonym table, most useful synonyms first
static SYNONYMS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("отпуск", &["отдых", "каникулы"] as &[&str]),
        ("зарплата", &["оклад", "заработок"]),
        ("больничный", &["нетрудоспособность", "болезнь"]),
        ("увольнение", &["расторжение", "уйти"]),
        ("оформить", &["получить", "подать"]),
        ("график", &["расписание", "режим"]),
        ("премия", &["бонус", "надбавка"]),
        ("справка", &["документ", "выписка"]),
        ("командировка", &["поездка", "выезд"]),
        ("удаленка", &["удаленная работа", "дистанционная работа"]),
    ])
});

/// Produces alternative phrasings of a query from fixed lookup tables
pub struct QueryExpander {
    typos: HashMap<String, String>,
    synonyms: HashMap<String, Vec<String>>,
}

impl Default for QueryExpander {
    fn default() -> Self {
        Self {
            typos: TYPO_CORRECTIONS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            synonyms: SYNONYMS
                .iter()
                .map(|(k, v)| (k.to_string(), v.iter().map(|s| s.to_string()).collect()))
                .collect(),
        }
    }
}

impl QueryExpander {
    /// Expander with the built-in HR vocabulary tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Expander with caller-curated tables
    pub fn with_tables(
        typos: HashMap<String, String>,
        synonyms: HashMap<String, Vec<String>>,
    ) -> Self {
        Self { typos, synonyms }
    }

    /// Expand a query into a deduplicated candidate list, original first,
    /// capped at five entries.
    pub fn expand(&self, query: &str) -> Vec<String> {
        let original = query.trim().to_lowercase();
        let mut candidates = vec![original.clone()];

        // Typo pass: one corrected candidate if any word changed
        let corrected = original
            .split_whitespace()
            .map(|word| self.typos.get(word).map(String::as_str).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ");
        if corrected != original && !candidates.contains(&corrected) {
            candidates.push(corrected);
        }

        // Synonym pass: single-word substitutions, short queries only
        let words: Vec<&str> = original.split_whitespace().collect();
        if !words.is_empty() && words.len() <= SYNONYM_WORD_LIMIT {
            for (position, word) in words.iter().enumerate() {
                let Some(synonyms) = self.synonyms.get(*word) else {
                    continue;
                };
                for synonym in synonyms.iter().take(SYNONYMS_PER_WORD) {
                    let mut variant = words.clone();
                    variant[position] = synonym.as_str();
                    let variant = variant.join(" ");
                    if !candidates.contains(&variant) {
                        candidates.push(variant);
                    }
                }
            }
        }

        candidates.truncate(MAX_EXPANSIONS);
        candidates
    }
}
