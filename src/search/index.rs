//! Inverted index over the FAQ corpus

use crate::models::FaqRecord;
use crate::search::normalize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Question tokens at or below this length are indexing noise
const MIN_QUESTION_TOKEN_LEN: usize = 3;

/// Token-to-record-ids index, rebuilt wholesale from the corpus.
///
/// Two independent postings maps exist: one over curated keywords and one
/// over normalized-question tokens. Categories are indexed separately for
/// the category-listing features.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    keyword_postings: HashMap<String, Vec<i64>>,
    question_postings: HashMap<String, Vec<i64>>,
    categories: BTreeMap<String, Vec<i64>>,
    universe: BTreeSet<i64>,
}

impl InvertedIndex {
    /// Build the index from the full corpus
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FaqRecord>,
    {
        let mut index = Self::default();

        for record in records {
            index.universe.insert(record.id);

            for keyword in record.keyword_tokens() {
                insert_posting(&mut index.keyword_postings, keyword, record.id);
            }

            for token in normalize(&record.normalized_question) {
                if token.chars().count() >= MIN_QUESTION_TOKEN_LEN {
                    insert_posting(&mut index.question_postings, token, record.id);
                }
            }

            let bucket = index.categories.entry(record.category.clone()).or_default();
            if !bucket.contains(&record.id) {
                bucket.push(record.id);
            }
        }

        index
    }

    /// Union of postings for every token across both indexes.
    ///
    /// An empty union falls back to the full id universe: a record can still
    /// match purely via expanded-query containment in the scorer, and must
    /// not be lost just because the query shares no indexed token with it.
    pub fn lookup(&self, tokens: &[String]) -> BTreeSet<i64> {
        let mut candidates = BTreeSet::new();

        for token in tokens {
            if let Some(ids) = self.keyword_postings.get(token) {
                candidates.extend(ids.iter().copied());
            }
            if let Some(ids) = self.question_postings.get(token) {
                candidates.extend(ids.iter().copied());
            }
        }

        if candidates.is_empty() {
            return self.universe.clone();
        }
        candidates
    }

    /// All known categories, sorted
    pub fn categories(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    /// Record ids in a category, insertion order
    pub fn records_in_category(&self, category: &str) -> Vec<i64> {
        self.categories.get(category).cloned().unwrap_or_default()
    }

    /// Number of indexed records
    pub fn len(&self) -> usize {
        self.universe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }
}

fn insert_posting(postings: &mut HashMap<String, Vec<i64>>, token: String, id: i64) {
    let bucket = postings.entry(token).or_default();
    // An id appears at most once per token
    if !bucket.contains(&id) {
        bucket.push(id);
    }
}
