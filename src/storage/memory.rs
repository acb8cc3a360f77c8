use crate::error::{AppError, Result};
use crate::models::FaqRecord;
use crate::storage::FaqStore;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// In-memory FAQ store (for seeding and testing)
#[derive(Clone, Default)]
pub struct InMemoryFaqStore {
    records: Arc<DashMap<i64, FaqRecord>>,
}

impl InMemoryFaqStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with records
    pub fn with_records(records: Vec<FaqRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Insert or replace a record
    pub fn insert(&self, record: FaqRecord) {
        self.records.insert(record.id, record);
    }

    /// Remove a record, returning it if present
    pub fn remove(&self, id: i64) -> Option<FaqRecord> {
        self.records.remove(&id).map(|(_, record)| record)
    }

    /// Fetch one record
    pub fn record(&self, id: i64) -> Option<FaqRecord> {
        self.records.get(&id).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl FaqStore for InMemoryFaqStore {
    async fn load_all(&self) -> Result<Vec<FaqRecord>> {
        let mut records: Vec<FaqRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn increment_usage(&self, id: i64) -> Result<()> {
        match self.records.get_mut(&id) {
            Some(mut entry) => {
                entry.usage_count += 1;
                tracing::debug!(faq_id = id, usage = entry.usage_count, "Usage count updated");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("FAQ record {} not found", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: i64) -> FaqRecord {
        FaqRecord::new(id, &format!("Вопрос {id}"), &format!("Ответ {id}"), "", "Кадры")
    }

    #[tokio::test]
    async fn test_load_all_sorted_by_id() {
        let store = InMemoryFaqStore::with_records(vec![sample(3), sample(1), sample(2)]);
        let records = store.load_all().await.unwrap();
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_increment_usage() {
        let store = InMemoryFaqStore::with_records(vec![sample(1)]);
        store.increment_usage(1).await.unwrap();
        store.increment_usage(1).await.unwrap();
        assert_eq!(store.record(1).unwrap().usage_count, 2);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemoryFaqStore::with_records(vec![sample(1), sample(2)]);
        assert_eq!(store.remove(1).map(|r| r.id), Some(1));
        assert!(store.remove(1).is_none());
        assert_eq!(store.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_increment_unknown_id() {
        let store = InMemoryFaqStore::new();
        assert!(matches!(
            store.increment_usage(99).await,
            Err(AppError::NotFound(_))
        ));
    }
}
