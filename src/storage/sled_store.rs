use crate::error::{AppError, Result};
use crate::models::FaqRecord;
use crate::storage::FaqStore;
use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;

/// Persistent FAQ store using the Sled embedded database.
///
/// Records and usage counters live in separate trees so a counter bump never
/// rewrites the row; counters are merged into the records on load.
#[derive(Clone)]
pub struct SledFaqStore {
    db: Arc<Db>,
    faq_tree: sled::Tree,
    usage_tree: sled::Tree,
}

impl SledFaqStore {
    /// Open or create a store at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(&path)
            .map_err(|e| AppError::Storage(format!("Failed to open sled database: {}", e)))?;

        let faq_tree = db
            .open_tree("faq")
            .map_err(|e| AppError::Storage(format!("Failed to open faq tree: {}", e)))?;

        let usage_tree = db
            .open_tree("usage")
            .map_err(|e| AppError::Storage(format!("Failed to open usage tree: {}", e)))?;

        tracing::info!(path = %path.as_ref().display(), "Initialized sled FAQ store");

        Ok(Self {
            db: Arc::new(db),
            faq_tree,
            usage_tree,
        })
    }

    /// Insert or replace a record (administrative seeding path)
    pub fn upsert(&self, record: &FaqRecord) -> Result<()> {
        let bytes = bincode::serialize(record)
            .map_err(|e| AppError::Serialization(format!("Failed to serialize FAQ row: {}", e)))?;
        self.faq_tree
            .insert(record_key(record.id), bytes)
            .map_err(|e| AppError::Storage(format!("Failed to write FAQ row: {}", e)))?;
        Ok(())
    }

    /// Seed many records at once
    pub fn upsert_all(&self, records: &[FaqRecord]) -> Result<usize> {
        for record in records {
            self.upsert(record)?;
        }
        self.db
            .flush()
            .map_err(|e| AppError::Storage(format!("Failed to flush sled database: {}", e)))?;
        Ok(records.len())
    }

    fn usage_of(&self, id: i64) -> u64 {
        self.usage_tree
            .get(record_key(id))
            .ok()
            .flatten()
            .map(|bytes| decode_counter(&bytes))
            .unwrap_or(0)
    }
}

fn record_key(id: i64) -> [u8; 8] {
    id.to_be_bytes()
}

fn decode_counter(bytes: &[u8]) -> u64 {
    bytes
        .try_into()
        .map(u64::from_be_bytes)
        .unwrap_or_default()
}

#[async_trait]
impl FaqStore for SledFaqStore {
    async fn load_all(&self) -> Result<Vec<FaqRecord>> {
        let mut records = Vec::new();

        for entry in self.faq_tree.iter() {
            let (_, bytes) =
                entry.map_err(|e| AppError::Storage(format!("Failed to read FAQ row: {}", e)))?;
            let mut record: FaqRecord = bincode::deserialize(&bytes).map_err(|e| {
                AppError::Serialization(format!("Failed to deserialize FAQ row: {}", e))
            })?;
            record.usage_count = self.usage_of(record.id);
            records.push(record);
        }

        // Keys are big-endian ids, so the tree already iterates in id order
        Ok(records)
    }

    async fn increment_usage(&self, id: i64) -> Result<()> {
        self.usage_tree
            .update_and_fetch(record_key(id), |current| {
                let next = current.map(decode_counter).unwrap_or(0) + 1;
                Some(next.to_be_bytes().to_vec())
            })
            .map_err(|e| AppError::Storage(format!("Failed to update usage count: {}", e)))?;
        Ok(())
    }
}
