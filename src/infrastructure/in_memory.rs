use crate::domain::ports::RecordStore;
use crate::domain::record::PaymentRecord;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory record store.
///
/// Holds raw serialized bytes rather than typed records so that the
/// serialize/deserialize contract of the adapter is exercised the same way
/// as against a real key-value backend. `Clone` shares the underlying map.
#[derive(Default, Clone)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRecordStore {
    /// Creates a new, empty in-memory record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes raw bytes under a key, bypassing serialization. Test hook for
    /// corrupt-record scenarios.
    #[cfg(test)]
    pub(crate) async fn put_raw(&self, id: &str, bytes: Vec<u8>) {
        let mut records = self.records.write().await;
        records.insert(id.to_string(), bytes);
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, id: &str) -> Result<PaymentRecord> {
        let records = self.records.read().await;
        let bytes = records
            .get(id)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))?;
        serde_json::from_slice(bytes).map_err(|source| PaymentError::Deserialization {
            id: id.to_string(),
            source,
        })
    }

    async fn put(&self, record: &PaymentRecord) -> Result<()> {
        let bytes = serde_json::to_vec(record)
            .map_err(|e| PaymentError::StoreUnavailable(format!("serialization error: {e}")))?;
        let mut records = self.records.write().await;
        records.insert(record.id.clone(), bytes);
        Ok(())
    }
}
