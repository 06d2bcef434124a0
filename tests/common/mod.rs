use async_trait::async_trait;
use payment_intents::domain::ports::RecordStore;
use payment_intents::domain::record::PaymentRecord;
use payment_intents::error::{PaymentError, Result};
use payment_intents::infrastructure::in_memory::InMemoryRecordStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A record store whose writes can be switched off to simulate a backend
/// outage. Reads always work.
pub struct FailingStore {
    inner: InMemoryRecordStore,
    fail_puts: Arc<AtomicBool>,
}

/// Returns the store plus the flag that controls write failures.
pub fn failing_store() -> (FailingStore, Arc<AtomicBool>) {
    let fail_puts = Arc::new(AtomicBool::new(false));
    let store = FailingStore {
        inner: InMemoryRecordStore::new(),
        fail_puts: fail_puts.clone(),
    };
    (store, fail_puts)
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn get(&self, id: &str) -> Result<PaymentRecord> {
        self.inner.get(id).await
    }

    async fn put(&self, record: &PaymentRecord) -> Result<()> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(PaymentError::StoreUnavailable(
                "injected store outage".to_string(),
            ));
        }
        self.inner.put(record).await
    }
}
