use super::record::{Amount, PaymentRecord};
use crate::error::Result;
use async_trait::async_trait;

/// A payment intent as issued by the external processor.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentHandle {
    pub id: String,
    pub status: String,
}

/// The processor's response to a confirm call. `status` is the processor's
/// verbatim status string for the now-confirmed intent.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    pub status: String,
}

/// Get/put access to payment records keyed by intent id.
///
/// The adapter owns serialization: backends hold raw bytes, `get`
/// deserializes and `put` serializes. Adapters perform no retries; retry
/// policy belongs to the caller's transport layer.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fails with `NotFound` if the key is absent or holds empty bytes, and
    /// with `Deserialization` if the stored bytes are not a valid record.
    async fn get(&self, id: &str) -> Result<PaymentRecord>;
    /// Writes the record under key `record.id`. Fails with
    /// `StoreUnavailable` on backend communication failure.
    async fn put(&self, record: &PaymentRecord) -> Result<()>;
}

/// Client for the external payment processor.
#[async_trait]
pub trait ProcessorClient: Send + Sync {
    async fn create_intent(&self, amount: Amount, currency: &str) -> Result<IntentHandle>;
    async fn confirm_intent(
        &self,
        id: &str,
        payment_method: &str,
        return_url: &str,
    ) -> Result<Confirmation>;
    async fn cancel_intent(&self, id: &str) -> Result<()>;
}

pub type RecordStoreBox = Box<dyn RecordStore>;
pub type ProcessorClientBox = Box<dyn ProcessorClient>;
