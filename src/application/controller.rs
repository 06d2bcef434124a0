use crate::domain::ports::{ProcessorClientBox, RecordStoreBox};
use crate::domain::record::{Amount, CreatePayment, PaymentRecord, PaymentStatus};
use crate::error::{PaymentError, Result};
use log::{debug, info};

/// Fixed values the original service hard-coded at the call sites, now
/// injectable at construction time.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub currency: String,
    pub payment_method: String,
    pub return_url: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            currency: "usd".to_string(),
            payment_method: "pm_card_visa".to_string(),
            return_url: "https://www.example.com".to_string(),
        }
    }
}

/// Orchestrates the payment-intent lifecycle.
///
/// `PaymentController` owns the record store and processor client and is
/// stateless between requests. Each operation sequences one record read,
/// one processor call, and one record write; the two external systems are
/// NOT updated atomically. If the store write fails after the processor call
/// succeeded, the operation reports `StoreUnavailable` and the local record
/// diverges from the processor's view (a created intent becomes unreachable
/// by id; a confirmed or cancelled intent keeps a stale local status). No
/// compensating transaction is attempted.
///
/// Concurrent operations on the same id are not mutually excluded: both may
/// read the same record, both may call the processor, and the last store
/// write wins. Callers that need strict per-id consistency must serialize
/// externally.
pub struct PaymentController {
    store: RecordStoreBox,
    processor: ProcessorClientBox,
    config: ControllerConfig,
}

impl PaymentController {
    pub fn new(
        store: RecordStoreBox,
        processor: ProcessorClientBox,
        config: ControllerConfig,
    ) -> Self {
        Self {
            store,
            processor,
            config,
        }
    }

    /// Creates a payment intent at the processor and persists the initial
    /// record.
    ///
    /// The amount is validated before any external call. The persisted record
    /// carries the processor-issued id as its key, with `payment_intent_id`
    /// and `instance_id` mirroring it.
    pub async fn create(&self, request: CreatePayment) -> Result<PaymentRecord> {
        let amount = Amount::new(request.amount)?;

        info!(
            "creating payment intent: amount={} user_id={} package_id={}",
            amount, request.user_id, request.package_id
        );
        let intent = self
            .processor
            .create_intent(amount, &self.config.currency)
            .await?;

        let record = PaymentRecord {
            id: intent.id.clone(),
            amount,
            user_id: request.user_id,
            package_id: request.package_id,
            status: PaymentStatus::InProgress,
            payment_intent_id: Some(intent.id.clone()),
            instance_id: Some(intent.id),
        };

        self.store.put(&record).await?;
        info!("created payment intent {}", record.id);
        Ok(record)
    }

    /// Confirms an in-progress payment intent.
    ///
    /// The record's new status is taken from the processor's response rather
    /// than hard-coded, and the record is always persisted afterwards.
    pub async fn confirm(&self, id: &str) -> Result<PaymentRecord> {
        let mut record = self.store.get(id).await?;
        self.reject_if_terminal(&record)?;

        debug!("confirming payment intent {id}");
        let confirmation = self
            .processor
            .confirm_intent(id, &self.config.payment_method, &self.config.return_url)
            .await?;

        record.status = PaymentStatus::from_processor(&confirmation.status);
        self.store.put(&record).await?;
        info!(
            "confirmed payment intent {}: status={}",
            record.id, record.status
        );
        Ok(record)
    }

    /// Cancels an in-progress payment intent.
    pub async fn cancel(&self, id: &str) -> Result<PaymentRecord> {
        let mut record = self.store.get(id).await?;
        self.reject_if_terminal(&record)?;

        debug!("cancelling payment intent {id}");
        self.processor.cancel_intent(id).await?;

        record.status = PaymentStatus::Cancelled;
        self.store.put(&record).await?;
        info!("cancelled payment intent {}", record.id);
        Ok(record)
    }

    /// Read-only accessor for a record.
    pub async fn get(&self, id: &str) -> Result<PaymentRecord> {
        self.store.get(id).await
    }

    // Confirm and cancel are only legal on in-progress records. SUCCEEDED and
    // CANCELLED are terminal; operating on them is rejected rather than
    // re-executed or treated as a no-op.
    fn reject_if_terminal(&self, record: &PaymentRecord) -> Result<()> {
        if record.status.is_terminal() {
            return Err(PaymentError::InvalidTransition {
                id: record.id.clone(),
                status: record.status,
            });
        }
        Ok(())
    }
}
