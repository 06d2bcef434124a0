use crate::domain::ports::{Confirmation, IntentHandle, ProcessorClient};
use crate::domain::record::Amount;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

/// An in-process stand-in for the external payment processor, in the manner
/// of a gateway's test mode.
///
/// In strict mode (the default) the sandbox tracks the intents it has issued
/// and rejects confirm/cancel calls for unknown or already-cancelled ids with
/// a processor error, mimicking real gateway responses. In permissive mode it
/// accepts any id, which lets separate short-lived processes (e.g. CLI
/// invocations) share a persistent record store without sharing processor
/// state.
pub struct SandboxProcessor {
    intents: Arc<RwLock<HashMap<String, String>>>,
    seq: AtomicU64,
    seed: u64,
    permissive: bool,
}

impl SandboxProcessor {
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self {
            intents: Arc::new(RwLock::new(HashMap::new())),
            seq: AtomicU64::new(0),
            seed,
            permissive: false,
        }
    }

    pub fn permissive() -> Self {
        Self {
            permissive: true,
            ..Self::new()
        }
    }

    fn next_id(&self) -> String {
        let n = self.seq.fetch_add(1, Ordering::Relaxed);
        format!("pi_sandbox_{:016x}", self.seed.wrapping_add(n))
    }
}

impl Default for SandboxProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessorClient for SandboxProcessor {
    async fn create_intent(&self, _amount: Amount, _currency: &str) -> Result<IntentHandle> {
        let id = self.next_id();
        let status = "requires_confirmation".to_string();
        let mut intents = self.intents.write().await;
        intents.insert(id.clone(), status.clone());
        Ok(IntentHandle { id, status })
    }

    async fn confirm_intent(
        &self,
        id: &str,
        _payment_method: &str,
        _return_url: &str,
    ) -> Result<Confirmation> {
        let mut intents = self.intents.write().await;
        match intents.get(id).map(String::as_str) {
            Some("canceled") => {
                return Err(PaymentError::Processor(format!(
                    "This payment intent has been canceled: {id}"
                )));
            }
            None if !self.permissive => {
                return Err(PaymentError::Processor(format!(
                    "No such payment intent: {id}"
                )));
            }
            _ => {}
        }
        intents.insert(id.to_string(), "succeeded".to_string());
        Ok(Confirmation {
            status: "succeeded".to_string(),
        })
    }

    async fn cancel_intent(&self, id: &str) -> Result<()> {
        let mut intents = self.intents.write().await;
        if !self.permissive && !intents.contains_key(id) {
            return Err(PaymentError::Processor(format!(
                "No such payment intent: {id}"
            )));
        }
        intents.insert(id.to_string(), "canceled".to_string());
        Ok(())
    }
}
