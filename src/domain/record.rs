use crate::error::PaymentError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positive monetary amount in minor currency units.
///
/// Ensures that payment amounts are always positive; the zero and negative
/// cases are rejected before any external call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub fn new(value: i64) -> Result<Self, PaymentError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(PaymentError::InvalidRequest(
                "amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = PaymentError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle status of a payment record.
///
/// Transitions only as InProgress -> {Succeeded, Cancelled}. The two latter
/// states are terminal; no further transition is permitted.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    InProgress,
    Succeeded,
    Cancelled,
}

impl PaymentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PaymentStatus::Succeeded | PaymentStatus::Cancelled)
    }

    /// Maps a processor-reported status string onto the local state machine.
    ///
    /// Processors report a wider vocabulary than this record tracks
    /// ("requires_confirmation", "processing", ...); anything that is not a
    /// terminal outcome stays InProgress.
    pub fn from_processor(status: &str) -> Self {
        match status {
            "succeeded" => PaymentStatus::Succeeded,
            "canceled" | "cancelled" => PaymentStatus::Cancelled,
            _ => PaymentStatus::InProgress,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentStatus::InProgress => "in_progress",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Request shape for creating a payment.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CreatePayment {
    pub amount: i64,
    pub user_id: String,
    pub package_id: String,
}

/// The locally persisted view of a payment intent.
///
/// `id` is the processor-issued intent identifier and the store key; it is
/// immutable once assigned. `payment_intent_id` and `instance_id` mirror `id`
/// for records written by this crate but are optional so that records written
/// by earlier service revisions still deserialize.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    pub id: String,
    pub amount: Amount,
    pub user_id: String,
    pub package_id: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    #[serde(default)]
    pub instance_id: Option<String>,
}
