use crate::domain::record::PaymentStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

/// Failure taxonomy for the payment lifecycle.
///
/// Every variant maps to an HTTP status via [`PaymentError::status_code`] so
/// that a web layer can surface these without inspecting the variant itself.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("payment {0} not found")]
    NotFound(String),
    #[error("payment {id} is already {status}")]
    InvalidTransition { id: String, status: PaymentStatus },
    /// The external processor rejected or failed the call. Carries the
    /// processor's user-facing message verbatim.
    #[error("payment processor error: {0}")]
    Processor(String),
    /// The state store could not be reached or the write failed. The
    /// processor-side intent may already have changed: see the divergence
    /// note on `PaymentController`.
    #[error("state store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("stored record for {id} is not a valid payment record: {source}")]
    Deserialization {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PaymentError {
    /// HTTP status the excluded web layer should respond with.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::NotFound(_) => 404,
            PaymentError::InvalidTransition { .. } => 409,
            PaymentError::Processor(_) => 502,
            PaymentError::StoreUnavailable(_) => 503,
            PaymentError::Deserialization { .. } => 500,
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PaymentError {
    fn from(e: rocksdb::Error) -> Self {
        PaymentError::StoreUnavailable(e.to_string())
    }
}
