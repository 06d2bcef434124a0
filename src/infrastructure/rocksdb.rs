use crate::domain::ports::RecordStore;
use crate::domain::record::PaymentRecord;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family for payment records.
pub const CF_PAYMENTS: &str = "payments";

/// A persistent record store backed by RocksDB.
///
/// Records are stored as JSON under their intent id in the "payments" column
/// family. This struct is thread-safe (`Clone` shares the underlying
/// `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbRecordStore {
    db: Arc<DB>,
}

impl RocksDbRecordStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the "payments" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_payments = ColumnFamilyDescriptor::new(CF_PAYMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_payments])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(CF_PAYMENTS).ok_or_else(|| {
            PaymentError::StoreUnavailable("payments column family not found".to_string())
        })
    }
}

#[async_trait]
impl RecordStore for RocksDbRecordStore {
    async fn get(&self, id: &str) -> Result<PaymentRecord> {
        let cf = self.cf()?;
        let bytes = self
            .db
            .get_cf(cf, id.as_bytes())?
            .filter(|b| !b.is_empty())
            .ok_or_else(|| PaymentError::NotFound(id.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|source| PaymentError::Deserialization {
            id: id.to_string(),
            source,
        })
    }

    async fn put(&self, record: &PaymentRecord) -> Result<()> {
        let cf = self.cf()?;
        let bytes = serde_json::to_vec(record)
            .map_err(|e| PaymentError::StoreUnavailable(format!("serialization error: {e}")))?;
        self.db.put_cf(cf, record.id.as_bytes(), bytes)?;
        Ok(())
    }
}
