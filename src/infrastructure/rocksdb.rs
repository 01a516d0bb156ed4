use crate::domain::client::Client;
use crate::domain::ports::{ClientStore, SaveOutcome, TransactionStore};
use crate::domain::transaction::Transaction;
use crate::error::{ProxyError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for registered clients, keyed by client id.
pub const CF_CLIENTS: &str = "clients";
/// Column Family for transaction records, keyed by idempotency key.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent store implementation using RocksDB.
///
/// Handles storage for both `Client` and `Transaction` records using
/// separate Column Families, with JSON-encoded values. Keying transactions
/// by their idempotency key gives the unique-key constraint the proxy
/// depends on; `save` serializes its check-then-put through an internal
/// mutex so the insert-if-absent stays atomic within the process.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
    save_lock: Arc<Mutex<()>>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// both column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_clients = ColumnFamilyDescriptor::new(CF_CLIENTS, Options::default());
        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_clients, cf_transactions])?;

        Ok(Self {
            db: Arc::new(db),
            save_lock: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| ProxyError::InternalError(format!("{name} column family not found")))
    }
}

#[async_trait]
impl ClientStore for RocksDbStore {
    async fn insert(&self, client: Client) -> Result<()> {
        let cf = self.cf(CF_CLIENTS)?;
        let value = serde_json::to_vec(&client)?;
        self.db.put_cf(cf, client.client_id.as_bytes(), value)?;
        Ok(())
    }

    async fn find_by_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Option<Client>> {
        let client = self.find_by_id(client_id).await?;
        Ok(client.filter(|client| client.client_secret == client_secret))
    }

    async fn find_by_id(&self, client_id: &str) -> Result<Option<Client>> {
        let cf = self.cf(CF_CLIENTS)?;
        match self.db.get_cf(cf, client_id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl TransactionStore for RocksDbStore {
    async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Transaction>> {
        let cf = self.cf(CF_TRANSACTIONS)?;
        match self.db.get_cf(cf, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, tx: Transaction) -> Result<SaveOutcome> {
        let _guard = self.save_lock.lock().await;

        if let Some(existing) = self.find_by_idempotency_key(&tx.idempotency_key).await? {
            return Ok(SaveOutcome::DuplicateKey(existing));
        }

        let cf = self.cf(CF_TRANSACTIONS)?;
        let value = serde_json::to_vec(&tx)?;
        self.db.put_cf(cf, tx.idempotency_key.as_bytes(), value)?;
        Ok(SaveOutcome::Created(tx))
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        let cf = self.cf(CF_TRANSACTIONS)?;

        let mut transactions = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let tx: Transaction = serde_json::from_slice(&value)?;
            transactions.push(tx);
        }

        // RocksDB iterates in key order; the audit view wants wall-clock order.
        transactions.sort_by_key(|tx| tx.created_at);
        Ok(transactions)
    }
}
