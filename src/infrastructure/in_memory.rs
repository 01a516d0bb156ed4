use crate::domain::client::Client;
use crate::domain::ports::{ClientStore, SaveOutcome, TransactionStore, WebhookSink};
use crate::domain::transaction::Transaction;
use crate::domain::webhook::WebhookEvent;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory credential store.
///
/// Uses `Arc<RwLock<HashMap>>` to allow shared concurrent access. Clients
/// are keyed by their id; secrets are compared on lookup.
#[derive(Default, Clone)]
pub struct InMemoryClientStore {
    clients: Arc<RwLock<HashMap<String, Client>>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn insert(&self, client: Client) -> Result<()> {
        let mut clients = self.clients.write().await;
        clients.insert(client.client_id.clone(), client);
        Ok(())
    }

    async fn find_by_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Option<Client>> {
        let clients = self.clients.read().await;
        Ok(clients
            .get(client_id)
            .filter(|client| client.client_secret == client_secret)
            .cloned())
    }

    async fn find_by_id(&self, client_id: &str) -> Result<Option<Client>> {
        let clients = self.clients.read().await;
        Ok(clients.get(client_id).cloned())
    }
}

#[derive(Default)]
struct TransactionRows {
    rows: Vec<Transaction>,
    index: HashMap<String, usize>,
}

/// A thread-safe in-memory transaction store.
///
/// Rows are kept in insertion order for the audit snapshot, with an
/// idempotency-key index on the side. `save` checks and inserts under one
/// write lock, which makes it the atomic insert-if-absent the proxy relies
/// on.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    inner: Arc<RwLock<TransactionRows>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Transaction>> {
        let inner = self.inner.read().await;
        Ok(inner.index.get(key).map(|&i| inner.rows[i].clone()))
    }

    async fn save(&self, tx: Transaction) -> Result<SaveOutcome> {
        let mut inner = self.inner.write().await;
        if let Some(&i) = inner.index.get(&tx.idempotency_key) {
            return Ok(SaveOutcome::DuplicateKey(inner.rows[i].clone()));
        }
        let next = inner.rows.len();
        inner.index.insert(tx.idempotency_key.clone(), next);
        inner.rows.push(tx.clone());
        Ok(SaveOutcome::Created(tx))
    }

    async fn all(&self) -> Result<Vec<Transaction>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.clone())
    }
}

/// An insertion-ordered in-memory webhook queue.
///
/// `events` copies out, so callers can never alias or mutate the internal
/// queue.
#[derive(Default, Clone)]
pub struct InMemoryWebhookQueue {
    events: Arc<RwLock<Vec<WebhookEvent>>>,
}

impl InMemoryWebhookQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookSink for InMemoryWebhookQueue {
    async fn dispatch(&self, event: WebhookEvent) -> Result<()> {
        let mut events = self.events.write().await;
        events.push(event);
        Ok(())
    }

    async fn events(&self) -> Result<Vec<WebhookEvent>> {
        let events = self.events.read().await;
        Ok(events.clone())
    }
}
