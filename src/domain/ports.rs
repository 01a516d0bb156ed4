use crate::domain::client::Client;
use crate::domain::payment::{PaymentRequest, PaymentResponse};
use crate::domain::transaction::Transaction;
use crate::domain::webhook::WebhookEvent;
use crate::error::Result;
use async_trait::async_trait;

/// Outcome of an insert-if-absent on the transaction store.
///
/// `DuplicateKey` carries the record that already owns the idempotency key,
/// so the caller can answer from it instead of the rejected write.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Transaction),
    DuplicateKey(Transaction),
}

/// Durable, keyed storage of transaction outcomes.
///
/// `save` must be atomic with respect to the idempotency key: two concurrent
/// saves with the same key must produce exactly one `Created` and report the
/// winner's record to the loser.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn find_by_idempotency_key(&self, key: &str) -> Result<Option<Transaction>>;
    async fn save(&self, tx: Transaction) -> Result<SaveOutcome>;
    async fn all(&self) -> Result<Vec<Transaction>>;
}

/// Credential store for registered clients.
#[async_trait]
pub trait ClientStore: Send + Sync {
    async fn insert(&self, client: Client) -> Result<()>;
    async fn find_by_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Option<Client>>;
    async fn find_by_id(&self, client_id: &str) -> Result<Option<Client>>;
}

/// Ordered sink for webhook events. `events` returns an independent
/// snapshot; mutating the result must not affect the queue.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn dispatch(&self, event: WebhookEvent) -> Result<()>;
    async fn events(&self) -> Result<Vec<WebhookEvent>>;
}

/// A simulated payment-provider backend.
///
/// `process` is infallible by contract: every provider-side failure mode is
/// expressed as an unsuccessful `PaymentResponse`, never as an error.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Stable selection key ("stripe", "visa").
    fn key(&self) -> &'static str;
    async fn process(&self, request: &PaymentRequest) -> PaymentResponse;
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type ClientStoreBox = Box<dyn ClientStore>;
pub type WebhookSinkBox = Box<dyn WebhookSink>;
pub type PaymentProviderBox = Box<dyn PaymentProvider>;
