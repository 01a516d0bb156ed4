use crate::application::auth::{AuthOutcome, Authenticator};
use crate::application::validation;
use crate::domain::card;
use crate::domain::client::{Client, Credentials};
use crate::domain::payment::{ErrorCode, PaymentRequest, PaymentResponse};
use crate::domain::ports::{
    ClientStoreBox, PaymentProvider, PaymentProviderBox, SaveOutcome, TransactionStoreBox,
    WebhookSinkBox,
};
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::domain::webhook::WebhookEvent;
use crate::error::Result;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Cards with this prefix route to the alternate provider unless an explicit
/// hint says otherwise.
const ALTERNATE_CARD_PREFIX: &str = "4111";

const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(5);

/// The main entry point of the payment proxy.
///
/// `PaymentProxy` sequences one payment attempt through idempotency
/// resolution, authentication, validation, provider selection and
/// invocation, persistence and webhook notification. It owns the storage
/// ports and the two provider adapters.
///
/// Every business failure comes back as an unsuccessful `PaymentResponse`;
/// the `Err` branch is reserved for storage failures, for which no safe
/// response can be synthesized.
pub struct PaymentProxy {
    transactions: TransactionStoreBox,
    webhooks: WebhookSinkBox,
    authenticator: Authenticator,
    primary: PaymentProviderBox,
    alternate: PaymentProviderBox,
    key_locks: DashMap<String, Arc<Mutex<()>>>,
    provider_timeout: Duration,
}

impl PaymentProxy {
    pub fn new(
        clients: ClientStoreBox,
        transactions: TransactionStoreBox,
        webhooks: WebhookSinkBox,
        primary: PaymentProviderBox,
        alternate: PaymentProviderBox,
    ) -> Self {
        Self {
            transactions,
            webhooks,
            authenticator: Authenticator::new(Arc::new(clients)),
            primary,
            alternate,
            key_locks: DashMap::new(),
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    /// Bounds every provider invocation; an elapsed timeout is reported as a
    /// `network_error` outcome instead of hanging the request.
    pub fn with_provider_timeout(mut self, provider_timeout: Duration) -> Self {
        self.provider_timeout = provider_timeout;
        self
    }

    /// Processes one payment attempt end to end.
    pub async fn process(
        &self,
        request: PaymentRequest,
        credentials: &Credentials,
    ) -> Result<PaymentResponse> {
        info!(
            amount = %request.amount,
            card = %card::mask(&request.card_number),
            "payment request received"
        );

        // Held across check -> invoke -> persist so concurrent requests with
        // the same key cannot both reach a provider. Blocks only same-key
        // requests; the stores keep their own locks.
        let _guard = self.lock_key(&request.idempotency_key).await;

        if let Some(existing) = self
            .transactions
            .find_by_idempotency_key(&request.idempotency_key)
            .await?
        {
            info!(
                idempotency_key = %request.idempotency_key,
                "idempotent replay answered from stored record"
            );
            return Ok(Self::response_from_transaction(&existing));
        }

        let client = match self.authenticator.authenticate(credentials).await? {
            AuthOutcome::Authenticated(client) => client,
            AuthOutcome::Rejected(reason) => {
                warn!(reason, "client validation failed");
                return Ok(PaymentResponse::declined(
                    reason,
                    ErrorCode::ClientValidationError,
                ));
            }
        };

        if let Err(reason) = validation::validate_request(&request) {
            warn!(reason, "request validation failed");
            self.persist_outcome(&client, &request, None, Some(reason))
                .await?;
            return Ok(PaymentResponse::declined(reason, ErrorCode::ValidationError));
        }

        let provider = self.select_provider(&request);
        debug!(provider = provider.key(), "forwarding payment");

        let response = match timeout(self.provider_timeout, provider.process(&request)).await {
            Ok(response) => response,
            Err(_) => {
                warn!(provider = provider.key(), "provider call timed out");
                PaymentResponse::declined(
                    "Payment processing was interrupted",
                    ErrorCode::NetworkError,
                )
            }
        };

        let outcome = self
            .persist_outcome(&client, &request, Some(&response), None)
            .await?;
        if let SaveOutcome::DuplicateKey(existing) = outcome {
            // Storage backstop: a second writer must observe the winner's
            // record and must not emit a second webhook.
            return Ok(Self::response_from_transaction(&existing));
        }

        let event = WebhookEvent::for_payment(&request, &response);
        info!(
            event_id = %event.event_id,
            event_type = ?event.event_type,
            "dispatching webhook"
        );
        self.webhooks.dispatch(event).await?;

        info!(success = response.success, "payment request completed");
        Ok(response)
    }

    /// Read-only audit snapshot of all stored transactions.
    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.transactions.all().await
    }

    /// Read-only audit snapshot of all dispatched webhook events.
    pub async fn webhook_events(&self) -> Result<Vec<WebhookEvent>> {
        self.webhooks.events().await
    }

    async fn lock_key(&self, key: &str) -> OwnedMutexGuard<()> {
        // One lock per idempotency key ever seen; the map grows with the
        // transaction history, which is itself retained forever.
        let lock = Arc::clone(self.key_locks.entry(key.to_string()).or_default().value());
        lock.lock_owned().await
    }

    /// Deterministic, side-effect-free provider selection: a recognized hint
    /// wins, then the card-prefix rule, then the primary provider.
    fn select_provider(&self, request: &PaymentRequest) -> &dyn PaymentProvider {
        if let Some(hint) = &request.provider {
            let hint = hint.trim().to_ascii_lowercase();
            if hint == self.alternate.key() {
                return self.alternate.as_ref();
            }
            if hint == self.primary.key() {
                return self.primary.as_ref();
            }
        }
        if request.card_number.starts_with(ALTERNATE_CARD_PREFIX) {
            self.alternate.as_ref()
        } else {
            self.primary.as_ref()
        }
    }

    async fn persist_outcome(
        &self,
        client: &Client,
        request: &PaymentRequest,
        response: Option<&PaymentResponse>,
        validation_error: Option<&str>,
    ) -> Result<SaveOutcome> {
        let (status, error_message) = match (response, validation_error) {
            (Some(response), _) if response.success => (TransactionStatus::Success, None),
            (Some(response), _) => (TransactionStatus::Failed, Some(response.message.clone())),
            (None, reason) => (
                TransactionStatus::Failed,
                reason.map(|reason| reason.to_string()),
            ),
        };

        let tx = Transaction {
            id: Uuid::new_v4(),
            client_id: client.client_id.clone(),
            amount: request.amount,
            card_last4: card::last4(&request.card_number),
            status,
            error_message,
            created_at: Utc::now(),
            idempotency_key: request.idempotency_key.clone(),
            provider_transaction_id: response.and_then(|r| r.transaction_id.clone()),
            metadata: request.metadata.clone().unwrap_or_default(),
        };

        let outcome = self.transactions.save(tx).await?;
        if let SaveOutcome::Created(tx) = &outcome {
            debug!(transaction_id = %tx.id, "transaction saved");
        }
        Ok(outcome)
    }

    /// Synthesizes the caller-facing response for an idempotent replay from
    /// the stored record, without touching a provider.
    fn response_from_transaction(tx: &Transaction) -> PaymentResponse {
        let success = tx.status == TransactionStatus::Success;
        PaymentResponse {
            success,
            transaction_id: Some(
                tx.provider_transaction_id
                    .clone()
                    .unwrap_or_else(|| tx.id.to_string()),
            ),
            message: if success {
                "Payment already processed (cached)".to_string()
            } else {
                tx.error_message.clone().unwrap_or_default()
            },
            error_code: tx.error_message.as_ref().map(|_| ErrorCode::CachedError),
            timestamp: Utc::now(),
        }
    }
}
