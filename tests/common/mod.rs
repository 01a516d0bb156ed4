use payproxy::application::proxy::PaymentProxy;
use payproxy::domain::client::{Client, Credentials};
use payproxy::domain::payment::PaymentRequest;
use payproxy::domain::ports::ClientStore;
use payproxy::infrastructure::in_memory::{
    InMemoryClientStore, InMemoryTransactionStore, InMemoryWebhookQueue,
};
use payproxy::infrastructure::providers::{StripeProvider, VisaProvider};
use rust_decimal_macros::dec;
use std::time::Duration;

pub fn demo_client() -> Client {
    Client {
        client_id: "client-123".to_string(),
        client_secret: "secret-abc".to_string(),
        name: "Test Client".to_string(),
        active: true,
    }
}

/// A proxy over in-memory stores with zero-delay providers, seeded with the
/// demo client (plus any extra clients the test needs).
pub async fn proxy_with_clients(extra: Vec<Client>) -> PaymentProxy {
    let clients = InMemoryClientStore::new();
    clients.insert(demo_client()).await.unwrap();
    for client in extra {
        clients.insert(client).await.unwrap();
    }

    PaymentProxy::new(
        Box::new(clients),
        Box::new(InMemoryTransactionStore::new()),
        Box::new(InMemoryWebhookQueue::new()),
        Box::new(StripeProvider::with_delay(Duration::ZERO)),
        Box::new(VisaProvider::with_delay(Duration::ZERO)),
    )
}

pub async fn proxy() -> PaymentProxy {
    proxy_with_clients(Vec::new()).await
}

pub fn request(card_number: &str, idempotency_key: &str) -> PaymentRequest {
    PaymentRequest {
        amount: dec!(150.00),
        card_number: card_number.to_string(),
        cvv: "123".to_string(),
        expiry_date: "12/28".to_string(),
        idempotency_key: idempotency_key.to_string(),
        metadata: None,
        provider: None,
    }
}

pub fn credentials() -> Credentials {
    Credentials {
        client_id: "client-123".to_string(),
        client_secret: "secret-abc".to_string(),
    }
}
