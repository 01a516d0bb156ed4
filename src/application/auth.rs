use crate::domain::client::{Client, Credentials};
use crate::domain::ports::ClientStoreBox;
use crate::error::Result;
use std::sync::Arc;
use tracing::warn;

/// Outcome of an authentication attempt. Store failures are a separate,
/// fatal concern and travel through the outer `Result`.
#[derive(Debug)]
pub enum AuthOutcome {
    Authenticated(Client),
    Rejected(&'static str),
}

/// Validates caller identity against the credential store.
///
/// Never mutates client state; an inactive client is rejected, not
/// reactivated or deleted.
pub struct Authenticator {
    clients: Arc<ClientStoreBox>,
}

impl Authenticator {
    pub fn new(clients: Arc<ClientStoreBox>) -> Self {
        Self { clients }
    }

    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome> {
        if credentials.client_id.trim().is_empty() {
            return Ok(AuthOutcome::Rejected("Client ID is required"));
        }
        if credentials.client_secret.trim().is_empty() {
            return Ok(AuthOutcome::Rejected("Client secret is required"));
        }

        let client = self
            .clients
            .find_by_credentials(&credentials.client_id, &credentials.client_secret)
            .await?;

        match client {
            None => {
                warn!(client_id = %credentials.client_id, "unknown client credentials");
                Ok(AuthOutcome::Rejected("Invalid client credentials"))
            }
            Some(client) if !client.active => {
                warn!(client_id = %client.client_id, "inactive client rejected");
                Ok(AuthOutcome::Rejected("Client is inactive"))
            }
            Some(client) => Ok(AuthOutcome::Authenticated(client)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ClientStore;
    use crate::infrastructure::in_memory::InMemoryClientStore;

    async fn authenticator_with(clients: Vec<Client>) -> Authenticator {
        let store = InMemoryClientStore::new();
        for client in clients {
            store.insert(client).await.unwrap();
        }
        Authenticator::new(Arc::new(Box::new(store) as ClientStoreBox))
    }

    fn demo_client(active: bool) -> Client {
        Client {
            client_id: "client-123".to_string(),
            client_secret: "secret-abc".to_string(),
            name: "Demo Client".to_string(),
            active,
        }
    }

    fn credentials(id: &str, secret: &str) -> Credentials {
        Credentials {
            client_id: id.to_string(),
            client_secret: secret.to_string(),
        }
    }

    #[tokio::test]
    async fn test_blank_credentials_rejected() {
        let auth = authenticator_with(vec![demo_client(true)]).await;

        let outcome = auth.authenticate(&credentials("", "secret-abc")).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::Rejected("Client ID is required")));

        let outcome = auth.authenticate(&credentials("client-123", "  ")).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::Rejected("Client secret is required")));
    }

    #[tokio::test]
    async fn test_unknown_pair_rejected() {
        let auth = authenticator_with(vec![demo_client(true)]).await;

        let outcome = auth
            .authenticate(&credentials("client-123", "wrong-secret"))
            .await
            .unwrap();
        assert!(matches!(outcome, AuthOutcome::Rejected("Invalid client credentials")));
    }

    #[tokio::test]
    async fn test_inactive_client_rejected() {
        let auth = authenticator_with(vec![demo_client(false)]).await;

        let outcome = auth
            .authenticate(&credentials("client-123", "secret-abc"))
            .await
            .unwrap();
        assert!(matches!(outcome, AuthOutcome::Rejected("Client is inactive")));
    }

    #[tokio::test]
    async fn test_active_client_resolved() {
        let auth = authenticator_with(vec![demo_client(true)]).await;

        let outcome = auth
            .authenticate(&credentials("client-123", "secret-abc"))
            .await
            .unwrap();
        match outcome {
            AuthOutcome::Authenticated(client) => assert_eq!(client.name, "Demo Client"),
            other => panic!("expected authentication, got {other:?}"),
        }
    }
}
