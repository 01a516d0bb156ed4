use serde::{Deserialize, Serialize};

/// A registered caller of the proxy.
///
/// Clients are created administratively (seeded at startup) and never mutated
/// by the payment path; deactivation only flips the `active` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    pub client_secret: String,
    pub name: String,
    pub active: bool,
}

/// Caller credentials, carried separately from the request body
/// (the transport layer reads them from headers).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}
