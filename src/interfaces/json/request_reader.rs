use crate::domain::client::Credentials;
use crate::domain::payment::PaymentRequest;
use crate::error::{ProxyError, Result};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Read};

/// One line of CLI input: caller credentials plus the payment request
/// fields, flattened into a single JSON object.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    pub client_id: String,
    pub client_secret: String,
    #[serde(flatten)]
    pub request: PaymentRequest,
}

impl PaymentSubmission {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }
}

/// Reads payment submissions from a JSON-lines source.
///
/// Wraps any `Read` source and provides an iterator over
/// `Result<PaymentSubmission>`, skipping blank lines. This allows processing
/// large inputs in a streaming fashion without loading the entire dataset
/// into memory.
pub struct RequestReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes submissions.
    pub fn submissions(self) -> impl Iterator<Item = Result<PaymentSubmission>> {
        self.reader.lines().filter_map(|line| match line {
            Ok(line) if line.trim().is_empty() => None,
            Ok(line) => Some(serde_json::from_str(&line).map_err(ProxyError::from)),
            Err(e) => Some(Err(ProxyError::from(e))),
        })
    }
}
