use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxyError>;

/// Infrastructure-level failures.
///
/// Business failures (declined cards, bad credentials, malformed requests)
/// never travel through this type; they are converted into a `PaymentResponse`
/// at the layer that detects them. Only failures for which no safe response
/// can be synthesized, such as an unavailable store, are `ProxyError`s.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("internal error: {0}")]
    InternalError(String),
}
