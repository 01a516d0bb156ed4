//! Infrastructure layer: concrete implementations of the domain ports.
//!
//! In-memory stores back tests and the default CLI run; the RocksDB store
//! (feature `storage-rocksdb`) provides durable storage; the provider
//! adapters simulate the external payment backends.

pub mod in_memory;
pub mod providers;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
