//! Persistence layer: raw key-value storage and typed list slots.
//!
//! # Responsibility
//! - Define the storage seam (`KeyValueStore`) injected into every tool.
//! - Keep JSON encoding and shape validation out of services.
//!
//! # Invariants
//! - Each `StorageKey` is owned by exactly one tool.
//! - Persisted payloads are validated on load; mismatches fall back to empty.

pub mod kv_store;
pub mod list_store;
