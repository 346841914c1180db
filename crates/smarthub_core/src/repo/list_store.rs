//! Load-on-open / save-on-change binding between in-memory lists and
//! durable storage slots.
//!
//! # Responsibility
//! - Decode and shape-check persisted lists before they reach services.
//! - Write the full list back after every mutation.
//!
//! # Invariants
//! - Malformed payloads are discarded as a whole, never partially loaded.
//! - Writes are full replacements of the slot.
//! - A failed write leaves the in-memory list unchanged.

use crate::model::{validate_records, Record};
use crate::repo::kv_store::{KeyValueStore, StorageKey, StoreResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Loads and validates a persisted list.
///
/// Returns `Ok(None)` when the slot is absent or its payload fails to decode
/// or validate. Storage transport errors are propagated.
pub fn load_list<T, S>(store: &S, key: StorageKey) -> StoreResult<Option<Vec<T>>>
where
    T: Record + DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key.as_str())? else {
        debug!("event=list_load module=repo status=absent key={key}");
        return Ok(None);
    };

    let records: Vec<T> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(err) => {
            warn!(
                "event=list_load module=repo status=discarded key={} reason=decode error={}",
                key, err
            );
            return Ok(None);
        }
    };

    if let Err(err) = validate_records(&records) {
        warn!(
            "event=list_load module=repo status=discarded key={} reason=validation error={}",
            key, err
        );
        return Ok(None);
    }

    debug!(
        "event=list_load module=repo status=ok key={} count={}",
        key,
        records.len()
    );
    Ok(Some(records))
}

/// Serializes the full list and overwrites the slot.
pub fn save_list<T, S>(store: &S, key: StorageKey, records: &[T]) -> StoreResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(records)?;
    store.set(key.as_str(), &raw)?;
    debug!(
        "event=list_save module=repo status=ok key={} count={}",
        key,
        records.len()
    );
    Ok(())
}

/// Loads a scalar JSON value; undecodable payloads are treated as absent.
pub fn load_value<T, S>(store: &S, key: StorageKey) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key.as_str())? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            warn!(
                "event=value_load module=repo status=discarded key={} reason=decode error={}",
                key, err
            );
            Ok(None)
        }
    }
}

/// Serializes and overwrites a scalar JSON value.
pub fn save_value<T, S>(store: &S, key: StorageKey, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key.as_str(), &raw)
}

/// An in-memory list mirrored into one storage slot.
///
/// The in-memory list is authoritative; storage is a passive copy that is
/// overwritten after each successful mutation.
pub struct PersistedList<T, S> {
    store: S,
    key: StorageKey,
    items: Vec<T>,
}

impl<T, S> PersistedList<T, S>
where
    T: Record + Serialize + DeserializeOwned + Clone,
    S: KeyValueStore,
{
    /// Opens the slot, starting empty when nothing valid is stored.
    pub fn open(store: S, key: StorageKey) -> StoreResult<Self> {
        let items = load_list(&store, key)?.unwrap_or_default();
        Ok(Self { store, key, items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn key(&self) -> StorageKey {
        self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn find(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Applies `mutate` to a working copy, persists it, then commits it.
    pub fn update<R>(&mut self, mutate: impl FnOnce(&mut Vec<T>) -> R) -> StoreResult<R> {
        let mut next = self.items.clone();
        let outcome = mutate(&mut next);
        save_list(&self.store, self.key, &next)?;
        self.items = next;
        Ok(outcome)
    }

    /// Inserts at the head of the list (most-recent-first ordering).
    pub fn prepend(&mut self, item: T) -> StoreResult<()> {
        self.update(|items| items.insert(0, item))
    }

    /// Removes the record with `id`; returns whether one was removed.
    ///
    /// Unknown ids leave both memory and storage untouched.
    pub fn remove(&mut self, id: &str) -> StoreResult<bool> {
        if self.find(id).is_none() {
            return Ok(false);
        }
        self.update(|items| {
            items.retain(|item| item.id() != id);
            true
        })
    }
}
