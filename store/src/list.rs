//! Stored JSON arrays, decoded one entry at a time.
//!
//! Every list key (`kavach_kyc_requests`, `kavach_nominees`, the audit logs,
//! `kavach_fetched_docs`) holds a JSON array. An entry that does not decode
//! into the Rust type is kept as raw JSON and written back untouched, so one
//! stale or hand-edited record never costs the rest of the list.
//!
//! A value that is not an array at all holds no entries and is replaced by
//! the caller's default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{write_json, KeyValueStore, StorageKey, StoreError};

enum Slot<T> {
    Decoded(T),
    Raw(Value),
}

/// A list loaded for modification. Writes go through [`JsonList::save`].
pub struct JsonList<T> {
    key: StorageKey,
    slots: Vec<Slot<T>>,
}

impl<T> JsonList<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load the array under `key`, or `default()` when the key is absent or
    /// does not hold an array.
    pub fn load<F>(store: &dyn KeyValueStore, key: StorageKey, default: F) -> Result<Self, StoreError>
    where
        F: FnOnce() -> Vec<T>,
    {
        let slots = match load_slots(store, key) {
            Ok(Some(slots)) => slots,
            Ok(None) => {
                debug!(key = key.as_str(), "key absent, using default");
                default().into_iter().map(Slot::Decoded).collect()
            }
            Err(StoreError::Serialization(e)) => {
                warn!(key = key.as_str(), error = %e, "stored value is not a list, replacing with default");
                default().into_iter().map(Slot::Decoded).collect()
            }
            Err(e) => return Err(e),
        };
        Ok(Self { key, slots })
    }

    /// Number of stored entries that did not decode and are carried as-is.
    pub fn undecoded(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Raw(_)))
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|s| match s {
            Slot::Decoded(t) => Some(t),
            Slot::Raw(_) => None,
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(|s| match s {
            Slot::Decoded(t) => Some(t),
            Slot::Raw(_) => None,
        })
    }

    pub fn push(&mut self, item: T) {
        self.slots.push(Slot::Decoded(item));
    }

    pub fn push_front(&mut self, item: T) {
        self.slots.insert(0, Slot::Decoded(item));
    }

    /// Remove and return the first decoded entry matching `pred`.
    pub fn remove_first<P>(&mut self, mut pred: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let pos = self.slots.iter().position(|s| match s {
            Slot::Decoded(t) => pred(t),
            Slot::Raw(_) => false,
        })?;
        match self.slots.remove(pos) {
            Slot::Decoded(t) => Some(t),
            Slot::Raw(_) => None,
        }
    }

    /// Keep at most `len` entries, counting undecoded ones.
    pub fn truncate(&mut self, len: usize) {
        self.slots.truncate(len);
    }

    /// Persist the list, writing undecoded entries back in their original
    /// positions.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StoreError> {
        let values = self
            .slots
            .iter()
            .map(|s| match s {
                Slot::Decoded(t) => serde_json::to_value(t),
                Slot::Raw(v) => Ok(v.clone()),
            })
            .collect::<Result<Vec<_>, _>>()?;
        write_json(store, self.key, &values)
    }
}

/// Read the decodable entries of the array under `key`.
///
/// Undecodable entries are skipped with a warning. An absent key, or a value
/// that is not an array, reads as `default()`.
pub fn read_list_or<T, F>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    default: F,
) -> Result<Vec<T>, StoreError>
where
    T: DeserializeOwned,
    F: FnOnce() -> Vec<T>,
{
    match load_slots(store, key) {
        Ok(Some(slots)) => {
            let total = slots.len();
            let decoded: Vec<T> = slots
                .into_iter()
                .filter_map(|s| match s {
                    Slot::Decoded(t) => Some(t),
                    Slot::Raw(_) => None,
                })
                .collect();
            if decoded.len() < total {
                warn!(
                    key = key.as_str(),
                    skipped = total - decoded.len(),
                    "stored list has malformed entries, skipping them"
                );
            }
            Ok(decoded)
        }
        Ok(None) => {
            debug!(key = key.as_str(), "key absent, using default");
            Ok(default())
        }
        Err(StoreError::Serialization(e)) => {
            warn!(key = key.as_str(), error = %e, "malformed stored list, using default");
            Ok(default())
        }
        Err(e) => Err(e),
    }
}

fn load_slots<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: StorageKey,
) -> Result<Option<Vec<Slot<T>>>, StoreError> {
    let Some(raw) = store.get(key.as_str())? else {
        return Ok(None);
    };
    let values: Vec<Value> = serde_json::from_str(&raw)?;
    let slots = values
        .into_iter()
        .map(|v| match <T as Deserialize>::deserialize(&v) {
            Ok(t) => Slot::Decoded(t),
            Err(e) => {
                debug!(key = key.as_str(), error = %e, "keeping undecodable entry as-is");
                Slot::Raw(v)
            }
        })
        .collect();
    Ok(Some(slots))
}
