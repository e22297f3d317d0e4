//! JSON encoding and boolean flags over a [`KeyValueStore`].
//!
//! Values carry no schema version. Lists are read back through
//! [`crate::list`].

use serde::Serialize;
use tracing::debug;

use crate::{KeyValueStore, StorageKey, StoreError};

/// Encode `value` as JSON and store it, replacing whatever was there.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: StorageKey,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    debug!(key = key.as_str(), bytes = raw.len(), "writing value");
    store.set(key.as_str(), &raw)
}

/// Read a `"true"`/`"false"` flag. Anything other than `"true"` reads as false.
pub fn read_flag(store: &dyn KeyValueStore, key: StorageKey) -> Result<bool, StoreError> {
    Ok(store.get(key.as_str())?.as_deref() == Some("true"))
}

pub fn write_flag(store: &dyn KeyValueStore, key: StorageKey, value: bool) -> Result<(), StoreError> {
    store.set(key.as_str(), if value { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<BTreeMap<String, String>>);

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.lock().unwrap().insert(key.into(), value.into());
            Ok(())
        }
        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
        fn keys(&self) -> Result<Vec<String>, StoreError> {
            Ok(self.0.lock().unwrap().keys().cloned().collect())
        }
    }

    #[test]
    fn write_stores_compact_json() {
        let store = MapStore::default();
        write_json(&store, StorageKey::FetchedDocs, &vec!["pan", "dl"]).unwrap();
        assert_eq!(
            store.get("kavach_fetched_docs").unwrap().as_deref(),
            Some(r#"["pan","dl"]"#)
        );
    }

    #[test]
    fn flags_are_boolean_strings() {
        let store = MapStore::default();
        assert!(!read_flag(&store, StorageKey::PendingKyc).unwrap());
        write_flag(&store, StorageKey::PendingKyc, true).unwrap();
        assert_eq!(store.get("kavach_pending_kyc").unwrap().as_deref(), Some("true"));
        assert!(read_flag(&store, StorageKey::PendingKyc).unwrap());
        store.set("kavach_pending_kyc", "yes").unwrap();
        assert!(!read_flag(&store, StorageKey::PendingKyc).unwrap());
    }
}
