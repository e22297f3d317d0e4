//! Key-value storage trait.

use crate::StoreError;

/// A flat string key-value store.
///
/// Writes replace the whole value for a key; there is no compare-and-swap, so
/// two writers doing read-modify-write on the same key race and the last
/// write wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// All keys currently present, in backend order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        self.get(key).map(|v| v.is_some())
    }
}
