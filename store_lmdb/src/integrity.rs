//! Startup integrity check.
//!
//! Walks every stored value and records the list keys whose value is not a
//! JSON array. Nothing is repaired here; readers fall back to defaults for
//! those keys. Flags and the bank org are plain strings and are not checked.

use tracing::warn;

use kavach_store::{KeyValueStore, StorageKey, StoreError};

/// Summary of an integrity check run.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub total_entries: u64,
    /// List keys whose value does not parse as a JSON array.
    pub malformed_keys: Vec<String>,
}

impl IntegrityReport {
    /// Returns `true` if every list value parsed.
    pub fn is_healthy(&self) -> bool {
        self.malformed_keys.is_empty()
    }
}

/// Check that every list key holds a well-formed JSON array.
pub fn check_integrity(store: &dyn KeyValueStore) -> Result<IntegrityReport, StoreError> {
    let mut report = IntegrityReport::default();

    for key in store.keys()? {
        report.total_entries += 1;
        let Some(raw) = store.get(&key)? else {
            continue;
        };
        if !StorageKey::from_name(&key).is_some_and(|k| k.holds_list()) {
            continue;
        }
        if serde_json::from_str::<Vec<serde_json::Value>>(&raw).is_err() {
            warn!(key = %key, "stored list is not a JSON array");
            report.malformed_keys.push(key);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::DEFAULT_MAP_SIZE;
    use crate::LmdbEnvironment;

    #[test]
    fn flags_malformed_values() {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).expect("open env");
        let store = env.kv_store();
        store.set("kavach_pending_kyc", "true").unwrap();
        store.set("kavach_bank_org", "HDFC Bank").unwrap();
        store.set("kavach_nominees", "[{\"id\":").unwrap();
        store.set("kavach_fetched_docs", "{\"aadhaar\":true}").unwrap();
        store.set("kavach_audit_logs", "[]").unwrap();

        let report = check_integrity(&store).unwrap();
        assert_eq!(report.total_entries, 5);
        assert!(!report.is_healthy());
        let mut malformed = report.malformed_keys.clone();
        malformed.sort();
        assert_eq!(
            malformed,
            vec!["kavach_fetched_docs".to_string(), "kavach_nominees".to_string()]
        );
    }

    #[test]
    fn empty_store_is_healthy() {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).expect("open env");
        let report = check_integrity(&env.kv_store()).unwrap();
        assert!(report.is_healthy());
        assert_eq!(report.total_entries, 0);
    }
}
