//! LMDB implementation of KeyValueStore.

use std::sync::Arc;

use heed::types::Str;
use heed::{Database, Env};

use kavach_store::{KeyValueStore, StoreError};

use crate::LmdbError;

#[derive(Clone)]
pub struct LmdbKvStore {
    pub(crate) env: Arc<Env>,
    pub(crate) kv_db: Database<Str, Str>,
}

impl KeyValueStore for LmdbKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .kv_db
            .get(&rtxn, key)
            .map_err(LmdbError::from)?
            .map(str::to_owned);
        Ok(val)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.kv_db
            .put(&mut wtxn, key, value)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.kv_db
            .delete(&mut wtxn, key)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut keys = Vec::new();
        for entry in self.kv_db.iter(&rtxn).map_err(LmdbError::from)? {
            let (key, _) = entry.map_err(LmdbError::from)?;
            keys.push(key.to_owned());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use crate::environment::DEFAULT_MAP_SIZE;
    use crate::LmdbEnvironment;
    use kavach_store::KeyValueStore;

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).expect("open env");
        let store = env.kv_store();

        assert_eq!(store.get("kavach_bank_org").unwrap(), None);
        store.set("kavach_bank_org", "HDFC Bank").unwrap();
        assert_eq!(store.get("kavach_bank_org").unwrap().as_deref(), Some("HDFC Bank"));

        store.set("kavach_bank_org", "ICICI Bank").unwrap();
        assert_eq!(store.get("kavach_bank_org").unwrap().as_deref(), Some("ICICI Bank"));

        store.remove("kavach_bank_org").unwrap();
        assert!(!store.contains("kavach_bank_org").unwrap());
    }

    #[test]
    fn removing_absent_key_is_ok() {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).expect("open env");
        env.kv_store().remove("missing").unwrap();
    }

    #[test]
    fn keys_are_listed_in_order() {
        let dir = tempfile::tempdir().expect("temp dir");
        let env = LmdbEnvironment::open(dir.path(), DEFAULT_MAP_SIZE).expect("open env");
        let store = env.kv_store();
        store.set("b", "2").unwrap();
        store.set("a", "1").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
