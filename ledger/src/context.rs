//! The handles every ledger component needs.

use std::sync::Arc;

use kavach_store::KeyValueStore;
use kavach_types::{Clock, RandomSource, SystemClock, ThreadRandom};

/// Shared store, clock, and randomness.
///
/// Cheap to clone; every clone sees the same store.
#[derive(Clone)]
pub struct LedgerContext {
    pub store: Arc<dyn KeyValueStore>,
    pub clock: Arc<dyn Clock>,
    pub random: Arc<dyn RandomSource>,
}

impl LedgerContext {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            store,
            clock,
            random,
        }
    }

    /// Wall-clock time and thread-local randomness over `store`.
    pub fn system(store: Arc<dyn KeyValueStore>) -> Self {
        Self::new(store, Arc::new(SystemClock), Arc::new(ThreadRandom))
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}
