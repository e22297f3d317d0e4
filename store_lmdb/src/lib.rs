//! LMDB storage backend for Kavach.
//!
//! Implements [`kavach_store::KeyValueStore`] on a single named LMDB database
//! using the `heed` bindings. Each key is one LMDB entry; each `set` is its
//! own write transaction.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod kv;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use integrity::{check_integrity, IntegrityReport};
pub use kv::LmdbKvStore;
