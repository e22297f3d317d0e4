//! Abstract storage for Kavach wallet state.
//!
//! Wallet state lives in a flat string key-value namespace: each well-known
//! [`StorageKey`] maps to one JSON-encoded value. Every backend (LMDB, the
//! in-memory null store for testing) implements [`KeyValueStore`]; the rest of
//! the codebase depends only on the trait and the JSON helpers in [`json`]
//! and [`list`].

pub mod error;
pub mod json;
pub mod key;
pub mod kv;
pub mod list;

pub use error::StoreError;
pub use json::{read_flag, write_flag, write_json};
pub use key::StorageKey;
pub use kv::KeyValueStore;
pub use list::{read_list_or, JsonList};
