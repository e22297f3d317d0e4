//! Identifier newtypes.
//!
//! Ids are opaque strings. Generated ids carry a short prefix (`req_`, `nom_`,
//! `log_`) followed by 12 hex characters; ids read back from storage are
//! accepted as-is, whatever their shape.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::random::RandomSource;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix used for freshly generated ids.
            pub const PREFIX: &'static str = $prefix;

            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Generate a fresh id from the given randomness.
            pub fn generate(random: &dyn RandomSource) -> Self {
                let mut bytes = [0u8; 6];
                random.fill_bytes(&mut bytes);
                Self(format!("{}{}", Self::PREFIX, hex::encode(bytes)))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id!(
    /// Identifies a KYC request.
    RequestId,
    "req_"
);

string_id!(
    /// Identifies a nominee.
    NomineeId,
    "nom_"
);

string_id!(
    /// Identifies an audit-log entry.
    AuditId,
    "log_"
);
