//! Typed entity identifiers.
//!
//! Users, items, and transactions each get their own id newtype so the
//! compiler rejects a buyer id where an item id belongs. All three wrap a
//! UUID v4: random generation makes collisions impossible for the lifetime
//! of any realistic process state, including across deletions, with no
//! counter to coordinate or persist.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declares a UUID-backed id newtype with the conversions every id needs.
///
/// `Ord` is derived on purpose: snapshots sort entities by id so that the
/// serialized form of the same state is byte-for-byte deterministic.
macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID. Mainly for fixtures and interchange.
            pub const fn from_uuid(raw: Uuid) -> Self {
                Self(raw)
            }

            /// Returns the underlying UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                // Full UUIDs make debug output unreadable; the first group
                // is plenty to tell entities apart in a log line.
                let full = self.0.to_string();
                let short = full.split('-').next().unwrap_or(&full);
                write!(f, concat!(stringify!($name), "({}..)"), short)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id! {
    /// Identifies a registered user.
    UserId
}

entity_id! {
    /// Identifies a listed item.
    ItemId
}

entity_id! {
    /// Identifies a settled transaction record.
    TransactionId
}
