//! Opaque identifiers.
//!
//! Every id is a newtype over `String` so a `RoomId` can never be passed
//! where a `PlayerId` is expected. `#[serde(transparent)]` keeps them as
//! bare strings in JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the underlying `String`.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifies a room. Stable across restarts.
    RoomId
);

string_id!(
    /// Identifies an exit.
    ExitId
);

string_id!(
    /// Identifies a zone.
    ZoneId
);

string_id!(
    /// Identifies a connected player.
    PlayerId
);

string_id!(
    /// Identifies an item an exit may require the actor to hold.
    ItemId
);
