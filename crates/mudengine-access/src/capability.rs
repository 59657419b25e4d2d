//! The closed set of capability tags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AccessError;

/// A named permission an actor may hold.
///
/// Serialized in lowercase (`"builder"`), which is also what
/// [`FromStr`] accepts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Full administrative access.
    Admin,
    /// Create and edit rooms, exits, zones; teleport.
    Builder,
    /// Kick/ban players, moderate chat, see who is online.
    Moderator,
    /// Run events, control NPCs, spawn items.
    Storyteller,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Capability; 4] = [
        Capability::Admin,
        Capability::Builder,
        Capability::Moderator,
        Capability::Storyteller,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Builder => "builder",
            Self::Moderator => "moderator",
            Self::Storyteller => "storyteller",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AccessError::UnknownCapability(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_every_capability() {
        for cap in Capability::ALL {
            assert_eq!(cap.to_string().parse::<Capability>().unwrap(), cap);
        }
    }

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!("Admin".parse::<Capability>().unwrap(), Capability::Admin);
    }

    #[test]
    fn test_from_str_unknown_returns_error() {
        assert!(matches!(
            "keyBuilder".parse::<Capability>(),
            Err(AccessError::UnknownCapability(s)) if s == "keyBuilder"
        ));
    }
}
