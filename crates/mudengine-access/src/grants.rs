//! Grant sets and the gate predicates.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AccessError, Capability};

/// The capabilities one actor holds.
///
/// Ordered (`BTreeSet`) so listings and serialized forms are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grants(BTreeSet<Capability>);

impl Grants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, capability: Capability) -> Self {
        self.0.insert(capability);
        self
    }

    pub fn insert(&mut self, capability: Capability) -> bool {
        self.0.insert(capability)
    }

    pub fn remove(&mut self, capability: Capability) -> bool {
        self.0.remove(&capability)
    }

    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Adds every capability of `other` (role composition).
    pub fn merge(&mut self, other: &Grants) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Capability> for Grants {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Anything that may hold grants: players, NPC scripts, system tasks.
///
/// The gate predicates are provided methods built on [`Grantee::grants`].
/// An actor whose `grants()` is `None` is denied every capability; that
/// is a normal answer, never an error.
pub trait Grantee {
    /// The actor's grant set, if it has one.
    fn grants(&self) -> Option<&Grants>;

    /// `true` iff the actor holds `capability`.
    fn has(&self, capability: Capability) -> bool {
        self.grants().is_some_and(|g| g.contains(capability))
    }

    /// `true` iff every listed capability is held.
    fn has_all(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().all(|c| self.has(*c))
    }

    /// `true` iff at least one listed capability is held.
    fn has_any(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().any(|c| self.has(*c))
    }

    /// [`Grantee::has_any`] as a `Result`, for handlers that must bail out
    /// before touching shared state.
    fn require_any(&self, capabilities: &[Capability]) -> Result<(), AccessError> {
        if self.has_any(capabilities) {
            return Ok(());
        }
        tracing::debug!(required = ?capabilities, "permission denied");
        Err(AccessError::PermissionDenied {
            required: capabilities.to_vec(),
        })
    }
}

impl Grantee for Grants {
    fn grants(&self) -> Option<&Grants> {
        Some(self)
    }
}

impl Grantee for Option<Grants> {
    fn grants(&self) -> Option<&Grants> {
        self.as_ref()
    }
}
