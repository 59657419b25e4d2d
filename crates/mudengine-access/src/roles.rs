//! Named roles that bundle capabilities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AccessError, Capability, Grants};

/// Maps role names to the capabilities they confer.
///
/// Deserializes straight from a TOML table:
///
/// ```toml
/// [roles]
/// player = []
/// architect = ["builder", "storyteller"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleBook(BTreeMap<String, Grants>);

impl RoleBook {
    /// An empty book. Every role lookup fails.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces a role.
    pub fn define(&mut self, role: impl Into<String>, grants: Grants) {
        self.0.insert(role.into(), grants);
    }

    pub fn get(&self, role: &str) -> Option<&Grants> {
        self.0.get(role)
    }

    /// Unions the grants of every listed role.
    pub fn grants_for<S: AsRef<str>>(&self, roles: &[S]) -> Result<Grants, AccessError> {
        let mut grants = Grants::new();
        for role in roles {
            let role = role.as_ref();
            let bundle = self
                .0
                .get(role)
                .ok_or_else(|| AccessError::UnknownRole(role.to_string()))?;
            grants.merge(bundle);
        }
        Ok(grants)
    }

    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl Default for RoleBook {
    /// One role per capability, a grant-less `player`, and `admin`
    /// holding everything.
    fn default() -> Self {
        let mut book = Self::empty();
        book.define("player", Grants::new());
        book.define("builder", Grants::new().with(Capability::Builder));
        book.define("moderator", Grants::new().with(Capability::Moderator));
        book.define("storyteller", Grants::new().with(Capability::Storyteller));
        book.define("admin", Capability::ALL.into_iter().collect());
        book
    }
}
