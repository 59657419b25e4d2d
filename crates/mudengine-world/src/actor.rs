//! The command-layer view of a connected player.

use std::collections::HashSet;

use mudengine_access::{Grantee, Grants};
use mudengine_types::{ItemId, PlayerId, RoomId};

/// One connected player, as the command layer sees it.
///
/// `current_room` is the actor's own copy of its location. The world cache
/// holds the authoritative record; movement keeps the two in step.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: PlayerId,
    pub name: String,
    pub current_room: RoomId,
    /// `None` for an actor that was never granted anything.
    pub grants: Option<Grants>,
    /// Items carried, consulted by exits that require one.
    pub inventory: HashSet<ItemId>,
}

impl Actor {
    pub fn new(id: PlayerId, name: impl Into<String>, current_room: RoomId) -> Self {
        Self {
            id,
            name: name.into(),
            current_room,
            grants: None,
            inventory: HashSet::new(),
        }
    }

    pub fn with_grants(mut self, grants: Grants) -> Self {
        self.grants = Some(grants);
        self
    }

    pub fn with_item(mut self, item: ItemId) -> Self {
        self.inventory.insert(item);
        self
    }

    pub fn holds(&self, item: &ItemId) -> bool {
        self.inventory.contains(item)
    }
}

impl Grantee for Actor {
    fn grants(&self) -> Option<&Grants> {
        self.grants.as_ref()
    }
}
