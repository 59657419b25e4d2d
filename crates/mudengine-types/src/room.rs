//! Rooms: the nodes of the world graph.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Exit, ModelError, RoomId, ZoneId};

// ---------------------------------------------------------------------------
// Darkness
// ---------------------------------------------------------------------------

/// How dark a room is, from 0 (daylight) to 10 (absolute darkness).
///
/// The range is checked on construction and on deserialization
/// (`#[serde(try_from = "u8")]`), so an out-of-range value can never be
/// cached or persisted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Darkness(u8);

impl Darkness {
    /// The darkest possible room.
    pub const MAX: u8 = 10;

    /// Creates a darkness level, rejecting values above [`Darkness::MAX`].
    pub fn new(level: u8) -> Result<Self, ModelError> {
        if level > Self::MAX {
            return Err(ModelError::DarknessOutOfRange(level));
        }
        Ok(Self(level))
    }

    /// Returns the raw level.
    pub fn level(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Darkness {
    type Error = ModelError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Darkness> for u8 {
    fn from(darkness: Darkness) -> Self {
        darkness.0
    }
}

impl fmt::Display for Darkness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Flags and traps
// ---------------------------------------------------------------------------

/// Environmental switches on a room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomFlags {
    pub blocks_magic: bool,
    pub restricts_movement: bool,
    /// Teleporting into this room is refused.
    pub no_teleport_in: bool,
    /// Teleporting out of this room is refused.
    pub no_teleport_out: bool,
}

/// A trap armed in a room. A room without one has `trap: None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trap {
    /// Damage dealt each time the trap fires.
    pub damage: u32,
    /// Ticks between firings.
    pub tick_interval: u32,
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// A location in the world, together with its outgoing exits.
///
/// Rooms own their exits: every entry in `exits` has `from == id`.
/// [`Room::attach_exits`] is the way to populate them and keeps that
/// invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub zone_id: ZoneId,
    pub title: String,
    pub description: String,
    pub terrain: String,
    pub darkness: Darkness,
    #[serde(default)]
    pub flags: RoomFlags,
    #[serde(default)]
    pub trap: Option<Trap>,
    #[serde(default)]
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Outgoing exits in definition order. Loaded separately from the room
    /// row itself.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exits: Vec<Exit>,
}

impl Room {
    /// Materializes a draft with a store-assigned id and timestamp.
    pub fn from_draft(id: RoomId, draft: RoomDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            zone_id: draft.zone_id,
            title: draft.title,
            description: draft.description,
            terrain: draft.terrain,
            darkness: draft.darkness,
            flags: draft.flags,
            trap: draft.trap,
            status: draft.status,
            created_at: now,
            updated_at: now,
            exits: Vec::new(),
        }
    }

    /// Replaces the room's exits. Exits whose source is another room are
    /// discarded.
    pub fn attach_exits(mut self, exits: Vec<Exit>) -> Self {
        self.exits = exits.into_iter().filter(|e| e.from == self.id).collect();
        self
    }

    /// Returns `true` if a trap is armed here.
    pub fn has_trap(&self) -> bool {
        self.trap.is_some()
    }
}

/// The author-supplied fields of a new room.
///
/// `id` is normally `None` and assigned by the store. Seed data sets it to
/// keep well-known rooms (the builder room) at fixed ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDraft {
    #[serde(default)]
    pub id: Option<RoomId>,
    pub zone_id: ZoneId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_terrain")]
    pub terrain: String,
    #[serde(default)]
    pub darkness: Darkness,
    #[serde(default)]
    pub flags: RoomFlags,
    #[serde(default)]
    pub trap: Option<Trap>,
    #[serde(default)]
    pub status: String,
}

fn default_terrain() -> String {
    "indoor".to_string()
}

impl RoomDraft {
    /// A lit, indoor room with no description yet.
    pub fn new(zone_id: ZoneId, title: impl Into<String>) -> Self {
        Self {
            id: None,
            zone_id,
            title: title.into(),
            description: String::new(),
            terrain: default_terrain(),
            darkness: Darkness::default(),
            flags: RoomFlags::default(),
            trap: None,
            status: String::new(),
        }
    }

    /// Pins the id instead of letting the store assign one.
    pub fn with_id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
