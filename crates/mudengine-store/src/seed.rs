//! World seeds: JSON documents describing an initial world.
//!
//! A seed lists drafts, not records, so the store still assigns
//! timestamps (and ids, where the seed leaves them out):
//!
//! ```json
//! {
//!   "zones": [{ "id": "z1", "name": "Town", "theme": "city" }],
//!   "rooms": [{ "id": "square", "zone_id": "z1", "title": "Town Square" }],
//!   "exits": [{ "from": "square", "to": "gate", "keywords": ["north", "n"] }]
//! }
//! ```

use std::path::Path;

use mudengine_types::{ExitDraft, RoomDraft, RoomId, ZoneDraft, ZoneId};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// The staff-only room every fresh world starts with.
pub const BUILDER_ROOM_ID: &str = "00000000-0000-0000-0000-000000000000";
/// Zone holding the builder room.
pub const STAFF_ZONE_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Zone new players' rooms are meant to be built in.
pub const STARTING_ZONE_ID: &str = "10000000-0000-0000-0000-000000000001";

/// Drafts to load into an empty store, applied zones → rooms → exits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSeed {
    #[serde(default)]
    pub zones: Vec<ZoneDraft>,
    #[serde(default)]
    pub rooms: Vec<RoomDraft>,
    #[serde(default)]
    pub exits: Vec<ExitDraft>,
}

impl WorldSeed {
    /// The minimal world: a staff zone with the builder break room, and an
    /// empty starting area for builders to fill.
    pub fn starter() -> Self {
        let staff = ZoneDraft {
            id: Some(ZoneId::from(STAFF_ZONE_ID)),
            name: "Staff Area".into(),
            description: "Administrative and building zone".into(),
            theme: "meta".into(),
        };
        let starting = ZoneDraft {
            id: Some(ZoneId::from(STARTING_ZONE_ID)),
            name: "Starting Area".into(),
            description: "Where new players begin their journey".into(),
            theme: "generic".into(),
        };
        let builder_room = RoomDraft::new(ZoneId::from(STAFF_ZONE_ID), "The Builder Break Room")
            .with_id(RoomId::from(BUILDER_ROOM_ID))
            .with_description(
                "A comfortable room filled with workbenches, blueprints, and \
                 half-finished creations. A coffee pot sits perpetually full in \
                 the corner. This is a safe space for staff to chat and work on \
                 building the world.",
            );

        Self {
            zones: vec![staff, starting],
            rooms: vec![builder_room],
            exits: Vec::new(),
        }
    }

    /// Parses a seed from JSON text.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a seed file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_json(&text)
    }
}
