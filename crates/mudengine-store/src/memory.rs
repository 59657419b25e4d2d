//! In-memory reference store.
//!
//! Behaves like a small relational database: rooms, exits, and zones live
//! in separate tables, exits reference rooms, rooms reference zones, and a
//! room delete cascades to its exits. Everything sits behind one
//! `tokio::sync::RwLock`, so the store is safe to share across tasks.

use std::collections::HashMap;

use chrono::Utc;
use mudengine_types::{
    Exit, ExitDraft, ExitId, Room, RoomDraft, RoomId, Zone, ZoneDraft, ZoneId,
};
use rand::Rng;
use tokio::sync::RwLock;

use crate::{RecordKind, Store, StoreError, WorldSeed};

#[derive(Default)]
struct Tables {
    /// Rooms without their exits.
    rooms: HashMap<RoomId, Room>,
    /// All exits in creation order.
    exits: Vec<Exit>,
    zones: HashMap<ZoneId, Zone>,
}

/// A [`Store`] that keeps every record in memory.
///
/// Nothing survives a restart. Populate it with [`MemoryStore::from_seed`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store populated from a seed: zones first, then rooms,
    /// then exits, so every constraint is checked the same way it would
    /// be for a live author.
    pub async fn from_seed(seed: WorldSeed) -> Result<Self, StoreError> {
        let store = Self::new();
        for zone in seed.zones {
            store.create_zone(zone).await?;
        }
        for room in seed.rooms {
            store.create_room(room).await?;
        }
        for exit in seed.exits {
            store.create_exit(exit).await?;
        }
        tracing::info!(
            rooms = store.tables.read().await.rooms.len(),
            "memory store seeded"
        );
        Ok(store)
    }
}

fn sorted_by_title(mut rooms: Vec<Room>) -> Vec<Room> {
    rooms.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
    rooms
}

impl Store for MemoryStore {
    async fn room(&self, id: &RoomId) -> Result<Room, StoreError> {
        self.tables
            .read()
            .await
            .rooms
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(RecordKind::Room, id))
    }

    async fn all_rooms(&self) -> Result<Vec<Room>, StoreError> {
        let rooms = self.tables.read().await.rooms.values().cloned().collect();
        Ok(sorted_by_title(rooms))
    }

    async fn rooms_in_zone(&self, zone: &ZoneId) -> Result<Vec<Room>, StoreError> {
        let rooms = self
            .tables
            .read()
            .await
            .rooms
            .values()
            .filter(|r| &r.zone_id == zone)
            .cloned()
            .collect();
        Ok(sorted_by_title(rooms))
    }

    async fn create_room(&self, mut draft: RoomDraft) -> Result<Room, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.zones.contains_key(&draft.zone_id) {
            return Err(StoreError::Constraint(format!(
                "room references unknown zone {}",
                draft.zone_id
            )));
        }
        let id = draft.id.take().unwrap_or_else(|| RoomId::new(generate_id()));
        if tables.rooms.contains_key(&id) {
            return Err(StoreError::Constraint(format!("room {id} already exists")));
        }

        let room = Room::from_draft(id.clone(), draft, Utc::now());
        tables.rooms.insert(id.clone(), room.clone());
        tracing::debug!(room_id = %id, "room stored");
        Ok(room)
    }

    async fn update_room(&self, room: &Room) -> Result<Room, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.zones.contains_key(&room.zone_id) {
            return Err(StoreError::Constraint(format!(
                "room references unknown zone {}",
                room.zone_id
            )));
        }
        let stored = tables
            .rooms
            .get_mut(&room.id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Room, &room.id))?;

        let created_at = stored.created_at;
        *stored = Room {
            created_at,
            updated_at: Utc::now(),
            exits: Vec::new(),
            ..room.clone()
        };
        tracing::debug!(room_id = %room.id, "room updated");
        Ok(stored.clone())
    }

    async fn delete_room(&self, id: &RoomId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.rooms.remove(id).is_none() {
            return Err(StoreError::not_found(RecordKind::Room, id));
        }
        let before = tables.exits.len();
        tables.exits.retain(|e| &e.from != id && &e.to != id);
        tracing::debug!(
            room_id = %id,
            exits_removed = before - tables.exits.len(),
            "room deleted"
        );
        Ok(())
    }

    async fn exits_from(&self, room: &RoomId) -> Result<Vec<Exit>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .exits
            .iter()
            .filter(|e| &e.from == room)
            .cloned()
            .collect())
    }

    async fn create_exit(&self, mut draft: ExitDraft) -> Result<Exit, StoreError> {
        let mut tables = self.tables.write().await;
        for endpoint in [&draft.from, &draft.to] {
            if !tables.rooms.contains_key(endpoint) {
                return Err(StoreError::Constraint(format!(
                    "exit references unknown room {endpoint}"
                )));
            }
        }
        let id = draft.id.take().unwrap_or_else(|| ExitId::new(generate_id()));
        if tables.exits.iter().any(|e| e.id == id) {
            return Err(StoreError::Constraint(format!("exit {id} already exists")));
        }

        let exit = Exit::from_draft(id, draft);
        tables.exits.push(exit.clone());
        tracing::debug!(exit_id = %exit.id, from = %exit.from, to = %exit.to, "exit stored");
        Ok(exit)
    }

    async fn delete_exit(&self, id: &ExitId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let index = tables
            .exits
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| StoreError::not_found(RecordKind::Exit, id))?;
        tables.exits.remove(index);
        Ok(())
    }

    async fn zone(&self, id: &ZoneId) -> Result<Zone, StoreError> {
        self.tables
            .read()
            .await
            .zones
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(RecordKind::Zone, id))
    }

    async fn all_zones(&self) -> Result<Vec<Zone>, StoreError> {
        let mut zones: Vec<Zone> = self.tables.read().await.zones.values().cloned().collect();
        zones.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(zones)
    }

    async fn create_zone(&self, mut draft: ZoneDraft) -> Result<Zone, StoreError> {
        let mut tables = self.tables.write().await;
        let id = draft.id.take().unwrap_or_else(|| ZoneId::new(generate_id()));
        if tables.zones.contains_key(&id) {
            return Err(StoreError::Constraint(format!("zone {id} already exists")));
        }
        let zone = Zone::from_draft(id.clone(), draft, Utc::now());
        tables.zones.insert(id, zone.clone());
        Ok(zone)
    }
}

/// Generates a random 32-character hex identifier (128 bits).
fn generate_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
