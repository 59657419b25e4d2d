//! The world cache: rooms in memory, and where every player is.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use mudengine_store::Store;
use mudengine_types::{
    Darkness, Exit, ExitDraft, ExitId, PlayerId, Room, RoomDraft, RoomId, Zone, ZoneDraft,
    ZoneId,
};
use tokio::sync::RwLock;

use crate::WorldError;

/// Everything the cache guards, behind one lock.
#[derive(Default)]
struct State {
    /// Cached rooms with their exits attached.
    rooms: HashMap<RoomId, Arc<Room>>,
    /// The authoritative "where is this player" record.
    /// A player is in at most one room.
    locations: HashMap<PlayerId, RoomId>,
    /// Per-room deletion count. A load that began under an older value
    /// must not be installed.
    versions: HashMap<RoomId, u64>,
    /// Rooms with a store delete in flight.
    deleting: HashSet<RoomId>,
}

impl State {
    fn version(&self, room_id: &RoomId) -> u64 {
        self.versions.get(room_id).copied().unwrap_or(0)
    }

    /// Whether a load of `room_id` that started at `version` may be cached.
    fn accepts(&self, room_id: &RoomId, version: u64) -> bool {
        !self.deleting.contains(room_id) && self.version(room_id) == version
    }
}

/// A room whose exits could not be loaded during [`WorldCache::load_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedRoom {
    pub room_id: RoomId,
    pub reason: String,
}

/// What a bulk load achieved.
///
/// Both lists follow the store's room order (by title), so two loads of
/// the same data produce the same report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Every room now cached, degraded ones included.
    pub loaded: Vec<RoomId>,
    /// Rooms cached with zero exits because their exits failed to load.
    pub degraded: Vec<DegradedRoom>,
}

impl LoadReport {
    /// Returns `true` if every room loaded with its exits.
    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }
}

/// A point-in-time summary of one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomStats {
    pub room_id: RoomId,
    pub title: String,
    pub player_count: usize,
    pub exit_count: usize,
    pub darkness: Darkness,
}

/// In-memory mirror of the store's rooms plus the live player locations.
///
/// All methods take `&self`; share the cache as `Arc<WorldCache<S>>`.
///
/// # Locking
///
/// A single `tokio::sync::RwLock` guards rooms and locations together.
/// Reads run in parallel, mutations are exclusive. The lock is never held
/// across a store call: a cache miss reads, releases, fetches, and then
/// takes the write lock only to install the result. Two tasks missing on
/// the same room may both fetch it; the second install overwrites the
/// first with an equal value.
///
/// Rooms are handed out as `Arc<Room>` snapshots. A reload swaps the
/// `Arc`, it never mutates a room another task may be reading.
///
/// A load that races a [`delete`](Self::delete) of the same room is
/// discarded rather than installed, so a deleted room never comes back.
pub struct WorldCache<S: Store> {
    store: Arc<S>,
    state: RwLock<State>,
}

impl<S: Store> WorldCache<S> {
    /// Creates an empty cache over `store`. Call [`WorldCache::load_all`]
    /// to warm it.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            state: RwLock::new(State::default()),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // =======================================================================
    // Loading
    // =======================================================================

    /// Replaces the cached rooms with everything in the store.
    ///
    /// Player locations are kept. If a room's exits fail to load, the room
    /// is cached without exits and listed in [`LoadReport::degraded`]. If
    /// the room listing itself fails, the error is returned and the
    /// previous contents stay in place.
    pub async fn load_all(&self) -> Result<LoadReport, WorldError> {
        let versions = self.state.read().await.versions.clone();
        let rooms = self.store.all_rooms().await?;

        let mut report = LoadReport::default();
        let mut fresh = HashMap::with_capacity(rooms.len());
        for room in rooms {
            let room = match self.store.exits_from(&room.id).await {
                Ok(exits) => room.attach_exits(exits),
                Err(err) => {
                    tracing::warn!(room_id = %room.id, error = %err, "failed to load exits");
                    report.degraded.push(DegradedRoom {
                        room_id: room.id.clone(),
                        reason: err.to_string(),
                    });
                    room.attach_exits(Vec::new())
                }
            };
            report.loaded.push(room.id.clone());
            fresh.insert(room.id.clone(), Arc::new(room));
        }

        let mut state = self.state.write().await;
        fresh.retain(|id, _| state.accepts(id, versions.get(id).copied().unwrap_or(0)));
        report.loaded.retain(|id| fresh.contains_key(id));
        report.degraded.retain(|d| fresh.contains_key(&d.room_id));
        state.rooms = fresh;
        drop(state);

        tracing::info!(
            rooms = report.loaded.len(),
            degraded = report.degraded.len(),
            "world loaded"
        );
        Ok(report)
    }

    /// Returns a room, loading it from the store on a miss.
    pub async fn get(&self, room_id: &RoomId) -> Result<Arc<Room>, WorldError> {
        let (cached, version) = {
            let state = self.state.read().await;
            (state.rooms.get(room_id).cloned(), state.version(room_id))
        };
        if let Some(room) = cached {
            return Ok(room);
        }

        tracing::debug!(%room_id, "cache miss");
        let room = self.fetch(room_id).await?;
        self.install(room, version).await
    }

    /// Re-fetches a room from the store and replaces the cached copy.
    ///
    /// If the room no longer exists, the stale entry is evicted and
    /// [`WorldError::RoomNotFound`] is returned.
    pub async fn reload(&self, room_id: &RoomId) -> Result<Arc<Room>, WorldError> {
        let version = self.state.read().await.version(room_id);
        match self.fetch(room_id).await {
            Ok(room) => {
                let room = self.install(room, version).await?;
                tracing::debug!(%room_id, "room reloaded");
                Ok(room)
            }
            Err(err @ WorldError::RoomNotFound(_)) => {
                self.state.write().await.rooms.remove(room_id);
                tracing::debug!(%room_id, "room gone from store, evicted");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    async fn fetch(&self, room_id: &RoomId) -> Result<Room, WorldError> {
        let room = self.store.room(room_id).await?;
        let exits = self.store.exits_from(room_id).await?;
        Ok(room.attach_exits(exits))
    }

    /// Caches a room fetched while the room's version was `version`.
    /// Refused with [`WorldError::RoomNotFound`] if the room was deleted,
    /// or is being deleted, since the fetch began.
    async fn install(&self, room: Room, version: u64) -> Result<Arc<Room>, WorldError> {
        let mut state = self.state.write().await;
        if !state.accepts(&room.id, version) {
            tracing::debug!(room_id = %room.id, "room deleted while loading, not cached");
            return Err(WorldError::RoomNotFound(room.id));
        }
        let room = Arc::new(room);
        state.rooms.insert(room.id.clone(), Arc::clone(&room));
        Ok(room)
    }

    // =======================================================================
    // Authoring (write-through)
    // =======================================================================

    /// Persists a new room and caches it under its assigned id.
    pub async fn create(&self, draft: RoomDraft) -> Result<Arc<Room>, WorldError> {
        let room = Arc::new(self.store.create_room(draft).await?);
        self.state
            .write()
            .await
            .rooms
            .insert(room.id.clone(), Arc::clone(&room));
        tracing::info!(room_id = %room.id, title = %room.title, "room created");
        Ok(room)
    }

    /// Writes a room's fields to the store, then reloads it.
    pub async fn update(&self, room: &Room) -> Result<Arc<Room>, WorldError> {
        self.store.update_room(room).await?;
        self.reload(&room.id).await
    }

    /// Deletes a room from the store and the cache.
    ///
    /// Refused with [`WorldError::Occupied`] while any player is recorded
    /// in the room. From the occupancy check until the store answers,
    /// nobody can move into the room and loads of it are discarded.
    ///
    /// The store cascades the room's exits; the cache mirrors that by
    /// stripping cached exits that lead into the deleted room.
    pub async fn delete(&self, room_id: &RoomId) -> Result<(), WorldError> {
        {
            let mut state = self.state.write().await;
            let players = state.locations.values().filter(|r| *r == room_id).count();
            if players > 0 {
                return Err(WorldError::Occupied {
                    room: room_id.clone(),
                    players,
                });
            }
            if !state.deleting.insert(room_id.clone()) {
                return Err(WorldError::RoomNotFound(room_id.clone()));
            }
            state.rooms.remove(room_id);
        }

        let deleted = self.store.delete_room(room_id).await;

        let mut state = self.state.write().await;
        state.deleting.remove(room_id);
        deleted?;
        *state.versions.entry(room_id.clone()).or_default() += 1;
        state.rooms.remove(room_id);
        for slot in state.rooms.values_mut() {
            if slot.exits.iter().any(|e| &e.to == room_id) {
                let mut room = (**slot).clone();
                room.exits.retain(|e| &e.to != room_id);
                *slot = Arc::new(room);
            }
        }
        drop(state);

        tracing::info!(%room_id, "room deleted");
        Ok(())
    }

    /// Persists a new exit and reloads its source room.
    ///
    /// Both endpoints are resolved through the cache first, so a missing
    /// room is reported as [`WorldError::RoomNotFound`] before anything is
    /// written.
    pub async fn create_exit(&self, draft: ExitDraft) -> Result<Exit, WorldError> {
        self.get(&draft.from).await?;
        self.get(&draft.to).await?;

        let exit = self.store.create_exit(draft).await?;
        self.reload(&exit.from).await?;
        tracing::info!(exit_id = %exit.id, from = %exit.from, to = %exit.to, "exit created");
        Ok(exit)
    }

    /// Deletes one exit of `room_id` and reloads the room.
    pub async fn delete_exit(&self, room_id: &RoomId, exit_id: &ExitId) -> Result<(), WorldError> {
        self.store.delete_exit(exit_id).await.map_err(|err| {
            if err.is_not_found() {
                WorldError::ExitNotFound {
                    room: room_id.clone(),
                    exit: exit_id.to_string(),
                }
            } else {
                WorldError::from(err)
            }
        })?;
        self.reload(room_id).await?;
        tracing::info!(%room_id, %exit_id, "exit deleted");
        Ok(())
    }

    // =======================================================================
    // Player locations
    // =======================================================================

    /// Records that `player` is in `room_id`, which must exist.
    pub async fn set_player_location(
        &self,
        player: &PlayerId,
        room_id: &RoomId,
    ) -> Result<(), WorldError> {
        self.get(room_id).await?;

        let mut state = self.state.write().await;
        if !state.rooms.contains_key(room_id) {
            return Err(WorldError::RoomNotFound(room_id.clone()));
        }
        state.locations.insert(player.clone(), room_id.clone());
        drop(state);
        tracing::info!(%player, %room_id, "player placed");
        Ok(())
    }

    /// Moves `player` from `from` to `to` and returns the destination.
    ///
    /// The destination must exist. The checks and the update happen
    /// under one write lock: if the player is not recorded in `from`
    /// (or not recorded at all), nothing changes and
    /// [`WorldError::StaleLocation`] is returned.
    pub async fn move_player(
        &self,
        player: &PlayerId,
        from: &RoomId,
        to: &RoomId,
    ) -> Result<Arc<Room>, WorldError> {
        self.get(to).await?;

        let mut state = self.state.write().await;
        let Some(destination) = state.rooms.get(to).cloned() else {
            return Err(WorldError::RoomNotFound(to.clone()));
        };
        let actual = state.locations.get(player).cloned();
        if actual.as_ref() != Some(from) {
            tracing::warn!(%player, expected = %from, ?actual, "stale move rejected");
            return Err(WorldError::StaleLocation {
                player: player.clone(),
                expected: from.clone(),
                actual,
            });
        }
        state.locations.insert(player.clone(), to.clone());
        drop(state);

        tracing::debug!(%player, %from, %to, "player moved");
        Ok(destination)
    }

    /// Where `player` is recorded.
    pub async fn player_location(&self, player: &PlayerId) -> Result<RoomId, WorldError> {
        self.state
            .read()
            .await
            .locations
            .get(player)
            .cloned()
            .ok_or_else(|| WorldError::PlayerNotTracked(player.clone()))
    }

    /// The players recorded in `room_id`. Scans every location.
    pub async fn players_in(&self, room_id: &RoomId) -> BTreeSet<PlayerId> {
        self.state
            .read()
            .await
            .locations
            .iter()
            .filter(|(_, rid)| *rid == room_id)
            .map(|(pid, _)| pid.clone())
            .collect()
    }

    /// Forgets `player`. Returns the room they were in, if any; removing
    /// an untracked player is a no-op.
    pub async fn remove_player(&self, player: &PlayerId) -> Option<RoomId> {
        let removed = self.state.write().await.locations.remove(player);
        if let Some(room_id) = &removed {
            tracing::info!(%player, %room_id, "player removed");
        }
        removed
    }

    /// Every tracked player and their room, ordered by player id.
    pub async fn locations(&self) -> Vec<(PlayerId, RoomId)> {
        let mut all: Vec<_> = self
            .state
            .read()
            .await
            .locations
            .iter()
            .map(|(p, r)| (p.clone(), r.clone()))
            .collect();
        all.sort();
        all
    }

    // =======================================================================
    // Exits
    // =======================================================================

    /// The first exit of `room_id` whose keywords contain `keyword`
    /// exactly (case-sensitive), in definition order.
    pub async fn find_exit(&self, room_id: &RoomId, keyword: &str) -> Result<Exit, WorldError> {
        let room = self.get(room_id).await?;
        room.exits
            .iter()
            .find(|e| e.matches(keyword))
            .cloned()
            .ok_or_else(|| WorldError::ExitNotFound {
                room: room_id.clone(),
                exit: keyword.to_string(),
            })
    }

    /// Exits a player sees listed: not hidden and marked obvious.
    pub async fn obvious_exits(&self, room_id: &RoomId) -> Result<Vec<Exit>, WorldError> {
        let room = self.get(room_id).await?;
        Ok(room.exits.iter().filter(|e| e.is_obvious()).cloned().collect())
    }

    /// Every exit, hidden ones included.
    pub async fn exits(&self, room_id: &RoomId) -> Result<Vec<Exit>, WorldError> {
        Ok(self.get(room_id).await?.exits.clone())
    }

    // =======================================================================
    // Listings and aggregates
    // =======================================================================

    pub async fn room_count(&self) -> usize {
        self.state.read().await.rooms.len()
    }

    pub async fn player_count(&self) -> usize {
        self.state.read().await.locations.len()
    }

    pub async fn room_stats(&self, room_id: &RoomId) -> Result<RoomStats, WorldError> {
        let room = self.get(room_id).await?;
        let player_count = self.players_in(room_id).await.len();
        Ok(RoomStats {
            room_id: room.id.clone(),
            title: room.title.clone(),
            player_count,
            exit_count: room.exits.len(),
            darkness: room.darkness,
        })
    }

    /// Every cached room, ordered by title.
    pub async fn rooms(&self) -> Vec<Arc<Room>> {
        let mut rooms: Vec<_> = self.state.read().await.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        rooms
    }

    /// Looks a cached room up by title, ignoring case: an exact match
    /// wins, otherwise the first room (by title) containing `query`.
    pub async fn find_room_by_title(&self, query: &str) -> Option<Arc<Room>> {
        let query = query.to_lowercase();
        let rooms = self.rooms().await;
        rooms
            .iter()
            .find(|r| r.title.to_lowercase() == query)
            .or_else(|| rooms.iter().find(|r| r.title.to_lowercase().contains(&query)))
            .cloned()
    }

    // =======================================================================
    // Zones (not cached)
    // =======================================================================

    pub async fn zone(&self, zone_id: &ZoneId) -> Result<Zone, WorldError> {
        Ok(self.store.zone(zone_id).await?)
    }

    pub async fn zones(&self) -> Result<Vec<Zone>, WorldError> {
        Ok(self.store.all_zones().await?)
    }

    pub async fn create_zone(&self, draft: ZoneDraft) -> Result<Zone, WorldError> {
        let zone = self.store.create_zone(draft).await?;
        tracing::info!(zone_id = %zone.id, name = %zone.name, "zone created");
        Ok(zone)
    }

    /// Rooms of a zone as the store has them, without exits.
    pub async fn rooms_in_zone(&self, zone_id: &ZoneId) -> Result<Vec<Room>, WorldError> {
        Ok(self.store.rooms_in_zone(zone_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudengine_store::MemoryStore;

    fn cache() -> WorldCache<MemoryStore> {
        WorldCache::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_load_report_default_is_clean() {
        assert!(LoadReport::default().is_clean());
    }

    #[tokio::test]
    async fn test_new_cache_is_empty() {
        let cache = cache();
        assert_eq!(cache.room_count().await, 0);
        assert_eq!(cache.player_count().await, 0);
    }

    #[tokio::test]
    async fn test_remove_untracked_player_returns_none() {
        let cache = cache();
        assert_eq!(cache.remove_player(&PlayerId::new("ghost")).await, None);
    }

    #[tokio::test]
    async fn test_player_location_untracked_returns_error() {
        let err = cache()
            .player_location(&PlayerId::new("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, WorldError::PlayerNotTracked(_)));
    }
}
