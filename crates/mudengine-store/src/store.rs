//! The storage trait consumed by the world cache.

use mudengine_types::{
    Exit, ExitDraft, ExitId, Room, RoomDraft, RoomId, Zone, ZoneDraft, ZoneId,
};

use crate::StoreError;

/// Durable CRUD for rooms, exits, and zones.
///
/// Rooms returned by the room methods carry no exits; exits are fetched
/// with [`Store::exits_from`] and attached by the caller. This mirrors a
/// relational layout where rooms and exits are separate tables.
///
/// # Trait bounds
///
/// `Send + Sync + 'static` because one store is shared by every player
/// task for the life of the process. Each method returns a `Send` future
/// so callers can hold it across `.await` inside `tokio::spawn`.
/// Implementors write plain `async fn`.
///
/// # Ordering
///
/// - [`Store::all_rooms`] and [`Store::rooms_in_zone`] are ordered by title.
/// - [`Store::all_zones`] is ordered by name.
/// - [`Store::exits_from`] is in definition (creation) order. Keyword
///   matching depends on it: the first matching exit wins.
pub trait Store: Send + Sync + 'static {
    /// Fetches one room. [`StoreError::NotFound`] if it does not exist.
    fn room(
        &self,
        id: &RoomId,
    ) -> impl std::future::Future<Output = Result<Room, StoreError>> + Send;

    /// Fetches every room.
    fn all_rooms(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Room>, StoreError>> + Send;

    /// Fetches every room belonging to `zone`.
    fn rooms_in_zone(
        &self,
        zone: &ZoneId,
    ) -> impl std::future::Future<Output = Result<Vec<Room>, StoreError>> + Send;

    /// Persists a new room, assigning its id (unless the draft pins one)
    /// and timestamps. Returns the stored record.
    fn create_room(
        &self,
        draft: RoomDraft,
    ) -> impl std::future::Future<Output = Result<Room, StoreError>> + Send;

    /// Overwrites an existing room's fields and bumps `updated_at`.
    /// `created_at` and `exits` on the argument are ignored.
    fn update_room(
        &self,
        room: &Room,
    ) -> impl std::future::Future<Output = Result<Room, StoreError>> + Send;

    /// Deletes a room together with every exit from or to it.
    fn delete_room(
        &self,
        id: &RoomId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Fetches the outgoing exits of a room, in definition order.
    fn exits_from(
        &self,
        room: &RoomId,
    ) -> impl std::future::Future<Output = Result<Vec<Exit>, StoreError>> + Send;

    /// Persists a new exit. Both endpoints must exist.
    fn create_exit(
        &self,
        draft: ExitDraft,
    ) -> impl std::future::Future<Output = Result<Exit, StoreError>> + Send;

    /// Deletes one exit.
    fn delete_exit(
        &self,
        id: &ExitId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Fetches one zone.
    fn zone(
        &self,
        id: &ZoneId,
    ) -> impl std::future::Future<Output = Result<Zone, StoreError>> + Send;

    /// Fetches every zone.
    fn all_zones(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Zone>, StoreError>> + Send;

    /// Persists a new zone.
    fn create_zone(
        &self,
        draft: ZoneDraft,
    ) -> impl std::future::Future<Output = Result<Zone, StoreError>> + Send;
}
