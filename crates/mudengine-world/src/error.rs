//! Error types for the world layer.

use mudengine_store::{RecordKind, StoreError};
use mudengine_types::{ItemId, PlayerId, RoomId, ZoneId};

/// Errors from world cache operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The room is neither cached nor in the store.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// No exit in `room` answers to `exit` (a keyword or an exit id).
    #[error("no exit {exit} in room {room}")]
    ExitNotFound { room: RoomId, exit: String },

    #[error("zone {0} not found")]
    ZoneNotFound(ZoneId),

    /// A move named an origin that is not where the player is recorded.
    /// `actual` is `None` when the player has no recorded location.
    #[error("player {player} is not in room {expected}")]
    StaleLocation {
        player: PlayerId,
        expected: RoomId,
        actual: Option<RoomId>,
    },

    /// The player has no location record.
    #[error("player {0} has no recorded location")]
    PlayerNotTracked(PlayerId),

    /// A room with players recorded in it cannot be deleted.
    #[error("room {room} has {players} player(s) in it")]
    Occupied { room: RoomId, players: usize },

    /// Any other store failure, unchanged.
    #[error(transparent)]
    Store(StoreError),
}

impl WorldError {
    /// Returns `true` for the not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound(_) | Self::ExitNotFound { .. } | Self::ZoneNotFound(_)
        )
    }
}

impl From<StoreError> for WorldError {
    /// Room and zone misses become their typed variants. An exit miss
    /// carries no room, so it stays a store error; callers that know the
    /// room map it themselves.
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound {
                kind: RecordKind::Room,
                id,
            } => Self::RoomNotFound(RoomId::new(id)),
            StoreError::NotFound {
                kind: RecordKind::Zone,
                id,
            } => Self::ZoneNotFound(ZoneId::new(id)),
            other => Self::Store(other),
        }
    }
}

/// Why a player could not move.
///
/// The gate variants display as the sentence a player sees, so they never
/// contain internal identifiers.
#[derive(Debug, thiserror::Error)]
pub enum MoveError {
    /// No exit in the current room matches the typed keyword.
    #[error("You can't go {0}.")]
    NoSuchDirection(String),

    #[error("That way is locked.")]
    Locked,

    #[error("That way is closed.")]
    Closed,

    /// The exit needs an item the actor does not carry.
    #[error("You need a key to go that way.")]
    ItemRequired(ItemId),

    /// A no-teleport flag on the origin or destination refused the jump.
    #[error("Something prevents you from teleporting there.")]
    TeleportBlocked(RoomId),

    #[error(transparent)]
    World(#[from] WorldError),
}
