//! Movement: walking through exits and teleporting.

use std::sync::Arc;

use mudengine_access::{Capability, Grantee};
use mudengine_store::Store;
use mudengine_types::{Exit, Room, RoomId};

use crate::{Actor, MoveError, WorldCache, WorldError};

/// The result of a successful move, for announcing departure and arrival.
///
/// Movement itself sends nothing to anyone.
#[derive(Debug, Clone)]
pub struct MoveOutcome {
    /// The room the actor left.
    pub from: RoomId,
    /// The room the actor is now in.
    pub to: Arc<Room>,
    /// The exit walked through. `None` for a teleport.
    pub exit: Option<Exit>,
}

/// Checks an exit's gates for `actor`, in order: locked, then closed,
/// then required item. The first failing gate is returned.
pub fn check_gates(exit: &Exit, actor: &Actor) -> Result<(), MoveError> {
    if exit.locked {
        return Err(MoveError::Locked);
    }
    if !exit.open {
        return Err(MoveError::Closed);
    }
    if let Some(item) = &exit.requires_item {
        if !actor.holds(item) {
            return Err(MoveError::ItemRequired(item.clone()));
        }
    }
    Ok(())
}

/// Moves actors around the world cache.
///
/// A move either fully succeeds (location record updated, actor's
/// `current_room` updated) or changes nothing.
pub struct Movement<S: Store> {
    world: Arc<WorldCache<S>>,
}

impl<S: Store> Clone for Movement<S> {
    fn clone(&self) -> Self {
        Self {
            world: Arc::clone(&self.world),
        }
    }
}

impl<S: Store> Movement<S> {
    pub fn new(world: Arc<WorldCache<S>>) -> Self {
        Self { world }
    }

    /// Walks `actor` through the exit of its current room matching
    /// `keyword`.
    pub async fn walk(&self, actor: &mut Actor, keyword: &str) -> Result<MoveOutcome, MoveError> {
        let exit = match self.world.find_exit(&actor.current_room, keyword).await {
            Ok(exit) => exit,
            Err(WorldError::ExitNotFound { .. }) => {
                return Err(MoveError::NoSuchDirection(keyword.to_string()));
            }
            Err(err) => return Err(err.into()),
        };

        if let Err(err) = check_gates(&exit, actor) {
            tracing::debug!(player = %actor.id, exit_id = %exit.id, reason = %err, "move refused");
            return Err(err);
        }

        let to = self
            .world
            .move_player(&actor.id, &actor.current_room, &exit.to)
            .await?;
        let from = std::mem::replace(&mut actor.current_room, exit.to.clone());

        Ok(MoveOutcome {
            from,
            to,
            exit: Some(exit),
        })
    }

    /// Jumps `actor` straight to `destination`.
    ///
    /// Refused with [`MoveError::TeleportBlocked`] when the origin is
    /// flagged no-teleport-out or the destination no-teleport-in, unless
    /// the actor holds [`Capability::Admin`].
    pub async fn teleport(
        &self,
        actor: &mut Actor,
        destination: &RoomId,
    ) -> Result<MoveOutcome, MoveError> {
        let to = self.world.get(destination).await?;

        if !actor.has(Capability::Admin) {
            let from = self.world.get(&actor.current_room).await?;
            if from.flags.no_teleport_out {
                tracing::debug!(player = %actor.id, room_id = %from.id, "teleport out blocked");
                return Err(MoveError::TeleportBlocked(from.id.clone()));
            }
            if to.flags.no_teleport_in {
                tracing::debug!(player = %actor.id, room_id = %to.id, "teleport in blocked");
                return Err(MoveError::TeleportBlocked(to.id.clone()));
            }
        }

        let to = self
            .world
            .move_player(&actor.id, &actor.current_room, destination)
            .await?;
        let from = std::mem::replace(&mut actor.current_room, destination.clone());
        tracing::info!(player = %actor.id, %from, to = %destination, "player teleported");

        Ok(MoveOutcome {
            from,
            to,
            exit: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudengine_types::{ExitDraft, ExitId, ItemId, Keywords, PlayerId};

    fn exit() -> Exit {
        let draft = ExitDraft::new(
            RoomId::new("a"),
            RoomId::new("b"),
            Keywords::new(["north", "n"]).unwrap(),
        );
        Exit::from_draft(ExitId::new("e"), draft)
    }

    fn actor() -> Actor {
        Actor::new(PlayerId::new("p"), "Alice", RoomId::new("a"))
    }

    #[test]
    fn test_check_gates_open_exit_passes() {
        assert!(check_gates(&exit(), &actor()).is_ok());
    }

    #[test]
    fn test_check_gates_locked_wins_over_closed_and_item() {
        let mut exit = exit();
        exit.locked = true;
        exit.open = false;
        exit.requires_item = Some(ItemId::new("key"));
        assert!(matches!(check_gates(&exit, &actor()), Err(MoveError::Locked)));
    }

    #[test]
    fn test_check_gates_closed_wins_over_item() {
        let mut exit = exit();
        exit.open = false;
        exit.requires_item = Some(ItemId::new("key"));
        assert!(matches!(check_gates(&exit, &actor()), Err(MoveError::Closed)));
    }

    #[test]
    fn test_check_gates_item_held_passes() {
        let mut exit = exit();
        exit.requires_item = Some(ItemId::new("key"));
        assert!(matches!(
            check_gates(&exit, &actor()),
            Err(MoveError::ItemRequired(_))
        ));
        let carrier = actor().with_item(ItemId::new("key"));
        assert!(check_gates(&exit, &carrier).is_ok());
    }
}
