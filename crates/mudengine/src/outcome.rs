//! What a command produces: a reply for the actor and notices for others.

use mudengine_types::{PlayerId, RoomId};

/// Who a notice is for. Delivery is the front end's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    /// Everyone in the room.
    Room(RoomId),
    /// Everyone in the room except one player (usually the actor).
    RoomExcept { room: RoomId, except: PlayerId },
}

impl Audience {
    /// Returns `true` if a player standing in `room` should see the notice.
    pub fn reaches(&self, player: &PlayerId, room: &RoomId) -> bool {
        match self {
            Self::Room(target) => target == room,
            Self::RoomExcept {
                room: target,
                except,
            } => target == room && except != player,
        }
    }
}

/// The result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Text for the actor. Lines end in `\r\n`.
    pub reply: String,
    /// Messages for other players, one line each, without line endings.
    pub notices: Vec<(Audience, String)>,
    /// The actor asked to disconnect. The front end should call
    /// [`Engine::leave`](crate::Engine::leave).
    pub quit: bool,
}

impl Outcome {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            ..Self::default()
        }
    }

    pub fn quit(text: impl Into<String>) -> Self {
        Self {
            reply: text.into(),
            quit: true,
            ..Self::default()
        }
    }

    /// Adds a notice.
    pub fn notify(mut self, audience: Audience, text: impl Into<String>) -> Self {
        self.notices.push((audience, text.into()));
        self
    }
}
