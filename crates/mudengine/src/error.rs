//! Unified error type for the mudengine meta-crate.

use mudengine_access::AccessError;
use mudengine_store::StoreError;
use mudengine_types::ModelError;
use mudengine_world::{MoveError, WorldError};

use crate::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum MudError {
    /// A value broke a record invariant (darkness range, keywords).
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The backing store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A world cache lookup or update failed.
    #[error(transparent)]
    World(#[from] WorldError),

    /// A move was refused or failed.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// The actor lacks the capability a command needs.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// The configuration could not be read or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl MudError {
    /// The line shown to the player whose command failed.
    ///
    /// Refusals (permission, gates) are shown as-is. World and store
    /// failures get a fixed line; their details belong in the logs.
    pub fn player_message(&self) -> String {
        match self {
            Self::Access(err) => err.to_string(),
            Self::Move(MoveError::World(err)) | Self::World(err) => {
                world_message(err).to_string()
            }
            Self::Move(err) => err.to_string(),
            Self::Store(_) => UNAVAILABLE.to_string(),
            other => format!("Error: {other}"),
        }
    }
}

const UNAVAILABLE: &str = "The world is unavailable right now. Try again later.";

fn world_message(err: &WorldError) -> &'static str {
    match err {
        WorldError::Store(_) => UNAVAILABLE,
        _ => "You can't do that right now.",
    }
}
