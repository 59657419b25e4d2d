//! # mudengine
//!
//! World-state core for text-based multiplayer games.
//!
//! mudengine keeps rooms and exits in memory, records where every
//! connected player is, and moves players through gated exits while many
//! player tasks act at once. Front ends (telnet, websockets, a console)
//! feed it lines of input and deliver the text it returns.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mudengine::prelude::*;
//!
//! # async fn run() -> Result<(), MudError> {
//! let store = MemoryStore::from_seed(WorldSeed::starter()).await?;
//! let engine = EngineBuilder::new().build(Arc::new(store)).await?;
//!
//! let mut actor = engine.actor(PlayerId::new("p-1"), "Alice", &["builder"])?;
//! let welcome = engine.enter(&mut actor).await?;
//! print!("{}", welcome.reply);
//!
//! let outcome = engine.execute(&mut actor, "room create The Dark Forest").await;
//! print!("{}", outcome.reply);
//! engine.leave(&actor.id).await;
//! # Ok(())
//! # }
//! ```

mod commands;
mod config;
mod engine;
mod error;
mod handler;
mod outcome;
mod render;

pub use commands::{CommandRegistry, DIRECTIONS, Parsed, Verb, expand_direction};
pub use config::{Config, ConfigError, EngineConfig, LoggingConfig, WorldConfig};
pub use engine::{Engine, EngineBuilder};
pub use error::MudError;
pub use outcome::{Audience, Outcome};
pub use render::describe_room;

pub use mudengine_access as access;
pub use mudengine_store as store;
pub use mudengine_types as types;
pub use mudengine_world as world;

pub mod prelude {
    pub use crate::{Audience, Config, Engine, EngineBuilder, MudError, Outcome};
    pub use mudengine_access::{Capability, Grantee, Grants, RoleBook};
    pub use mudengine_store::{MemoryStore, Store, WorldSeed};
    pub use mudengine_types::{PlayerId, RoomId};
    pub use mudengine_world::{Actor, WorldCache};
}
