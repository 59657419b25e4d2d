//! `Engine` builder and command loop entry points.
//!
//! This is what a front end talks to. It ties the layers together:
//! store → world cache → movement → command handlers.

use std::collections::HashMap;
use std::sync::Arc;

use mudengine_access::RoleBook;
use mudengine_store::Store;
use mudengine_types::{PlayerId, RoomId};
use mudengine_world::{Actor, LoadReport, Movement, WorldCache, WorldError};
use tokio::sync::RwLock;

use crate::commands::{CommandRegistry, Parsed};
use crate::config::{Config, EngineConfig};
use crate::handler::dispatch;
use crate::render::{describe_room, line};
use crate::{Audience, MudError, Outcome};

/// Shared engine state passed to every command handler.
///
/// Wrapped in `Arc` so it can be cheaply cloned across player tasks.
pub(crate) struct EngineState<S: Store> {
    pub(crate) world: Arc<WorldCache<S>>,
    pub(crate) movement: Movement<S>,
    pub(crate) registry: CommandRegistry,
    pub(crate) roles: RoleBook,
    pub(crate) config: EngineConfig,
    /// Display names of entered players.
    pub(crate) names: RwLock<HashMap<PlayerId, String>>,
}

impl<S: Store> EngineState<S> {
    /// Names of the players in `room`, minus `except`, ordered by player id.
    pub(crate) async fn names_in(&self, room: &RoomId, except: &PlayerId) -> Vec<String> {
        let players = self.world.players_in(room).await;
        let names = self.names.read().await;
        players
            .iter()
            .filter(|p| *p != except)
            .map(|p| names.get(p).cloned().unwrap_or_else(|| p.to_string()))
            .collect()
    }

    pub(crate) async fn name_of(&self, player: &PlayerId) -> String {
        self.names
            .read()
            .await
            .get(player)
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }
}

/// Builder for configuring and starting an [`Engine`].
///
/// # Example
///
/// ```rust,ignore
/// use mudengine::prelude::*;
///
/// let store = MemoryStore::from_seed(WorldSeed::starter()).await?;
/// let engine = EngineBuilder::new()
///     .config(config)
///     .build(Arc::new(store))
///     .await?;
/// ```
pub struct EngineBuilder {
    config: Config,
    registry: CommandRegistry,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            registry: CommandRegistry::new(),
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets where entering players are placed.
    pub fn start_room(mut self, room: RoomId) -> Self {
        self.config.engine.start_room = room;
        self
    }

    /// Sets the role definitions.
    pub fn roles(mut self, roles: RoleBook) -> Self {
        self.config.roles = roles;
        self
    }

    /// Sets the command words, for front ends that add aliases.
    pub fn commands(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Validates the configuration, loads the world from `store`, and
    /// checks that the start room exists.
    pub async fn build<S: Store>(self, store: Arc<S>) -> Result<Engine<S>, MudError> {
        self.config.validate()?;

        let world = Arc::new(WorldCache::new(store));
        let report = world.load_all().await?;
        if !report.is_clean() {
            tracing::warn!(
                degraded = report.degraded.len(),
                "world loaded with rooms missing their exits"
            );
        }

        let start = world.get(&self.config.engine.start_room).await?;
        tracing::info!(
            name = %self.config.engine.name,
            rooms = report.loaded.len(),
            start_room = %start.id,
            commands = self.registry.len(),
            "engine ready"
        );

        let state = Arc::new(EngineState {
            movement: Movement::new(Arc::clone(&world)),
            world,
            registry: self.registry,
            roles: self.config.roles,
            config: self.config.engine,
            names: RwLock::new(HashMap::new()),
        });
        Ok(Engine { state, report })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running world.
///
/// Cheap to clone; every clone shares the same world cache. One front-end
/// task per player calls [`enter`](Self::enter), then
/// [`execute`](Self::execute) per input line, then
/// [`leave`](Self::leave).
pub struct Engine<S: Store> {
    state: Arc<EngineState<S>>,
    report: LoadReport,
}

impl<S: Store> Clone for Engine<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            report: self.report.clone(),
        }
    }
}

impl<S: Store> Engine<S> {
    pub fn world(&self) -> &Arc<WorldCache<S>> {
        &self.state.world
    }

    pub fn roles(&self) -> &RoleBook {
        &self.state.roles
    }

    pub fn config(&self) -> &EngineConfig {
        &self.state.config
    }

    /// The result of the startup load.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Creates an actor in the start room holding the union of `roles`.
    /// No roles means the configured default role.
    pub fn actor<R: AsRef<str>>(
        &self,
        id: PlayerId,
        name: impl Into<String>,
        roles: &[R],
    ) -> Result<Actor, MudError> {
        let grants = if roles.is_empty() {
            self.state
                .roles
                .grants_for(&[self.state.config.default_role.as_str()])?
        } else {
            self.state.roles.grants_for(roles)?
        };
        Ok(Actor::new(id, name, self.state.config.start_room.clone()).with_grants(grants))
    }

    /// Places `actor` in the world.
    ///
    /// An actor whose `current_room` no longer exists is moved to the
    /// start room. The reply is the welcome banner and the room.
    pub async fn enter(&self, actor: &mut Actor) -> Result<Outcome, MudError> {
        let world = &self.state.world;
        let room = match world.get(&actor.current_room).await {
            Ok(room) => room,
            Err(WorldError::RoomNotFound(_)) => {
                actor.current_room = self.state.config.start_room.clone();
                world.get(&actor.current_room).await?
            }
            Err(err) => return Err(err.into()),
        };

        world.set_player_location(&actor.id, &room.id).await?;
        self.state
            .names
            .write()
            .await
            .insert(actor.id.clone(), actor.name.clone());
        tracing::info!(player = %actor.id, name = %actor.name, room_id = %room.id, "player entered");

        let others = self.state.names_in(&room.id, &actor.id).await;
        let reply = format!(
            "{}\r\n{}",
            line(format!("Welcome to {}, {}!", self.state.config.name, actor.name)),
            describe_room(&room, &others)
        );
        Ok(Outcome::reply(reply).notify(
            Audience::RoomExcept {
                room: room.id.clone(),
                except: actor.id.clone(),
            },
            format!("{} has arrived.", actor.name),
        ))
    }

    /// Runs one line of player input.
    ///
    /// Failures become the reply text; nothing here is fatal to the
    /// session.
    pub async fn execute(&self, actor: &mut Actor, input: &str) -> Outcome {
        match self.state.registry.parse(input) {
            Parsed::Empty => Outcome::default(),
            Parsed::Unknown(word) => {
                tracing::debug!(player = %actor.id, command = %word, "unknown command");
                Outcome::reply(line(format!("Unknown command: {word}")))
            }
            Parsed::Command { verb, args } => {
                tracing::debug!(player = %actor.id, ?verb, ?args, "executing command");
                match dispatch(&self.state, actor, verb, &args).await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        tracing::debug!(player = %actor.id, ?verb, error = %err, "command failed");
                        Outcome::reply(line(err.player_message()))
                    }
                }
            }
        }
    }

    /// Removes `player` from the world. Idempotent.
    pub async fn leave(&self, player: &PlayerId) -> Outcome {
        let room = self.state.world.remove_player(player).await;
        let name = self.state.names.write().await.remove(player);

        match (room, name) {
            (Some(room), Some(name)) => {
                tracing::info!(%player, room_id = %room, "player left");
                Outcome::default().notify(Audience::Room(room), format!("{name} has left the game."))
            }
            _ => Outcome::default(),
        }
    }
}
