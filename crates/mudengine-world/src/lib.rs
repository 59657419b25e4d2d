//! World state for mudengine.
//!
//! Holds the rooms players walk through and the record of where each
//! player is, and moves players between rooms safely while many player
//! tasks act at once.
//!
//! # Key types
//!
//! - [`WorldCache`] — rooms in memory, player locations, write-through authoring
//! - [`Movement`] — walking through gated exits and teleporting
//! - [`Actor`] — the command layer's view of one connected player
//! - [`LoadReport`] — what a bulk load achieved, degraded rooms included
//! - [`WorldError`] / [`MoveError`] — lookup and movement failures
//!
//! # How it fits in the stack
//!
//! ```text
//! Command layer (above)  ← walks, teleports, authors rooms
//!     ↕
//! World (this crate)     ← cache + movement, one RwLock
//!     ↕
//! Store (below)          ← durable rooms, exits, zones
//! ```

mod actor;
mod cache;
mod error;
mod movement;

pub use actor::Actor;
pub use cache::{DegradedRoom, LoadReport, RoomStats, WorldCache};
pub use error::{MoveError, WorldError};
pub use movement::{MoveOutcome, Movement, check_gates};
