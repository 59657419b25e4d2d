//! World records for mudengine.
//!
//! This crate defines the plain data that every other layer passes around:
//!
//! - **Identifiers** ([`RoomId`], [`ExitId`], [`ZoneId`], [`PlayerId`],
//!   [`ItemId`]) — opaque, stable string keys.
//! - **Records** ([`Room`], [`Exit`], [`Zone`]) — what the store persists
//!   and the world cache mirrors.
//! - **Drafts** ([`RoomDraft`], [`ExitDraft`], [`ZoneDraft`]) — the
//!   author-supplied part of a record before the store assigns ids and
//!   timestamps.
//! - **Errors** ([`ModelError`]) — values that violate a record invariant.
//!
//! # Architecture
//!
//! ```text
//! Store (durable) → Types (records) → World cache (in-memory mirror)
//! ```
//!
//! Nothing here does I/O or locking. Invariants that can be checked on a
//! single value (darkness range, non-empty keywords) are enforced by the
//! types themselves, including during deserialization.

mod error;
mod exit;
mod ids;
mod room;
mod zone;

pub use error::ModelError;
pub use exit::{Exit, ExitDraft, Keywords};
pub use ids::{ExitId, ItemId, PlayerId, RoomId, ZoneId};
pub use room::{Darkness, Room, RoomDraft, RoomFlags, Trap};
pub use zone::{Zone, ZoneDraft};
