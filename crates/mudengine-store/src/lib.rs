//! Durable storage interface for mudengine.
//!
//! The world core never talks to a database directly. It consumes the
//! [`Store`] trait: CRUD for rooms, exits, and zones. Whatever sits behind
//! it (SQL, a key-value store, a remote service) is the store's business.
//!
//! # Key types
//!
//! - [`Store`] — the trait a persistence backend implements
//! - [`MemoryStore`] — reference implementation kept entirely in memory,
//!   used by tests and the console demo
//! - [`WorldSeed`] — a JSON document of drafts used to populate a store
//! - [`StoreError`] — what a backend can report

#![allow(async_fn_in_trait)]

mod error;
mod memory;
mod seed;
mod store;

pub use error::{RecordKind, StoreError};
pub use memory::MemoryStore;
pub use seed::{BUILDER_ROOM_ID, STAFF_ZONE_ID, STARTING_ZONE_ID, WorldSeed};
pub use store::Store;
