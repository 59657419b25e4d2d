//! Permission gate for mudengine.
//!
//! Privileged commands (room authoring, teleport, admin listings) are
//! locked behind capabilities. This crate answers one question: does this
//! actor hold the capability the command needs?
//!
//! 1. **Capabilities** — a closed set of tags ([`Capability`]); a typo is a
//!    compile error, not a silently failing string compare.
//! 2. **Grants** — the flexible set of capabilities an actor holds
//!    ([`Grants`]), checked through the [`Grantee`] trait.
//! 3. **Roles** — named bundles of capabilities loaded from configuration
//!    ([`RoleBook`]), so new roles need no code changes.
//!
//! # How it fits in the stack
//!
//! ```text
//! Command layer (above)  ← asks the gate before mutating anything
//!     ↕
//! Access (this crate)    ← pure predicates, no I/O, no state
//! ```
//!
//! Where the grants come from (accounts, role tables) is someone else's
//! problem; the gate only reads them.

mod capability;
mod error;
mod grants;
mod roles;

pub use capability::Capability;
pub use error::AccessError;
pub use grants::{Grantee, Grants};
pub use roles::RoleBook;
