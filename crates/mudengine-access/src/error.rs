//! Error types for the access layer.

use crate::Capability;

/// Errors from parsing grants or enforcing them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// A capability name that is not part of [`Capability`].
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    /// A role name missing from the [`RoleBook`](crate::RoleBook).
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// The actor holds none of the capabilities the operation accepts.
    ///
    /// The message is what the player sees, so it names no capability.
    #[error("You don't have permission to use this command.")]
    PermissionDenied { required: Vec<Capability> },
}
