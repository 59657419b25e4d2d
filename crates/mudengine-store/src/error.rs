//! Error types for the store layer.

use std::fmt;

/// Which kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Room,
    Exit,
    Zone,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Room => write!(f, "room"),
            Self::Exit => write!(f, "exit"),
            Self::Zone => write!(f, "zone"),
        }
    }
}

/// Errors a [`Store`](crate::Store) backend can report.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this identifier exists.
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: String },

    /// The write would break a relational rule (dangling exit endpoint,
    /// unknown zone, duplicate id).
    #[error("constraint violated: {0}")]
    Constraint(String),

    /// The backend could not be reached or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Reading a seed file failed.
    #[error("seed i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// A seed document is not valid JSON or breaks a record invariant.
    #[error("invalid seed: {0}")]
    Seed(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(kind: RecordKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Returns `true` for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
