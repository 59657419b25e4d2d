//! Zones: named groups of rooms for authoring and listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ZoneId;

/// A grouping of rooms. Has no effect on movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub description: String,
    pub theme: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Zone {
    pub fn from_draft(id: ZoneId, draft: ZoneDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            theme: draft.theme,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The author-supplied fields of a new zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDraft {
    #[serde(default)]
    pub id: Option<ZoneId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_theme() -> String {
    "generic".to_string()
}

impl ZoneDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            theme: default_theme(),
        }
    }
}
