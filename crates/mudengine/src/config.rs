//! Engine configuration, loaded from TOML.
//!
//! Every section has a default, so an empty file is a valid config:
//!
//! ```toml
//! [engine]
//! name = "MUD Engine"
//! start_room = "00000000-0000-0000-0000-000000000000"
//! default_role = "player"
//!
//! [world]
//! seed_path = "data/world.json"
//!
//! [logging]
//! filter = "info"
//!
//! [roles]
//! player = []
//! builder = ["builder"]
//! staff = ["admin", "builder", "moderator", "storyteller"]
//! ```
//!
//! A `[roles]` table replaces the built-in roles rather than extending them.

use std::path::{Path, PathBuf};

use mudengine_access::RoleBook;
use mudengine_store::BUILDER_ROOM_ID;
use mudengine_types::RoomId;
use serde::{Deserialize, Serialize};

/// Errors from reading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shown in the welcome banner.
    pub name: String,

    /// Where entering players are placed when they have no valid room.
    pub start_room: RoomId,

    /// Role given to actors that ask for none.
    pub default_role: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: "MUD Engine".to_string(),
            start_room: RoomId::new(BUILDER_ROOM_ID),
            default_role: "player".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// JSON world seed. The built-in starter world is used when unset.
    pub seed_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` filter directive, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub world: WorldConfig,
    pub logging: LoggingConfig,
    pub roles: RoleBook,
}

impl Config {
    /// Reads, parses, and validates a config file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.name.trim().is_empty() {
            return Err(ConfigError::Invalid("engine.name is empty".into()));
        }
        if self.engine.start_room.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid("engine.start_room is empty".into()));
        }
        if self.roles.get(&self.engine.default_role).is_none() {
            return Err(ConfigError::Invalid(format!(
                "engine.default_role {:?} is not defined in [roles]",
                self.engine.default_role
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mudengine_access::{Capability, Grantee};

    #[test]
    fn test_from_toml_str_empty_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.engine.start_room.as_str(), BUILDER_ROOM_ID);
        assert_eq!(config.logging.filter, "info");
        assert!(config.world.seed_path.is_none());
    }

    #[test]
    fn test_from_toml_str_full_document() {
        let config = Config::from_toml_str(
            r#"
            [engine]
            name = "Harbour MUD"
            start_room = "dock"
            default_role = "guest"

            [world]
            seed_path = "data/world.json"

            [logging]
            filter = "mudengine=debug"

            [roles]
            guest = []
            staff = ["admin", "builder"]
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.name, "Harbour MUD");
        assert_eq!(config.engine.start_room, RoomId::new("dock"));
        assert_eq!(config.world.seed_path, Some(PathBuf::from("data/world.json")));
        let staff = config.roles.grants_for(&["staff"]).unwrap();
        assert!(staff.has_all(&[Capability::Admin, Capability::Builder]));
        assert!(config.roles.get("builder").is_none());
    }

    #[test]
    fn test_from_toml_str_unknown_capability_is_parse_error() {
        let err = Config::from_toml_str("[roles]\nplayer = []\nstaff = [\"wizard\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validate_rejects_empty_start_room() {
        let err = Config::from_toml_str("[engine]\nstart_room = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("start_room")));
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let err = Config::from_toml_str("[engine]\nname = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_validate_rejects_undefined_default_role() {
        let err = Config::from_toml_str("[roles]\nstaff = [\"admin\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("default_role")));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_read_error() {
        let err = Config::load("/definitely/not/here.toml").await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
