//! Per-match session configuration
//!
//! Everything the caller knows about a match before its events arrive. All
//! keys are optional in TOML; missing ones fall back to the defaults below.

use std::path::Path;

use chrono::NaiveDate;
use demostats_types::{GameMode, TestType};
use serde::{Deserialize, Serialize};

use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File name of the replay, with or without directory and extension
    pub demo_name: String,
    /// Used when the match-start event carries no map path
    pub map_name: String,
    /// `Unknown` asks the aggregator to infer the mode
    pub game_mode: GameMode,
    pub test_type: TestType,
    pub test_date: Option<NaiveDate>,
    #[serde(default = "crate::serde_defaults::default_true")]
    pub parse_chickens: bool,
    #[serde(default = "crate::serde_defaults::default_true")]
    pub parse_player_positions: bool,
    /// Overrides the per-mode rescue-zone count
    pub hostage_rescue_zone_count: Option<u32>,
    #[serde(default = "crate::serde_defaults::default_overtime_half_length")]
    pub overtime_half_length: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            demo_name: String::new(),
            map_name: String::new(),
            game_mode: GameMode::Unknown,
            test_type: TestType::Casual,
            test_date: None,
            parse_chickens: true,
            parse_player_positions: true,
            hostage_rescue_zone_count: None,
            overtime_half_length: crate::serde_defaults::default_overtime_half_length(),
        }
    }
}

impl SessionConfig {
    pub fn new(demo_name: impl Into<String>, game_mode: GameMode, test_type: TestType) -> Self {
        Self {
            demo_name: demo_name.into(),
            game_mode,
            test_type,
            ..Default::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), demo = %config.demo_name, "Loaded session config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overtime_half_length == 0 {
            return Err(ConfigError::Invalid {
                field: "overtime_half_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(count) = self.hostage_rescue_zone_count
            && count > 2
        {
            return Err(ConfigError::Invalid {
                field: "hostage_rescue_zone_count",
                reason: format!("{count} rescue zones, at most 2 are tracked"),
            });
        }
        Ok(())
    }

    /// Rescue zones the decoder should look for: survival 2, hostage 1, otherwise none
    pub fn rescue_zone_count(&self) -> u32 {
        self.hostage_rescue_zone_count.unwrap_or(match self.game_mode {
            GameMode::DangerZone => 2,
            GameMode::Hostage => 1,
            _ => 0,
        })
    }

    /// Demo name without directories or the `.dem` extension
    pub fn demo_stem(&self) -> String {
        let file = self
            .demo_name
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(&self.demo_name);
        file.replace(".dem", "")
    }
}
