//! Configuration loading, validation, and management for BotSwarm.
//!
//! Loads configuration from `~/.botswarm/playerbot.toml` with environment
//! variable overrides. The resulting [`SwarmConfig`] is built once at startup
//! and passed by reference into every swarm; nothing reads it globally.

use botswarm_core::BotSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file version this build understands.
pub const CONF_VERSION: u32 = 1;

/// Hard ceiling for `collect.distance_max`.
pub const COLLECT_DISTANCE_CEILING: u32 = 100;

/// The root configuration structure.
///
/// Maps directly to `~/.botswarm/playerbot.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmConfig {
    /// Version stamp of the file; a mismatch is logged, not fatal
    #[serde(default)]
    pub conf_version: u32,

    /// Maximum bots one master may have logged in at once
    #[serde(default = "default_max_bots")]
    pub max_bots: u32,

    /// Bots whisper the master when they skip a mirrored action
    #[serde(default)]
    pub debug_whisper: bool,

    /// Liquidate junk when the master opens a vendor
    #[serde(default = "default_true")]
    pub sell_garbage: bool,

    /// Highest character level that may be summoned (host command layer)
    #[serde(default = "default_restrict_bot_level")]
    pub restrict_bot_level: u32,

    /// Turn the bot system off for non-GM accounts (host command layer)
    #[serde(default)]
    pub disable_bots: bool,

    #[serde(default)]
    pub follow_distance: FollowDistanceConfig,

    #[serde(default)]
    pub collect: CollectConfig,
}

fn default_max_bots() -> u32 {
    9
}
fn default_restrict_bot_level() -> u32 {
    80
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowDistanceConfig {
    #[serde(default = "default_follow_min")]
    pub min: f32,

    #[serde(default = "default_follow_max")]
    pub max: f32,
}

fn default_follow_min() -> f32 {
    0.5
}
fn default_follow_max() -> f32 {
    1.0
}

impl Default for FollowDistanceConfig {
    fn default() -> Self {
        Self {
            min: default_follow_min(),
            max: default_follow_max(),
        }
    }
}

/// What bots pick up on their own, and how far they go for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    #[serde(default = "default_true")]
    pub combat: bool,

    #[serde(default = "default_true")]
    pub quest: bool,

    #[serde(default = "default_true")]
    pub profession: bool,

    #[serde(default = "default_true")]
    pub loot: bool,

    #[serde(default = "default_true")]
    pub skin: bool,

    #[serde(default = "default_true")]
    pub objects: bool,

    #[serde(default = "default_collect_distance_max")]
    pub distance_max: u32,

    #[serde(default = "default_collect_distance")]
    pub distance: u32,
}

fn default_collect_distance_max() -> u32 {
    50
}
fn default_collect_distance() -> u32 {
    25
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            combat: true,
            quest: true,
            profession: true,
            loot: true,
            skin: true,
            objects: true,
            distance_max: default_collect_distance_max(),
            distance: default_collect_distance(),
        }
    }
}

impl SwarmConfig {
    /// Load configuration from the default path (~/.botswarm/playerbot.toml).
    ///
    /// Environment overrides:
    /// - `BOTSWARM_MAX_BOTS`
    /// - `BOTSWARM_DEBUG_WHISPER` (`1`/`true` to enable)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_file(&Self::config_path())
    }

    /// Load `path` and apply the same environment overrides as [`SwarmConfig::load`].
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if config.conf_version != CONF_VERSION {
            tracing::error!(
                found = config.conf_version,
                expected = CONF_VERSION,
                "Configuration file version doesn't match expected version. Some config variables may be wrong or missing."
            );
        }

        config.validate()?;
        config.clamp_collect_distances();
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".botswarm")
    }

    /// Default location of the configuration file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("playerbot.toml")
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(max) = std::env::var("BOTSWARM_MAX_BOTS") {
            self.max_bots = max.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("BOTSWARM_MAX_BOTS is not a number: {max}"))
            })?;
        }

        if let Ok(flag) = std::env::var("BOTSWARM_DEBUG_WHISPER") {
            self.debug_whisper = matches!(flag.trim(), "1" | "true" | "yes" | "on");
        }

        Ok(())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        let follow = &self.follow_distance;
        if follow.min < 0.0 || follow.max < 0.0 {
            return Err(ConfigError::ValidationError(
                "follow_distance values must be non-negative".into(),
            ));
        }

        if follow.min > follow.max {
            return Err(ConfigError::ValidationError(
                "follow_distance.min must not exceed follow_distance.max".into(),
            ));
        }

        Ok(())
    }

    /// Pull collect distances back into range, logging each correction.
    fn clamp_collect_distances(&mut self) {
        if self.collect.distance_max > COLLECT_DISTANCE_CEILING {
            tracing::error!(
                "collect.distance_max higher than allowed. Using {}",
                COLLECT_DISTANCE_CEILING
            );
            self.collect.distance_max = COLLECT_DISTANCE_CEILING;
        }

        if self.collect.distance > self.collect.distance_max {
            tracing::error!(
                "collect.distance higher than collect.distance_max. Using distance_max value"
            );
            self.collect.distance = self.collect.distance_max;
        }
    }

    /// The per-bot subset handed to each behavior controller.
    pub fn bot_settings(&self) -> BotSettings {
        BotSettings {
            debug_whisper: self.debug_whisper,
            follow_distance_min: self.follow_distance.min,
            follow_distance_max: self.follow_distance.max,
            collect_combat: self.collect.combat,
            collect_quest: self.collect.quest,
            collect_profession: self.collect.profession,
            collect_loot: self.collect.loot,
            collect_skin: self.collect.skin,
            collect_objects: self.collect.objects,
            collect_distance: self.collect.distance,
            collect_distance_max: self.collect.distance_max,
        }
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            conf_version: CONF_VERSION,
            max_bots: default_max_bots(),
            debug_whisper: false,
            sell_garbage: true,
            restrict_bot_level: default_restrict_bot_level(),
            disable_bots: false,
            follow_distance: FollowDistanceConfig::default(),
            collect: CollectConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
