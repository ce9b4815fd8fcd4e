//! Configuration loading, validation, and management for Agendabot.
//!
//! Loads configuration from `~/.agendabot/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.agendabot/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the agenda is stored
    #[serde(default)]
    pub storage: StorageConfig,

    /// Discord application settings
    #[serde(default)]
    pub discord: DiscordSettings,

    /// HTTP interactions endpoint
    #[serde(default)]
    pub gateway: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the whole agenda
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./agenda.json")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct DiscordSettings {
    /// Bot token (usually from `AGENDABOT_TOKEN` or `TOKEN`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// Application public key, hex-encoded, for interaction signatures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Application the commands are registered under
    #[serde(default = "default_application_id")]
    pub application_id: String,

    /// Guild the commands are scoped to
    #[serde(default = "default_guild_id")]
    pub guild_id: String,
}

fn default_application_id() -> String {
    "1289974998248722483".into()
}
fn default_guild_id() -> String {
    "952541789775085618".into()
}

impl Default for DiscordSettings {
    fn default() -> Self {
        Self {
            bot_token: None,
            public_key: None,
            application_id: default_application_id(),
            guild_id: default_guild_id(),
        }
    }
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for DiscordSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordSettings")
            .field("bot_token", &redact(&self.bot_token))
            .field("public_key", &self.public_key)
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 {
    8787
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.agendabot/config.toml).
    ///
    /// Environment variables take precedence over the file:
    /// - `AGENDABOT_TOKEN`, then `TOKEN` — bot token
    /// - `AGENDABOT_PUBLIC_KEY` — interaction public key
    /// - `AGENDABOT_STORAGE` — agenda file path
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
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

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("AGENDABOT_TOKEN").or_else(|| lookup("TOKEN")) {
            self.discord.bot_token = Some(token);
        }
        if let Some(key) = lookup("AGENDABOT_PUBLIC_KEY") {
            self.discord.public_key = Some(key);
        }
        if let Some(path) = lookup("AGENDABOT_STORAGE") {
            self.storage.path = PathBuf::from(path);
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".agendabot")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.path must not be empty".into(),
            ));
        }

        for (field, value) in [
            ("discord.application_id", &self.discord.application_id),
            ("discord.guild_id", &self.discord.guild_id),
        ] {
            if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
                return Err(ConfigError::ValidationError(format!(
                    "{field} must be a numeric Discord id, got `{value}`"
                )));
            }
        }

        Ok(())
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
